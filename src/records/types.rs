//! Core types for scan records.
//!
//! A scan record is one photographed-and-classified waste item. Records
//! are immutable once created; the UI models edits as delete + recreate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of waste material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WasteType {
    Food,
    Plastic,
    Paper,
    Glass,
    Metal,
    Electronic,
    Textile,
    Organic,
    Hazardous,
    PlasticFilm,
    Batteries,
    LightBulbs,
    Paint,
    Ceramics,
    ChipBags,
    Other,
}

impl WasteType {
    /// Every waste type, for exhaustive keying of per-type rollups.
    pub const ALL: [WasteType; 16] = [
        WasteType::Food,
        WasteType::Plastic,
        WasteType::Paper,
        WasteType::Glass,
        WasteType::Metal,
        WasteType::Electronic,
        WasteType::Textile,
        WasteType::Organic,
        WasteType::Hazardous,
        WasteType::PlasticFilm,
        WasteType::Batteries,
        WasteType::LightBulbs,
        WasteType::Paint,
        WasteType::Ceramics,
        WasteType::ChipBags,
        WasteType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::Food => "food",
            WasteType::Plastic => "plastic",
            WasteType::Paper => "paper",
            WasteType::Glass => "glass",
            WasteType::Metal => "metal",
            WasteType::Electronic => "electronic",
            WasteType::Textile => "textile",
            WasteType::Organic => "organic",
            WasteType::Hazardous => "hazardous",
            WasteType::PlasticFilm => "plastic_film",
            WasteType::Batteries => "batteries",
            WasteType::LightBulbs => "light_bulbs",
            WasteType::Paint => "paint",
            WasteType::Ceramics => "ceramics",
            WasteType::ChipBags => "chip_bags",
            WasteType::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "food" => Some(WasteType::Food),
            "plastic" => Some(WasteType::Plastic),
            "paper" => Some(WasteType::Paper),
            "glass" => Some(WasteType::Glass),
            "metal" => Some(WasteType::Metal),
            "electronic" => Some(WasteType::Electronic),
            "textile" => Some(WasteType::Textile),
            "organic" => Some(WasteType::Organic),
            "hazardous" => Some(WasteType::Hazardous),
            "plastic_film" => Some(WasteType::PlasticFilm),
            "batteries" => Some(WasteType::Batteries),
            "light_bulbs" => Some(WasteType::LightBulbs),
            "paint" => Some(WasteType::Paint),
            "ceramics" => Some(WasteType::Ceramics),
            "chip_bags" => Some(WasteType::ChipBags),
            "other" => Some(WasteType::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an item should be disposed of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalCategory {
    Recycling,
    Composting,
    Landfill,
    Other,
}

impl DisposalCategory {
    /// Every disposal category, for exhaustive keying of rollups.
    pub const ALL: [DisposalCategory; 4] = [
        DisposalCategory::Recycling,
        DisposalCategory::Composting,
        DisposalCategory::Landfill,
        DisposalCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisposalCategory::Recycling => "recycling",
            DisposalCategory::Composting => "composting",
            DisposalCategory::Landfill => "landfill",
            DisposalCategory::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "recycling" => Some(DisposalCategory::Recycling),
            "composting" => Some(DisposalCategory::Composting),
            "landfill" => Some(DisposalCategory::Landfill),
            "other" => Some(DisposalCategory::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for DisposalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Vision-model analysis attached to a scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    /// Material description (e.g. "PET plastic")
    pub material: String,
    /// Environmental impact score, 1 (worst) to 10 (best)
    pub environment_score: u8,
    /// Model confidence in the classification, 0.0 to 1.0
    pub confidence: f64,
    /// Estimated carbon footprint of the item in kilograms
    pub carbon_footprint_kg: f64,
    /// Disposal suggestions for the user
    pub suggestions: Vec<String>,
}

/// One classified waste item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Unique identifier
    pub id: Uuid,
    /// Waste material category
    pub waste_type: WasteType,
    /// Disposal route for the item
    pub disposal_category: DisposalCategory,
    /// Item weight in grams (never negative)
    pub weight_grams: f64,
    /// Whether the item can be recycled
    pub recyclable: bool,
    /// Whether the item can be composted
    pub compostable: bool,
    /// When the scan happened
    pub timestamp: DateTime<Utc>,
    /// Optional vision-model analysis
    pub analysis: Option<AiAnalysis>,
}

impl ScanRecord {
    /// Create a new scan record timestamped now.
    ///
    /// Negative weights are clamped to zero so the `weight_grams >= 0`
    /// invariant holds at construction.
    pub fn new(
        waste_type: WasteType,
        disposal_category: DisposalCategory,
        weight_grams: f64,
        recyclable: bool,
        compostable: bool,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            waste_type,
            disposal_category,
            weight_grams: weight_grams.max(0.0),
            recyclable,
            compostable,
            timestamp: Utc::now(),
            analysis: None,
        }
    }

    /// Attach a vision-model analysis.
    pub fn with_analysis(mut self, analysis: AiAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    /// Whether the record passes basic sanity checks for aggregation.
    pub fn is_sane(&self) -> bool {
        self.weight_grams.is_finite() && self.weight_grams >= 0.0
    }
}
