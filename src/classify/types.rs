//! Classification result types and the strict parse boundary.
//!
//! The vision endpoint returns loosely-shaped JSON; nothing crosses
//! into the domain without passing `AnalysisResult::from_value`, which
//! checks every required field and numeric range. Malformed responses
//! become a typed error, never a trusted cast.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::records::AiAnalysis;

/// Classification errors.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationError {
    #[error("classification service unreachable")]
    Offline,

    #[error("classification API error: {0}")]
    Api(String),

    #[error("invalid classification response: {}", problems.join("; "))]
    InvalidResponse { problems: Vec<String> },

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// A validated vision-model classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub item_name: String,
    pub quantity: u32,
    pub weight_grams: f64,
    pub material: String,
    /// 1 (worst) to 10 (best)
    pub environment_score: u8,
    pub recyclable: bool,
    pub compostable: bool,
    pub carbon_footprint_kg: f64,
    pub suggestions: Vec<String>,
    /// 0.0 to 1.0
    pub confidence: f64,
}

impl AnalysisResult {
    /// Parse and validate a raw response payload.
    ///
    /// All ten fields are required; numeric fields must be in range.
    /// Every violation is collected so the caller sees the full list.
    pub fn from_value(value: &Value) -> Result<Self, ClassificationError> {
        let mut problems = Vec::new();

        let item_name = required_string(value, "item_name", &mut problems);
        let material = required_string(value, "material", &mut problems);
        let quantity = required_u64(value, "quantity", &mut problems);
        let weight_grams = required_f64(value, "weight_grams", &mut problems);
        let environment_score = required_u64(value, "environment_score", &mut problems);
        let recyclable = required_bool(value, "recyclable", &mut problems);
        let compostable = required_bool(value, "compostable", &mut problems);
        let carbon_footprint_kg = required_f64(value, "carbon_footprint_kg", &mut problems);
        let confidence = required_f64(value, "confidence", &mut problems);
        let suggestions = required_string_array(value, "suggestions", &mut problems);

        if let Some(q) = quantity {
            if q < 1 {
                problems.push("quantity must be at least 1".to_string());
            }
        }
        if let Some(w) = weight_grams {
            if !w.is_finite() || w < 0.0 {
                problems.push("weight_grams must be non-negative".to_string());
            }
        }
        if let Some(score) = environment_score {
            if !(1..=10).contains(&score) {
                problems.push("environment_score must be between 1 and 10".to_string());
            }
        }
        if let Some(c) = confidence {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                problems.push("confidence must be between 0 and 1".to_string());
            }
        }
        if let Some(kg) = carbon_footprint_kg {
            if !kg.is_finite() {
                problems.push("carbon_footprint_kg must be a finite number".to_string());
            }
        }

        if !problems.is_empty() {
            return Err(ClassificationError::InvalidResponse { problems });
        }

        // Unwraps below cannot fire: a missing field already pushed a problem.
        Ok(Self {
            item_name: item_name.unwrap_or_default(),
            quantity: quantity.unwrap_or(1) as u32,
            weight_grams: weight_grams.unwrap_or(0.0),
            material: material.unwrap_or_default(),
            environment_score: environment_score.unwrap_or(1) as u8,
            recyclable: recyclable.unwrap_or(false),
            compostable: compostable.unwrap_or(false),
            carbon_footprint_kg: carbon_footprint_kg.unwrap_or(0.0),
            suggestions: suggestions.unwrap_or_default(),
            confidence: confidence.unwrap_or(0.0),
        })
    }

    /// The analysis slice of this result, for attaching to a record.
    pub fn to_analysis(&self) -> AiAnalysis {
        AiAnalysis {
            material: self.material.clone(),
            environment_score: self.environment_score,
            confidence: self.confidence,
            carbon_footprint_kg: self.carbon_footprint_kg,
            suggestions: self.suggestions.clone(),
        }
    }
}

/// Fixed low-confidence substitute shown when classification fails,
/// so the user is never blocked by a model outage.
pub fn fallback_analysis() -> AnalysisResult {
    AnalysisResult {
        item_name: "Unidentified item".to_string(),
        quantity: 1,
        weight_grams: 50.0,
        material: "unknown".to_string(),
        environment_score: 5,
        recyclable: false,
        compostable: false,
        carbon_footprint_kg: 0.0,
        suggestions: vec!["Check local disposal guidelines".to_string()],
        confidence: 0.1,
    }
}

fn required_string(value: &Value, key: &str, problems: &mut Vec<String>) -> Option<String> {
    match value.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Some(s.to_string()),
        Some(_) => {
            problems.push(format!("{key} must not be empty"));
            None
        }
        None => {
            problems.push(format!("missing field: {key}"));
            None
        }
    }
}

fn required_u64(value: &Value, key: &str, problems: &mut Vec<String>) -> Option<u64> {
    match value.get(key).and_then(Value::as_u64) {
        Some(n) => Some(n),
        None => {
            problems.push(format!("missing or non-integer field: {key}"));
            None
        }
    }
}

fn required_f64(value: &Value, key: &str, problems: &mut Vec<String>) -> Option<f64> {
    match value.get(key).and_then(Value::as_f64) {
        Some(n) => Some(n),
        None => {
            problems.push(format!("missing or non-numeric field: {key}"));
            None
        }
    }
}

fn required_bool(value: &Value, key: &str, problems: &mut Vec<String>) -> Option<bool> {
    match value.get(key).and_then(Value::as_bool) {
        Some(b) => Some(b),
        None => {
            problems.push(format!("missing or non-boolean field: {key}"));
            None
        }
    }
}

fn required_string_array(
    value: &Value,
    key: &str,
    problems: &mut Vec<String>,
) -> Option<Vec<String>> {
    match value.get(key).and_then(Value::as_array) {
        Some(items) => {
            let strings: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
            if strings.len() == items.len() {
                Some(strings)
            } else {
                problems.push(format!("{key} must be an array of strings"));
                None
            }
        }
        None => {
            problems.push(format!("missing or non-array field: {key}"));
            None
        }
    }
}
