//! Full-recompute statistics rollup.
//!
//! Stats are a pure derivation of the scan-record collection: every
//! mutation triggers an O(n) recompute, and no incremental counter is
//! ever authoritative. That trades a little CPU for rollups that can
//! never drift from the records they summarize.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{DisposalCategory, ScanRecord, WasteType};

/// Maximum number of calendar days the streak walk looks back.
const STREAK_LOOKBACK_DAYS: u32 = 30;

/// CO2 credit in kg per gram for compostable items without an analysis.
const COMPOST_CO2_KG_PER_GRAM: f64 = 0.0005;

/// Rollup statistics over the whole scan collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Total weight scanned, in grams
    pub total_weight_grams: f64,
    /// Weight scanned in the last 7 days
    pub weekly_weight_grams: f64,
    /// Weight scanned in the last 30 days
    pub monthly_weight_grams: f64,
    /// Share of total weight that was compostable, 0-100
    pub composting_rate_pct: f64,
    /// Consecutive local calendar days with at least one scan
    pub streak_days: u32,
    /// Estimated CO2 saved, in kilograms
    pub co2_saved_kg: f64,
    /// Weight per waste type; every type is present, default 0
    pub waste_by_type: HashMap<WasteType, f64>,
    /// Weight per disposal category; every category is present, default 0
    pub waste_by_category: HashMap<DisposalCategory, f64>,
}

impl AggregateStats {
    /// All-zero stats with every enum key present.
    pub fn empty() -> Self {
        Self {
            total_weight_grams: 0.0,
            weekly_weight_grams: 0.0,
            monthly_weight_grams: 0.0,
            composting_rate_pct: 0.0,
            streak_days: 0,
            co2_saved_kg: 0.0,
            waste_by_type: WasteType::ALL.iter().map(|t| (*t, 0.0)).collect(),
            waste_by_category: DisposalCategory::ALL.iter().map(|c| (*c, 0.0)).collect(),
        }
    }

    /// Recompute the rollup from scratch.
    ///
    /// Records failing basic sanity checks (negative or NaN weight) are
    /// excluded with a warning rather than failing the whole rollup.
    /// Calendar-day bucketing uses the device's local day boundaries.
    pub fn recompute(records: &[ScanRecord], now: DateTime<Utc>) -> Self {
        let mut stats = Self::empty();
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let mut compostable_weight = 0.0f64;
        let mut scan_days: HashSet<NaiveDate> = HashSet::new();

        for record in records {
            if !record.is_sane() {
                tracing::warn!(
                    record_id = %record.id,
                    weight = record.weight_grams,
                    "excluding malformed record from stats rollup"
                );
                continue;
            }

            let weight = record.weight_grams;
            stats.total_weight_grams += weight;
            if record.timestamp >= week_ago {
                stats.weekly_weight_grams += weight;
            }
            if record.timestamp >= month_ago {
                stats.monthly_weight_grams += weight;
            }
            if record.compostable {
                compostable_weight += weight;
            }

            stats.co2_saved_kg += co2_for_record(record);

            *stats.waste_by_type.entry(record.waste_type).or_insert(0.0) += weight;
            *stats
                .waste_by_category
                .entry(record.disposal_category)
                .or_insert(0.0) += weight;

            scan_days.insert(local_date(record.timestamp));
        }

        stats.composting_rate_pct = if stats.total_weight_grams > 0.0 {
            (compostable_weight / stats.total_weight_grams * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        stats.co2_saved_kg = stats.co2_saved_kg.max(0.0);
        stats.streak_days = streak_from_days(&scan_days, local_date(now));

        stats
    }
}

/// CO2 estimate for one record.
///
/// Uses the model's carbon footprint when present; otherwise credits
/// compostable items at a fixed rate per gram.
fn co2_for_record(record: &ScanRecord) -> f64 {
    match &record.analysis {
        Some(analysis) if analysis.carbon_footprint_kg.is_finite() => {
            analysis.carbon_footprint_kg.max(0.0)
        }
        Some(_) => 0.0,
        None if record.compostable => record.weight_grams * COMPOST_CO2_KG_PER_GRAM,
        None => 0.0,
    }
}

/// Local calendar date for a timestamp.
fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

/// Count consecutive scan days walking backward from today.
///
/// Stops at the first day with no scans; capped at the lookback window.
fn streak_from_days(scan_days: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0u32;
    let mut day = today;

    for _ in 0..STREAK_LOOKBACK_DAYS {
        if !scan_days.contains(&day) {
            break;
        }
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }

    streak
}

/// Same-day and same-week counters feeding quest evaluation.
///
/// Derived from the same record collection as [`AggregateStats`], so
/// quest progress can never disagree with the rollup it sits next to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestCounters {
    /// Scans logged today (local calendar day)
    pub scans_today: u32,
    /// Recyclable scans logged today
    pub recyclable_today: u32,
    /// Grams scanned today
    pub grams_today: f64,
    /// Distinct waste types scanned in the last 7 days
    pub distinct_types_week: u32,
    /// Average environment score over the last 7 days (0 when no analyses)
    pub avg_environment_score_week: f64,
    /// Current scan streak in days
    pub streak_days: u32,
    /// Lifetime scan count
    pub lifetime_scans: u32,
    /// Lifetime grams scanned
    pub lifetime_grams: f64,
}

impl QuestCounters {
    /// Derive the counters from the full record collection.
    pub fn compute(records: &[ScanRecord], now: DateTime<Utc>) -> Self {
        let today = local_date(now);
        let week_ago = now - Duration::days(7);

        let mut counters = Self::default();
        let mut week_types: HashSet<WasteType> = HashSet::new();
        let mut week_score_sum = 0.0f64;
        let mut week_score_count = 0u32;
        let mut scan_days: HashSet<NaiveDate> = HashSet::new();

        for record in records {
            if !record.is_sane() {
                continue;
            }

            counters.lifetime_scans += 1;
            counters.lifetime_grams += record.weight_grams;
            scan_days.insert(local_date(record.timestamp));

            if local_date(record.timestamp) == today {
                counters.scans_today += 1;
                counters.grams_today += record.weight_grams;
                if record.recyclable {
                    counters.recyclable_today += 1;
                }
            }

            if record.timestamp >= week_ago {
                week_types.insert(record.waste_type);
                if let Some(analysis) = &record.analysis {
                    week_score_sum += analysis.environment_score.clamp(1, 10) as f64;
                    week_score_count += 1;
                }
            }
        }

        counters.distinct_types_week = week_types.len() as u32;
        counters.avg_environment_score_week = if week_score_count > 0 {
            week_score_sum / week_score_count as f64
        } else {
            0.0
        };
        counters.streak_days = streak_from_days(&scan_days, today);

        counters
    }
}
