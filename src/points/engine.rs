//! Pure scoring functions.
//!
//! Every function here is deterministic and side-effect free: the same
//! record always earns the same points, so totals can be re-derived
//! from the record collection at any time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::records::{ScanRecord, WasteType};

/// Minimum points awarded for any scan.
const MIN_SCAN_POINTS: u32 = 3;

/// Points earned for one scan record.
///
/// Base is one point per 10 g, plus flat bonuses for recyclable (+5)
/// and compostable (+8) items and a per-type bonus, then scaled up by
/// the environment score when an analysis is present. Never below 3.
pub fn points_for_scan(record: &ScanRecord) -> u32 {
    let weight = if record.weight_grams.is_finite() {
        record.weight_grams.max(0.0)
    } else {
        0.0
    };

    let mut points = (weight / 10.0).floor() as i64;

    if record.recyclable {
        points += 5;
    }
    if record.compostable {
        points += 8;
    }

    points += type_bonus(record.waste_type) as i64;

    if let Some(analysis) = &record.analysis {
        let score = analysis.environment_score.clamp(1, 10) as f64;
        points = (points as f64 * (1.0 + (score / 10.0) * 0.5)).floor() as i64;
    }

    (points.max(MIN_SCAN_POINTS as i64)) as u32
}

/// Flat bonus for the waste type. Hard-to-dispose items pay more.
fn type_bonus(waste_type: WasteType) -> u32 {
    match waste_type {
        WasteType::Electronic => 15,
        WasteType::Batteries => 12,
        WasteType::Hazardous => 20,
        WasteType::Textile => 8,
        WasteType::PlasticFilm => 6,
        _ => 2,
    }
}

/// Bonus points for a scanning streak, stepped by streak length.
pub fn streak_bonus(streak_days: u32) -> u32 {
    match streak_days {
        0..=2 => 0,
        3..=6 => 5,
        7..=13 => 10,
        14..=29 => 20,
        _ => 30,
    }
}

/// Rank title for a lifetime point total. Boundaries take the higher tier.
pub fn rank_for_points(lifetime_points: u32) -> &'static str {
    match lifetime_points {
        0..=99 => "Eco Beginner",
        100..=499 => "Waste Warrior",
        500..=999 => "Green Guardian",
        1000..=2499 => "Sustainability Star",
        2500..=4999 => "Environmental Expert",
        5000..=9999 => "Planet Protector",
        _ => "Eco Legend",
    }
}

/// Derived points summary for a user.
///
/// Recomputed from the record collection plus the redemption history;
/// never stored as an authoritative counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPoints {
    /// Lifetime points earned (scans + streak bonus)
    pub total_earned: u32,
    /// Points earned from scans in the last 7 days
    pub weekly_earned: u32,
    /// Points earned from scans in the last 30 days
    pub monthly_earned: u32,
    /// Points spent on completed redemptions
    pub total_spent: u32,
    /// Spendable balance
    pub current_balance: u32,
    /// Rank title derived from lifetime earnings
    pub rank: String,
}

impl UserPoints {
    /// Compute the summary from the full record collection.
    ///
    /// The weekly and monthly figures are true time-windowed sums over
    /// per-record timestamps. The streak bonus counts toward lifetime
    /// earnings only, since it is not attributable to a window.
    pub fn compute(
        records: &[ScanRecord],
        streak_days: u32,
        total_spent: u32,
        now: DateTime<Utc>,
    ) -> Self {
        let week_ago = now - Duration::days(7);
        let month_ago = now - Duration::days(30);

        let mut total = 0u32;
        let mut weekly = 0u32;
        let mut monthly = 0u32;

        for record in records {
            let points = points_for_scan(record);
            total = total.saturating_add(points);
            if record.timestamp >= week_ago {
                weekly = weekly.saturating_add(points);
            }
            if record.timestamp >= month_ago {
                monthly = monthly.saturating_add(points);
            }
        }

        total = total.saturating_add(streak_bonus(streak_days));

        Self {
            total_earned: total,
            weekly_earned: weekly,
            monthly_earned: monthly,
            total_spent,
            current_balance: total.saturating_sub(total_spent),
            rank: rank_for_points(total).to_string(),
        }
    }
}
