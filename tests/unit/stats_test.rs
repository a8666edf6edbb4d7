//! Unit tests for the stats aggregator: determinism, clamping, and the
//! streak walk.

use chrono::{DateTime, Duration, Utc};
use wastelens::records::{DisposalCategory, ScanRecord, WasteType};
use wastelens::stats::{AggregateStats, QuestCounters};

fn record_days_ago(days: i64, weight: f64, now: DateTime<Utc>) -> ScanRecord {
    let mut record = ScanRecord::new(
        WasteType::Paper,
        DisposalCategory::Recycling,
        weight,
        true,
        false,
    );
    record.timestamp = now - Duration::days(days);
    record
}

#[test]
fn test_recompute_twice_yields_identical_output() {
    let now = Utc::now();
    let records = vec![
        record_days_ago(0, 30.0, now),
        record_days_ago(1, 45.0, now),
        record_days_ago(12, 60.0, now),
    ];
    assert_eq!(
        AggregateStats::recompute(&records, now),
        AggregateStats::recompute(&records, now)
    );
}

#[test]
fn test_empty_collection_yields_zeroes_with_all_keys() {
    let stats = AggregateStats::recompute(&[], Utc::now());

    assert_eq!(stats.total_weight_grams, 0.0);
    assert_eq!(stats.weekly_weight_grams, 0.0);
    assert_eq!(stats.monthly_weight_grams, 0.0);
    assert_eq!(stats.composting_rate_pct, 0.0);
    assert_eq!(stats.streak_days, 0);
    assert_eq!(stats.co2_saved_kg, 0.0);

    for ty in WasteType::ALL {
        assert_eq!(stats.waste_by_type.get(&ty), Some(&0.0), "missing {ty}");
    }
    for cat in DisposalCategory::ALL {
        assert_eq!(stats.waste_by_category.get(&cat), Some(&0.0), "missing {cat}");
    }
}

#[test]
fn test_composting_rate_stays_in_range_under_adversarial_input() {
    let now = Utc::now();

    // All-compostable collection: rate is exactly 100, not above
    let mut all_compost = record_days_ago(0, 500.0, now);
    all_compost.compostable = true;
    let stats = AggregateStats::recompute(&[all_compost], now);
    assert_eq!(stats.composting_rate_pct, 100.0);

    // NaN and negative weights must not poison the rate
    let mut nan_weight = record_days_ago(0, 100.0, now);
    nan_weight.weight_grams = f64::NAN;
    nan_weight.compostable = true;
    let mut negative = record_days_ago(0, 100.0, now);
    negative.weight_grams = -40.0;
    negative.compostable = true;

    let stats = AggregateStats::recompute(&[nan_weight, negative], now);
    assert!(stats.composting_rate_pct.is_finite());
    assert!((0.0..=100.0).contains(&stats.composting_rate_pct));
    assert!(stats.total_weight_grams >= 0.0);
}

#[test]
fn test_streak_breaks_on_first_empty_day() {
    let now = Utc::now();
    let records = vec![
        record_days_ago(0, 10.0, now),
        record_days_ago(1, 10.0, now),
        // no scan two days ago
        record_days_ago(3, 10.0, now),
        record_days_ago(4, 10.0, now),
    ];
    let stats = AggregateStats::recompute(&records, now);
    assert_eq!(stats.streak_days, 2);
}

#[test]
fn test_streak_caps_at_thirty_days() {
    let now = Utc::now();
    let records: Vec<_> = (0..45).map(|d| record_days_ago(d, 5.0, now)).collect();
    let stats = AggregateStats::recompute(&records, now);
    assert_eq!(stats.streak_days, 30);
}

#[test]
fn test_multiple_scans_one_day_count_once_for_streak() {
    let now = Utc::now();
    let records = vec![
        record_days_ago(0, 10.0, now),
        record_days_ago(0, 20.0, now),
        record_days_ago(0, 30.0, now),
    ];
    let stats = AggregateStats::recompute(&records, now);
    assert_eq!(stats.streak_days, 1);
}

#[test]
fn test_quest_counters_match_collection() {
    let now = Utc::now();
    let records = vec![
        record_days_ago(0, 40.0, now),
        record_days_ago(0, 70.0, now),
        record_days_ago(2, 90.0, now),
    ];
    let counters = QuestCounters::compute(&records, now);
    assert_eq!(counters.scans_today, 2);
    assert_eq!(counters.recyclable_today, 2);
    assert_eq!(counters.grams_today, 110.0);
    assert_eq!(counters.lifetime_scans, 3);
    assert_eq!(counters.lifetime_grams, 200.0);
}
