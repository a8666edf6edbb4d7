//! End-to-end scan pipeline: records in, stats, quests and points out.

use std::sync::Arc;

use wastelens::records::{DisposalCategory, ScanRecord, WasteType};
use wastelens::session::Session;
use wastelens::storage::Database;
use wastelens::tracker::WasteTracker;

fn tracker() -> WasteTracker {
    let db = Arc::new(Database::open_in_memory().unwrap());
    WasteTracker::new(db, Session::authenticated("user-1")).unwrap()
}

#[test]
fn test_three_scans_roll_up_into_stats_and_quests() {
    let mut tracker = tracker();

    tracker
        .add_record(ScanRecord::new(
            WasteType::Plastic,
            DisposalCategory::Recycling,
            30.0,
            true,
            false,
        ))
        .unwrap();
    tracker
        .add_record(ScanRecord::new(
            WasteType::Food,
            DisposalCategory::Composting,
            40.0,
            false,
            true,
        ))
        .unwrap();
    tracker
        .add_record(ScanRecord::new(
            WasteType::Ceramics,
            DisposalCategory::Landfill,
            50.0,
            false,
            false,
        ))
        .unwrap();

    let stats = tracker.stats();
    assert_eq!(stats.total_weight_grams, 120.0);
    assert_eq!(stats.weekly_weight_grams, 120.0);
    assert_eq!(stats.monthly_weight_grams, 120.0);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.waste_by_type[&WasteType::Plastic], 30.0);
    assert_eq!(stats.waste_by_category[&DisposalCategory::Composting], 40.0);

    let scanner = tracker
        .quests()
        .iter()
        .find(|q| q.title == "Daily Scanner")
        .unwrap();
    assert_eq!(scanner.progress, 3.0);
    assert!(scanner.completed);

    let recycling = tracker
        .quests()
        .iter()
        .find(|q| q.title == "Recycling Hero")
        .unwrap();
    assert_eq!(recycling.progress, 1.0);
    assert!(!recycling.completed);
}

#[test]
fn test_points_balance_follows_the_collection() {
    let mut tracker = tracker();
    assert_eq!(tracker.points().unwrap().current_balance, 0);

    // 100 g recyclable plastic: 10 base + 5 recyclable + 2 type
    let record = ScanRecord::new(
        WasteType::Plastic,
        DisposalCategory::Recycling,
        100.0,
        true,
        false,
    );
    let id = record.id;
    tracker.add_record(record).unwrap();

    let points = tracker.points().unwrap();
    // 17 from the scan + 0 streak bonus (1-day streak)
    assert_eq!(points.total_earned, 17);
    assert_eq!(points.current_balance, 17);
    assert_eq!(points.rank, "Eco Beginner");

    // Deleting the record re-derives the totals from scratch
    assert!(tracker.remove_record(id).unwrap());
    assert_eq!(tracker.points().unwrap().total_earned, 0);
}

#[test]
fn test_redemption_pipeline_spends_points_once() {
    let mut tracker = tracker();
    for _ in 0..20 {
        tracker
            .add_record(ScanRecord::new(
                WasteType::Electronic,
                DisposalCategory::Recycling,
                500.0,
                true,
                false,
            ))
            .unwrap();
    }

    let before = tracker.points().unwrap();
    let cheapest = tracker
        .catalog()
        .into_iter()
        .min_by_key(|r| r.points_cost)
        .unwrap();
    assert!(before.current_balance >= cheapest.points_cost);

    let mut flow = tracker.begin_redemption(&cheapest.id).unwrap();
    flow.proceed_to_address(before.current_balance).unwrap();
    flow.submit_address(wastelens::rewards::ShippingAddress {
        full_name: "Sam Okafor".to_string(),
        address_line1: "7 Birch Lane".to_string(),
        address_line2: None,
        city: "Austin".to_string(),
        state: "TX".to_string(),
        zip_code: "73301".to_string(),
        country: "USA".to_string(),
        phone_number: None,
    })
    .unwrap();
    tracker.confirm_redemption(flow).unwrap();

    let after = tracker.points().unwrap();
    assert_eq!(after.total_spent, cheapest.points_cost);
    assert_eq!(
        after.current_balance,
        before.current_balance - cheapest.points_cost
    );
    assert_eq!(tracker.redemptions().unwrap().len(), 1);
}
