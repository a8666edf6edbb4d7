//! Persistence across app launches: records, sessions and redemptions
//! survive a database reopen.

use std::sync::Arc;

use wastelens::records::{DisposalCategory, ScanRecord, WasteType};
use wastelens::rewards::ShippingAddress;
use wastelens::session::Session;
use wastelens::storage::kv::KvStore;
use wastelens::storage::Database;
use wastelens::tracker::WasteTracker;

fn scan(weight: f64) -> ScanRecord {
    ScanRecord::new(
        WasteType::Glass,
        DisposalCategory::Recycling,
        weight,
        true,
        false,
    )
}

fn valid_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Casey Morgan".to_string(),
        address_line1: "9 Willow Court".to_string(),
        address_line2: Some("Apt 3".to_string()),
        city: "Denver".to_string(),
        state: "CO".to_string(),
        zip_code: "80202".to_string(),
        country: "USA".to_string(),
        phone_number: None,
    }
}

#[test]
fn test_records_survive_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wastelens.db");

    {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut tracker = WasteTracker::new(db, Session::authenticated("user-1")).unwrap();
        tracker.add_record(scan(80.0)).unwrap();
        tracker.add_record(scan(120.0)).unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    let tracker = WasteTracker::new(db, Session::authenticated("user-1")).unwrap();
    assert_eq!(tracker.records().len(), 2);
    assert_eq!(tracker.stats().total_weight_grams, 200.0);
}

#[test]
fn test_anonymous_session_is_stable_and_adoptable() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wastelens.db");

    // First launch: anonymous session scans an item
    let anon_owner = {
        let db = Arc::new(Database::open(&path).unwrap());
        let kv = KvStore::new(db.clone());
        let session = Session::resolve(&kv).unwrap();
        let owner = session.owner().clone();
        let mut tracker = WasteTracker::new(db, session).unwrap();
        tracker.add_record(scan(60.0)).unwrap();
        owner
    };

    // Second launch: same anonymous id comes back, then sign-in adopts
    let db = Arc::new(Database::open(&path).unwrap());
    let kv = KvStore::new(db.clone());
    let session = Session::resolve(&kv).unwrap();
    assert_eq!(session.owner(), &anon_owner);

    let mut tracker = WasteTracker::new(db, session).unwrap();
    assert_eq!(tracker.records().len(), 1);

    let adopted = tracker.sign_in("user-7").unwrap();
    assert_eq!(adopted, 1);
    assert!(!tracker.session().owner().is_anonymous());
    assert_eq!(tracker.records().len(), 1);
    assert_eq!(tracker.stats().total_weight_grams, 60.0);
}

#[test]
fn test_redemption_history_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wastelens.db");

    {
        let db = Arc::new(Database::open(&path).unwrap());
        let mut tracker = WasteTracker::new(db, Session::authenticated("user-1")).unwrap();
        for _ in 0..10 {
            tracker.add_record(scan(300.0)).unwrap();
        }

        let balance = tracker.points().unwrap().current_balance;
        let mut flow = tracker.begin_redemption("seed-kit").unwrap();
        flow.proceed_to_address(balance).unwrap();
        flow.submit_address(valid_address()).unwrap();
        tracker.confirm_redemption(flow).unwrap();
    }

    let db = Arc::new(Database::open(&path).unwrap());
    let tracker = WasteTracker::new(db, Session::authenticated("user-1")).unwrap();

    let redemptions = tracker.redemptions().unwrap();
    assert_eq!(redemptions.len(), 1);
    assert_eq!(redemptions[0].reward_id, "seed-kit");
    assert_eq!(redemptions[0].points_cost, 100);
    assert_eq!(tracker.points().unwrap().total_spent, 100);
}
