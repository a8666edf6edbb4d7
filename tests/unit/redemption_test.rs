//! Redemption flow tests over the public API: the affordability gate,
//! address validation, and the no-side-effects-until-confirm contract.

use chrono::Utc;
use wastelens::rewards::{
    default_rewards, RedemptionError, RedemptionFlow, RedemptionStatus, RedemptionStep, Reward,
    RewardCategory, ShippingAddress,
};

fn test_reward(points_cost: u32, in_stock: u32) -> Reward {
    Reward {
        id: "test-reward".to_string(),
        title: "Test Reward".to_string(),
        description: "A reward used only in tests".to_string(),
        points_cost,
        category: RewardCategory::Lifestyle,
        in_stock,
        estimated_delivery: "5-7 business days".to_string(),
        features: vec![],
        popularity: 3,
    }
}

fn valid_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Jordan Rivera".to_string(),
        address_line1: "42 Elm Street".to_string(),
        address_line2: None,
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip_code: "62704".to_string(),
        country: "USA".to_string(),
        phone_number: Some("555-867-5309".to_string()),
    }
}

#[test]
fn test_insufficient_points_reports_amounts() {
    let mut flow = RedemptionFlow::new(test_reward(500, 5));
    match flow.proceed_to_address(499) {
        Err(RedemptionError::InsufficientPoints { needed, available }) => {
            assert_eq!(needed, 500);
            assert_eq!(available, 499);
        }
        other => panic!("expected InsufficientPoints, got {other:?}"),
    }
    assert_eq!(flow.step(), RedemptionStep::Details);
}

#[test]
fn test_exact_balance_is_enough() {
    let mut flow = RedemptionFlow::new(test_reward(500, 5));
    flow.proceed_to_address(500).unwrap();
    assert_eq!(flow.step(), RedemptionStep::Address);
}

#[test]
fn test_out_of_stock_blocks_even_a_rich_balance() {
    let mut flow = RedemptionFlow::new(test_reward(100, 0));
    assert!(matches!(
        flow.proceed_to_address(10_000),
        Err(RedemptionError::OutOfStock)
    ));
    assert_eq!(flow.step(), RedemptionStep::Details);
}

#[test]
fn test_all_address_problems_reported_at_once() {
    let mut flow = RedemptionFlow::new(test_reward(100, 5));
    flow.proceed_to_address(200).unwrap();

    let address = ShippingAddress {
        zip_code: "1234".to_string(),
        ..ShippingAddress::default()
    };

    match flow.submit_address(address) {
        Err(RedemptionError::InvalidAddress { errors }) => {
            assert!(errors.contains(&"Full name is required".to_string()));
            assert!(errors.contains(&"Address line 1 is required".to_string()));
            assert!(errors.contains(&"City is required".to_string()));
            assert!(errors.contains(&"State is required".to_string()));
            assert!(errors.contains(&"ZIP code must be 12345 or 12345-6789".to_string()));
            assert!(errors.contains(&"Country is required".to_string()));
        }
        other => panic!("expected InvalidAddress, got {other:?}"),
    }
    assert_eq!(flow.step(), RedemptionStep::Address);
}

#[test]
fn test_missing_phone_is_not_an_error() {
    let mut flow = RedemptionFlow::new(test_reward(100, 5));
    flow.proceed_to_address(200).unwrap();

    let mut address = valid_address();
    address.phone_number = None;
    flow.submit_address(address).unwrap();
    assert_eq!(flow.step(), RedemptionStep::Confirmation);
}

#[test]
fn test_bad_phone_is_rejected() {
    let mut flow = RedemptionFlow::new(test_reward(100, 5));
    flow.proceed_to_address(200).unwrap();

    let mut address = valid_address();
    address.phone_number = Some("555-01".to_string());
    match flow.submit_address(address) {
        Err(RedemptionError::InvalidAddress { errors }) => {
            assert!(errors.iter().any(|e| e.contains("Phone")));
        }
        other => panic!("expected InvalidAddress, got {other:?}"),
    }
}

#[test]
fn test_confirm_produces_pending_record_with_captured_cost() {
    let mut flow = RedemptionFlow::new(test_reward(150, 5));
    flow.proceed_to_address(200).unwrap();
    flow.submit_address(valid_address()).unwrap();

    let now = Utc::now();
    let redemption = flow.confirm(now).unwrap();
    assert_eq!(redemption.reward_id, "test-reward");
    assert_eq!(redemption.points_cost, 150);
    assert_eq!(redemption.status, RedemptionStatus::Pending);
    assert_eq!(redemption.tracking_number.len(), 14);
    assert!(redemption.tracking_number.starts_with("WL"));
    assert_eq!(redemption.redeemed_at, now);
}

#[test]
fn test_steps_cannot_be_skipped() {
    let flow = RedemptionFlow::new(test_reward(150, 5));
    match flow.clone().confirm(Utc::now()) {
        Err(RedemptionError::WrongStep { current }) => {
            assert_eq!(current, RedemptionStep::Details);
        }
        other => panic!("expected WrongStep, got {other:?}"),
    }

    let mut skipping = flow;
    assert!(matches!(
        skipping.submit_address(valid_address()),
        Err(RedemptionError::WrongStep { .. })
    ));
}

#[test]
fn test_catalog_rewards_all_pass_the_flow() {
    for reward in default_rewards() {
        let cost = reward.points_cost;
        let mut flow = RedemptionFlow::new(reward);
        flow.proceed_to_address(cost).unwrap();
        flow.submit_address(valid_address()).unwrap();
        let redemption = flow.confirm(Utc::now()).unwrap();
        assert_eq!(redemption.points_cost, cost);
    }
}
