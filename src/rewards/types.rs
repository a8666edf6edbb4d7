//! Reward catalog types and redemption records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog category for a reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardCategory {
    Kitchen,
    Garden,
    Lifestyle,
    GiftCard,
}

impl RewardCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewardCategory::Kitchen => "kitchen",
            RewardCategory::Garden => "garden",
            RewardCategory::Lifestyle => "lifestyle",
            RewardCategory::GiftCard => "gift_card",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "kitchen" => Some(RewardCategory::Kitchen),
            "garden" => Some(RewardCategory::Garden),
            "lifestyle" => Some(RewardCategory::Lifestyle),
            "gift_card" => Some(RewardCategory::GiftCard),
            _ => None,
        }
    }
}

/// A redeemable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Cost in points; always positive
    pub points_cost: u32,
    pub category: RewardCategory,
    /// Units available; zero means not orderable
    pub in_stock: u32,
    /// Human-readable delivery range, e.g. "5-7 business days"
    pub estimated_delivery: String,
    pub features: Vec<String>,
    /// Popularity rating, 1 to 5
    pub popularity: u8,
}

/// Fulfillment status of a redemption. Transitions happen in the
/// external fulfillment system; this crate only creates `Pending` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl RedemptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedemptionStatus::Pending => "pending",
            RedemptionStatus::Processing => "processing",
            RedemptionStatus::Shipped => "shipped",
            RedemptionStatus::Delivered => "delivered",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(RedemptionStatus::Pending),
            "processing" => Some(RedemptionStatus::Processing),
            "shipped" => Some(RedemptionStatus::Shipped),
            "delivered" => Some(RedemptionStatus::Delivered),
            _ => None,
        }
    }
}

/// Shipping destination collected during the redemption flow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub address_line1: String,
    pub address_line2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone_number: Option<String>,
}

/// A completed points-for-reward exchange. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    pub id: Uuid,
    pub reward_id: String,
    /// Cost captured at redemption time, so later catalog changes
    /// cannot alter historical spend
    pub points_cost: u32,
    pub shipping_address: ShippingAddress,
    pub status: RedemptionStatus,
    pub tracking_number: String,
    pub estimated_delivery_date: NaiveDate,
    pub redeemed_at: DateTime<Utc>,
}

/// The built-in reward catalog.
pub fn default_rewards() -> Vec<Reward> {
    vec![
        Reward {
            id: "bamboo-utensils".to_string(),
            title: "Bamboo Utensil Set".to_string(),
            description: "Reusable bamboo cutlery with a carry pouch".to_string(),
            points_cost: 150,
            category: RewardCategory::Kitchen,
            in_stock: 42,
            estimated_delivery: "5-7 business days".to_string(),
            features: vec![
                "Fork, knife, spoon and chopsticks".to_string(),
                "Dishwasher safe".to_string(),
            ],
            popularity: 4,
        },
        Reward {
            id: "compost-bin".to_string(),
            title: "Countertop Compost Bin".to_string(),
            description: "Odor-filtering 4L bin for kitchen scraps".to_string(),
            points_cost: 400,
            category: RewardCategory::Kitchen,
            in_stock: 18,
            estimated_delivery: "7-10 business days".to_string(),
            features: vec![
                "Replaceable charcoal filter".to_string(),
                "4 liter capacity".to_string(),
            ],
            popularity: 5,
        },
        Reward {
            id: "seed-kit".to_string(),
            title: "Pollinator Seed Kit".to_string(),
            description: "Native wildflower seeds for bees and butterflies".to_string(),
            points_cost: 100,
            category: RewardCategory::Garden,
            in_stock: 60,
            estimated_delivery: "3-5 business days".to_string(),
            features: vec!["12 native species".to_string()],
            popularity: 4,
        },
        Reward {
            id: "steel-bottle".to_string(),
            title: "Insulated Steel Bottle".to_string(),
            description: "750ml double-walled stainless bottle".to_string(),
            points_cost: 350,
            category: RewardCategory::Lifestyle,
            in_stock: 25,
            estimated_delivery: "5-7 business days".to_string(),
            features: vec![
                "24h cold / 12h hot".to_string(),
                "BPA free".to_string(),
            ],
            popularity: 5,
        },
        Reward {
            id: "tote-bag".to_string(),
            title: "Organic Cotton Tote".to_string(),
            description: "Heavyweight grocery tote from organic cotton".to_string(),
            points_cost: 120,
            category: RewardCategory::Lifestyle,
            in_stock: 80,
            estimated_delivery: "3-5 business days".to_string(),
            features: vec!["Machine washable".to_string()],
            popularity: 3,
        },
        Reward {
            id: "eco-gift-card".to_string(),
            title: "Eco Store Gift Card".to_string(),
            description: "$10 credit at partner zero-waste stores".to_string(),
            points_cost: 1000,
            category: RewardCategory::GiftCard,
            in_stock: 999,
            estimated_delivery: "1-2 business days".to_string(),
            features: vec!["Delivered by email".to_string()],
            popularity: 5,
        },
    ]
}
