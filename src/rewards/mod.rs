//! Reward catalog and the points-redemption flow.

pub mod redemption;
pub mod store;
pub mod types;

pub use redemption::{RedemptionError, RedemptionFlow, RedemptionStep};
pub use store::{RedemptionStore, RedemptionStoreError};
pub use types::{
    default_rewards, Redemption, RedemptionStatus, Reward, RewardCategory, ShippingAddress,
};
