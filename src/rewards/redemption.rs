//! The three-step redemption flow.
//!
//! Details -> Address -> Confirmation. The flow holds no side effects:
//! a `Redemption` record only exists once `confirm` succeeds, so an
//! abandoned or failed flow leaves the points balance untouched.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};
use rand::Rng;
use uuid::Uuid;

use super::types::{Redemption, RedemptionStatus, Reward, ShippingAddress};

/// Current step of a redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionStep {
    /// Reward details and affordability check
    Details,
    /// Shipping address collection
    Address,
    /// Order review; the only step that can create a record
    Confirmation,
}

/// Redemption flow errors.
#[derive(Debug, thiserror::Error)]
pub enum RedemptionError {
    #[error("not enough points: need {needed}, have {available}")]
    InsufficientPoints { needed: u32, available: u32 },

    #[error("reward is out of stock")]
    OutOfStock,

    #[error("invalid shipping address: {}", errors.join("; "))]
    InvalidAddress { errors: Vec<String> },

    #[error("step {current:?} cannot perform this action")]
    WrongStep { current: RedemptionStep },
}

/// State machine for one redemption attempt.
#[derive(Debug, Clone)]
pub struct RedemptionFlow {
    reward: Reward,
    step: RedemptionStep,
    address: Option<ShippingAddress>,
}

impl RedemptionFlow {
    /// Start a redemption at the Details step.
    pub fn new(reward: Reward) -> Self {
        Self {
            reward,
            step: RedemptionStep::Details,
            address: None,
        }
    }

    pub fn step(&self) -> RedemptionStep {
        self.step
    }

    pub fn reward(&self) -> &Reward {
        &self.reward
    }

    /// Whether the balance covers the reward cost.
    pub fn can_afford(&self, balance: u32) -> bool {
        balance >= self.reward.points_cost
    }

    /// Advance Details -> Address. Blocked without affordability or
    /// stock; the step is unchanged on failure.
    pub fn proceed_to_address(&mut self, balance: u32) -> Result<(), RedemptionError> {
        if self.step != RedemptionStep::Details {
            return Err(RedemptionError::WrongStep { current: self.step });
        }
        if self.reward.in_stock == 0 {
            return Err(RedemptionError::OutOfStock);
        }
        if !self.can_afford(balance) {
            return Err(RedemptionError::InsufficientPoints {
                needed: self.reward.points_cost,
                available: balance,
            });
        }
        self.step = RedemptionStep::Address;
        Ok(())
    }

    /// Submit the shipping address. On validation failure the flow
    /// stays on the Address step and the full error list is returned.
    pub fn submit_address(&mut self, address: ShippingAddress) -> Result<(), RedemptionError> {
        if self.step != RedemptionStep::Address {
            return Err(RedemptionError::WrongStep { current: self.step });
        }
        let errors = validate_address(&address);
        if !errors.is_empty() {
            return Err(RedemptionError::InvalidAddress { errors });
        }
        self.address = Some(address);
        self.step = RedemptionStep::Confirmation;
        Ok(())
    }

    /// Create the redemption record. Only legal at Confirmation; this
    /// is the single point where a `Redemption` comes into existence.
    pub fn confirm(self, now: DateTime<Utc>) -> Result<Redemption, RedemptionError> {
        if self.step != RedemptionStep::Confirmation {
            return Err(RedemptionError::WrongStep { current: self.step });
        }
        let address = self
            .address
            .ok_or(RedemptionError::WrongStep {
                current: RedemptionStep::Address,
            })?;

        Ok(Redemption {
            id: Uuid::new_v4(),
            reward_id: self.reward.id.clone(),
            points_cost: self.reward.points_cost,
            shipping_address: address,
            status: RedemptionStatus::Pending,
            tracking_number: tracking_number(now),
            estimated_delivery_date: estimated_delivery_date(
                &self.reward.estimated_delivery,
                now,
            ),
            redeemed_at: now,
        })
    }
}

/// Validate a shipping address, returning every problem found.
pub fn validate_address(address: &ShippingAddress) -> Vec<String> {
    let mut errors = Vec::new();

    if address.full_name.trim().is_empty() {
        errors.push("Full name is required".to_string());
    }
    if address.address_line1.trim().is_empty() {
        errors.push("Address line 1 is required".to_string());
    }
    if address.city.trim().is_empty() {
        errors.push("City is required".to_string());
    }
    if address.state.trim().is_empty() {
        errors.push("State is required".to_string());
    }
    if !is_valid_zip(&address.zip_code) {
        errors.push("ZIP code must be 12345 or 12345-6789".to_string());
    }
    if address.country.trim().is_empty() {
        errors.push("Country is required".to_string());
    }
    if let Some(phone) = &address.phone_number {
        if !phone.trim().is_empty() && !is_valid_phone(phone) {
            errors.push("Phone number is not valid".to_string());
        }
    }

    errors
}

/// `\d{5}` optionally followed by `-\d{4}`.
fn is_valid_zip(zip: &str) -> bool {
    let bytes = zip.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}

/// Permissive phone check: common formatting characters only, with at
/// least 7 digits.
fn is_valid_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '(' | ')' | '+' | '-' | '.'));
    allowed && digits >= 7
}

/// `"WL"` + last 8 digits of the epoch-millis timestamp + 4 random
/// uppercase base-36 characters.
fn tracking_number(now: DateTime<Utc>) -> String {
    const BASE36: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    let millis = now.timestamp_millis().unsigned_abs().to_string();
    let tail = if millis.len() > 8 {
        &millis[millis.len() - 8..]
    } else {
        millis.as_str()
    };

    let mut rng = rand::thread_rng();
    let suffix: String = (0..4)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!("WL{tail}{suffix}")
}

/// Walk forward from today, skipping weekends, for the maximum
/// business-day count found in the delivery-range string
/// (e.g. "5-7 business days" walks 7 business days).
fn estimated_delivery_date(delivery_range: &str, now: DateTime<Utc>) -> NaiveDate {
    let business_days = max_business_days(delivery_range).unwrap_or(7);
    let mut date = now.with_timezone(&Local).date_naive();
    let mut added = 0u32;

    while added < business_days {
        date += Duration::days(1);
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            added += 1;
        }
    }

    date
}

/// Largest integer in the string, e.g. "5-7 business days" -> 7.
fn max_business_days(delivery_range: &str) -> Option<u32> {
    delivery_range
        .split(|c: char| !c.is_ascii_digit())
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u32>().ok())
        .max()
}
