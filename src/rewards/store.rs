//! Persistence for completed redemptions.
//!
//! A redemption row is the durable point where points become spent;
//! `total_spent` is always derived from these rows, never from a
//! separately maintained counter.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::params;
use thiserror::Error;
use uuid::Uuid;

use super::types::{Redemption, RedemptionStatus, ShippingAddress};
use crate::session::OwnerKey;
use crate::storage::Database;

/// Store for redemption records.
pub struct RedemptionStore {
    db: Arc<Database>,
}

impl RedemptionStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Persist a redemption for an owner.
    pub fn insert(
        &self,
        owner: &OwnerKey,
        redemption: &Redemption,
    ) -> Result<(), RedemptionStoreError> {
        let address_json = serde_json::to_string(&redemption.shipping_address)
            .map_err(|e| RedemptionStoreError::Serialization(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT INTO redemptions
                 (id, owner_key, reward_id, points_cost, address_json, status,
                  tracking_number, estimated_delivery_date, redeemed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    redemption.id.to_string(),
                    owner.as_str(),
                    redemption.reward_id,
                    redemption.points_cost,
                    address_json,
                    redemption.status.as_str(),
                    redemption.tracking_number,
                    redemption.estimated_delivery_date.to_string(),
                    redemption.redeemed_at.to_rfc3339(),
                ],
            )
            .map_err(|e| RedemptionStoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// List an owner's redemptions, newest first.
    pub fn list(&self, owner: &OwnerKey) -> Result<Vec<Redemption>, RedemptionStoreError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, reward_id, points_cost, address_json, status,
                        tracking_number, estimated_delivery_date, redeemed_at
                 FROM redemptions
                 WHERE owner_key = ?1
                 ORDER BY redeemed_at DESC",
            )
            .map_err(|e| RedemptionStoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner.as_str()], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, u32>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                ))
            })
            .map_err(|e| RedemptionStoreError::Database(e.to_string()))?;

        let mut redemptions = Vec::new();
        for row in rows {
            let (id, reward_id, points_cost, address_json, status, tracking, delivery, redeemed) =
                row.map_err(|e| RedemptionStoreError::Database(e.to_string()))?;

            let parsed = parse_redemption(
                &id,
                reward_id,
                points_cost,
                &address_json,
                &status,
                tracking,
                &delivery,
                &redeemed,
            );
            match parsed {
                Some(redemption) => redemptions.push(redemption),
                None => {
                    tracing::warn!(redemption_id = %id, "skipping unparsable redemption row");
                }
            }
        }

        Ok(redemptions)
    }

    /// Total points spent across all stored redemptions.
    pub fn total_spent(&self, owner: &OwnerKey) -> Result<u32, RedemptionStoreError> {
        self.db
            .connection()
            .query_row(
                "SELECT COALESCE(SUM(points_cost), 0) FROM redemptions WHERE owner_key = ?1",
                params![owner.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .map(|total| total.max(0) as u32)
            .map_err(|e| RedemptionStoreError::Database(e.to_string()))
    }
}

#[allow(clippy::too_many_arguments)]
fn parse_redemption(
    id: &str,
    reward_id: String,
    points_cost: u32,
    address_json: &str,
    status: &str,
    tracking_number: String,
    delivery: &str,
    redeemed_at: &str,
) -> Option<Redemption> {
    let shipping_address: ShippingAddress = serde_json::from_str(address_json).ok()?;
    Some(Redemption {
        id: Uuid::parse_str(id).ok()?,
        reward_id,
        points_cost,
        shipping_address,
        status: RedemptionStatus::from_str(status)?,
        tracking_number,
        estimated_delivery_date: NaiveDate::parse_from_str(delivery, "%Y-%m-%d").ok()?,
        redeemed_at: DateTime::parse_from_rfc3339(redeemed_at)
            .ok()?
            .with_timezone(&Utc),
    })
}

/// Redemption store errors.
#[derive(Debug, Error)]
pub enum RedemptionStoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
