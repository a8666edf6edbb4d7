//! SQLite-backed scan record store.
//!
//! Records are owned by a session key: either an authenticated user id
//! or the locally generated anonymous id. On sign-in, anonymous rows
//! are re-owned to the user; the adoption is additive and idempotent.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rusqlite::params;
use thiserror::Error;
use uuid::Uuid;

use super::types::{AiAnalysis, DisposalCategory, ScanRecord, WasteType};
use crate::session::OwnerKey;
use crate::storage::Database;

/// Store for scan records.
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a record for an owner.
    pub fn insert(&self, owner: &OwnerKey, record: &ScanRecord) -> Result<(), StoreError> {
        let analysis_json = record
            .analysis
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT INTO scan_records
                 (id, owner_key, waste_type, disposal_category, weight_grams,
                  recyclable, compostable, timestamp, analysis_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    record.id.to_string(),
                    owner.as_str(),
                    record.waste_type.as_str(),
                    record.disposal_category.as_str(),
                    record.weight_grams,
                    record.recyclable,
                    record.compostable,
                    record.timestamp.to_rfc3339(),
                    analysis_json,
                ],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    /// List an owner's records, newest first.
    ///
    /// Rows failing to parse are skipped with a warning so one corrupt
    /// row cannot take down the whole collection.
    pub fn list(&self, owner: &OwnerKey) -> Result<Vec<ScanRecord>, StoreError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare(
                "SELECT id, waste_type, disposal_category, weight_grams,
                        recyclable, compostable, timestamp, analysis_json
                 FROM scan_records
                 WHERE owner_key = ?1
                 ORDER BY timestamp DESC",
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let rows = stmt
            .query_map(params![owner.as_str()], |row| {
                Ok(RawRecordRow {
                    id: row.get(0)?,
                    waste_type: row.get(1)?,
                    disposal_category: row.get(2)?,
                    weight_grams: row.get(3)?,
                    recyclable: row.get(4)?,
                    compostable: row.get(5)?,
                    timestamp: row.get(6)?,
                    analysis_json: row.get(7)?,
                })
            })
            .map_err(|e| StoreError::Database(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row.map_err(|e| StoreError::Database(e.to_string()))?;
            match raw.parse() {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!(record_id = %raw.id, "skipping unparsable scan record row");
                }
            }
        }

        Ok(records)
    }

    /// Delete a record by id. Returns whether a row was removed.
    pub fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let deleted = self
            .db
            .connection()
            .execute(
                "DELETE FROM scan_records WHERE id = ?1",
                params![id.to_string()],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(deleted > 0)
    }

    /// Re-own every anonymous record to the authenticated user.
    ///
    /// Idempotent: a second run matches zero rows. Records are moved,
    /// never copied, so adoption cannot duplicate them.
    pub fn adopt_anonymous(
        &self,
        anonymous: &OwnerKey,
        user: &OwnerKey,
    ) -> Result<usize, StoreError> {
        let updated = self
            .db
            .connection()
            .execute(
                "UPDATE scan_records SET owner_key = ?2 WHERE owner_key = ?1",
                params![anonymous.as_str(), user.as_str()],
            )
            .map_err(|e| StoreError::Database(e.to_string()))?;
        Ok(updated)
    }
}

/// Raw row contents before validation.
struct RawRecordRow {
    id: String,
    waste_type: String,
    disposal_category: String,
    weight_grams: f64,
    recyclable: bool,
    compostable: bool,
    timestamp: String,
    analysis_json: Option<String>,
}

impl RawRecordRow {
    /// Validate the row into a domain record. `None` means the row is
    /// corrupt (bad id, enum name, or timestamp) and should be skipped.
    fn parse(&self) -> Option<ScanRecord> {
        let id = Uuid::parse_str(&self.id).ok()?;
        let waste_type = WasteType::from_str(&self.waste_type)?;
        let disposal_category = DisposalCategory::from_str(&self.disposal_category)?;
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()?
            .with_timezone(&Utc);
        let analysis: Option<AiAnalysis> = match &self.analysis_json {
            Some(json) => Some(serde_json::from_str(json).ok()?),
            None => None,
        };

        Some(ScanRecord {
            id,
            waste_type,
            disposal_category,
            weight_grams: self.weight_grams,
            recyclable: self.recyclable,
            compostable: self.compostable,
            timestamp,
            analysis,
        })
    }
}

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
