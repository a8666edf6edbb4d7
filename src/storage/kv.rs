//! JSON key-value store for small flags and caches.
//!
//! Backs the anonymous device id and onboarding flags. Values are
//! JSON-serialized; callers decide whether a failed write is fatal
//! (primary path) or just logged (cache path).

use std::sync::Arc;

use chrono::Utc;
use rusqlite::params;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use crate::storage::Database;

/// Key-value store over the shared database.
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Read and deserialize a value. `None` if the key is absent.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, KvError> {
        let conn = self.db.connection();
        let mut stmt = conn
            .prepare("SELECT value_json FROM kv_store WHERE key = ?1")
            .map_err(|e| KvError::Database(e.to_string()))?;

        let mut rows = stmt
            .query(params![key])
            .map_err(|e| KvError::Database(e.to_string()))?;

        match rows.next().map_err(|e| KvError::Database(e.to_string()))? {
            Some(row) => {
                let json: String = row.get(0).map_err(|e| KvError::Database(e.to_string()))?;
                let value = serde_json::from_str(&json)
                    .map_err(|e| KvError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Serialize and upsert a value.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), KvError> {
        let json =
            serde_json::to_string(value).map_err(|e| KvError::Serialization(e.to_string()))?;

        self.db
            .connection()
            .execute(
                "INSERT INTO kv_store (key, value_json, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value_json = ?2, updated_at = ?3",
                params![key, json, Utc::now().to_rfc3339()],
            )
            .map_err(|e| KvError::Database(e.to_string()))?;

        Ok(())
    }

    /// Remove a key. Returns whether it existed.
    pub fn delete(&self, key: &str) -> Result<bool, KvError> {
        let deleted = self
            .db
            .connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|e| KvError::Database(e.to_string()))?;
        Ok(deleted > 0)
    }
}

/// Key-value store errors.
#[derive(Debug, Error)]
pub enum KvError {
    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
