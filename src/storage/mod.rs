//! Local persistence: SQLite database, key-value store, app config.

pub mod config;
pub mod database;
pub mod kv;
pub mod schema;

pub use config::AppConfig;
pub use database::{Database, DatabaseError};
pub use kv::KvStore;
