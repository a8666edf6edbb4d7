//! Scan pipeline orchestration.

pub mod manager;

pub use manager::{TrackerError, WasteTracker};
