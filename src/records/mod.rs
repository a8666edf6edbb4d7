//! Scan records: the classified waste items a user has logged.

pub mod store;
pub mod types;

pub use store::{RecordStore, StoreError};
pub use types::{AiAnalysis, DisposalCategory, ScanRecord, WasteType};
