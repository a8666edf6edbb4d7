//! Waste Lens - domain core for the waste-scanning app.
//!
//! Implements scan records, points and rank computation, quest
//! generation, full-recompute statistics, the reward catalog with its
//! redemption flow, and the collaborator boundaries (vision
//! classification API, local SQLite persistence). The UI shell,
//! camera capture, and hosted backend live outside this crate.

pub mod classify;
pub mod points;
pub mod quests;
pub mod records;
pub mod rewards;
pub mod session;
pub mod stats;
pub mod storage;
pub mod telemetry;
pub mod tracker;

// Re-export commonly used types
pub use classify::{AnalysisResult, VisionClient};
pub use points::UserPoints;
pub use records::ScanRecord;
pub use session::{OwnerKey, Session};
pub use stats::AggregateStats;
pub use storage::{AppConfig, Database};
pub use tracker::WasteTracker;
