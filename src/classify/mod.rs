//! Vision-model classification boundary.

pub mod client;
pub mod types;

pub use client::VisionClient;
pub use types::{fallback_analysis, AnalysisResult, ClassificationError};
