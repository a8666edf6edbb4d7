//! Aggregate statistics, recomputed in full from the scan collection.

pub mod aggregator;

pub use aggregator::{AggregateStats, QuestCounters};
