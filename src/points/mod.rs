//! Points scoring: per-scan points, streak bonuses, and lifetime ranks.

pub mod engine;

pub use engine::{points_for_scan, rank_for_points, streak_bonus, UserPoints};
