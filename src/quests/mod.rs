//! Quest generation and progress evaluation.

pub mod generator;
pub mod types;

pub use generator::generate_quests;
pub use types::{Quest, QuestDifficulty, QuestType};
