//! Quest type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cadence of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestType {
    Daily,
    Weekly,
    Monthly,
    Milestone,
}

impl QuestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestType::Daily => "daily",
            QuestType::Weekly => "weekly",
            QuestType::Monthly => "monthly",
            QuestType::Milestone => "milestone",
        }
    }
}

impl std::fmt::Display for QuestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display-only difficulty label for milestone quests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
}

impl QuestDifficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestDifficulty::Easy => "easy",
            QuestDifficulty::Medium => "medium",
            QuestDifficulty::Hard => "hard",
        }
    }
}

/// A goal with progress tracking and a point reward.
///
/// Quests are regenerated from aggregate counters whenever the scan
/// collection changes; they are never persisted. Daily and weekly
/// quests reset implicitly because their id embeds a time bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    /// Deterministic id: quest kind + time bucket (or milestone value)
    pub id: String,
    pub quest_type: QuestType,
    pub title: String,
    pub description: String,
    /// Goal value (scans, grams, days, score, ...)
    pub target: f64,
    /// Current counter value, clamped to `[0, target]` for display
    pub progress: f64,
    pub completed: bool,
    /// Points awarded on completion
    pub points_reward: u32,
    /// When the quest stops counting; `None` for milestones
    pub expires_at: Option<DateTime<Utc>>,
    /// Display-only difficulty, set for milestone quests
    pub difficulty: Option<QuestDifficulty>,
}

impl Quest {
    /// Build a quest with progress clamped and completion derived.
    pub fn with_progress(
        id: String,
        quest_type: QuestType,
        title: &str,
        description: &str,
        target: f64,
        counter: f64,
        points_reward: u32,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        let counter = if counter.is_finite() { counter.max(0.0) } else { 0.0 };
        Self {
            id,
            quest_type,
            title: title.to_string(),
            description: description.to_string(),
            target,
            progress: counter.min(target),
            completed: counter >= target,
            points_reward,
            expires_at,
            difficulty: None,
        }
    }
}
