//! The waste tracker: owns the record collection and keeps the
//! derived state in step with it.
//!
//! Every mutation runs the same strict pipeline: persist the change,
//! apply it to the in-memory collection, recompute stats, regenerate
//! quests. `&mut self` sequencing means two mutations can never
//! interleave, and the persistence write happens first so a failed
//! insert never leaves a phantom in-memory record.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::points::UserPoints;
use crate::quests::{generate_quests, Quest};
use crate::records::{RecordStore, ScanRecord, StoreError};
use crate::rewards::{
    default_rewards, Redemption, RedemptionError, RedemptionFlow, RedemptionStore,
    RedemptionStoreError, Reward,
};
use crate::session::{Session, SessionError};
use crate::stats::{AggregateStats, QuestCounters};
use crate::storage::Database;

/// Orchestrates records, stats, quests, points and redemptions for one
/// session.
pub struct WasteTracker {
    record_store: RecordStore,
    redemption_store: RedemptionStore,
    session: Session,
    records: Vec<ScanRecord>,
    stats: AggregateStats,
    quests: Vec<Quest>,
}

impl WasteTracker {
    /// Load the session's records and derive the initial state.
    pub fn new(db: Arc<Database>, session: Session) -> Result<Self, TrackerError> {
        let record_store = RecordStore::new(db.clone());
        let redemption_store = RedemptionStore::new(db);
        let records = record_store.list(session.owner())?;

        let mut tracker = Self {
            record_store,
            redemption_store,
            session,
            records,
            stats: AggregateStats::empty(),
            quests: Vec::new(),
        };
        tracker.refresh();
        Ok(tracker)
    }

    /// Add a scan record: persist, append, recompute, regenerate.
    pub fn add_record(&mut self, record: ScanRecord) -> Result<(), TrackerError> {
        self.record_store.insert(self.session.owner(), &record)?;
        self.records.push(record);
        self.refresh();
        Ok(())
    }

    /// Remove a record by id. Returns whether it existed.
    pub fn remove_record(&mut self, id: Uuid) -> Result<bool, TrackerError> {
        let deleted = self.record_store.delete(id)?;
        if deleted {
            self.records.retain(|r| r.id != id);
            self.refresh();
        }
        Ok(deleted)
    }

    /// Recompute stats, then quests, from the current collection.
    /// Quest regeneration always reads the fresh aggregate.
    fn refresh(&mut self) {
        let now = Utc::now();
        self.stats = AggregateStats::recompute(&self.records, now);
        let counters = QuestCounters::compute(&self.records, now);
        self.quests = generate_quests(&counters, now);
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Points summary: lifetime, windowed, spent, balance, rank.
    pub fn points(&self) -> Result<UserPoints, TrackerError> {
        let spent = self.redemption_store.total_spent(self.session.owner())?;
        Ok(UserPoints::compute(
            &self.records,
            self.stats.streak_days,
            spent,
            Utc::now(),
        ))
    }

    /// The reward catalog.
    pub fn catalog(&self) -> Vec<Reward> {
        default_rewards()
    }

    /// Start a redemption flow for a catalog reward.
    pub fn begin_redemption(&self, reward_id: &str) -> Result<RedemptionFlow, TrackerError> {
        let reward = default_rewards()
            .into_iter()
            .find(|r| r.id == reward_id)
            .ok_or_else(|| TrackerError::UnknownReward(reward_id.to_string()))?;
        Ok(RedemptionFlow::new(reward))
    }

    /// Complete a redemption flow: create the record and persist it.
    ///
    /// This is the only place spend happens; if the flow has not
    /// reached Confirmation the error propagates and nothing is
    /// written.
    pub fn confirm_redemption(
        &mut self,
        flow: RedemptionFlow,
    ) -> Result<Redemption, TrackerError> {
        let redemption = flow.confirm(Utc::now())?;
        self.redemption_store
            .insert(self.session.owner(), &redemption)?;
        tracing::info!(
            redemption_id = %redemption.id,
            reward = %redemption.reward_id,
            points = redemption.points_cost,
            "redemption confirmed"
        );
        Ok(redemption)
    }

    /// Past redemptions for this session.
    pub fn redemptions(&self) -> Result<Vec<Redemption>, TrackerError> {
        Ok(self.redemption_store.list(self.session.owner())?)
    }

    /// Sign in: adopt anonymous records, reload the collection, and
    /// re-derive everything under the new owner.
    pub fn sign_in(&mut self, user_id: impl Into<String>) -> Result<usize, TrackerError> {
        let adopted = self.session.sign_in(user_id, &self.record_store)?;
        self.records = self.record_store.list(self.session.owner())?;
        self.refresh();
        Ok(adopted)
    }
}

/// Tracker errors.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    RedemptionStore(#[from] RedemptionStoreError),

    #[error(transparent)]
    Redemption(#[from] RedemptionError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("unknown reward: {0}")]
    UnknownReward(String),
}
