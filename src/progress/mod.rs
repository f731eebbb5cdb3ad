//! Progression engine — the unlock/completion state machine over the
//! track-card graph.
//!
//! Owns the sets of unlocked and completed card ids, applies the
//! graph-derived unlock rules on completion, and persists the whole record
//! after every change. Durability is best-effort: a failed write is logged
//! and the in-memory state stays authoritative for the session.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::content::{Catalog, Track};
use crate::store::StateStore;

/// The persisted progression blob.
///
/// Wire keys are camelCase to match the original save format. Sets only
/// grow — no card is ever re-locked or un-completed by normal operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressRecord {
    pub unlocked_cards: Vec<String>,
    pub completed_cards: Vec<String>,
    pub claimed_achievements: Vec<String>,
}

impl ProgressRecord {
    /// Initial state: only the first card of the first track is unlocked.
    pub fn initial(catalog: &Catalog) -> Self {
        Self {
            unlocked_cards: vec![catalog.first_card().id.clone()],
            completed_cards: Vec::new(),
            claimed_achievements: Vec::new(),
        }
    }
}

/// What a `complete` call changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionOutcome {
    /// False when the card was already completed (idempotent no-op).
    pub newly_completed: bool,
    /// Card ids unlocked by this completion, in unlock order.
    pub newly_unlocked: Vec<String>,
}

/// The progression engine: queries plus the single `complete` mutation.
pub struct ProgressTracker {
    catalog: Arc<Catalog>,
    store: Arc<dyn StateStore>,
    record: ProgressRecord,
}

impl ProgressTracker {
    /// Load persisted progression, falling back to the initial state when
    /// nothing was saved yet or the blob is corrupt. Never fatal.
    pub async fn load(catalog: Arc<Catalog>, store: Arc<dyn StateStore>) -> Self {
        let record = match store.load_progress().await {
            Ok(Some(record)) => record,
            Ok(None) => ProgressRecord::initial(&catalog),
            Err(e) => {
                warn!("Failed to load progression, starting fresh: {}", e);
                ProgressRecord::initial(&catalog)
            }
        };
        Self {
            catalog,
            store,
            record,
        }
    }

    pub fn is_unlocked(&self, card_id: &str) -> bool {
        self.record.unlocked_cards.iter().any(|id| id == card_id)
    }

    pub fn is_completed(&self, card_id: &str) -> bool {
        self.record.completed_cards.iter().any(|id| id == card_id)
    }

    /// Whether the designated setup-completion card has been completed.
    pub fn is_setup_complete(&self) -> bool {
        self.is_completed(&self.catalog.setup_completion_card().id)
    }

    /// Gating policy for presentation: the first track is always active;
    /// every other track activates only once setup is complete, regardless
    /// of its cards' individual unlock bits.
    pub fn is_track_active(&self, track_id: &str) -> bool {
        track_id == self.catalog.setup_track().id || self.is_setup_complete()
    }

    /// Number of completed cards in a track.
    pub fn completed_in(&self, track: &Track) -> usize {
        track
            .cards
            .iter()
            .filter(|c| self.is_completed(&c.id))
            .count()
    }

    /// Mark a card complete and recompute unlocks. Idempotent: completing
    /// an already-completed card is a no-op with no side effects.
    ///
    /// Unlock rules:
    /// 1. The successor card in the same track, if one exists.
    /// 2. Completing the setup-completion card additionally unlocks the
    ///    first card of every other track — the sole cross-track trigger.
    ///
    /// The whole record is persisted synchronously after the update; a
    /// write failure is logged and does not roll back the in-memory state.
    pub async fn complete(&mut self, card_id: &str) -> CompletionOutcome {
        if self.is_completed(card_id) {
            return CompletionOutcome::default();
        }

        self.record.completed_cards.push(card_id.to_string());
        // Completion implies unlock, keeping completed ⊆ unlocked even for
        // trusting callers.
        self.unlock(card_id);

        let catalog = Arc::clone(&self.catalog);
        let mut newly_unlocked = Vec::new();
        match catalog.position(card_id) {
            Some((track_index, card_index)) => {
                if let Some(track) = catalog.tracks().nth(track_index)
                    && let Some(next) = track.cards.get(card_index + 1)
                    && self.unlock(&next.id)
                {
                    newly_unlocked.push(next.id.clone());
                }

                if card_id == catalog.setup_completion_card().id {
                    for (i, t) in catalog.tracks().enumerate() {
                        let first = &t.first_card().id;
                        if i != 0 && self.unlock(first) {
                            newly_unlocked.push(first.clone());
                        }
                    }
                }
            }
            None => warn!(card_id, "Completed card is not in the catalog"),
        }

        self.persist().await;
        CompletionOutcome {
            newly_completed: true,
            newly_unlocked,
        }
    }

    /// Record a claimed track achievement. Idempotent.
    pub async fn claim_achievement(&mut self, track_id: &str) {
        if self
            .record
            .claimed_achievements
            .iter()
            .any(|id| id == track_id)
        {
            return;
        }
        self.record.claimed_achievements.push(track_id.to_string());
        self.persist().await;
    }

    pub fn is_achievement_claimed(&self, track_id: &str) -> bool {
        self.record
            .claimed_achievements
            .iter()
            .any(|id| id == track_id)
    }

    /// Current record, for read-only projections.
    pub fn record(&self) -> &ProgressRecord {
        &self.record
    }

    /// Idempotent union into the unlocked set. True when newly added.
    fn unlock(&mut self, card_id: &str) -> bool {
        if self.is_unlocked(card_id) {
            return false;
        }
        self.record.unlocked_cards.push(card_id.to_string());
        true
    }

    async fn persist(&self) {
        if let Err(e) = self.store.save_progress(&self.record).await {
            warn!("Failed to persist progression: {}", e);
        }
    }
}
