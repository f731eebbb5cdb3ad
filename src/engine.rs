//! Program engine — the single entry point tying the catalog, progression,
//! dialogue, responses, profile and notifications together.
//!
//! The engine owns the mutable state; front ends (the console binary, or
//! anything else) hold one `ProgramEngine` and drive it with card ids and
//! free-text input.

use std::sync::Arc;

use tracing::warn;

use crate::collab::{Identity, Milestone, Notifier, Persona, ProfileStore};
use crate::content::{Card, Catalog, Track};
use crate::dialogue::{DialogueSession, Turn};
use crate::error::{Error, Result};
use crate::progress::{ProgressRecord, ProgressTracker};
use crate::responses::{ResponseStore, UserResponse};
use crate::store::StateStore;

pub struct ProgramEngine {
    catalog: Arc<Catalog>,
    progress: ProgressTracker,
    responses: ResponseStore,
    identity: Arc<dyn Identity>,
    profiles: Arc<dyn ProfileStore>,
    notifier: Arc<dyn Notifier>,
}

impl ProgramEngine {
    /// Assemble an engine, loading persisted progression and responses.
    pub async fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn StateStore>,
        identity: Arc<dyn Identity>,
        profiles: Arc<dyn ProfileStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let progress = ProgressTracker::load(Arc::clone(&catalog), Arc::clone(&store)).await;
        let responses = ResponseStore::load(store).await;
        Self {
            catalog,
            progress,
            responses,
            identity,
            profiles,
            notifier,
        }
    }

    // ── Dialogue ────────────────────────────────────────────────────

    /// Open a card's dialogue. The card must exist, its track must be
    /// active, and the card itself must be unlocked. Completed cards may be
    /// reopened; a re-run replaces the saved responses.
    pub fn open_dialogue(&self, card_id: &str) -> Result<DialogueSession> {
        let card = self.card(card_id)?;
        let track = self
            .catalog
            .track_of(card_id)
            .ok_or_else(|| Error::UnknownCard {
                card_id: card_id.to_string(),
            })?;
        if !self.progress.is_track_active(&track.id) {
            return Err(Error::TrackInactive {
                track_id: track.id.clone(),
            });
        }
        if !self.progress.is_unlocked(card_id) {
            return Err(Error::CardLocked {
                card_id: card_id.to_string(),
            });
        }
        Ok(DialogueSession::open(card))
    }

    /// Submit one input to an open session. When the turn brings the
    /// session to its terminal step, the run is finalized: responses are
    /// saved first, then the card is completed (unlocking successors), then
    /// a checkpoint notification goes out best-effort.
    pub async fn submit(&mut self, session: &mut DialogueSession, input: &str) -> Result<Turn> {
        let turn = session.submit(input)?;
        if session.is_complete() {
            self.finalize(session).await;
        }
        Ok(turn)
    }

    async fn finalize(&mut self, session: &DialogueSession) {
        let card_id = session.card_id().to_string();
        let strategy = session.final_strategy().map(str::to_string);
        self.responses
            .save(&card_id, session.answers(), strategy)
            .await;

        let outcome = self.progress.complete(&card_id).await;
        if !outcome.newly_completed {
            return;
        }

        let checkpoint = self
            .catalog
            .card(&card_id)
            .map_or_else(|| card_id.clone(), |c| c.technique_title.clone());
        let next_step = outcome
            .newly_unlocked
            .first()
            .and_then(|id| self.catalog.card(id))
            .map_or_else(
                || "Review your saved strategies and keep executing.".to_string(),
                |c| format!("Open \"{}\" to continue.", c.card_title),
            );
        self.notify(Milestone::Checkpoint {
            name: self.identity.display_name().to_string(),
            checkpoint,
            next_step,
        })
        .await;
    }

    // ── Progression queries ─────────────────────────────────────────

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_unlocked(&self, card_id: &str) -> bool {
        self.progress.is_unlocked(card_id)
    }

    pub fn is_completed(&self, card_id: &str) -> bool {
        self.progress.is_completed(card_id)
    }

    pub fn is_track_active(&self, track_id: &str) -> bool {
        self.progress.is_track_active(track_id)
    }

    pub fn completed_in(&self, track: &Track) -> usize {
        self.progress.completed_in(track)
    }

    pub fn progress(&self) -> &ProgressRecord {
        self.progress.record()
    }

    /// The saved dialogue output for a card, if it has been run.
    pub fn strategy_for(&self, card_id: &str) -> Option<&UserResponse> {
        self.responses.get(card_id)
    }

    /// Claim a track's achievement. Succeeds only once, and only when every
    /// card in the track is completed; otherwise reports false.
    pub async fn claim_achievement(&mut self, track_id: &str) -> bool {
        let Some(track) = self.catalog.tracks().find(|t| t.id == track_id) else {
            return false;
        };
        if self.progress.is_achievement_claimed(track_id)
            || self.progress.completed_in(track) != track.cards.len()
        {
            return false;
        }
        self.progress.claim_achievement(track_id).await;
        true
    }

    // ── Profile ─────────────────────────────────────────────────────

    /// True when the user has not yet declared a persona.
    pub async fn needs_persona_prompt(&self) -> Result<bool> {
        let profile = self.profiles.get(self.identity.user_id()).await?;
        Ok(profile.and_then(|p| p.persona).is_none())
    }

    pub async fn persona(&self) -> Result<Option<Persona>> {
        let profile = self.profiles.get(self.identity.user_id()).await?;
        Ok(profile.and_then(|p| p.persona))
    }

    /// Record the user's declared goal. First selection also triggers the
    /// welcome notification.
    pub async fn select_persona(&mut self, persona: Persona) -> Result<()> {
        let user_id = self.identity.user_id();
        let mut profile = self
            .profiles
            .get(user_id)
            .await?
            .unwrap_or_default();
        let first_selection = profile.persona.is_none();

        profile.persona = Some(persona);
        if profile.display_name.is_none() {
            profile.display_name = Some(self.identity.display_name().to_string());
        }
        profile.updated_at = chrono::Utc::now().timestamp_millis();
        self.profiles.set(user_id, profile).await?;

        if first_selection {
            self.notify(Milestone::Welcome {
                name: self.identity.display_name().to_string(),
            })
            .await;
        }
        Ok(())
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Best-effort delivery: skipped without an address, logged on failure.
    async fn notify(&self, milestone: Milestone) {
        let Some(email) = self.identity.email() else {
            return;
        };
        if let Err(e) = self.notifier.notify(email, &milestone).await {
            warn!("Milestone notification failed: {}", e);
        }
    }

    fn card(&self, card_id: &str) -> Result<&Card> {
        self.catalog.card(card_id).ok_or_else(|| Error::UnknownCard {
            card_id: card_id.to_string(),
        })
    }
}
