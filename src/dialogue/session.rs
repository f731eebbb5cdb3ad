//! Ephemeral per-card dialogue session.
//!
//! The session owns the step cursor and transcript between turns; the
//! script table itself is stateless. Sessions are never persisted —
//! closing one before the terminal step simply discards it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::content::Card;
use crate::error::DialogueError;

use super::script::{self, Step, Turn};

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    System,
}

/// One line of the dialogue transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// One run of the scripted interview tied to a card.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    id: Uuid,
    card_id: String,
    step: Step,
    transcript: Vec<TranscriptEntry>,
}

impl DialogueSession {
    /// Open a session for a card: the card's activation command is recorded
    /// as the user's first turn and the step-0 response is produced
    /// immediately.
    pub fn open(card: &Card) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            card_id: card.id.clone(),
            step: Step::OPENING,
            transcript: Vec::new(),
        };
        session.push_turn(&card.activation_command);
        session
    }

    /// Submit one free-text input and receive the system's reply.
    ///
    /// Rejected once the session has reached its terminal step — the caller
    /// is expected to stop accepting input and extract the strategy.
    pub fn submit(&mut self, input: &str) -> Result<Turn, DialogueError> {
        if self.step.is_terminal() {
            return Err(DialogueError::SessionComplete {
                card_id: self.card_id.clone(),
            });
        }
        Ok(self.push_turn(input))
    }

    fn push_turn(&mut self, input: &str) -> Turn {
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::User,
            text: input.to_string(),
        });
        let turn = script::respond(Some(&self.card_id), input, self.step);
        tracing::debug!(
            card_id = %self.card_id,
            step = %self.step,
            next_step = %turn.next_step,
            "dialogue turn"
        );
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::System,
            text: turn.text.clone(),
        });
        self.step = turn.next_step;
        turn
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn card_id(&self) -> &str {
        &self.card_id
    }

    /// The step cursor carried between turns.
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_complete(&self) -> bool {
        self.step.is_terminal()
    }

    /// Full transcript in order.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The user's free-text answers, excluding the scripted activation
    /// command that opened the session.
    pub fn answers(&self) -> Vec<String> {
        self.transcript
            .iter()
            .filter(|e| e.speaker == Speaker::User)
            .skip(1)
            .map(|e| e.text.clone())
            .collect()
    }

    /// The synthesized strategy: the last system message, available only
    /// once the session is complete.
    pub fn final_strategy(&self) -> Option<&str> {
        if !self.is_complete() {
            return None;
        }
        self.transcript
            .iter()
            .rev()
            .find(|e| e.speaker == Speaker::System)
            .map(|e| e.text.as_str())
    }
}
