//! Guided-dialogue engine — a deterministic, scripted interview per card.
//!
//! The heart is [`script::respond`], a pure function mapping (card id,
//! free-text input, step counter) to the next system message and step.
//! All mutable state — the step cursor and the transcript — lives in the
//! caller-owned [`DialogueSession`].

pub mod script;
pub mod session;

pub use script::{FALLBACK_TEXT, Step, Turn, respond};
pub use session::{DialogueSession, Speaker, TranscriptEntry};
