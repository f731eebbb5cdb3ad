//! Growth OS — guided self-improvement program engine.
//!
//! A fixed catalog of "protocol" cards grouped into ordered tracks, a
//! progression engine that unlocks cards as the learner completes them, and
//! a deterministic scripted dialogue that interviews the learner and
//! produces a ready-to-use strategy per card.

pub mod collab;
pub mod config;
pub mod content;
pub mod dialogue;
pub mod engine;
pub mod error;
pub mod progress;
pub mod responses;
pub mod store;
