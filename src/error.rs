//! Error types for Growth OS.

/// Top-level error type for the program engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Dialogue error: {0}")]
    Dialogue(#[from] DialogueError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    #[error("Unknown card: {card_id}")]
    UnknownCard { card_id: String },

    #[error("Card {card_id} is locked")]
    CardLocked { card_id: String },

    #[error("Track {track_id} is not active yet")]
    TrackInactive { track_id: String },
}

/// Persistence errors.
///
/// Load-time failures (missing or corrupt blobs) are downgraded to the
/// initial state by callers; write failures are logged and swallowed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record at {path}: {reason}")]
    Corrupt { path: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Dialogue session errors.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    #[error("Dialogue for card {card_id} already reached its terminal step")]
    SessionComplete { card_id: String },
}

/// Profile collaborator errors.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Profile storage failed: {0}")]
    Storage(String),

    #[error("Unknown persona: {0}")]
    UnknownPersona(String),
}

/// Notification collaborator errors. Never block core state transitions.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Message build failed: {0}")]
    Build(String),

    #[error("Transport failed: {0}")]
    Transport(String),
}

/// Result type alias for the engine.
pub type Result<T> = std::result::Result<T, Error>;
