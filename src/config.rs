//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

/// Program configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    /// Root directory for persisted state (one subdirectory per user).
    pub data_root: PathBuf,
    /// Cosmetic "typing" delay before a dialogue reply is delivered.
    /// Pacing only — not a concurrency primitive.
    pub typing_delay: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        Self {
            data_root: PathBuf::from(home).join(".growth-os"),
            typing_delay: Duration::from_millis(1500),
        }
    }
}

impl ProgramConfig {
    /// Build config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(dir) = std::env::var("GROWTH_OS_DATA_DIR") {
            config.data_root = PathBuf::from(dir);
        }
        if let Some(ms) = std::env::var("GROWTH_OS_TYPING_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.typing_delay = Duration::from_millis(ms);
        }
        config
    }
}
