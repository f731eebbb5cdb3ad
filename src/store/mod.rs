//! Persistence layer — whole-blob storage for progression and responses.
//!
//! Each logical record is one serialized JSON blob, read once at startup
//! and rewritten wholesale on every mutation. There is no field-level
//! locking or partial update; the program has exactly one logical actor.

mod json_file;
mod memory;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::progress::ProgressRecord;
use crate::responses::UserResponse;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Backend-agnostic store for the two persisted records.
///
/// `load_*` returns `Ok(None)` when no record has ever been saved; a
/// corrupt record is an error, which callers downgrade to the initial
/// state.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StoreError>;

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StoreError>;

    async fn load_responses(&self) -> Result<Option<Vec<UserResponse>>, StoreError>;

    async fn save_responses(&self, responses: &[UserResponse]) -> Result<(), StoreError>;
}
