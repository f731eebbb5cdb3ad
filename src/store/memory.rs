//! In-memory store — ephemeral runs and tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::progress::ProgressRecord;
use crate::responses::UserResponse;

use super::StateStore;

/// Holds both records behind mutexes. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    progress: Mutex<Option<ProgressRecord>>,
    responses: Mutex<Option<Vec<UserResponse>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StoreError> {
        Ok(self.progress.lock().expect("lock poisoned").clone())
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StoreError> {
        *self.progress.lock().expect("lock poisoned") = Some(record.clone());
        Ok(())
    }

    async fn load_responses(&self) -> Result<Option<Vec<UserResponse>>, StoreError> {
        Ok(self.responses.lock().expect("lock poisoned").clone())
    }

    async fn save_responses(&self, responses: &[UserResponse]) -> Result<(), StoreError> {
        *self.responses.lock().expect("lock poisoned") = Some(responses.to_vec());
        Ok(())
    }
}
