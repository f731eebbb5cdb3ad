//! JSON-file store — one directory per user, one file per record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;

use crate::error::StoreError;
use crate::progress::ProgressRecord;
use crate::responses::UserResponse;

use super::StateStore;

const PROGRESS_FILE: &str = "progress.json";
const RESPONSES_FILE: &str = "responses.json";

/// File-backed store rooted at `<root>/<user_id>/`.
///
/// The user id comes from the identity collaborator and namespaces the
/// blobs in a multi-user deployment; the local default is single-tenant.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl AsRef<Path>, user_id: &str) -> Self {
        Self {
            dir: root.as_ref().join(user_id),
        }
    }

    async fn load_blob<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(file);
        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                reason: e.to_string(),
            })
    }

    async fn save_blob<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), raw).await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonFileStore {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StoreError> {
        self.load_blob(PROGRESS_FILE).await
    }

    async fn save_progress(&self, record: &ProgressRecord) -> Result<(), StoreError> {
        self.save_blob(PROGRESS_FILE, record).await
    }

    async fn load_responses(&self) -> Result<Option<Vec<UserResponse>>, StoreError> {
        self.load_blob(RESPONSES_FILE).await
    }

    async fn save_responses(&self, responses: &[UserResponse]) -> Result<(), StoreError> {
        self.save_blob(RESPONSES_FILE, &responses.to_vec()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::UserResponse;

    #[tokio::test]
    async fn missing_files_load_as_none() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path(), "local");
        assert!(store.load_progress().await.unwrap().is_none());
        assert!(store.load_responses().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn progress_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path(), "local");

        let mut record = ProgressRecord::default();
        record.unlocked_cards.push("z1".to_string());
        record.completed_cards.push("z1".to_string());

        store.save_progress(&record).await.unwrap();
        let loaded = store.load_progress().await.unwrap().unwrap();
        assert_eq!(loaded.unlocked_cards, vec!["z1"]);
        assert_eq!(loaded.completed_cards, vec!["z1"]);
    }

    #[tokio::test]
    async fn responses_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path(), "local");

        let responses = vec![UserResponse {
            card_id: "z1".to_string(),
            timestamp: 1_700_000_000_000,
            responses: vec!["woodworking".to_string()],
            final_strategy: Some("FINAL DIAGNOSIS".to_string()),
        }];
        store.save_responses(&responses).await.unwrap();

        let loaded = store.load_responses().await.unwrap().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].card_id, "z1");
        assert_eq!(loaded[0].final_strategy.as_deref(), Some("FINAL DIAGNOSIS"));
    }

    #[tokio::test]
    async fn corrupt_blob_is_an_error_not_a_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("local");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(PROGRESS_FILE), "{not json").unwrap();

        let store = JsonFileStore::new(tmp.path(), "local");
        let err = store.load_progress().await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn blob_uses_camel_case_wire_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(tmp.path(), "local");

        let mut record = ProgressRecord::default();
        record.unlocked_cards.push("z1".to_string());
        store.save_progress(&record).await.unwrap();

        let raw = std::fs::read_to_string(tmp.path().join("local").join(PROGRESS_FILE)).unwrap();
        assert!(raw.contains("\"unlockedCards\""));
        assert!(raw.contains("\"completedCards\""));
        assert!(raw.contains("\"claimedAchievements\""));
    }

    #[tokio::test]
    async fn stores_are_namespaced_per_user() {
        let tmp = tempfile::tempdir().unwrap();
        let alice = JsonFileStore::new(tmp.path(), "alice");
        let bob = JsonFileStore::new(tmp.path(), "bob");

        let mut record = ProgressRecord::default();
        record.completed_cards.push("z1".to_string());
        alice.save_progress(&record).await.unwrap();

        assert!(bob.load_progress().await.unwrap().is_none());
        assert!(alice.load_progress().await.unwrap().is_some());
    }
}
