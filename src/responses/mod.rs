//! Response store — the user's answers from completed dialogues.
//!
//! Keyed by card id with upsert semantics: re-running a card's dialogue
//! replaces the earlier entry, so only the latest run survives. The whole
//! collection is persisted after every mutation, same contract as the
//! progression record.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::StateStore;

/// One card's saved dialogue output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub card_id: String,
    /// Unix epoch milliseconds, stamped at save time.
    pub timestamp: i64,
    /// The user's answers, in the order they were given.
    pub responses: Vec<String>,
    /// The closing synthesis the dialogue produced, when it reached one.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub final_strategy: Option<String>,
}

/// In-memory collection of responses backed by a [`StateStore`].
pub struct ResponseStore {
    store: Arc<dyn StateStore>,
    entries: Vec<UserResponse>,
}

impl ResponseStore {
    /// Load the persisted collection, starting empty when nothing was saved
    /// yet or the blob is unreadable.
    pub async fn load(store: Arc<dyn StateStore>) -> Self {
        let entries = match store.load_responses().await {
            Ok(Some(entries)) => entries,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load saved responses, starting empty: {}", e);
                Vec::new()
            }
        };
        Self { store, entries }
    }

    /// Upsert a card's responses, stamping the current time. An existing
    /// entry for the card is replaced in place; otherwise the entry is
    /// appended. The full collection is persisted afterwards.
    pub async fn save(
        &mut self,
        card_id: &str,
        responses: Vec<String>,
        final_strategy: Option<String>,
    ) {
        let entry = UserResponse {
            card_id: card_id.to_string(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            responses,
            final_strategy,
        };
        match self.entries.iter_mut().find(|e| e.card_id == card_id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        if let Err(e) = self.store.save_responses(&self.entries).await {
            warn!("Failed to persist responses: {}", e);
        }
    }

    /// The saved entry for a card, if any.
    pub fn get(&self, card_id: &str) -> Option<&UserResponse> {
        self.entries.iter().find(|e| e.card_id == card_id)
    }

    /// All saved entries, in insertion order.
    pub fn all(&self) -> &[UserResponse] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn save_appends_new_entry_with_timestamp() {
        let mut store = ResponseStore::load(Arc::new(MemoryStore::new())).await;
        store
            .save("z1", vec!["answer one".into(), "answer two".into()], None)
            .await;

        let entry = store.get("z1").unwrap();
        assert_eq!(entry.responses.len(), 2);
        assert!(entry.timestamp > 0);
        assert!(entry.final_strategy.is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_entry_for_card() {
        let mut store = ResponseStore::load(Arc::new(MemoryStore::new())).await;
        store.save("z1", vec!["first run".into()], None).await;
        store
            .save(
                "z1",
                vec!["second run".into()],
                Some("the plan".into()),
            )
            .await;

        assert_eq!(store.all().len(), 1);
        let entry = store.get("z1").unwrap();
        assert_eq!(entry.responses, vec!["second run".to_string()]);
        assert_eq!(entry.final_strategy.as_deref(), Some("the plan"));
    }

    #[tokio::test]
    async fn entries_round_trip_through_the_store() {
        let backend = Arc::new(MemoryStore::new());
        {
            let mut store = ResponseStore::load(backend.clone()).await;
            store.save("z1", vec!["a".into()], Some("s".into())).await;
            store.save("i2", vec!["b".into()], None).await;
        }

        let reloaded = ResponseStore::load(backend).await;
        assert_eq!(reloaded.all().len(), 2);
        assert_eq!(reloaded.get("z1").unwrap().final_strategy.as_deref(), Some("s"));
        assert!(reloaded.get("i2").unwrap().final_strategy.is_none());
    }

    #[tokio::test]
    async fn distinct_cards_keep_distinct_entries() {
        let mut store = ResponseStore::load(Arc::new(MemoryStore::new())).await;
        store.save("z1", vec!["a".into()], None).await;
        store.save("z2", vec!["b".into()], None).await;
        assert_eq!(store.all().len(), 2);
        assert_eq!(store.all()[0].card_id, "z1");
        assert_eq!(store.all()[1].card_id, "z2");
    }

    #[test]
    fn wire_format_uses_camel_case_keys() {
        let entry = UserResponse {
            card_id: "z1".into(),
            timestamp: 1_700_000_000_000,
            responses: vec!["a".into()],
            final_strategy: Some("s".into()),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"cardId\""));
        assert!(json.contains("\"finalStrategy\""));

        let none = UserResponse {
            final_strategy: None,
            ..entry
        };
        let json = serde_json::to_string(&none).unwrap();
        assert!(!json.contains("finalStrategy"));
    }
}
