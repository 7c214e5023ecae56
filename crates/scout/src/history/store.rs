use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::api::SendMessageResponse;
use crate::storage::{KeyValueStore, get_json, keys, set_json};

/// One sent message as kept in the local history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: i64,
    pub candidate_username: String,
    pub role: String,
    pub msj: String,
    pub submitted_at: String,
}

impl MessageRecord {
    /// Build the history entry for a message accepted by the API
    pub fn from_response(candidate_username: impl Into<String>, response: &SendMessageResponse) -> Self {
        Self {
            id: response.id,
            candidate_username: candidate_username.into(),
            role: response.role.clone(),
            msj: response.msj.clone(),
            submitted_at: response.submitted_at.clone(),
        }
    }
}

/// Append-only log of sent messages
pub struct MessageHistory {
    storage: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl MessageHistory {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// All records, oldest first; unreadable data yields an empty list
    pub async fn list(&self) -> Vec<MessageRecord> {
        match get_json::<Vec<MessageRecord>>(self.storage.as_ref(), keys::MESSAGE_HISTORY).await {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                warn!("Error reading message history: {}", e);
                Vec::new()
            }
        }
    }

    /// Append `record` to the persisted history
    pub async fn append(&self, record: MessageRecord) {
        let _guard = self.write_lock.lock().await;

        let mut records = self.list().await;
        records.push(record);

        if let Err(e) = set_json(self.storage.as_ref(), keys::MESSAGE_HISTORY, &records).await {
            error!("Error saving message history: {}", e);
        }
    }

    /// Records sent to `username`, oldest first
    pub async fn for_candidate(&self, username: &str) -> Vec<MessageRecord> {
        self.list()
            .await
            .into_iter()
            .filter(|record| record.candidate_username == username)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryKeyValueStore;

    fn record(id: i64, username: &str) -> MessageRecord {
        MessageRecord {
            id,
            candidate_username: username.to_string(),
            role: "Backend".to_string(),
            msj: "Hello there, interested?".to_string(),
            submitted_at: "2024-05-01T12:00:00Z".to_string(),
        }
    }

    #[tokio::test]
    async fn test_append_keeps_order() {
        let history = MessageHistory::new(Arc::new(InMemoryKeyValueStore::new()));
        history.append(record(1, "ana")).await;
        history.append(record(2, "bob")).await;
        history.append(record(3, "ana")).await;

        let ids: Vec<i64> = history.list().await.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(history.for_candidate("ana").await.len(), 2);
    }

    #[tokio::test]
    async fn test_persisted_layout_uses_camel_case() {
        let storage = InMemoryKeyValueStore::new();
        let history = MessageHistory::new(Arc::new(storage.clone()));
        history.append(record(7, "ana")).await;

        let raw = storage.get(keys::MESSAGE_HISTORY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["candidateUsername"], "ana");
        assert_eq!(value[0]["submittedAt"], "2024-05-01T12:00:00Z");
        assert_eq!(value[0]["id"], 7);
    }

    #[tokio::test]
    async fn test_corrupt_history_reads_empty() {
        let storage = InMemoryKeyValueStore::with_entries([(keys::MESSAGE_HISTORY, "nope")]);
        let history = MessageHistory::new(Arc::new(storage));
        assert!(history.list().await.is_empty());
    }
}
