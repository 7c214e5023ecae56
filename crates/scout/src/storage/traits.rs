use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use super::StorageResult;

/// Keys of the persisted state layout
pub mod keys {
    pub const IS_AUTHENTICATED: &str = "isAuthenticated";
    pub const AUTH_TOKEN: &str = "authToken";
    pub const CONTACTED_CANDIDATES: &str = "contactedCandidates";
    pub const MESSAGE_HISTORY: &str = "messageHistory";
}

/// String key-value persistence port
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key is absent
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key; removing an absent key is not an error
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read a JSON-encoded value
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get(key).await? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Write a value JSON-encoded
pub async fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
