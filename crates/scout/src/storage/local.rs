use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::warn;

use super::{KeyValueStore, StorageError, StorageResult};
use crate::config::ScoutConfig;

const STORAGE_FILE: &str = "storage.json";

/// Key-value store persisted as one JSON object file.
///
/// Every read goes to disk, so several processes sharing a data directory
/// observe each other's writes on their next read. Writes within one process
/// are serialized.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl FileKeyValueStore {
    /// Create a store backed by `<data_dir>/storage.json`
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORAGE_FILE),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Create a store from ScoutConfig
    pub fn from_config(config: &ScoutConfig) -> Self {
        Self::new(config.data_dir())
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> StorageResult<BTreeMap<String, String>> {
        match fs::read(&self.path).await {
            Ok(content) if content.is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Current entries for a write; an unreadable file is replaced rather
    /// than blocking every later write
    async fn load_for_write(&self) -> StorageResult<BTreeMap<String, String>> {
        match self.load().await {
            Err(StorageError::SerializationError(e)) => {
                warn!(
                    "Discarding corrupt storage file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    async fn save(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_vec_pretty(entries)?;
        let tmp_path = self.path.with_extension("json.tmp");

        let mut file = fs::File::create(&tmp_path).await?;
        file.write_all(&content).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let mut entries = self.load().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load_for_write().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        match self.load().await {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.save(&entries).await?;
                }
            }
            Err(StorageError::SerializationError(_)) => {
                let entries = self.load_for_write().await?;
                self.save(&entries).await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_new_instance() {
        let dir = tempfile::tempdir().unwrap();

        let store = FileKeyValueStore::new(dir.path());
        store.set("isAuthenticated", "true").await.unwrap();
        store.set("authToken", "abc").await.unwrap();
        store.remove("authToken").await.unwrap();

        let reopened = FileKeyValueStore::new(dir.path());
        assert_eq!(
            reopened.get("isAuthenticated").await.unwrap().as_deref(),
            Some("true")
        );
        assert_eq!(reopened.get("authToken").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        assert_eq!(store.get("anything").await.unwrap(), None);
        store.remove("anything").await.unwrap();

        store.set("k", "v").await.unwrap();
        assert!(store.path().exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storage.json"), "{not json").unwrap();

        let store = FileKeyValueStore::new(dir.path());
        let err = store.get("k").await.unwrap_err();
        assert!(matches!(err, StorageError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_write_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storage.json"), "{not json").unwrap();

        let store = FileKeyValueStore::new(dir.path());
        store.set("isAuthenticated", "true").await.unwrap();

        let reopened = FileKeyValueStore::new(dir.path());
        assert_eq!(
            reopened.get("isAuthenticated").await.unwrap().as_deref(),
            Some("true")
        );
    }

    #[tokio::test]
    async fn test_remove_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("storage.json"), "{not json").unwrap();

        let store = FileKeyValueStore::new(dir.path());
        store.remove("authToken").await.unwrap();
        assert_eq!(store.get("authToken").await.unwrap(), None);
    }
}
