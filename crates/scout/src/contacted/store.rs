use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::observer::{Listeners, Subscription};
use crate::storage::{KeyValueStore, get_json, keys, set_json};

/// Immutable view of the contacted usernames
pub type ContactedSnapshot = Arc<BTreeSet<String>>;

/// Usernames the recruiter has already messaged.
///
/// One instance is shared by every view of the process. Each mutation is
/// persisted first, then every subscriber is notified synchronously with the
/// new snapshot. Persistence failures are logged and the in-memory set is
/// still updated.
pub struct ContactedStore {
    storage: Arc<dyn KeyValueStore>,
    contacted: RwLock<ContactedSnapshot>,
    listeners: Listeners<ContactedSnapshot>,
    write_lock: Mutex<()>,
}

impl ContactedStore {
    /// Load the persisted set; unreadable data yields an empty set
    pub async fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let contacted = read_persisted(storage.as_ref()).await;
        debug!("Loaded {} contacted candidates", contacted.len());

        Self {
            storage,
            contacted: RwLock::new(Arc::new(contacted)),
            listeners: Listeners::new(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn is_contacted(&self, username: &str) -> bool {
        self.read().contains(username)
    }

    /// Current set; later mutations never change a snapshot already handed out
    pub fn snapshot(&self) -> ContactedSnapshot {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Add `username` to the set, persist, then notify subscribers.
    ///
    /// The persisted set is merged in first, so marks written by another
    /// instance sharing the storage are kept.
    pub async fn mark_as_contacted(&self, username: &str) {
        let _guard = self.write_lock.lock().await;

        let mut next = read_persisted(self.storage.as_ref()).await;
        next.extend(self.snapshot().iter().cloned());
        next.insert(username.to_string());

        self.commit(next).await;
        debug!("Marked {} as contacted", username);
    }

    /// Empty the set, persist, then notify subscribers
    pub async fn clear_contacted(&self) {
        let _guard = self.write_lock.lock().await;
        self.commit(BTreeSet::new()).await;
        debug!("Cleared contacted candidates");
    }

    /// Re-read the persisted set, picking up writes made by other processes
    /// sharing the same storage. Subscribers are notified only if it changed.
    pub async fn reload(&self) {
        let _guard = self.write_lock.lock().await;
        let persisted = read_persisted(self.storage.as_ref()).await;

        if *self.snapshot() != persisted {
            let snapshot = Arc::new(persisted);
            *self.write() = snapshot.clone();
            self.listeners.notify(&snapshot);
        }
    }

    /// Get notified with the new snapshot after every mutation
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ContactedSnapshot) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    async fn commit(&self, next: BTreeSet<String>) {
        if let Err(e) = set_json(self.storage.as_ref(), keys::CONTACTED_CANDIDATES, &next).await {
            error!("Error saving contacted candidates: {}", e);
        }

        let snapshot = Arc::new(next);
        *self.write() = snapshot.clone();
        self.listeners.notify(&snapshot);
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, ContactedSnapshot> {
        self.contacted.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, ContactedSnapshot> {
        self.contacted.write().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn read_persisted(storage: &dyn KeyValueStore) -> BTreeSet<String> {
    match get_json::<Vec<String>>(storage, keys::CONTACTED_CANDIDATES).await {
        Ok(Some(usernames)) => usernames.into_iter().collect(),
        Ok(None) => BTreeSet::new(),
        Err(e) => {
            warn!("Error reading contacted candidates, starting empty: {}", e);
            BTreeSet::new()
        }
    }
}
