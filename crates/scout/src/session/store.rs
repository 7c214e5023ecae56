use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::Credentials;
use crate::config::AuthConfig;
use crate::observer::{Listeners, Subscription};
use crate::storage::{KeyValueStore, keys};

/// Client-side session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub is_authenticated: bool,
    pub token: Option<String>,
}

impl Session {
    fn authenticated(token: String) -> Self {
        Self {
            is_authenticated: true,
            token: Some(token),
        }
    }
}

/// Holds the login state and mirrors it into the key-value store.
///
/// This is a development gate, not a security boundary: the only accepted
/// credentials are the pair configured in [`AuthConfig`].
pub struct SessionStore {
    storage: Arc<dyn KeyValueStore>,
    auth: AuthConfig,
    state: RwLock<Session>,
    listeners: Listeners<Session>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Restore the session persisted in `storage`.
    ///
    /// Authenticated only when the flag is `"true"` and a non-empty token is
    /// present. Read failures leave the session logged out.
    pub async fn restore(storage: Arc<dyn KeyValueStore>, auth: AuthConfig) -> Self {
        let session = match read_persisted(storage.as_ref()).await {
            Ok(session) => session,
            Err(e) => {
                warn!("Failed to restore session, starting logged out: {}", e);
                Session::default()
            }
        };
        debug!("Session restored: authenticated={}", session.is_authenticated);

        Self {
            storage,
            auth,
            state: RwLock::new(session),
            listeners: Listeners::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Attempt to log in. Returns `false` for anything but the configured pair.
    pub async fn login(&self, credentials: &Credentials) -> bool {
        if credentials.email.trim() != self.auth.email || credentials.password != self.auth.password
        {
            info!("Login rejected for {}", credentials.email.trim());
            return false;
        }

        let _guard = self.write_lock.lock().await;
        let token = uuid::Uuid::new_v4().to_string();

        if let Err(e) = self.storage.set(keys::IS_AUTHENTICATED, "true").await {
            warn!("Failed to persist authentication flag: {}", e);
        }
        if let Err(e) = self.storage.set(keys::AUTH_TOKEN, &token).await {
            warn!("Failed to persist auth token: {}", e);
        }

        self.replace(Session::authenticated(token));
        info!("Logged in as {}", self.auth.email);
        true
    }

    /// Clear the session; safe to call when already logged out
    pub async fn logout(&self) {
        let _guard = self.write_lock.lock().await;

        if let Err(e) = self.storage.remove(keys::IS_AUTHENTICATED).await {
            warn!("Failed to remove authentication flag: {}", e);
        }
        if let Err(e) = self.storage.remove(keys::AUTH_TOKEN).await {
            warn!("Failed to remove auth token: {}", e);
        }

        self.replace(Session::default());
        info!("Logged out");
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    pub fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    /// Copy of the current session
    pub fn session(&self) -> Session {
        self.read().clone()
    }

    /// Get notified after every login and logout
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&Session) + Send + Sync + 'static,
    {
        self.listeners.subscribe(listener)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn replace(&self, session: Session) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
        self.listeners.notify(&session);
    }
}

async fn read_persisted(storage: &dyn KeyValueStore) -> crate::storage::StorageResult<Session> {
    let flag = storage.get(keys::IS_AUTHENTICATED).await?;
    let token = storage.get(keys::AUTH_TOKEN).await?;

    Ok(match (flag.as_deref(), token) {
        (Some("true"), Some(token)) if !token.is_empty() => Session::authenticated(token),
        _ => Session::default(),
    })
}
