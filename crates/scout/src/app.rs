//! Application wiring for Scout
//!
//! `ScoutApp` owns the single process-wide instance of every store and the
//! API client. Views receive it (or clones of its `Arc`s) instead of reaching
//! for global state.

use std::sync::Arc;
use tracing::debug;

use crate::api::{CandidateApi, HttpCandidateApi};
use crate::config::ScoutConfig;
use crate::contact::ContactService;
use crate::contacted::ContactedStore;
use crate::error::{Result, ScoutError};
use crate::history::MessageHistory;
use crate::session::SessionStore;
use crate::storage::{FileKeyValueStore, KeyValueStore};
use scout_core::TableController;

/// The main Scout application
pub struct ScoutApp {
    config: ScoutConfig,
    api: Arc<dyn CandidateApi>,
    session: Arc<SessionStore>,
    contacted: Arc<ContactedStore>,
    history: Arc<MessageHistory>,
    contact: ContactService,
}

impl ScoutApp {
    /// Create a new builder
    pub fn builder(config: ScoutConfig) -> ScoutAppBuilder {
        ScoutAppBuilder::new(config)
    }

    /// File-backed storage and HTTP API, both taken from `config`
    pub async fn from_config(config: ScoutConfig) -> Result<Self> {
        let storage = Arc::new(FileKeyValueStore::from_config(&config));
        let api = Arc::new(HttpCandidateApi::from_config(&config));
        Self::builder(config).storage(storage).api(api).build().await
    }

    pub fn config(&self) -> &ScoutConfig {
        &self.config
    }

    pub fn api(&self) -> &Arc<dyn CandidateApi> {
        &self.api
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn contacted(&self) -> &Arc<ContactedStore> {
        &self.contacted
    }

    pub fn history(&self) -> &Arc<MessageHistory> {
        &self.history
    }

    pub fn contact(&self) -> &ContactService {
        &self.contact
    }

    /// Gate for views that need a logged-in recruiter
    pub fn require_session(&self) -> Result<()> {
        if self.session.is_authenticated() {
            Ok(())
        } else {
            Err(ScoutError::NotAuthenticated)
        }
    }

    /// Fresh table state using the configured page size
    pub fn new_table(&self) -> Result<TableController> {
        Ok(TableController::new(self.config.table.default_page_size)?)
    }
}

/// Builder for creating Scout applications
pub struct ScoutAppBuilder {
    config: ScoutConfig,
    storage: Option<Arc<dyn KeyValueStore>>,
    api: Option<Arc<dyn CandidateApi>>,
}

impl ScoutAppBuilder {
    /// Create a new builder
    pub fn new(config: ScoutConfig) -> Self {
        Self {
            config,
            storage: None,
            api: None,
        }
    }

    /// Set the persistence backend
    pub fn storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Set the candidates API
    pub fn api(mut self, api: Arc<dyn CandidateApi>) -> Self {
        self.api = Some(api);
        self
    }

    /// Build the application, restoring persisted state
    pub async fn build(self) -> Result<ScoutApp> {
        let storage = self
            .storage
            .ok_or_else(|| ScoutError::Build("No storage configured".to_string()))?;
        let api = self
            .api
            .ok_or_else(|| ScoutError::Build("No API configured".to_string()))?;

        // Validate the page size up front rather than on first table use
        TableController::new(self.config.table.default_page_size)?;

        let session = Arc::new(SessionStore::restore(storage.clone(), self.config.auth.clone()).await);
        let contacted = Arc::new(ContactedStore::load(storage.clone()).await);
        let history = Arc::new(MessageHistory::new(storage));
        let contact = ContactService::new(api.clone(), contacted.clone(), history.clone());

        debug!(
            "Scout app ready: authenticated={}, contacted={}",
            session.is_authenticated(),
            contacted.len()
        );

        Ok(ScoutApp {
            config: self.config,
            api,
            session,
            contacted,
            history,
            contact,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Credentials;
    use crate::storage::InMemoryKeyValueStore;

    fn api() -> Arc<dyn CandidateApi> {
        Arc::new(HttpCandidateApi::new("http://127.0.0.1:9"))
    }

    #[tokio::test]
    async fn test_build_requires_storage_and_api() {
        let err = ScoutApp::builder(ScoutConfig::default())
            .api(api())
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScoutError::Build(_)));

        let err = ScoutApp::builder(ScoutConfig::default())
            .storage(Arc::new(InMemoryKeyValueStore::new()))
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScoutError::Build(_)));
    }

    #[tokio::test]
    async fn test_build_rejects_bad_page_size() {
        let mut config = ScoutConfig::default();
        config.table.default_page_size = 25;

        let err = ScoutApp::builder(config)
            .storage(Arc::new(InMemoryKeyValueStore::new()))
            .api(api())
            .build()
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ScoutError::Core(_)));
    }

    #[tokio::test]
    async fn test_session_gate() {
        let app = ScoutApp::builder(ScoutConfig::default())
            .storage(Arc::new(InMemoryKeyValueStore::new()))
            .api(api())
            .build()
            .await
            .unwrap();

        assert!(matches!(
            app.require_session(),
            Err(ScoutError::NotAuthenticated)
        ));

        app.session()
            .login(&Credentials::new("recruiter@coto.com", "123456"))
            .await;
        assert!(app.require_session().is_ok());
        assert_eq!(app.new_table().unwrap().page_size(), 10);
    }
}
