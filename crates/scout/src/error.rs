//! Error types for scout crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoutError {
    #[error("Core error: {0}")]
    Core(#[from] scout_core::CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("API error: {0}")]
    Api(#[from] crate::api::ApiError),

    #[error("{0}")]
    Contact(#[from] crate::contact::ContactError),

    #[error("Not logged in. Run `scout login` first")]
    NotAuthenticated,

    #[error("Build error: {0}")]
    Build(String),
}

pub type Result<T> = std::result::Result<T, ScoutError>;
