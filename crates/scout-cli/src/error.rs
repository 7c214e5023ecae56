//! Error types for scout-cli

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Scout(#[from] scout::ScoutError),

    #[error("Input error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<scout::api::ApiError> for CliError {
    fn from(e: scout::api::ApiError) -> Self {
        CliError::Scout(e.into())
    }
}

impl From<scout_core::CoreError> for CliError {
    fn from(e: scout_core::CoreError) -> Self {
        CliError::Scout(e.into())
    }
}
