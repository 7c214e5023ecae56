use thiserror::Error;

use super::{INVALID_ROLE, SendMessageError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} failed with status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("{}", .0.message)]
    Rejected(SendMessageError),
}

impl ApiError {
    /// Whether the API rejected the message because of its role
    pub fn is_invalid_role(&self) -> bool {
        matches!(self, ApiError::Rejected(body) if body.error == INVALID_ROLE)
    }
}
