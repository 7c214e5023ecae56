use thiserror::Error;

use crate::api::ApiError;
use crate::validation::FieldErrors;

/// Why a contact attempt did not go through
#[derive(Error, Debug)]
pub enum ContactError {
    #[error("@{0} was already contacted")]
    AlreadyContacted(String),

    #[error("Invalid form: {0}")]
    Invalid(FieldErrors),

    #[error("{message}. Please pick a valid role from the list")]
    InvalidRole { message: String },

    #[error("Error sending the message: {0}")]
    Api(#[from] ApiError),
}

impl ContactError {
    /// Field-level errors to show next to the form inputs
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            ContactError::Invalid(errors) => errors.clone(),
            ContactError::InvalidRole { message } => {
                let mut errors = FieldErrors::new();
                errors.add("role", message.clone());
                errors
            }
            _ => FieldErrors::new(),
        }
    }
}
