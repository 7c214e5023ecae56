use serde::{Deserialize, Serialize};

use crate::api::SendMessageRequest;
use crate::validation::{FieldErrors, check_email};

/// Minimum message length accepted by the contact form
pub const MIN_MESSAGE_LEN: usize = 10;

/// Contact form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub role: String,
    pub msj: String,
    pub email: String,
}

impl ContactForm {
    pub fn new(role: impl Into<String>, msj: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            msj: msj.into(),
            email: email.into(),
        }
    }

    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        if self.role.trim().is_empty() {
            errors.add("role", "Role is required");
        }

        if self.msj.trim().is_empty() {
            errors.add("msj", "Message is required");
        } else if self.msj.chars().count() < MIN_MESSAGE_LEN {
            errors.add(
                "msj",
                format!("Message must be at least {MIN_MESSAGE_LEN} characters"),
            );
        }

        check_email(&mut errors, "email", &self.email);

        errors.into_result()
    }

    pub fn to_request(&self) -> SendMessageRequest {
        SendMessageRequest {
            role: self.role.trim().to_string(),
            msj: self.msj.clone(),
            email: self.email.trim().to_string(),
        }
    }
}
