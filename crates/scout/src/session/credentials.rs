use serde::{Deserialize, Serialize};

use crate::validation::{FieldErrors, check_email};

/// Minimum password length accepted by the login form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Login form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Validate the login form before attempting authentication
pub fn validate_login(credentials: &Credentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_email(&mut errors, "email", &credentials.email);

    if credentials.password.is_empty() {
        errors.add("password", "Password is required");
    } else if credentials.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }

    errors.into_result()
}
