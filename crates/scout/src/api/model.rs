//! Wire types of the candidates API

use serde::{Deserialize, Serialize};

/// Error code returned when the submitted role is not in the valid set
pub const INVALID_ROLE: &str = "invalid_role";

/// `GET /roleslist`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolesResponse {
    pub roles: Vec<String>,
}

/// `POST /messages` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub role: String,
    pub msj: String,
    pub email: String,
}

/// `POST /messages` success body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageResponse {
    pub id: i64,
    pub role: String,
    pub status: String,
    pub msj: String,
    pub submitted_at: String,
}

/// `POST /messages` failure body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessageError {
    pub error: String,
    pub message: String,
}
