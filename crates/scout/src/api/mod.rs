pub mod client;
pub mod error;
pub mod model;

pub use client::{CandidateApi, HttpCandidateApi};
pub use error::{ApiError, ApiResult};
pub use model::{
    INVALID_ROLE, RolesResponse, SendMessageError, SendMessageRequest, SendMessageResponse,
};
