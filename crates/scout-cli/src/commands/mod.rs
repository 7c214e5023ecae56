//! CLI command handlers

pub mod auth;
pub mod browse;
pub mod candidates;
pub mod contact;
pub mod contacted;
pub mod history;
pub mod roles;

pub use auth::{run_login, run_logout, run_status};
pub use browse::run_browse;
pub use candidates::{CandidatesArgs, run_candidates};
pub use contact::run_contact;
pub use contacted::run_contacted;
pub use history::run_history;
pub use roles::run_roles;
