//! Application layer for Scout
//!
//! Wires the table engine from `scout-core` to the session and contacted
//! stores, the message history and the candidates API client.

pub mod api;
pub mod app;
pub mod config;
pub mod contact;
pub mod contacted;
pub mod error;
pub mod history;
pub mod observer;
pub mod session;
pub mod storage;
pub mod validation;

// Re-export core types
pub use scout_core::{
    Candidate, CoreError, FilterState, PageState, Skill, SkillLevel, SortColumn, SortDirection,
    SortState, TableController, TablePage, query,
};

pub use app::{ScoutApp, ScoutAppBuilder};
pub use config::ScoutConfig;
pub use error::{Result, ScoutError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::ScoutApp;
    pub use crate::contact::ContactForm;
    pub use crate::session::Credentials;
    pub use scout_core::{Candidate, TableController};
}
