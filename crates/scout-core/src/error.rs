//! Error types for scout-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid page size: {0} (allowed: 10, 20, 30)")]
    InvalidPageSize(usize),

    #[error("Invalid sort column: {0}")]
    InvalidSortColumn(String),

    #[error("Invalid skill level: {0}")]
    InvalidSkillLevel(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
