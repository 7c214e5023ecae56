//! Scout CLI library

pub mod commands;
pub mod error;
pub mod prompt;
pub mod render;
