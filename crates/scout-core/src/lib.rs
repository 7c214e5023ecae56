//! # Scout Core
//!
//! Candidate model and the filter → sort → paginate table engine.
//! Nothing in this crate performs I/O.

pub mod candidate;
pub mod error;
pub mod table;

pub use candidate::{Candidate, Skill, SkillLevel};
pub use error::{CoreError, Result};
pub use table::{
    FilterState, PageState, SortColumn, SortDirection, SortState, TableController, TablePage,
    query,
};
