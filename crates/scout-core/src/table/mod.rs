pub mod controller;
pub mod engine;
pub mod options;
pub mod state;

pub use controller::TableController;
pub use engine::{TablePage, filter_candidates, query, sort_candidates};
pub use options::{level_options, skill_options};
pub use state::{
    DEFAULT_PAGE_SIZE, FilterState, PAGE_SIZES, PageState, SortColumn, SortDirection, SortState,
};
