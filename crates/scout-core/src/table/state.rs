//! Filter, sort and pagination state consumed by the table engine

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumString};

/// Page sizes offered to the user
pub const PAGE_SIZES: [usize; 3] = [10, 20, 30];

/// Default page size for a fresh table
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter selections; sets are membership-only
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub level_filters: BTreeSet<String>,
    pub skill_filters: BTreeSet<String>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.level_filters.is_empty() && self.skill_filters.is_empty()
    }
}

/// Sortable column
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortColumn {
    Username,
    JoinedAt,
    Score,
}

impl SortColumn {
    /// Parse a column name such as `joined_at`, case-insensitively
    pub fn parse(raw: &str) -> crate::Result<Self> {
        raw.trim()
            .parse()
            .map_err(|_| crate::CoreError::InvalidSortColumn(raw.to_string()))
    }
}

/// Sort direction
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Active sort; only applied when both fields are set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Option<SortColumn>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction: Some(direction),
        }
    }

    /// Unsorted state
    pub fn none() -> Self {
        Self::default()
    }

    /// The (column, direction) pair when sorting is active
    pub fn active(&self) -> Option<(SortColumn, SortDirection)> {
        self.column.zip(self.direction)
    }

    /// Advance the three-state cycle for `column`: none → asc → desc → none.
    ///
    /// Selecting a column other than the current one starts over at asc.
    pub fn cycle(self, column: SortColumn) -> Self {
        match self.active() {
            Some((current, SortDirection::Asc)) if current == column => {
                Self::new(column, SortDirection::Desc)
            }
            Some((current, SortDirection::Desc)) if current == column => Self::none(),
            _ => Self::new(column, SortDirection::Asc),
        }
    }
}

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub current_page: usize,
    pub page_size: usize,
}

impl PageState {
    pub fn new(current_page: usize, page_size: usize) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of pages needed for `total_items`, never less than one
    pub fn total_pages(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size.max(1)).max(1)
    }

    /// `current_page` clamped into `[1, total_pages]`
    pub fn clamped_page(&self, total_items: usize) -> usize {
        self.current_page.clamp(1, self.total_pages(total_items))
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}
