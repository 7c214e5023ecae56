//! Stateful wrapper that owns the table state for one view.
//!
//! The engine itself is stateless; this controller enforces the interaction
//! rules around it: any change to filters or sorting sends the user back to
//! the first page, and page navigation never leaves `[1, total_pages]`.

use std::collections::BTreeSet;

use super::{
    FilterState, PAGE_SIZES, PageState, SortColumn, SortState, TablePage, engine,
};
use crate::{Candidate, CoreError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableController {
    filter: FilterState,
    sort: SortState,
    page: PageState,
    /// Filtered count from the last `view`, used to bound navigation.
    /// `None` once the filters changed and until the next `view`.
    total_items: Option<usize>,
}

impl TableController {
    /// Create a controller with the given initial page size
    pub fn new(page_size: usize) -> Result<Self> {
        let mut controller = Self::default();
        controller.change_page_size(page_size)?;
        Ok(controller)
    }

    /// Run the engine over `candidates` with the current state.
    ///
    /// The effective (clamped) page is written back so that later navigation
    /// starts from what the user actually sees.
    pub fn view(&mut self, candidates: &[Candidate]) -> TablePage {
        let page = engine::query(candidates, &self.filter, &self.sort, &self.page);
        self.total_items = Some(page.total_items);
        self.page.current_page = page.current_page;
        page
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort(&self) -> SortState {
        self.sort
    }

    pub fn current_page(&self) -> usize {
        self.page.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page.page_size
    }

    /// Page count as of the last `view`, unknown after a filter change
    pub fn total_pages(&self) -> Option<usize> {
        self.total_items.map(|total| self.page.total_pages(total))
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.filter.search_term = term.into();
        self.filters_changed();
    }

    pub fn set_level_filters<I, S>(&mut self, levels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.level_filters = levels.into_iter().map(Into::into).collect();
        self.filters_changed();
    }

    pub fn set_skill_filters<I, S>(&mut self, skills: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.skill_filters = skills.into_iter().map(Into::into).collect();
        self.filters_changed();
    }

    /// Add `level` to the level filters, or remove it if already selected
    pub fn toggle_level(&mut self, level: &str) {
        toggle(&mut self.filter.level_filters, level);
        self.filters_changed();
    }

    /// Add `language` to the skill filters, or remove it if already selected
    pub fn toggle_skill(&mut self, language: &str) {
        toggle(&mut self.filter.skill_filters, language);
        self.filters_changed();
    }

    /// Advance the sort cycle for `column`
    pub fn handle_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.cycle(column);
        self.reset_page();
    }

    /// Drop every filter and the sort order
    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.sort = SortState::none();
        self.filters_changed();
    }

    /// Jump to `page`; without a known page count only the lower bound
    /// applies and the next `view` clamps the rest
    pub fn go_to_page(&mut self, page: usize) {
        self.page.current_page = match self.total_pages() {
            Some(total) => page.clamp(1, total),
            None => page.max(1),
        };
    }

    pub fn next_page(&mut self) {
        if self.has_next_page() {
            self.page.current_page += 1;
        }
    }

    pub fn previous_page(&mut self) {
        if self.has_previous_page() {
            self.page.current_page -= 1;
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.total_pages()
            .is_none_or(|total| self.page.current_page < total)
    }

    pub fn has_previous_page(&self) -> bool {
        self.page.current_page > 1
    }

    /// Switch page size; only the sizes in [`PAGE_SIZES`] are accepted
    pub fn change_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZES.contains(&size) {
            return Err(CoreError::InvalidPageSize(size));
        }
        self.page.page_size = size;
        self.reset_page();
        Ok(())
    }

    /// One for a non-empty search term plus one per selected level and skill
    pub fn active_filters_count(&self) -> usize {
        usize::from(!self.filter.search_term.is_empty())
            + self.filter.level_filters.len()
            + self.filter.skill_filters.len()
    }

    fn reset_page(&mut self) {
        self.page.current_page = 1;
    }

    fn filters_changed(&mut self) {
        self.total_items = None;
        self.reset_page();
    }
}

/// Case-insensitive toggle: any spelling of `value` already present is removed
fn toggle(set: &mut BTreeSet<String>, value: &str) {
    let before = set.len();
    set.retain(|existing| !existing.eq_ignore_ascii_case(value));
    if set.len() == before {
        set.insert(value.to_string());
    }
}
