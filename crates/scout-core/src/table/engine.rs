//! Filter → sort → paginate pipeline over a candidate list

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{FilterState, PageState, SortColumn, SortDirection, SortState};
use crate::Candidate;

/// One page of the derived view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablePage {
    /// Candidates on the requested page
    pub items: Vec<Candidate>,
    /// Number of candidates after filtering, before pagination
    pub total_items: usize,
    /// `max(1, ceil(total_items / page_size))`
    pub total_pages: usize,
    /// Requested page clamped into `[1, total_pages]`
    pub current_page: usize,
}

impl TablePage {
    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

/// Derive the visible page from `candidates`.
///
/// Pure: the input is never mutated and identical arguments always produce
/// identical output. Filtering precedes sorting, which precedes pagination.
pub fn query(
    candidates: &[Candidate],
    filter: &FilterState,
    sort: &SortState,
    page: &PageState,
) -> TablePage {
    let mut rows = filter_candidates(candidates, filter);
    sort_candidates(&mut rows, sort);

    let total_items = rows.len();
    let total_pages = page.total_pages(total_items);
    let current_page = page.clamped_page(total_items);

    let start = (current_page - 1) * page.page_size;
    let items = rows
        .into_iter()
        .skip(start)
        .take(page.page_size)
        .cloned()
        .collect();

    TablePage {
        items,
        total_items,
        total_pages,
        current_page,
    }
}

/// Candidates matching every filter dimension, in input order
pub fn filter_candidates<'a>(
    candidates: &'a [Candidate],
    filter: &FilterState,
) -> Vec<&'a Candidate> {
    let term = filter.search_term.to_lowercase();

    candidates
        .iter()
        .filter(|candidate| {
            matches_search(candidate, &term)
                && filter
                    .level_filters
                    .iter()
                    .all(|level| candidate.has_level(level))
                && filter
                    .skill_filters
                    .iter()
                    .all(|language| candidate.has_language(language))
        })
        .collect()
}

fn matches_search(candidate: &Candidate, term: &str) -> bool {
    term.is_empty()
        || candidate.username.to_lowercase().contains(term)
        || candidate
            .skills
            .iter()
            .any(|skill| skill.language.to_lowercase().contains(term))
}

/// Stable in-place sort; a no-op unless both column and direction are set
pub fn sort_candidates(rows: &mut [&Candidate], sort: &SortState) {
    let Some((column, direction)) = sort.active() else {
        return;
    };

    match column {
        SortColumn::Username => rows.sort_by(|a, b| {
            directed(
                a.username.to_lowercase().cmp(&b.username.to_lowercase()),
                direction,
            )
        }),
        SortColumn::Score => rows.sort_by(|a, b| directed(a.score.total_cmp(&b.score), direction)),
        SortColumn::JoinedAt => rows.sort_by(|a, b| {
            match (a.joined_at_timestamp(), b.joined_at_timestamp()) {
                (Some(a), Some(b)) => directed(a.cmp(&b), direction),
                // Unparsable dates go last in both directions
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}
