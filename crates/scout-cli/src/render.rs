//! Plain-text rendering of the candidate table

use std::collections::BTreeSet;
use std::fmt::Write;

use scout::api::SendMessageResponse;
use scout::history::MessageRecord;
use scout::validation::FieldErrors;
use scout_core::candidate::parse_timestamp;
use scout_core::{Candidate, SortColumn, SortDirection, SortState, TablePage};

const USERNAME_WIDTH: usize = 20;
const JOINED_WIDTH: usize = 12;
const SCORE_WIDTH: usize = 7;

/// Join date as `YYYY-MM-DD`, or the raw value when it does not parse
pub fn format_joined(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_skills(candidate: &Candidate) -> String {
    candidate
        .skills
        .iter()
        .map(|skill| format!("{} ({})", skill.language, skill.level))
        .collect::<Vec<_>>()
        .join(", ")
}

fn header(label: &str, column: SortColumn, sort: SortState) -> String {
    match sort.active() {
        Some((active, SortDirection::Asc)) if active == column => format!("{label} ↑"),
        Some((active, SortDirection::Desc)) if active == column => format!("{label} ↓"),
        _ => label.to_string(),
    }
}

/// "N candidates found"
pub fn results_counter(total_items: usize) -> String {
    match total_items {
        0 => "No candidates found".to_string(),
        1 => "1 candidate found".to_string(),
        n => format!("{n} candidates found"),
    }
}

/// Render one table page; contacted candidates are flagged with `✓`
pub fn format_table(
    page: &TablePage,
    page_size: usize,
    sort: SortState,
    contacted: &BTreeSet<String>,
) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "  {:<uw$} {:<jw$} {:>sw$}  {}",
        header("username", SortColumn::Username, sort),
        header("joined", SortColumn::JoinedAt, sort),
        header("score", SortColumn::Score, sort),
        "skills",
        uw = USERNAME_WIDTH,
        jw = JOINED_WIDTH,
        sw = SCORE_WIDTH,
    );

    for candidate in &page.items {
        let marker = if contacted.contains(&candidate.username) {
            '✓'
        } else {
            ' '
        };
        let _ = writeln!(
            out,
            "{} {:<uw$} {:<jw$} {:>sw$}  {}",
            marker,
            format!("@{}", candidate.username),
            format_joined(&candidate.joined_at),
            candidate.score,
            format_skills(candidate),
            uw = USERNAME_WIDTH,
            jw = JOINED_WIDTH,
            sw = SCORE_WIDTH,
        );
    }

    let _ = writeln!(out);
    let _ = write!(out, "{}", results_counter(page.total_items));
    if page.total_items > 0 {
        let first = (page.current_page - 1) * page_size + 1;
        let last = first + page.items.len() - 1;
        let _ = write!(
            out,
            " · showing {first}-{last} · page {} of {}",
            page.current_page, page.total_pages
        );
    }
    out.push('\n');
    out
}

pub fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}\n"))
        .collect()
}

pub fn format_sent(username: &str, response: &SendMessageResponse) -> String {
    format!(
        "✅ Message sent to @{} (id {}, status {}). A copy will be sent to your email.",
        username, response.id, response.status
    )
}

pub fn format_history(records: &[MessageRecord]) -> String {
    if records.is_empty() {
        return "No messages sent yet\n".to_string();
    }

    records
        .iter()
        .map(|record| {
            format!(
                "#{:<5} {:<20} {:<12} {}  {}\n",
                record.id,
                format!("@{}", record.candidate_username),
                record.role,
                format_joined(&record.submitted_at),
                record.msj
            )
        })
        .collect()
}
