//! One-shot candidate listing

use clap::Args;
use scout::ScoutApp;
use scout_core::{PageState, SkillLevel, SortColumn, TableController, TablePage, query};
use scout_core::{Candidate, table::level_options, table::skill_options};

use crate::error::CliError;
use crate::render::format_table;

#[derive(Debug, Clone, Default, Args)]
pub struct CandidatesArgs {
    /// Free-text search over usernames and skill languages
    #[arg(long, short)]
    pub search: Option<String>,

    /// Require a skill level (repeatable, all must match)
    #[arg(long, short = 'l', action = clap::ArgAction::Append)]
    pub level: Vec<String>,

    /// Require a skill language (repeatable, all must match)
    #[arg(long, short = 'k', action = clap::ArgAction::Append)]
    pub skill: Vec<String>,

    /// Sort column: username, joined_at or score
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show
    #[arg(long, short, default_value_t = 1)]
    pub page: usize,

    /// Rows per page: 10, 20 or 30
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,

    /// List the level and skill values available for filtering
    #[arg(long)]
    pub options: bool,
}

/// Build the table state described by `args`
pub fn table_from_args(
    args: &CandidatesArgs,
    default_page_size: usize,
) -> Result<TableController, CliError> {
    let mut table = TableController::new(args.page_size.unwrap_or(default_page_size))?;

    if let Some(search) = &args.search {
        table.set_search_term(search.clone());
    }

    let levels = args
        .level
        .iter()
        .map(|level| SkillLevel::parse(level).map(|level| level.to_string()))
        .collect::<Result<Vec<_>, _>>()?;
    table.set_level_filters(levels);
    table.set_skill_filters(args.skill.iter().cloned());

    if let Some(sort) = &args.sort {
        let column = SortColumn::parse(sort)?;
        table.handle_sort(column);
        if args.desc {
            table.handle_sort(column);
        }
    }

    Ok(table)
}

/// Query one page, honouring the requested page number
pub fn page_for(candidates: &[Candidate], table: &TableController, page: usize) -> TablePage {
    query(
        candidates,
        table.filter(),
        &table.sort(),
        &PageState::new(page, table.page_size()),
    )
}

pub async fn run_candidates(app: &ScoutApp, args: CandidatesArgs) -> Result<(), CliError> {
    let table = table_from_args(&args, app.config().table.default_page_size)?;
    let candidates = app.api().get_user_list().await?;

    if args.options {
        let levels: Vec<String> = level_options(&candidates)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("Levels: {}", levels.join(", "));
        println!("Skills: {}", skill_options(&candidates).join(", "));
        return Ok(());
    }

    let page = page_for(&candidates, &table, args.page);

    if args.json {
        let json = serde_json::to_string_pretty(&page)
            .map_err(|e| CliError::InvalidInput(format!("Failed to encode page: {e}")))?;
        println!("{json}");
    } else {
        print!(
            "{}",
            format_table(&page, table.page_size(), table.sort(), &app.contacted().snapshot())
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::SortDirection;

    fn data() -> Vec<Candidate> {
        (0..25)
            .map(|i| {
                let level = if i < 5 { SkillLevel::Advanced } else { SkillLevel::Beginner };
                Candidate::new(format!("dev{i:02}"), "2023-01-01", i as f64)
                    .with_skill("Rust", level)
            })
            .collect()
    }

    #[test]
    fn test_args_build_table_state() {
        let args = CandidatesArgs {
            search: Some("dev".to_string()),
            level: vec!["advanced".to_string()],
            skill: vec!["Rust".to_string()],
            sort: Some("score".to_string()),
            desc: true,
            page: 1,
            page_size: Some(20),
            ..Default::default()
        };

        let table = table_from_args(&args, 10).unwrap();
        assert_eq!(table.page_size(), 20);
        assert_eq!(table.active_filters_count(), 3);
        assert!(table.filter().level_filters.contains("Advanced"));
        assert_eq!(
            table.sort().active(),
            Some((SortColumn::Score, SortDirection::Desc))
        );

        let page = page_for(&data(), &table, 1);
        let names: Vec<_> = page.items.iter().map(|c| c.username.as_str()).collect();
        assert_eq!(names, vec!["dev04", "dev03", "dev02", "dev01", "dev00"]);
    }

    #[test]
    fn test_invalid_args_are_rejected() {
        let bad_level = CandidatesArgs {
            level: vec!["Guru".to_string()],
            ..Default::default()
        };
        assert!(table_from_args(&bad_level, 10).is_err());

        let bad_sort = CandidatesArgs {
            sort: Some("email".to_string()),
            ..Default::default()
        };
        assert!(table_from_args(&bad_sort, 10).is_err());

        let bad_size = CandidatesArgs {
            page_size: Some(15),
            ..Default::default()
        };
        assert!(table_from_args(&bad_size, 10).is_err());
    }

    #[test]
    fn test_page_beyond_range_is_clamped() {
        let table = table_from_args(&CandidatesArgs::default(), 10).unwrap();
        let page = page_for(&data(), &table, 9);
        assert_eq!(page.current_page, 3);
        assert_eq!(page.items.len(), 5);
    }
}
