//! Interactive candidate browser

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use scout::ScoutApp;
use scout::contact::ContactForm;
use scout_core::table::{PAGE_SIZES, level_options, skill_options};
use scout_core::{Candidate, SkillLevel, SortColumn, TableController};

use crate::commands::contact::submit_contact;
use crate::error::CliError;
use crate::render::format_table;

const HELP: &str = "\
Commands:
  search <text>     filter by username or skill (empty clears)
  level <level>     toggle a level filter (Beginner, Intermediate, Advanced)
  skill <language>  toggle a skill filter
  sort <column>     cycle sorting on username, joined_at or score
  page <n>          jump to a page
  next / prev       move one page
  size <n>          rows per page (10, 20, 30)
  clear             remove all filters
  options           list available levels and skills
  contact <user>    message a candidate
  contacted         list contacted candidates
  reload            fetch candidates again
  help              show this help
  quit              leave the browser";

/// One line of browser input
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Show,
    Search(String),
    Level(String),
    Skill(String),
    Sort(SortColumn),
    Page(usize),
    Next,
    Prev,
    Size(usize),
    Clear,
    Options,
    Contact(String),
    Contacted,
    Reload,
    Help,
    Quit,
}

impl BrowseCommand {
    pub fn parse(line: &str) -> Result<Self, CliError> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "" | "show" => Self::Show,
            "search" | "s" => Self::Search(arg.to_string()),
            "level" => Self::Level(SkillLevel::parse(required(name, arg)?)?.to_string()),
            "skill" => Self::Skill(required(name, arg)?.to_string()),
            "sort" => Self::Sort(SortColumn::parse(required(name, arg)?)?),
            "page" | "p" => Self::Page(number(name, arg)?),
            "next" | "n" => Self::Next,
            "prev" => Self::Prev,
            "size" => Self::Size(number(name, arg)?),
            "clear" => Self::Clear,
            "options" => Self::Options,
            "contact" => Self::Contact(required(name, arg)?.trim_start_matches('@').to_string()),
            "contacted" => Self::Contacted,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => {
                return Err(CliError::InvalidInput(format!(
                    "Unknown command '{other}'. Type 'help' for a list"
                )));
            }
        };
        Ok(command)
    }
}

fn required<'a>(name: &str, arg: &'a str) -> Result<&'a str, CliError> {
    if arg.is_empty() {
        Err(CliError::InvalidInput(format!("'{name}' needs an argument")))
    } else {
        Ok(arg)
    }
}

fn number(name: &str, arg: &str) -> Result<usize, CliError> {
    required(name, arg)?
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("'{name}' needs a number")))
}

/// Apply a table command; returns false for commands the table does not handle
pub fn apply(table: &mut TableController, command: &BrowseCommand) -> Result<bool, CliError> {
    match command {
        BrowseCommand::Search(term) => table.set_search_term(term.clone()),
        BrowseCommand::Level(level) => table.toggle_level(level),
        BrowseCommand::Skill(skill) => table.toggle_skill(skill),
        BrowseCommand::Sort(column) => table.handle_sort(*column),
        BrowseCommand::Page(page) => table.go_to_page(*page),
        BrowseCommand::Next => table.next_page(),
        BrowseCommand::Prev => table.previous_page(),
        BrowseCommand::Size(size) => table.change_page_size(*size)?,
        BrowseCommand::Clear => table.clear_filters(),
        BrowseCommand::Show => {}
        _ => return Ok(false),
    }
    Ok(true)
}

async fn fetch(app: &ScoutApp) -> Vec<Candidate> {
    match app.api().get_user_list().await {
        Ok(candidates) => candidates,
        Err(e) => {
            eprintln!("❌ Error loading candidates: {e}");
            eprintln!("   Type 'reload' to try again");
            Vec::new()
        }
    }
}

fn print_page(app: &ScoutApp, table: &mut TableController, candidates: &[Candidate]) {
    let page = table.view(candidates);
    let active = table.active_filters_count();
    if active > 0 {
        println!("({active} active filters)");
    }
    print!(
        "{}",
        format_table(&page, table.page_size(), table.sort(), &app.contacted().snapshot())
    );
}

fn prompt(rl: &mut DefaultEditor, label: &str) -> Result<String, CliError> {
    Ok(rl.readline(label)?.trim().to_string())
}

async fn contact_flow(
    app: &ScoutApp,
    rl: &mut DefaultEditor,
    candidates: &[Candidate],
    username: &str,
) -> Result<(), CliError> {
    if !candidates.iter().any(|c| c.username == username) {
        return Err(CliError::InvalidInput(format!(
            "Candidate @{username} not found"
        )));
    }
    if app.contacted().is_contacted(username) {
        println!("✓ @{username} was already contacted");
        return Ok(());
    }

    // Roles are only a convenience; an unreachable list still allows free input
    let roles = match app.api().get_roles_list().await {
        Ok(roles) => roles.roles,
        Err(e) => {
            eprintln!("⚠️  Could not load roles: {e}");
            Vec::new()
        }
    };
    for (i, role) in roles.iter().enumerate() {
        println!("  {}. {}", i + 1, role);
    }

    let role = prompt(rl, "Role: ")?;
    let role = role
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| roles.get(i).cloned())
        .unwrap_or(role);
    let message = prompt(rl, "Message: ")?;
    let email = prompt(rl, "Email: ")?;

    submit_contact(app, username, &ContactForm::new(role, message, email)).await
}

pub async fn run_browse(app: &ScoutApp) -> Result<(), CliError> {
    println!("🔎 Scout candidate browser - Type 'help' for commands, 'quit' to leave");
    println!("=====================================================================");

    let _subscription = app.contacted().subscribe(|contacted| {
        println!("✓ Contacted list updated ({} candidates)", contacted.len());
    });

    let mut table = TableController::new(app.config().table.default_page_size)?;
    let mut candidates = fetch(app).await;
    print_page(app, &mut table, &candidates);

    let mut rl = DefaultEditor::new()?;

    loop {
        let line = match rl.readline("scout > ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("\nCtrl-C received. Use 'quit' to leave.");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            rl.add_history_entry(&line).ok();
        }

        let command = match BrowseCommand::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("❌ {e}");
                continue;
            }
        };

        match apply(&mut table, &command) {
            Ok(true) => {
                print_page(app, &mut table, &candidates);
                continue;
            }
            Ok(false) => {}
            Err(e) => {
                eprintln!("❌ {e} (choose one of {PAGE_SIZES:?})");
                continue;
            }
        }

        match command {
            BrowseCommand::Quit => break,
            BrowseCommand::Help => println!("{HELP}"),
            BrowseCommand::Options => {
                let levels: Vec<String> = level_options(&candidates)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("Levels: {}", levels.join(", "));
                println!("Skills: {}", skill_options(&candidates).join(", "));
            }
            BrowseCommand::Contacted => {
                for username in app.contacted().snapshot().iter() {
                    println!("@{username}");
                }
            }
            BrowseCommand::Reload => {
                app.contacted().reload().await;
                candidates = fetch(app).await;
                print_page(app, &mut table, &candidates);
            }
            BrowseCommand::Contact(username) => {
                match contact_flow(app, &mut rl, &candidates, &username).await {
                    Ok(()) => print_page(app, &mut table, &candidates),
                    Err(e) => eprintln!("❌ {e}"),
                }
            }
            _ => {}
        }
    }

    println!("Goodbye! 👋");
    Ok(())
}
