//! Scout - browse developer candidates and contact them

use clap::{Parser, Subcommand};
use scout::{ScoutApp, ScoutConfig};
use scout_cli::commands::{self, CandidatesArgs};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scout")]
#[command(author, version, about = "Browse developer candidates and contact them", long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/scout/config.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted session and contacted list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL of the candidates API
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as the recruiter
    Login {
        /// Recruiter email
        #[arg(long, short)]
        email: String,

        /// Password (prompted when omitted)
        #[arg(long, short)]
        password: Option<String>,
    },
    /// Log out and forget the session
    Logout,
    /// Show session and storage status
    Status,
    /// List candidates with filters, sorting and pagination
    Candidates(CandidatesArgs),
    /// List the roles a candidate can be offered
    Roles,
    /// Send a message to a candidate
    Contact {
        /// Candidate username
        username: String,

        /// Role offered
        #[arg(long, short)]
        role: String,

        /// Message body (at least 10 characters)
        #[arg(long, short)]
        message: String,

        /// Email the copy is sent to
        #[arg(long, short)]
        email: String,
    },
    /// List contacted candidates
    Contacted {
        /// Forget every contacted candidate
        #[arg(long)]
        clear: bool,
    },
    /// Show sent messages
    History,
    /// Interactive candidate browser
    Browse,
}

impl Commands {
    fn requires_session(&self) -> bool {
        !matches!(
            self,
            Commands::Login { .. } | Commands::Logout | Commands::Status
        )
    }
}

fn init_logging(level: &str) {
    let filter = format!("scout={level},scout_cli={level}");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn resolve_config(cli: &Cli) -> anyhow::Result<ScoutConfig> {
    let mut config = ScoutConfig::load(cli.config.as_deref())?;

    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = Some(dir.clone());
    }
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&config.log_level);
    debug!("Using API at {}", config.api.base_url);

    let Some(command) = cli.command else {
        println!("Scout - browse developer candidates and contact them");
        println!("Use --help for more information");
        return Ok(());
    };

    let app = ScoutApp::from_config(config).await?;
    if command.requires_session() {
        app.require_session()?;
    }

    match command {
        Commands::Login { email, password } => commands::run_login(&app, email, password).await?,
        Commands::Logout => commands::run_logout(&app).await?,
        Commands::Status => commands::run_status(&app).await?,
        Commands::Candidates(args) => commands::run_candidates(&app, args).await?,
        Commands::Roles => commands::run_roles(&app).await?,
        Commands::Contact {
            username,
            role,
            message,
            email,
        } => commands::run_contact(&app, username, role, message, email).await?,
        Commands::Contacted { clear } => commands::run_contacted(&app, clear).await?,
        Commands::History => commands::run_history(&app).await?,
        Commands::Browse => commands::run_browse(&app).await?,
    }

    Ok(())
}
