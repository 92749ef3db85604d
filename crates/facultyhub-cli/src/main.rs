use anyhow::Result;
use clap::{Parser, Subcommand};
use facultyhub_application::FacultyHub;
use facultyhub_infrastructure::FacultyHubPaths;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "facultyhub")]
#[command(about = "FacultyHub CLI - faculty research portal client", long_about = None)]
struct Cli {
    /// Directory holding config.toml and the saved identity
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show who is logged in and where the backend is
    Status,
    /// Log in with email and password, or with a Google identity token
    Login {
        #[arg(long, required_unless_present = "google_token")]
        email: Option<String>,
        #[arg(long, required_unless_present = "google_token")]
        password: Option<String>,
        #[arg(long, conflicts_with_all = ["email", "password"])]
        google_token: Option<String>,
    },
    /// End the session
    Logout,
    /// Show dashboard statistics
    Stats,
    /// Import publications from a Google Scholar profile URL
    Sync { url: String },
    /// Download a publication report
    Report {
        /// Columns to flip from the defaults (title, authors, tag, publishedBy, publishedDate, citedBy)
        #[arg(long, value_delimiter = ',')]
        toggle: Vec<String>,
        /// Target directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Manage collections of papers
    Collections {
        #[command(subcommand)]
        action: CollectionsAction,
    },
    /// Administrator analytics
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CollectionsAction {
    /// List collections
    List,
    /// Show the papers of one collection
    Show { id: String },
    /// Create an empty collection
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Create a collection from every paper with a tag
    ByTag { tag: String },
    /// Delete a collection
    Delete { id: String },
    /// Remove one paper from a collection
    RemovePaper { id: String, paper_id: String },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Portal-wide totals
    Dashboard,
    /// Faculty directory
    Faculty {
        #[arg(long)]
        search: Option<String>,
    },
    /// Publications between two years
    Range { from: String, to: String },
    /// Publication timeline of one faculty member
    User { id: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.config_dir {
        Some(dir) => FacultyHubPaths::at(dir),
        None => FacultyHubPaths::platform()?,
    };
    let hub = FacultyHub::open(&paths)?;
    tracing::debug!(config_dir = %paths.root().display(), "Client ready");

    match cli.command {
        Commands::Status => commands::session::status(&hub).await,
        Commands::Login {
            email,
            password,
            google_token,
        } => commands::session::login(&hub, email, password, google_token).await?,
        Commands::Logout => commands::session::logout(&hub).await,
        Commands::Stats => commands::dashboard::stats(&hub).await?,
        Commands::Sync { url } => commands::dashboard::sync(&hub, &url).await?,
        Commands::Report { toggle, out } => commands::report::download(&hub, &toggle, &out).await?,
        Commands::Collections { action } => match action {
            CollectionsAction::List => commands::collections::list(&hub).await?,
            CollectionsAction::Show { id } => commands::collections::show(&hub, &id).await?,
            CollectionsAction::Create { name, description } => {
                commands::collections::create(&hub, &name, &description).await?
            }
            CollectionsAction::ByTag { tag } => commands::collections::by_tag(&hub, &tag).await?,
            CollectionsAction::Delete { id } => commands::collections::delete(&hub, &id).await?,
            CollectionsAction::RemovePaper { id, paper_id } => {
                commands::collections::remove_paper(&hub, &id, &paper_id).await?
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Dashboard => commands::admin::dashboard(&hub).await?,
            AdminAction::Faculty { search } => commands::admin::faculty(&hub, search.as_deref()).await?,
            AdminAction::Range { from, to } => commands::admin::range(&hub, &from, &to).await?,
            AdminAction::User { id } => commands::admin::user(&hub, &id).await?,
        },
    }

    Ok(())
}
