//! Command line interface
//!
//! | Command | Description |
//! |---------|-------------|
//! | `add <id> <name> <age>` | Store a user, then reload the overview |
//! | `get <id>` | Print one user |
//! | `overview` | Print all users, the adults among them and the load status |
//! | `bindings` | Print the active profile's binding table |
//!
//! With the `test` profile the repository lives in memory, so data does not
//! survive the process.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use userdeck_application::OverviewState;
use userdeck_domain::User;
use userdeck_infrastructure::config::{ConfigLoader, Profile};
use userdeck_infrastructure::di::{AppContext, init_app};
use userdeck_infrastructure::logging::init_logging;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Command line interface for Userdeck
#[derive(Parser, Debug)]
#[command(name = "userdeck")]
#[command(about = "Userdeck - user directory with swappable repositories")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Binding profile, overriding configuration (production or test)
    #[arg(short, long, value_parser = parse_profile)]
    pub profile: Option<Profile>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Userdeck commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a user under an id
    Add {
        /// User id
        id: String,
        /// Display name
        name: String,
        /// Age in years
        age: u32,
    },
    /// Print the user stored under an id
    Get {
        /// User id
        id: String,
    },
    /// Print all users and the adults among them
    Overview,
    /// Print the active binding table
    Bindings,
}

fn parse_profile(value: &str) -> Result<Profile, String> {
    value.parse().map_err(|e: userdeck_domain::Error| e.to_string())
}

/// Load configuration, install logging, build the context and run the command
pub async fn run(cli: Cli) -> CliResult {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(profile) = cli.profile {
        loader = loader.with_profile(profile);
    }
    let config = loader.load()?;
    init_logging(&config.logging)?;
    loader.log_source();

    let context = init_app(config).await?;
    let mut stdout = io::stdout().lock();
    execute(&context, &cli.command, &mut stdout).await
}

/// Run one command against an application context, writing to `out`
pub async fn execute<W: Write + ?Sized>(
    context: &AppContext,
    command: &Command,
    out: &mut W,
) -> CliResult {
    debug!(?command, profile = %context.profile(), "Executing command");
    match command {
        Command::Add { id, name, age } => {
            let view_model = context.overview_view_model()?;
            view_model.add_user(id, User::new(name.as_str(), *age)).await?;
            writeln!(out, "Added {id}: {}", format_user(&User::new(name.as_str(), *age)))?;
        }
        Command::Get { id } => match context.user_repository()?.get_user(id).await? {
            Some(user) => writeln!(out, "{id}: {}", format_user(&user))?,
            None => writeln!(out, "No user with id {id}")?,
        },
        Command::Overview => {
            let view_model = context.overview_view_model()?;
            let fetched = view_model.fetch_users().await;
            let adults = view_model.adults().current();
            write_overview(out, &view_model.state().current(), &adults)?;
            fetched?;
        }
        Command::Bindings => {
            writeln!(out, "profile: {}", context.profile())?;
            for binding in context.bindings() {
                writeln!(out, "  {binding}")?;
            }
        }
    }
    Ok(())
}

fn format_user(user: &User) -> String {
    format!("{} ({})", user.name, user.age)
}

fn write_overview<W: Write + ?Sized>(
    out: &mut W,
    state: &OverviewState,
    adults: &[User],
) -> io::Result<()> {
    writeln!(out, "users ({}):", state.users.len())?;
    for user in &state.users {
        writeln!(out, "  {}", format_user(user))?;
    }
    writeln!(out, "adults ({}):", adults.len())?;
    for user in adults {
        writeln!(out, "  {}", format_user(user))?;
    }
    writeln!(out, "loading: {}", state.is_loading)?;
    if let Some(error) = &state.error {
        writeln!(out, "error: {error}")?;
    }
    Ok(())
}
