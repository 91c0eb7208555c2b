/// Roster - manage users of a remote REST collection
use clap::{ArgAction, Parser, Subcommand};
use roster::{
    commands::{self, Action},
    config::RosterConfig,
    shell,
};
use roster_view::render;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "List, add, edit and delete users of a remote REST collection", long_about = None)]
struct Cli {
    /// Base URL of the API (overrides config)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the user table
    List,
    /// Create a new user
    Add {
        /// Display name
        #[arg(short, long)]
        name: String,
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Website
        #[arg(short, long)]
        website: String,
    },
    /// Change a user's email or website and send it
    Edit {
        /// User id
        id: String,
        /// New email address
        #[arg(short, long)]
        email: Option<String>,
        /// New website
        #[arg(short, long)]
        website: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User id
        id: String,
    },
    /// Interactive session on stdin
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = match cli.verbose {
        0 => "roster=info,roster_client=info,roster_view=info",
        1 => "roster=debug,roster_client=debug,roster_view=debug",
        _ => "roster=trace,roster_client=trace,roster_view=trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let mut config = RosterConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.api.endpoint = endpoint;
    }
    config.validate()?;

    tracing::debug!(
        endpoint = %config.api.endpoint,
        error_policy = ?config.view.error_policy,
        "Configuration loaded"
    );

    let view = commands::connect(&config)?;

    let action = match cli.command {
        Commands::Shell => {
            let stdin = BufReader::new(tokio::io::stdin());
            shell::run(&view, stdin, tokio::io::stdout()).await?;
            return Ok(());
        }
        Commands::List => Action::List,
        Commands::Add {
            name,
            email,
            website,
        } => Action::Add {
            name,
            email,
            website,
        },
        Commands::Edit { id, email, website } => Action::Edit { id, email, website },
        Commands::Delete { id } => Action::Delete { id },
    };

    let outcome = commands::execute(&view, action).await;
    println!("{}", render(&view.snapshot().await));
    outcome?;

    Ok(())
}
