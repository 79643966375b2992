//! CLI application for CCC estimate extraction and BCIF form filling.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, extract, fill, rules};

/// CCC estimate extraction - turn estimate documents into BCIF form data
#[derive(Parser)]
#[command(name = "bcif")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to a mapping rule file
    #[arg(short, long, global = true)]
    mapping: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract claim data from a single estimate
    Extract(extract::ExtractArgs),

    /// Extract and send to the form-filling service
    Fill(fill::FillArgs),

    /// Process multiple estimate files
    Batch(batch::BatchArgs),

    /// Manage mapping rule sets
    Rules(rules::RulesArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, cli.mapping.as_deref()).await,
        Commands::Fill(args) => fill::run(args, cli.mapping.as_deref()).await,
        Commands::Batch(args) => batch::run(args, cli.mapping.as_deref()).await,
        Commands::Rules(args) => rules::run(args).await,
    }
}
