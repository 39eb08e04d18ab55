//! Casabook CLI - exercise the commerce stack against a local snapshot.
//!
//! Commands:
//! - `casabook seed` - Create the admin account and a sample catalog
//! - `casabook demo` - Run an end-to-end cart checkout
//! - `casabook report` - Print best sellers and order volume

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::ReportArgs;
use config::CliConfig;

/// Casabook CLI - seed, demo, and report
#[derive(Parser)]
#[command(name = "casabook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the admin account and a sample catalog
    Seed,

    /// Run an end-to-end cart checkout against the seeded store
    Demo,

    /// Print best sellers and order volume
    Report(ReportArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Seed => commands::seed(&config),
        Commands::Demo => commands::demo(&config),
        Commands::Report(args) => commands::report(&config, &args),
    }
}
