//! sift - latency record statistics over experiment directories

mod inspect_cli;
mod process_cli;

use batch::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Per-size statistics, outlier cleaning and plots for retrieval records", version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Process(process_cli::ProcessCommands),
    #[command(flatten)]
    Inspect(inspect_cli::InspectCommands),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            Config::load(path)?.with_env()
        }
        None => Config::from_env(),
    };

    match cli.command {
        Commands::Process(cmd) => process_cli::run(cmd, config)?,
        Commands::Inspect(cmd) => inspect_cli::run(cmd, &config)?,
    }

    Ok(())
}
