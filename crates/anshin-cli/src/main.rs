//! `anshin`: run collection jobs from the command line.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

/// Success.
const EXIT_SUCCESS: u8 = 0;
/// Fatal failure: job failed, bad config, unknown area key.
const EXIT_FAILURE: u8 = 1;

#[derive(Parser)]
#[command(name = "anshin")]
#[command(about = "Collect allergy-friendly restaurant candidates for human review")]
#[command(version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true, env = "ANSHIN_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database path (overrides the config file).
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect one named area, or a batch of areas not collected recently.
    #[command(after_help = "\
Examples:
  anshin collect 福岡市中央区
  anshin collect --uncollected")]
    Collect {
        /// Area name, e.g. "福岡市中央区".
        #[arg(required_unless_present = "uncollected")]
        area: Option<String>,

        /// Process the next batch of uncollected or stale areas.
        #[arg(long, conflicts_with = "area")]
        uncollected: bool,
    },

    /// Sweep a preset bounding box on a 5 km grid.
    Mesh {
        /// Preset key, e.g. FUKUOKA_CITY or TOKYO_23.
        area_key: String,
    },

    /// Print the supported chain brands.
    ListChains,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ListChains => commands::list_chains(),
        Commands::Collect { area, uncollected } => {
            match commands::Context::load(cli.config.as_deref(), cli.db.as_deref()) {
                Ok(ctx) if uncollected => commands::collect_uncollected(&ctx).await,
                Ok(ctx) => commands::collect_area(&ctx, area.as_deref().unwrap_or_default()).await,
                Err(e) => Err(e),
            }
        }
        Commands::Mesh { area_key } => {
            match commands::Context::load(cli.config.as_deref(), cli.db.as_deref()) {
                Ok(ctx) => commands::mesh(&ctx, &area_key).await,
                Err(e) => Err(e),
            }
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
