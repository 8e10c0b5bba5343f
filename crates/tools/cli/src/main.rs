//! tradejournal - trade journal statistics from the command line

#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(dead_code)]
#![deny(unused)]
#![deny(missing_docs)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use tradejournal::{CliConfig, run_columns, run_import, run_stats};

/// Command line arguments
#[derive(Parser)]
#[command(name = "tradejournal")]
#[command(about = "Trade journal statistics and import")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "tradejournal.toml")]
    config: String,

    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands
#[derive(Subcommand)]
enum Commands {
    /// Compute statistics for a CSV or JSON journal
    Stats {
        /// Journal file, CSV or JSON by extension
        #[arg(short, long)]
        input: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Convert a CSV export into journal JSON
    Import {
        /// CSV export to convert
        #[arg(short, long)]
        input: PathBuf,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how CSV headers map to record fields
    Columns {
        /// CSV export to inspect
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = CliConfig::from_file(&cli.config);
    let log_level = loaded
        .as_ref()
        .map_or_else(|_| "info".to_string(), |c| c.log_level.clone());

    // Logs go to stderr; stdout carries command output only
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match loaded {
        Ok(config) => {
            info!("Loaded configuration from: {}", cli.config);
            config
        }
        Err(e) => {
            warn!("Failed to load config from {}: {e}", cli.config);
            info!("Using default configuration");
            CliConfig::default()
        }
    };

    match cli.command {
        Commands::Stats { input, pretty } => {
            println!("{}", run_stats(&input, pretty, &config)?);
        }
        Commands::Import { input, output } => {
            let result = run_import(&input, &config)?;
            match output {
                Some(path) => std::fs::write(&path, &result.json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", result.json),
            }
            eprintln!(
                "Imported {} records, skipped {} rows",
                result.imported,
                result.skipped.len()
            );
            for row in &result.skipped {
                eprintln!("  line {}: {}", row.line, row.reason);
            }
        }
        Commands::Columns { input } => {
            print!("{}", run_columns(&input, &config)?);
        }
    }

    Ok(())
}
