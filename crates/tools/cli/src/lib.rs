//! tradejournal CLI library
//!
//! Each subcommand is a function returning the text it prints, so the binary
//! stays a thin shell over argument parsing and logging setup.

pub mod config;

pub use config::{CliConfig, OutputConfig};

use anyhow::{Context, Result};
use reporting::compute_statistics;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};
use trade_import::{Field, ImportReport, RowError, detect_columns, load_file};

/// Result of the `import` subcommand
#[derive(Debug, Clone)]
pub struct ImportOutput {
    /// Journal JSON of the accepted records
    pub json: String,
    /// Number of records written
    pub imported: usize,
    /// Rows left out
    pub skipped: Vec<RowError>,
}

fn load(input: &Path, config: &CliConfig) -> Result<ImportReport> {
    let report = load_file(input, &config.import)
        .with_context(|| format!("Failed to load journal from {}", input.display()))?;
    for row in &report.skipped {
        warn!(line = row.line, reason = %row.reason, "Skipped row");
    }
    Ok(report)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}

/// `tradejournal stats`: statistics of a journal file as JSON
pub fn run_stats(input: &Path, pretty: bool, config: &CliConfig) -> Result<String> {
    let report = load(input, config)?;
    let statistics = compute_statistics(&report.records);
    info!(
        trades = statistics.counts.total,
        net_pnl = statistics.net_pnl,
        "Statistics computed"
    );
    to_json(&statistics, pretty || config.output.pretty)
}

/// `tradejournal import`: validated journal JSON of a CSV export
pub fn run_import(input: &Path, config: &CliConfig) -> Result<ImportOutput> {
    let report = load(input, config)?;
    let json = to_json(&report.records, config.output.pretty)?;
    Ok(ImportOutput {
        json,
        imported: report.records.len(),
        skipped: report.skipped,
    })
}

/// `tradejournal columns`: the detected column mapping, one field per line
pub fn run_columns(input: &Path, config: &CliConfig) -> Result<String> {
    let file = std::fs::File::open(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    let mapping = detect_columns(file, &config.import)
        .with_context(|| format!("Failed to detect columns in {}", input.display()))?;

    let mut out = String::new();
    for field in Field::ALL {
        let header = mapping.header(field).unwrap_or("-");
        writeln!(out, "{:<16} {header}", field.name())?;
    }
    let unmapped = mapping.unmapped_headers();
    if !unmapped.is_empty() {
        writeln!(out, "unmapped: {}", unmapped.join(", "))?;
    }
    Ok(out)
}
