//! Configuration for the tradejournal CLI

use anyhow::Result;
use serde::{Deserialize, Serialize};
use trade_import::ImportConfig;

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// CSV import settings
    pub import: ImportConfig,
    /// Output formatting
    pub output: OutputConfig,
}

/// Output formatting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            import: ImportConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a file (optional) and `TRADEJOURNAL__*` environment variables
    pub fn from_file(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("TRADEJOURNAL").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.import.delimiter, ",");
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = CliConfig::from_file("/nonexistent/tradejournal.toml").unwrap();
        assert_eq!(config.import, ImportConfig::default());
    }
}
