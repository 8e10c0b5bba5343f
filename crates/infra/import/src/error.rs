//! Import error types

use common::JournalError;
use thiserror::Error;

/// Errors that abort an import.
///
/// Problems confined to a single CSV row are reported through
/// [`crate::RowError`] instead and never surface here.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV framing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The source has no header row
    #[error("File has no header row")]
    NoHeader,

    /// Required columns could not be matched to any header
    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// The configured delimiter is not a single ASCII character
    #[error("Invalid delimiter: {0:?}")]
    InvalidDelimiter(String),

    /// A JSON journal document failed validation
    #[error("Invalid document at index {index}: {source}")]
    InvalidDocument {
        /// Position in the JSON array
        index: usize,
        /// Validation failure
        #[source]
        source: JournalError,
    },
}
