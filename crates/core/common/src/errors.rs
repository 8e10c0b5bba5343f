//! Common error types for journal records

use thiserror::Error;

/// Record validation errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum JournalError {
    /// A required field is absent
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    /// A price or size is zero, negative or not finite
    #[error("Invalid {field}: {value} (must be a positive number)")]
    InvalidPrice {
        /// Field name in document spelling
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// A field could not be interpreted
    #[error("Invalid {field}: {value:?}")]
    InvalidValue {
        /// Field name in document spelling
        field: &'static str,
        /// Raw value as found
        value: String,
    },

    /// `result` and `pnl` disagree about whether the trade is closed
    #[error("Inconsistent outcome: {0}")]
    InconsistentOutcome(String),
}
