//! Common types for the trade journal
//!
//! The record model shared by the statistics engine, the importers and the CLI.

pub mod document;
pub mod errors;
pub mod types;

pub use document::TradeDocument;
pub use errors::JournalError;
pub use types::{
    Adherence, ClosedResult, Direction, Session, StrategyId, TradeId, TradeOutcome, TradeRecord,
    TradeResult,
};
