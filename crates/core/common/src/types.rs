//! Core types for the trade journal

use crate::errors::JournalError;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque trade identifier, unique within one journal
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(pub String);

impl TradeId {
    /// Create a new trade id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Foreign key to a named strategy
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategyId(pub String);

impl StrategyId {
    /// Create a new strategy id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trading session the trade was opened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Session {
    /// London session
    London,
    /// New York session
    #[serde(rename = "New York", alias = "NewYork")]
    NewYork,
    /// Tokyo session
    Tokyo,
    /// Sydney session
    Sydney,
}

impl Session {
    /// All sessions in declaration order
    pub const ALL: [Self; 4] = [Self::London, Self::NewYork, Self::Tokyo, Self::Sydney];

    /// Position of the session in [`Session::ALL`]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::London => 0,
            Self::NewYork => 1,
            Self::Tokyo => 2,
            Self::Sydney => 3,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::London => "London",
            Self::NewYork => "New York",
            Self::Tokyo => "Tokyo",
            Self::Sydney => "Sydney",
        };
        f.write_str(name)
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Long position
    Long,
    /// Short position
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Long => f.write_str("Long"),
            Self::Short => f.write_str("Short"),
        }
    }
}

/// Whether the trade followed the written plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Adherence {
    /// Plan followed
    #[default]
    Yes,
    /// Plan ignored
    No,
    /// Plan partially followed
    Partial,
}

/// Stored result of a trade, as it appears in journal documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradeResult {
    /// Closed in profit
    Win,
    /// Closed at a loss
    Loss,
    /// Closed flat
    Breakeven,
    /// Still open
    Ongoing,
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Win => "Win",
            Self::Loss => "Loss",
            Self::Breakeven => "Breakeven",
            Self::Ongoing => "Ongoing",
        };
        f.write_str(name)
    }
}

/// Result of a closed trade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClosedResult {
    /// Closed in profit
    Win,
    /// Closed at a loss
    Loss,
    /// Closed flat
    Breakeven,
}

impl ClosedResult {
    /// Infer the result from the sign of a realized `PnL`
    #[must_use]
    pub fn from_pnl(pnl: f64) -> Self {
        if pnl > 0.0 {
            Self::Win
        } else if pnl < 0.0 {
            Self::Loss
        } else {
            Self::Breakeven
        }
    }
}

impl From<ClosedResult> for TradeResult {
    fn from(result: ClosedResult) -> Self {
        match result {
            ClosedResult::Win => Self::Win,
            ClosedResult::Loss => Self::Loss,
            ClosedResult::Breakeven => Self::Breakeven,
        }
    }
}

/// Lifecycle state of a trade.
///
/// A closed trade always carries its realized `PnL` (possibly exactly zero); an
/// ongoing trade never does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TradeOutcome {
    /// Position still open
    Ongoing,
    /// Position closed with a realized `PnL`
    Closed {
        /// Recorded result
        result: ClosedResult,
        /// Realized profit and loss in account currency
        pnl: f64,
    },
}

impl TradeOutcome {
    /// Closed outcome with the result inferred from the `PnL` sign
    #[must_use]
    pub fn closed(pnl: f64) -> Self {
        Self::Closed {
            result: ClosedResult::from_pnl(pnl),
            pnl,
        }
    }

    /// Build an outcome from the stored `result` and `pnl` pair
    pub fn from_parts(result: Option<TradeResult>, pnl: Option<f64>) -> Result<Self, JournalError> {
        match (result, pnl) {
            (Some(TradeResult::Ongoing), None) | (None, None) => Ok(Self::Ongoing),
            (Some(TradeResult::Ongoing), Some(pnl)) => Err(JournalError::InconsistentOutcome(
                format!("ongoing trade carries a pnl of {pnl}"),
            )),
            (Some(result), None) => Err(JournalError::InconsistentOutcome(format!(
                "{result} trade has no pnl"
            ))),
            (Some(result), Some(pnl)) => {
                let result = match result {
                    TradeResult::Win => ClosedResult::Win,
                    TradeResult::Loss => ClosedResult::Loss,
                    _ => ClosedResult::Breakeven,
                };
                Ok(Self::Closed { result, pnl })
            }
            (None, Some(pnl)) => Ok(Self::closed(pnl)),
        }
    }
}

/// A single journal entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "crate::document::TradeDocument", into = "crate::document::TradeDocument")]
pub struct TradeRecord {
    /// Journal-unique id
    pub id: TradeId,
    /// Calendar date the trade was opened
    pub date: NaiveDate,
    /// Optional time of entry
    pub entry_time: Option<NaiveTime>,
    /// Optional time of exit
    pub exit_time: Option<NaiveTime>,
    /// Session the trade was taken in
    pub session: Option<Session>,
    /// Long or short
    pub direction: Direction,
    /// Entry price in quote currency
    pub entry_price: f64,
    /// Stop-loss price
    pub stop_loss: f64,
    /// Take-profit price
    pub take_profit: f64,
    /// Position size (lots, contracts or units)
    pub position_size: f64,
    /// Open or closed with `PnL`
    pub outcome: TradeOutcome,
    /// Strategy the trade belongs to
    pub strategy_id: Option<StrategyId>,
    /// Plan adherence, not used in statistics
    pub adherence: Adherence,
}

impl TradeRecord {
    /// Stored four-valued result
    #[must_use]
    pub fn result(&self) -> TradeResult {
        match self.outcome {
            TradeOutcome::Ongoing => TradeResult::Ongoing,
            TradeOutcome::Closed { result, .. } => result.into(),
        }
    }

    /// Realized `PnL`, present only for closed trades
    #[must_use]
    pub fn pnl(&self) -> Option<f64> {
        match self.outcome {
            TradeOutcome::Ongoing => None,
            TradeOutcome::Closed { pnl, .. } => Some(pnl),
        }
    }

    /// Whether the trade has been closed
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self.outcome, TradeOutcome::Closed { .. })
    }

    /// Check the record's invariants.
    ///
    /// Fields are public, so records built by hand may violate what the document
    /// conversion guarantees.
    pub fn validate(&self) -> Result<(), JournalError> {
        if self.id.0.trim().is_empty() {
            return Err(JournalError::MissingField("id"));
        }
        check_positive("entryPrice", self.entry_price)?;
        check_positive("stopLoss", self.stop_loss)?;
        check_positive("takeProfit", self.take_profit)?;
        check_positive("positionSize", self.position_size)?;
        if let Some(pnl) = self.pnl() {
            if !pnl.is_finite() {
                return Err(JournalError::InvalidValue {
                    field: "pnl",
                    value: pnl.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Reject non-finite and non-positive prices or sizes
pub(crate) fn check_positive(field: &'static str, value: f64) -> Result<(), JournalError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(JournalError::InvalidPrice { field, value })
    }
}
