//! Loose document shape of a trade as stored by the journal front end
//!
//! Every field is optional here; converting into [`TradeRecord`] is where the
//! record invariants are enforced.

use crate::errors::JournalError;
use crate::types::{
    Adherence, Direction, Session, StrategyId, TradeId, TradeOutcome, TradeRecord, TradeResult,
    check_positive,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";

/// Trade as found in the document store (camelCase JSON)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TradeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exit_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TradeResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<StrategyId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adherence_to_plan: Option<Adherence>,
}

/// Parse a stored date, accepting plain dates and full timestamps.
///
/// Timestamps are truncated to their calendar date; the time of day is returned
/// separately.
#[must_use]
pub fn parse_date(raw: &str) -> Option<(NaiveDate, Option<NaiveTime>)> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some((date, None));
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        let local = ts.naive_local();
        return Some((local.date(), Some(local.time())));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|ts| (ts.date(), Some(ts.time())))
}

/// Parse a time of day written as `HH:MM` or `HH:MM:SS`
#[must_use]
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, JournalError> {
    value.ok_or(JournalError::MissingField(field))
}

fn optional_time(
    raw: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveTime>, JournalError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => parse_time(s).map(Some).ok_or_else(|| JournalError::InvalidValue {
            field,
            value: s.to_string(),
        }),
    }
}

impl TryFrom<TradeDocument> for TradeRecord {
    type Error = JournalError;

    fn try_from(doc: TradeDocument) -> Result<Self, Self::Error> {
        let id = required(doc.id, "id")?;
        if id.as_str().trim().is_empty() {
            return Err(JournalError::MissingField("id"));
        }

        let raw_date = required(doc.date, "date")?;
        let (date, stamped_time) =
            parse_date(&raw_date).ok_or_else(|| JournalError::InvalidValue {
                field: "date",
                value: raw_date.clone(),
            })?;

        let entry_time = optional_time(doc.entry_time.as_deref(), "entryTime")?.or(stamped_time);
        let exit_time = optional_time(doc.exit_time.as_deref(), "exitTime")?;

        let entry_price = required(doc.entry_price, "entryPrice")?;
        let stop_loss = required(doc.stop_loss, "stopLoss")?;
        let take_profit = required(doc.take_profit, "takeProfit")?;
        let position_size = required(doc.position_size, "positionSize")?;
        check_positive("entryPrice", entry_price)?;
        check_positive("stopLoss", stop_loss)?;
        check_positive("takeProfit", take_profit)?;
        check_positive("positionSize", position_size)?;

        if let Some(pnl) = doc.pnl {
            if !pnl.is_finite() {
                return Err(JournalError::InvalidValue {
                    field: "pnl",
                    value: pnl.to_string(),
                });
            }
        }
        let outcome = TradeOutcome::from_parts(doc.result, doc.pnl)?;

        Ok(Self {
            id,
            date,
            entry_time,
            exit_time,
            session: doc.session,
            direction: required(doc.direction, "direction")?,
            entry_price,
            stop_loss,
            take_profit,
            position_size,
            outcome,
            strategy_id: doc
                .strategy_id
                .filter(|strategy| !strategy.as_str().trim().is_empty()),
            adherence: doc.adherence_to_plan.unwrap_or_default(),
        })
    }
}

impl From<TradeRecord> for TradeDocument {
    fn from(record: TradeRecord) -> Self {
        let result = record.result();
        let pnl = record.pnl();
        Self {
            id: Some(record.id),
            date: Some(record.date.format(DATE_FORMAT).to_string()),
            entry_time: record.entry_time.map(|t| t.format(TIME_FORMAT).to_string()),
            exit_time: record.exit_time.map(|t| t.format(TIME_FORMAT).to_string()),
            session: record.session,
            direction: Some(record.direction),
            entry_price: Some(record.entry_price),
            stop_loss: Some(record.stop_loss),
            take_profit: Some(record.take_profit),
            position_size: Some(record.position_size),
            pnl,
            result: Some(result),
            strategy_id: record.strategy_id,
            adherence_to_plan: Some(record.adherence),
        }
    }
}
