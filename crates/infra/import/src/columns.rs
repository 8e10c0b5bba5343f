//! Column-header guessing for journal exports
//!
//! Headers are normalised to lowercase alphanumerics and matched against alias
//! lists. Exact alias matches are resolved first; remaining headers may then
//! match by containing an alias of at least [`MIN_SUBSTRING_ALIAS`] characters,
//! longest alias first. Each header feeds at most one field.

use crate::ImportConfig;
use crate::error::ImportError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Shortest alias allowed to match inside a longer header
pub const MIN_SUBSTRING_ALIAS: usize = 4;

/// Record field a column can feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    Date,
    EntryTime,
    ExitTime,
    Session,
    Direction,
    EntryPrice,
    StopLoss,
    TakeProfit,
    PositionSize,
    Pnl,
    Result,
    StrategyId,
    AdherenceToPlan,
}

impl Field {
    /// Every field, in matching priority order
    pub const ALL: [Self; 14] = [
        Self::Id,
        Self::Date,
        Self::EntryTime,
        Self::ExitTime,
        Self::Session,
        Self::Direction,
        Self::EntryPrice,
        Self::StopLoss,
        Self::TakeProfit,
        Self::PositionSize,
        Self::Pnl,
        Self::Result,
        Self::StrategyId,
        Self::AdherenceToPlan,
    ];

    /// Fields without which a row cannot become a record
    pub const REQUIRED: [Self; 6] = [
        Self::Date,
        Self::Direction,
        Self::EntryPrice,
        Self::StopLoss,
        Self::TakeProfit,
        Self::PositionSize,
    ];

    /// Document spelling of the field
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Date => "date",
            Self::EntryTime => "entryTime",
            Self::ExitTime => "exitTime",
            Self::Session => "session",
            Self::Direction => "direction",
            Self::EntryPrice => "entryPrice",
            Self::StopLoss => "stopLoss",
            Self::TakeProfit => "takeProfit",
            Self::PositionSize => "positionSize",
            Self::Pnl => "pnl",
            Self::Result => "result",
            Self::StrategyId => "strategyId",
            Self::AdherenceToPlan => "adherenceToPlan",
        }
    }

    /// Look a field up by name, ignoring case and punctuation
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = normalize(name);
        Self::ALL.into_iter().find(|f| normalize(f.name()) == wanted)
    }

    /// Built-in aliases, already normalised
    #[must_use]
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Id => &["id", "tradeid", "ticket", "ticketno", "deal", "order", "positionid"],
            Self::Date => &[
                "date", "tradedate", "opendate", "entrydate", "opentime", "opened", "datetime",
                "timestamp",
            ],
            Self::EntryTime => &["entrytime", "timein", "time"],
            Self::ExitTime => &["exittime", "closetime", "timeout", "closedat"],
            Self::Session => &["session", "tradingsession", "market"],
            Self::Direction => &["direction", "side", "type", "buysell", "longshort", "action"],
            Self::EntryPrice => &["entryprice", "entry", "openprice", "priceopen", "price", "open"],
            Self::StopLoss => &["stoploss", "sl", "stop", "stopprice", "stoplevel"],
            Self::TakeProfit => &["takeprofit", "tp", "target", "targetprice", "profittarget"],
            Self::PositionSize => &[
                "positionsize", "size", "lots", "lot", "volume", "quantity", "qty", "units",
                "contracts",
            ],
            Self::Pnl => &[
                "pnl", "profit", "profitloss", "pl", "netpnl", "netprofit", "realizedpnl",
                "gainloss",
            ],
            Self::Result => &["result", "outcome", "status", "winloss"],
            Self::StrategyId => &["strategyid", "strategy", "setup", "playbook", "system"],
            Self::AdherenceToPlan => &["adherencetoplan", "adherence", "followedplan", "plan"],
        }
    }
}

/// Lowercase and strip everything but ASCII letters and digits
#[must_use]
pub fn normalize(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Which CSV column feeds which record field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMapping {
    headers: Vec<String>,
    columns: BTreeMap<Field, usize>,
    trim: bool,
}

impl ColumnMapping {
    /// Guess the mapping from a header row
    pub fn detect<S: AsRef<str>>(
        headers: &[S],
        config: &ImportConfig,
    ) -> Result<Self, ImportError> {
        let headers: Vec<String> = headers
            .iter()
            .map(|h| {
                let h = h.as_ref();
                let h = if config.trim { h.trim() } else { h };
                h.to_string()
            })
            .collect();
        let normalized: Vec<String> = headers.iter().map(|h| normalize(h)).collect();
        let aliases = alias_table(config);

        let mut columns: BTreeMap<Field, usize> = BTreeMap::new();
        let mut claimed = vec![false; headers.len()];

        // exact matches, user aliases listed first in each table entry
        for field in Field::ALL {
            let found = normalized
                .iter()
                .enumerate()
                .find(|(idx, h)| !claimed[*idx] && aliases[&field].iter().any(|a| a == *h));
            if let Some((idx, _)) = found {
                columns.insert(field, idx);
                claimed[idx] = true;
            }
        }

        // substring matches for what is left
        for (idx, header) in normalized.iter().enumerate() {
            if claimed[idx] || header.is_empty() {
                continue;
            }
            let best = Field::ALL
                .into_iter()
                .filter(|f| !columns.contains_key(f))
                .filter_map(|field| {
                    aliases[&field]
                        .iter()
                        .filter(|a| a.len() >= MIN_SUBSTRING_ALIAS && header.contains(a.as_str()))
                        .map(String::len)
                        .max()
                        .map(|len| (field, len))
                })
                .fold(None, |best: Option<(Field, usize)>, candidate| match best {
                    Some((_, len)) if len >= candidate.1 => best,
                    _ => Some(candidate),
                });
            if let Some((field, _)) = best {
                debug!(header = %headers[idx], field = field.name(), "Matched column by substring");
                columns.insert(field, idx);
                claimed[idx] = true;
            }
        }

        let missing: Vec<&'static str> = Field::REQUIRED
            .into_iter()
            .filter(|f| !columns.contains_key(f))
            .map(Field::name)
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        Ok(Self {
            headers,
            columns,
            trim: config.trim,
        })
    }

    /// Column index feeding a field
    #[must_use]
    pub fn column(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    /// Header text feeding a field
    #[must_use]
    pub fn header(&self, field: Field) -> Option<&str> {
        self.column(field).map(|idx| self.headers[idx].as_str())
    }

    /// Cell for a field in a row, `None` when blank.
    ///
    /// Surrounding whitespace is stripped only when trimming is configured.
    #[must_use]
    pub fn cell<'r>(&self, record: &'r csv::StringRecord, field: Field) -> Option<&'r str> {
        self.column(field)
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.trim().is_empty())
            .map(|s| if self.trim { s.trim() } else { s })
    }

    /// Headers that feed no field
    #[must_use]
    pub fn unmapped_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !self.columns.values().any(|c| c == idx))
            .map(|(_, h)| h.as_str())
            .collect()
    }

    /// `(field, header)` pairs in field order
    #[must_use]
    pub fn pairs(&self) -> Vec<(Field, &str)> {
        self.columns
            .iter()
            .map(|(field, idx)| (*field, self.headers[*idx].as_str()))
            .collect()
    }
}

fn alias_table(config: &ImportConfig) -> BTreeMap<Field, Vec<String>> {
    let mut table: BTreeMap<Field, Vec<String>> = BTreeMap::new();
    for (name, extra) in &config.aliases {
        match Field::from_name(name) {
            Some(field) => table
                .entry(field)
                .or_default()
                .extend(extra.iter().map(|a| normalize(a))),
            None => debug!(name = %name, "Ignoring aliases for unknown field"),
        }
    }
    for field in Field::ALL {
        table
            .entry(field)
            .or_default()
            .extend(field.aliases().iter().map(|a| (*a).to_string()));
    }
    table
}
