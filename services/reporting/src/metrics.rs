//! Per-trade derived measures and win/loss tallies
//!
//! Nothing here is stored on the record; every value is recomputed from the
//! record's prices and outcome. Undefined values come back as `None` and are
//! left out of whatever average they would have contributed to.

use common::{ClosedResult, TradeOutcome, TradeRecord};
use serde::{Deserialize, Serialize};

/// Realized `PnL` of a closed trade.
///
/// Ongoing trades and closed trades with a non-finite `PnL` yield `None`.
#[must_use]
pub fn closed_pnl(record: &TradeRecord) -> Option<f64> {
    match record.outcome {
        TradeOutcome::Closed { pnl, .. } if pnl.is_finite() => Some(pnl),
        _ => None,
    }
}

/// Result of a trade that counts as closed for statistics
#[must_use]
pub fn closed_result(record: &TradeRecord) -> Option<ClosedResult> {
    match record.outcome {
        TradeOutcome::Closed { result, pnl } if pnl.is_finite() => Some(result),
        _ => None,
    }
}

/// Price distance between entry and stop
#[must_use]
pub fn risk_per_unit(record: &TradeRecord) -> f64 {
    (record.entry_price - record.stop_loss).abs()
}

/// Planned reward over planned risk: `|tp - entry| / |entry - sl|`.
///
/// `None` when the stop sits on the entry or the ratio is not a positive finite
/// number.
#[must_use]
pub fn risk_reward_ratio(record: &TradeRecord) -> Option<f64> {
    let risk = risk_per_unit(record);
    if risk == 0.0 || !risk.is_finite() {
        return None;
    }
    let ratio = (record.take_profit - record.entry_price).abs() / risk;
    (ratio.is_finite() && ratio > 0.0).then_some(ratio)
}

/// Realized `PnL` in units of initial risk: `pnl / (|entry - sl| * size)`
#[must_use]
pub fn r_multiple(record: &TradeRecord) -> Option<f64> {
    let pnl = closed_pnl(record)?;
    let risk = risk_per_unit(record) * record.position_size;
    if risk == 0.0 || !risk.is_finite() {
        return None;
    }
    let r = pnl / risk;
    r.is_finite().then_some(r)
}

/// Arithmetic mean of the defined values, `0` when there are none
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn mean_of_defined<I>(values: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Average planned risk/reward over the given records
pub fn average_risk_reward<'a, I>(records: I) -> f64
where
    I: IntoIterator<Item = &'a TradeRecord>,
{
    mean_of_defined(records.into_iter().map(risk_reward_ratio))
}

/// Win/loss/breakeven counts for a set of closed trades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinTally {
    /// Trades closed as wins
    pub wins: u32,
    /// Trades closed as losses
    pub losses: u32,
    /// Trades closed flat
    pub breakevens: u32,
}

impl WinTally {
    /// Count one closed result
    pub fn record(&mut self, result: ClosedResult) {
        match result {
            ClosedResult::Win => self.wins = self.wins.saturating_add(1),
            ClosedResult::Loss => self.losses = self.losses.saturating_add(1),
            ClosedResult::Breakeven => self.breakevens = self.breakevens.saturating_add(1),
        }
    }

    /// Trades with a decided result
    #[must_use]
    pub const fn decided(&self) -> u32 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.breakevens)
    }

    /// Percentage of decided trades that were wins.
    ///
    /// Breakevens count in the denominator only; `0` when nothing is decided.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let decided = self.decided();
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided) * 100.0
        }
    }
}

impl<'a> FromIterator<&'a TradeRecord> for WinTally {
    fn from_iter<T: IntoIterator<Item = &'a TradeRecord>>(iter: T) -> Self {
        let mut tally = Self::default();
        for result in iter.into_iter().filter_map(closed_result) {
            tally.record(result);
        }
        tally
    }
}
