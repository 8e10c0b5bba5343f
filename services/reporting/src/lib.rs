//! Reporting
//!
//! Performance statistics for a trade journal snapshot.
//!
//! The entry point is [`compute_statistics`], a pure function over a slice of
//! [`TradeRecord`]s. The caller owns the snapshot: nothing is cached between
//! calls and the input is never mutated, so concurrent callers need no
//! coordination. Degenerate input (no trades, no closed trades, zero-risk
//! trades) never fails; every metric has a defined default instead.

pub mod analytics;
pub mod metrics;
pub mod performance;

use analytics::StatisticalAnalyzer;
use common::{ClosedResult, TradeRecord};
use metrics::{WinTally, average_risk_reward, mean_of_defined, r_multiple};
use performance::{
    BestDay, CumulativePoint, DailyPnl, PerformanceAnalyzer, SessionPnl, StrategyPerformance,
    WorstDay, best_day, worst_day,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Raw trade counts of a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeCounts {
    /// All records
    pub total: u32,
    /// Records still open
    pub open: u32,
    /// Records closed with a usable `PnL`
    pub closed: u32,
    /// Closed as wins
    pub wins: u32,
    /// Closed as losses
    pub losses: u32,
    /// Closed flat
    pub breakevens: u32,
}

/// Full statistics of a journal snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Raw counts
    pub counts: TradeCounts,

    /// Sum of closed `PnL`
    pub net_pnl: f64,
    /// Wins over decided trades, as a percentage
    pub win_rate: f64,
    /// Average planned risk/reward over all records
    pub average_risk_reward: f64,
    /// Average realized R-multiple over closed trades
    pub average_r_multiple: f64,

    /// Sum of positive closed `PnL`
    pub gross_profit: f64,
    /// Absolute sum of negative closed `PnL`
    pub gross_loss: f64,
    /// Gross profit over gross loss, `0` without losses
    pub profit_factor: f64,
    /// Mean `PnL` of winning trades
    pub average_win: f64,
    /// Mean loss magnitude of losing trades
    pub average_loss: f64,
    /// Largest single winning `PnL`
    pub largest_win: f64,
    /// Largest single loss magnitude
    pub largest_loss: f64,
    /// Largest decline of the cumulative curve from its running peak
    pub max_drawdown: f64,

    /// Day with the highest summed `PnL`
    pub best_day: BestDay,
    /// Day with the lowest summed `PnL`
    pub worst_day: WorstDay,
    /// Sharpe-like mean/deviation ratio of non-zero trade `PnL`
    pub consistency_ratio: f64,
    /// Session with the highest positive summed `PnL`
    pub best_session: Option<SessionPnl>,

    /// Per-strategy results, best first
    pub strategy_breakdown: Vec<StrategyPerformance>,
    /// `PnL` per calendar date, oldest first
    pub daily_pnl: Vec<DailyPnl>,
    /// Trade-indexed running `PnL`
    pub cumulative_pnl: Vec<CumulativePoint>,
}

impl Default for Statistics {
    fn default() -> Self {
        compute_statistics(&[])
    }
}

/// Compute every journal statistic for a snapshot of records
#[must_use]
pub fn compute_statistics(records: &[TradeRecord]) -> Statistics {
    let analyzer = PerformanceAnalyzer::new(records);
    let closed = analyzer.closed_trades();
    let pnls = analyzer.pnls();

    let tally: WinTally = closed.iter().map(|t| t.record).collect();
    let total = u32::try_from(records.len()).unwrap_or(u32::MAX);
    let open = u32::try_from(records.iter().filter(|r| !r.is_closed()).count())
        .unwrap_or(u32::MAX);
    let counts = TradeCounts {
        total,
        open,
        closed: tally.decided(),
        wins: tally.wins,
        losses: tally.losses,
        breakevens: tally.breakevens,
    };

    let excluded = records
        .len()
        .saturating_sub(open as usize + counts.closed as usize);
    if excluded > 0 {
        debug!(
            excluded,
            "Closed records with a non-finite pnl left out of statistics"
        );
    }

    let net_pnl: f64 = pnls.iter().sum();
    let gross_profit: f64 = pnls.iter().filter(|p| **p > 0.0).sum();
    let gross_loss: f64 = pnls.iter().filter(|p| **p < 0.0).map(|p| p.abs()).sum();
    let profit_factor = if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else {
        0.0
    };

    let wins: Vec<f64> = closed
        .iter()
        .filter(|t| t.result == ClosedResult::Win)
        .map(|t| t.pnl)
        .collect();
    let losses: Vec<f64> = closed
        .iter()
        .filter(|t| t.result == ClosedResult::Loss)
        .map(|t| t.pnl.abs())
        .collect();
    let average_win = mean_of_defined(wins.iter().copied().map(Some));
    let average_loss = mean_of_defined(losses.iter().copied().map(Some));
    let largest_win = wins.iter().copied().fold(0.0, f64::max);
    let largest_loss = losses.iter().copied().fold(0.0, f64::max);

    let daily_pnl = analyzer.daily_pnl();
    let cumulative_pnl = analyzer.cumulative_series();
    let max_drawdown =
        StatisticalAnalyzer::max_drawdown(cumulative_pnl.iter().map(|p| p.cumulative_pnl));

    let statistics = Statistics {
        counts,
        net_pnl,
        win_rate: tally.win_rate(),
        average_risk_reward: average_risk_reward(records),
        average_r_multiple: mean_of_defined(closed.iter().map(|t| r_multiple(t.record))),
        gross_profit,
        gross_loss,
        profit_factor,
        average_win,
        average_loss,
        largest_win,
        largest_loss,
        max_drawdown,
        best_day: best_day(&daily_pnl),
        worst_day: worst_day(&daily_pnl),
        consistency_ratio: StatisticalAnalyzer::consistency_ratio(&pnls),
        best_session: analyzer.best_session(),
        strategy_breakdown: analyzer.strategy_breakdown(),
        daily_pnl,
        cumulative_pnl,
    };

    debug!(
        total = counts.total,
        closed = counts.closed,
        net_pnl = statistics.net_pnl,
        win_rate = statistics.win_rate,
        "Computed journal statistics"
    );

    statistics
}
