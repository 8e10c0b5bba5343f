//! Performance breakdowns over the closed trades of a journal snapshot
//!
//! Day buckets, session and strategy groupings, and the trade-indexed equity
//! curve.

use crate::metrics::{WinTally, average_risk_reward, closed_pnl, closed_result};
use chrono::NaiveDate;
use common::{ClosedResult, Session, StrategyId, TradeId, TradeRecord};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A closed trade together with its validated `PnL`
#[derive(Debug, Clone, Copy)]
pub struct ClosedTrade<'a> {
    /// Underlying record
    pub record: &'a TradeRecord,
    /// Realized `PnL`, always finite
    pub pnl: f64,
    /// Closed result
    pub result: ClosedResult,
}

/// `PnL` of one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPnl {
    /// Calendar date
    pub date: NaiveDate,
    /// Sum of closed `PnL` on that date
    pub pnl: f64,
    /// Number of closed trades on that date
    pub trade_count: u32,
}

/// Best day of the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BestDay {
    /// No closed trades
    NotAvailable,
    /// Day with the highest summed `PnL`
    Day(DailyPnl),
}

/// Worst day of the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorstDay {
    /// No closed trades
    NotAvailable,
    /// Closed trades exist but no day summed below zero
    NoLosingDays,
    /// Day with the lowest summed `PnL`
    Day(DailyPnl),
}

/// Summed `PnL` of a trading session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionPnl {
    /// Session
    pub session: Session,
    /// Sum of closed `PnL` in the session
    pub pnl: f64,
    /// Closed trades in the session
    pub trade_count: u32,
}

/// Per-strategy performance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyPerformance {
    /// Strategy id
    pub strategy_id: StrategyId,
    /// Closed trades in the strategy
    pub trade_count: u32,
    /// Win rate within the strategy (percentage)
    pub win_rate: f64,
    /// Average planned risk/reward within the strategy
    pub average_risk_reward: f64,
    /// Net `PnL` of the strategy
    pub net_pnl: f64,
}

/// One point of the cumulative `PnL` curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativePoint {
    /// Trade date
    pub date: NaiveDate,
    /// Trade contributing this point
    pub trade_id: TradeId,
    /// `PnL` of that trade
    pub pnl: f64,
    /// Running total including this trade
    pub cumulative_pnl: f64,
}

/// Breakdown engine over the closed subset of a snapshot
#[derive(Debug)]
pub struct PerformanceAnalyzer<'a> {
    closed: Vec<ClosedTrade<'a>>,
}

impl<'a> PerformanceAnalyzer<'a> {
    /// Select the closed trades of a snapshot, keeping collection order
    #[must_use]
    pub fn new(records: &'a [TradeRecord]) -> Self {
        let closed = records
            .iter()
            .filter_map(|record| {
                let pnl = closed_pnl(record)?;
                let result = closed_result(record)?;
                Some(ClosedTrade {
                    record,
                    pnl,
                    result,
                })
            })
            .collect();
        Self { closed }
    }

    /// Closed trades in collection order
    #[must_use]
    pub fn closed_trades(&self) -> &[ClosedTrade<'a>] {
        &self.closed
    }

    /// Closed `PnL` values in collection order
    #[must_use]
    pub fn pnls(&self) -> Vec<f64> {
        self.closed.iter().map(|t| t.pnl).collect()
    }

    /// Closed `PnL` summed per calendar date, oldest first
    #[must_use]
    pub fn daily_pnl(&self) -> Vec<DailyPnl> {
        let mut days: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
        for trade in &self.closed {
            let (pnl, count) = days.entry(trade.record.date).or_insert((0.0, 0));
            *pnl += trade.pnl;
            *count = count.saturating_add(1);
        }

        days.into_iter()
            .map(|(date, (pnl, trade_count))| DailyPnl {
                date,
                pnl,
                trade_count,
            })
            .collect()
    }

    /// Session with the highest summed `PnL`.
    ///
    /// `None` when no closed trade has a session or the best sum is not strictly
    /// positive. Equal sums resolve in [`Session::ALL`] order.
    #[must_use]
    pub fn best_session(&self) -> Option<SessionPnl> {
        let mut sums = [0.0f64; Session::ALL.len()];
        let mut counts = [0u32; Session::ALL.len()];
        for trade in &self.closed {
            if let Some(session) = trade.record.session {
                sums[session.index()] += trade.pnl;
                counts[session.index()] = counts[session.index()].saturating_add(1);
            }
        }

        let mut best: Option<SessionPnl> = None;
        for session in Session::ALL {
            let idx = session.index();
            if counts[idx] == 0 {
                continue;
            }
            if best.as_ref().is_none_or(|b| sums[idx] > b.pnl) {
                best = Some(SessionPnl {
                    session,
                    pnl: sums[idx],
                    trade_count: counts[idx],
                });
            }
        }

        best.filter(|b| b.pnl > 0.0)
    }

    /// Per-strategy results, highest net `PnL` first.
    ///
    /// Trades without a strategy are left out. Strategies with equal net `PnL`
    /// keep the order in which they first appear in the snapshot.
    #[must_use]
    pub fn strategy_breakdown(&self) -> Vec<StrategyPerformance> {
        let mut index: FxHashMap<&StrategyId, usize> = FxHashMap::default();
        let mut groups: Vec<(&StrategyId, Vec<ClosedTrade<'a>>)> = Vec::new();

        for trade in &self.closed {
            let Some(strategy_id) = trade.record.strategy_id.as_ref() else {
                continue;
            };
            let slot = *index.entry(strategy_id).or_insert_with(|| {
                groups.push((strategy_id, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(*trade);
        }

        let mut breakdown: Vec<StrategyPerformance> = groups
            .into_iter()
            .map(|(strategy_id, trades)| {
                let tally: WinTally = trades.iter().map(|t| t.record).collect();
                StrategyPerformance {
                    strategy_id: strategy_id.clone(),
                    trade_count: u32::try_from(trades.len()).unwrap_or(u32::MAX),
                    win_rate: tally.win_rate(),
                    average_risk_reward: average_risk_reward(trades.iter().map(|t| t.record)),
                    net_pnl: trades.iter().map(|t| t.pnl).sum(),
                }
            })
            .collect();

        breakdown.sort_by(|a, b| b.net_pnl.total_cmp(&a.net_pnl));
        breakdown
    }

    /// Running `PnL` total, one point per closed trade, ordered by date.
    ///
    /// Trades sharing a date each get their own point, in collection order.
    #[must_use]
    pub fn cumulative_series(&self) -> Vec<CumulativePoint> {
        let mut ordered: Vec<&ClosedTrade<'a>> = self.closed.iter().collect();
        ordered.sort_by_key(|t| t.record.date);

        let mut running = 0.0;
        ordered
            .into_iter()
            .map(|trade| {
                running += trade.pnl;
                CumulativePoint {
                    date: trade.record.date,
                    trade_id: trade.record.id.clone(),
                    pnl: trade.pnl,
                    cumulative_pnl: running,
                }
            })
            .collect()
    }
}

/// Pick the best day; on equal sums the earliest date wins
#[must_use]
pub fn best_day(daily: &[DailyPnl]) -> BestDay {
    let mut best: Option<&DailyPnl> = None;
    for day in daily {
        if best.is_none_or(|b| day.pnl > b.pnl) {
            best = Some(day);
        }
    }
    best.map_or(BestDay::NotAvailable, |day| BestDay::Day(day.clone()))
}

/// Pick the worst day; on equal sums the earliest date wins.
///
/// A day only counts as worst when it summed below zero.
#[must_use]
pub fn worst_day(daily: &[DailyPnl]) -> WorstDay {
    let mut worst: Option<&DailyPnl> = None;
    for day in daily {
        if worst.is_none_or(|w| day.pnl < w.pnl) {
            worst = Some(day);
        }
    }
    match worst {
        None => WorstDay::NotAvailable,
        Some(day) if day.pnl < 0.0 => WorstDay::Day(day.clone()),
        Some(_) => WorstDay::NoLosingDays,
    }
}
