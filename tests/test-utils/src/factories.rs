//! Factory patterns for generating test trades

use chrono::NaiveDate;
use common::{
    Adherence, ClosedResult, Direction, Session, StrategyId, TradeId, TradeOutcome, TradeRecord,
};
use fake::{Fake, Faker};
use uuid::Uuid;

/// Builder for trade records with sensible defaults.
///
/// Defaults to a long EUR/USD-style trade on 2024-01-02 with entry 1.1000,
/// stop 1.0950, target 1.1100 and size 1.
#[derive(Debug, Clone)]
pub struct TradeFactory {
    id: Option<String>,
    date: NaiveDate,
    session: Option<Session>,
    direction: Direction,
    entry_price: f64,
    stop_loss: f64,
    take_profit: f64,
    position_size: f64,
    strategy_id: Option<String>,
    adherence: Adherence,
}

impl Default for TradeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TradeFactory {
    pub fn new() -> Self {
        Self {
            id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            session: None,
            direction: Direction::Long,
            entry_price: 1.1000,
            stop_loss: 1.0950,
            take_profit: 1.1100,
            position_size: 1.0,
            strategy_id: None,
            adherence: Adherence::Yes,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_prices(mut self, entry: f64, stop: f64, target: f64) -> Self {
        self.entry_price = entry;
        self.stop_loss = stop;
        self.take_profit = target;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.position_size = size;
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy_id = Some(strategy.into());
        self
    }

    pub fn with_adherence(mut self, adherence: Adherence) -> Self {
        self.adherence = adherence;
        self
    }

    /// Closed trade, result inferred from the `PnL` sign
    pub fn closed(&self, pnl: f64) -> TradeRecord {
        self.build(TradeOutcome::closed(pnl))
    }

    /// Closed trade with an explicit result
    pub fn closed_as(&self, result: ClosedResult, pnl: f64) -> TradeRecord {
        self.build(TradeOutcome::Closed { result, pnl })
    }

    /// Open trade
    pub fn ongoing(&self) -> TradeRecord {
        self.build(TradeOutcome::Ongoing)
    }

    /// Random closed and open trades spread over `days` consecutive dates
    pub fn build_batch(&self, count: usize, days: u64) -> Vec<TradeRecord> {
        (0..count)
            .map(|_| {
                let offset = (0..days.max(1)).fake::<u64>();
                let factory = self.clone().on(self.date + chrono::Days::new(offset));
                if Faker.fake::<bool>() {
                    factory.closed((-250.0..250.0).fake::<f64>())
                } else {
                    factory.ongoing()
                }
            })
            .collect()
    }

    fn build(&self, outcome: TradeOutcome) -> TradeRecord {
        TradeRecord {
            id: TradeId::new(
                self.id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            ),
            date: self.date,
            entry_time: None,
            exit_time: None,
            session: self.session,
            direction: self.direction,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            position_size: self.position_size,
            outcome,
            strategy_id: self.strategy_id.clone().map(StrategyId::new),
            adherence: self.adherence,
        }
    }
}
