//! Per-year simulation state and the Friday step function.

use chrono::NaiveDate;

use super::daily_record::{DailyRecord, Label};
use super::statistics::StreakTracker;

/// All-in or all-out: either everything is cash or everything is stock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Exposure {
    Flat { capital: f64 },
    Long { quantity: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub date: NaiveDate,
    pub side: Side,
    pub price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalancePoint {
    pub date: NaiveDate,
    pub balance: f64,
}

/// What a Friday step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
    Hold,
    /// Close price unusable; nothing decided or recorded.
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    exposure: Exposure,
    balance_history: Vec<BalancePoint>,
    /// Leading entries of `balance_history` that were recorded on Fridays.
    friday_count: usize,
    streaks: StreakTracker,
    trades: Vec<TradeEvent>,
    skipped: Vec<NaiveDate>,
}

impl SimulationState {
    pub fn new(initial_capital: f64) -> Self {
        SimulationState {
            exposure: Exposure::Flat {
                capital: initial_capital,
            },
            balance_history: Vec::new(),
            friday_count: 0,
            streaks: StreakTracker::new(),
            trades: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn exposure(&self) -> Exposure {
        self.exposure
    }

    pub fn capital(&self) -> f64 {
        match self.exposure {
            Exposure::Flat { capital } => capital,
            Exposure::Long { .. } => 0.0,
        }
    }

    pub fn holding_stock(&self) -> bool {
        matches!(self.exposure, Exposure::Long { .. })
    }

    pub fn stock_quantity(&self) -> f64 {
        match self.exposure {
            Exposure::Flat { .. } => 0.0,
            Exposure::Long { quantity } => quantity,
        }
    }

    /// Cash plus stock valued at `price`.
    pub fn mark(&self, price: f64) -> f64 {
        match self.exposure {
            Exposure::Flat { capital } => capital,
            Exposure::Long { quantity } => quantity * price,
        }
    }

    pub fn balance_history(&self) -> &[BalancePoint] {
        &self.balance_history
    }

    /// Balances recorded by Friday steps, excluding any year-end mark.
    pub fn friday_balances(&self) -> impl Iterator<Item = f64> + '_ {
        self.balance_history[..self.friday_count]
            .iter()
            .map(|p| p.balance)
    }

    pub fn streaks(&self) -> &StreakTracker {
        &self.streaks
    }

    pub fn trades(&self) -> &[TradeEvent] {
        &self.trades
    }

    pub fn skipped(&self) -> &[NaiveDate] {
        &self.skipped
    }

    /// Apply the label rule for a Friday row, then record the balance marked
    /// at that row's close. Only the given row is consulted.
    pub fn on_friday(&mut self, record: &DailyRecord) -> Action {
        let close = record.close;
        if !(close > 0.0 && close.is_finite()) {
            log::warn!(
                "{}: non-positive close {} on a Friday, step skipped",
                record.date,
                close
            );
            self.skipped.push(record.date);
            return Action::Skipped;
        }

        let action = match (record.label, self.exposure) {
            (Some(Label::Green), Exposure::Flat { capital }) if capital > 0.0 => {
                let quantity = capital / close;
                self.exposure = Exposure::Long { quantity };
                self.trades.push(TradeEvent {
                    date: record.date,
                    side: Side::Buy,
                    price: close,
                    quantity,
                });
                log::debug!("{}: buy {:.4} @ {:.2}", record.date, quantity, close);
                Action::Buy
            }
            (Some(Label::Red), Exposure::Long { quantity }) => {
                let capital = quantity * close;
                self.exposure = Exposure::Flat { capital };
                self.trades.push(TradeEvent {
                    date: record.date,
                    side: Side::Sell,
                    price: close,
                    quantity,
                });
                log::debug!("{}: sell {:.4} @ {:.2}", record.date, quantity, close);
                Action::Sell
            }
            _ => Action::Hold,
        };

        self.record_friday_balance(record.date, self.mark(close));
        action
    }

    /// Mark-to-market at year end. Appends the mark only when the last
    /// recorded balance is not already from the closing row. The mark is
    /// not a Friday observation and leaves the streaks untouched.
    pub fn settle(&mut self, last: &DailyRecord) -> f64 {
        match self.exposure {
            Exposure::Flat { capital } => capital,
            Exposure::Long { quantity } if last.close > 0.0 && last.close.is_finite() => {
                let mark = quantity * last.close;
                let recorded = self.balance_history.last().map(|p| p.date);
                if recorded != Some(last.date) {
                    self.balance_history.push(BalancePoint {
                        date: last.date,
                        balance: mark,
                    });
                }
                mark
            }
            Exposure::Long { .. } => self
                .balance_history
                .last()
                .map(|p| p.balance)
                .unwrap_or_default(),
        }
    }

    fn record_friday_balance(&mut self, date: NaiveDate, balance: f64) {
        self.balance_history.push(BalancePoint { date, balance });
        self.friday_count += 1;
        self.streaks.observe(balance);
    }
}
