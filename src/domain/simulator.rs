//! Weekly label-driven simulator.
//!
//! Each year starts flat with the configured capital and walks its days in
//! order. Decisions happen on Fridays only; years share no state.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::baseline::buy_and_hold;
use super::comparison::ComparisonSummary;
use super::config::SimulationConfig;
use super::error::DataError;
use super::series::{PreparedSeries, YearSlice};
use super::state::{BalancePoint, SimulationState, TradeEvent};
use super::statistics::BalanceSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct YearResult {
    pub year: i32,
    pub initial_capital: f64,
    pub balance_history: Vec<BalancePoint>,
    pub final_balance: f64,
    pub min_balance: Option<f64>,
    pub max_balance: Option<f64>,
    pub max_growth_weeks: usize,
    pub max_decline_weeks: usize,
    pub average_balance: Option<f64>,
    /// Percent; `None` when the history is too short.
    pub volatility: Option<f64>,
    pub trades: Vec<TradeEvent>,
    /// Fridays whose close could not be traded on.
    pub skipped_fridays: Vec<NaiveDate>,
    pub baseline: Option<f64>,
}

impl YearResult {
    pub fn balances(&self) -> Vec<f64> {
        self.balance_history.iter().map(|p| p.balance).collect()
    }

    /// Label-based final balance minus buy-and-hold.
    pub fn difference(&self) -> Option<f64> {
        self.baseline.map(|b| self.final_balance - b)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationReport {
    pub results: BTreeMap<i32, YearResult>,
    pub failures: BTreeMap<i32, DataError>,
    pub comparison: Option<ComparisonSummary>,
}

pub fn simulate_year(slice: &YearSlice, initial_capital: f64) -> YearResult {
    let mut state = SimulationState::new(initial_capital);

    for record in slice.fridays() {
        state.on_friday(record);
    }

    let final_balance = match slice.last() {
        Some(last) => state.settle(last),
        None => initial_capital,
    };

    let fridays: Vec<f64> = state.friday_balances().collect();
    let summary = BalanceSummary::from_balances(&fridays);

    YearResult {
        year: slice.year(),
        initial_capital,
        balance_history: state.balance_history().to_vec(),
        final_balance,
        min_balance: summary.min,
        max_balance: summary.max,
        max_growth_weeks: state.streaks().max_growth(),
        max_decline_weeks: state.streaks().max_decline(),
        average_balance: summary.average,
        volatility: summary.volatility,
        trades: state.trades().to_vec(),
        skipped_fridays: state.skipped().to_vec(),
        baseline: buy_and_hold(slice, initial_capital),
    }
}

pub fn simulate(prepared: &PreparedSeries, config: &SimulationConfig) -> SimulationReport {
    let results: BTreeMap<i32, YearResult> = prepared
        .slices
        .iter()
        .map(|(&year, slice)| (year, simulate_year(slice, config.initial_capital)))
        .collect();
    let comparison = ComparisonSummary::from_results(results.values());

    SimulationReport {
        results,
        failures: prepared.failures.clone(),
        comparison,
    }
}
