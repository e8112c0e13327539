//! Weekly balance statistics: streaks and post-hoc summaries.

/// Longest runs of consecutive weekly increases and decreases.
///
/// Only strict inequality moves the counters. A tie neither extends nor
/// breaks the running streaks, and the first observation only seeds the
/// comparison.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreakTracker {
    previous: Option<f64>,
    current_growth: usize,
    current_decline: usize,
    max_growth: usize,
    max_decline: usize,
}

impl StreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, balance: f64) {
        if let Some(previous) = self.previous {
            if balance > previous {
                self.current_growth += 1;
                self.current_decline = 0;
            } else if balance < previous {
                self.current_decline += 1;
                self.current_growth = 0;
            }
            self.max_growth = self.max_growth.max(self.current_growth);
            self.max_decline = self.max_decline.max(self.current_decline);
        }
        self.previous = Some(balance);
    }

    pub fn current_growth(&self) -> usize {
        self.current_growth
    }

    pub fn current_decline(&self) -> usize {
        self.current_decline
    }

    pub fn max_growth(&self) -> usize {
        self.max_growth
    }

    pub fn max_decline(&self) -> usize {
        self.max_decline
    }
}

/// Summary of a completed balance series. Every field is `None` when the
/// series is too short for it to be defined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub average: Option<f64>,
    /// Sample standard deviation of period-over-period changes, in percent.
    pub volatility: Option<f64>,
}

impl BalanceSummary {
    pub fn from_balances(balances: &[f64]) -> Self {
        if balances.is_empty() {
            return Self::default();
        }

        let min = balances.iter().copied().fold(f64::INFINITY, f64::min);
        let max = balances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = balances.iter().sum::<f64>() / balances.len() as f64;

        BalanceSummary {
            min: Some(min),
            max: Some(max),
            average: Some(average),
            volatility: volatility(balances),
        }
    }
}

/// Percentage changes between consecutive balances. A change from a
/// non-positive balance is undefined and left out.
pub fn pct_changes(balances: &[f64]) -> Vec<f64> {
    balances
        .windows(2)
        .filter(|w| w[0] > 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

pub fn volatility(balances: &[f64]) -> Option<f64> {
    sample_stddev(&pct_changes(balances)).map(|sd| sd * 100.0)
}

fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(variance.sqrt())
}
