//! Cross-year comparison of the label strategy against buy-and-hold.

use super::simulator::YearResult;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualDifference {
    pub year: i32,
    pub label_based: f64,
    pub buy_and_hold: f64,
    pub difference: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonSummary {
    pub annual: Vec<AnnualDifference>,
    pub min_difference: f64,
    pub max_difference: f64,
    pub avg_difference: f64,
}

impl ComparisonSummary {
    /// `None` when no year has a buy-and-hold baseline.
    pub fn from_results<'a, I>(results: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a YearResult>,
    {
        let annual: Vec<AnnualDifference> = results
            .into_iter()
            .filter_map(|r| {
                r.baseline.map(|baseline| AnnualDifference {
                    year: r.year,
                    label_based: r.final_balance,
                    buy_and_hold: baseline,
                    difference: r.final_balance - baseline,
                })
            })
            .collect();

        if annual.is_empty() {
            return None;
        }

        let diffs = annual.iter().map(|a| a.difference);
        let min_difference = diffs.clone().fold(f64::INFINITY, f64::min);
        let max_difference = diffs.clone().fold(f64::NEG_INFINITY, f64::max);
        let avg_difference = diffs.sum::<f64>() / annual.len() as f64;

        Some(ComparisonSummary {
            annual,
            min_difference,
            max_difference,
            avg_difference,
        })
    }
}
