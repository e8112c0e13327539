//! Simulation parameters.

use std::collections::BTreeSet;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100.0;

/// Which calendar years to simulate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelection {
    /// Every year present in the data.
    All,
    Only(BTreeSet<i32>),
}

impl YearSelection {
    pub fn contains(&self, year: i32) -> bool {
        match self {
            YearSelection::All => true,
            YearSelection::Only(years) => years.contains(&year),
        }
    }

    /// Parse `all` or a comma list of years and inclusive ranges,
    /// e.g. `2019-2021, 2023`.
    pub fn parse(input: &str) -> Result<YearSelection, String> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(YearSelection::All);
        }

        let mut years = BTreeSet::new();
        for token in trimmed.split(',') {
            let token = token.trim();
            if token.is_empty() {
                return Err("empty token in year list".to_string());
            }
            match token.split_once('-') {
                Some((from, to)) => {
                    let from = parse_year(from)?;
                    let to = parse_year(to)?;
                    if from > to {
                        return Err(format!("year range {} is reversed", token));
                    }
                    years.extend(from..=to);
                }
                None => {
                    years.insert(parse_year(token)?);
                }
            }
        }

        Ok(YearSelection::Only(years))
    }
}

fn parse_year(token: &str) -> Result<i32, String> {
    let token = token.trim();
    match token.parse::<i32>() {
        Ok(year) if (1000..=9999).contains(&year) => Ok(year),
        _ => Err(format!("invalid year {:?}", token)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_capital: f64,
    pub years: YearSelection,
}

impl SimulationConfig {
    pub fn new(years: YearSelection) -> Self {
        SimulationConfig {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            years,
        }
    }
}
