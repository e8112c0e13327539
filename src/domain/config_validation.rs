//! Configuration validation.
//!
//! Validates config fields before a simulation runs. Keys that command-line
//! flags can supply (`ticker`, `years`) are checked for shape here and for
//! presence once overrides are applied.

use crate::domain::config::YearSelection;
use crate::domain::error::LabeltraderError;
use crate::ports::config_port::ConfigPort;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), LabeltraderError> {
    validate_initial_capital(config)?;
    validate_years(config)?;
    Ok(())
}

fn validate_initial_capital(config: &dyn ConfigPort) -> Result<(), LabeltraderError> {
    let raw = match config.get_string("simulation", "initial_capital") {
        Some(raw) => raw,
        None => return Ok(()),
    };
    match raw.trim().parse::<f64>() {
        Ok(value) if value > 0.0 && value.is_finite() => Ok(()),
        Ok(_) => Err(LabeltraderError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "initial_capital".to_string(),
            reason: "initial_capital must be positive".to_string(),
        }),
        Err(_) => Err(LabeltraderError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "initial_capital".to_string(),
            reason: format!("{:?} is not a number", raw),
        }),
    }
}

fn validate_years(config: &dyn ConfigPort) -> Result<(), LabeltraderError> {
    match config.get_string("simulation", "years") {
        Some(years) => parse_years(Some(&years)).map(|_| ()),
        None => Ok(()),
    }
}

/// Parse `[simulation] years`; required.
pub fn parse_years(value: Option<&str>) -> Result<YearSelection, LabeltraderError> {
    match value {
        Some(s) if !s.trim().is_empty() => {
            YearSelection::parse(s).map_err(|reason| LabeltraderError::ConfigInvalid {
                section: "simulation".to_string(),
                key: "years".to_string(),
                reason,
            })
        }
        _ => Err(LabeltraderError::ConfigMissing {
            section: "simulation".to_string(),
            key: "years".to_string(),
        }),
    }
}

/// Resolve the ticker from an override or `[data] ticker`; required.
pub fn resolve_ticker(
    ticker_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, LabeltraderError> {
    ticker_override
        .map(str::to_string)
        .or_else(|| config.get_string("data", "ticker"))
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| LabeltraderError::ConfigMissing {
            section: "data".to_string(),
            key: "ticker".to_string(),
        })
}
