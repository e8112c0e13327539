//! Domain error types.

use chrono::NaiveDate;

/// Malformed input detected while preparing the daily series.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DataError {
    #[error("row {row}: invalid date {value:?}")]
    InvalidDate { row: usize, value: String },

    #[error("{date}: missing {field} price")]
    MissingPrice { date: NaiveDate, field: &'static str },

    #[error("{date}: duplicate trading day")]
    DuplicateDate { date: NaiveDate },
}

/// Top-level error type for labeltrader.
#[derive(Debug, thiserror::Error)]
pub enum LabeltraderError {
    #[error(transparent)]
    Data(#[from] DataError),

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LabeltraderError> for std::process::ExitCode {
    fn from(err: &LabeltraderError) -> Self {
        let code: u8 = match err {
            LabeltraderError::Io(_) | LabeltraderError::Report { .. } => 1,
            LabeltraderError::ConfigParse { .. }
            | LabeltraderError::ConfigMissing { .. }
            | LabeltraderError::ConfigInvalid { .. } => 2,
            LabeltraderError::DataSource { .. } => 3,
            LabeltraderError::Data(_) | LabeltraderError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
