//! Daily price rows and weekly labels.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Deserialize;

/// Forecast for the following week, observed on a Friday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Green,
    Red,
}

impl Label {
    /// Case-insensitive; anything other than green/red is treated as no label.
    pub fn parse(value: &str) -> Option<Label> {
        match value.trim().to_lowercase().as_str() {
            "green" => Some(Label::Green),
            "red" => Some(Label::Red),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Green => "Green",
            Label::Red => "Red",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped daily row as handed over by a data source.
///
/// Prices that are empty or unparseable deserialize to `None`; the series
/// preparer decides whether that is an error.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Date", alias = "date")]
    pub date: String,
    #[serde(rename = "Weekday", alias = "weekday", default)]
    pub weekday: Option<String>,
    #[serde(
        rename = "Open",
        alias = "open",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub open: Option<f64>,
    #[serde(
        rename = "Adj Close",
        alias = "adj_close",
        default,
        deserialize_with = "csv::invalid_option"
    )]
    pub close: Option<f64>,
    #[serde(rename = "Label", alias = "label", default)]
    pub label: Option<String>,
}

/// One validated trading day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub open: f64,
    /// Adjusted close.
    pub close: f64,
    pub label: Option<Label>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, open: f64, close: f64, label: Option<Label>) -> Self {
        DailyRecord {
            date,
            weekday: date.weekday(),
            open,
            close,
            label,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn is_friday(&self) -> bool {
        self.weekday == Weekday::Fri
    }

    /// Full English day name, e.g. "Friday".
    pub fn weekday_name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
