#![allow(dead_code)]

use chrono::{Datelike, NaiveDate, Weekday};
use labeltrader::domain::daily_record::{DailyRecord, Label, RawRow};
use labeltrader::domain::error::LabeltraderError;
use labeltrader::domain::series::YearSlice;
use labeltrader::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<RawRow>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_rows(mut self, ticker: &str, rows: Vec<RawRow>) -> Self {
        self.data.insert(ticker.to_string(), rows);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_daily_rows(&self, ticker: &str) -> Result<Vec<RawRow>, LabeltraderError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(LabeltraderError::DataSource {
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }

    fn list_tickers(&self) -> Result<Vec<String>, LabeltraderError> {
        let mut tickers: Vec<String> = self.data.keys().cloned().collect();
        tickers.sort();
        Ok(tickers)
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn raw_row(date: &str, open: f64, close: f64, label: Option<&str>) -> RawRow {
    RawRow {
        date: date.to_string(),
        weekday: None,
        open: Some(open),
        close: Some(close),
        label: label.map(str::to_string),
    }
}

/// Weekday rows for a whole year. Friday `i` of the year takes
/// `friday_closes[i]` and `friday_labels[i]`; other days close at the
/// previous Friday's close (or the first close before the first Friday).
pub fn year_rows(year: i32, friday_closes: &[f64], friday_labels: &[Option<&str>]) -> Vec<RawRow> {
    let mut rows = Vec::new();
    let mut day = date(year, 1, 1);
    let mut friday_index = 0;
    let mut close = friday_closes.first().copied().unwrap_or(10.0);

    while day.year() == year {
        match day.weekday() {
            Weekday::Sat | Weekday::Sun => {}
            Weekday::Fri => {
                if friday_index < friday_closes.len() {
                    close = friday_closes[friday_index];
                    let label = friday_labels.get(friday_index).copied().flatten();
                    rows.push(raw_row(&day.to_string(), close, close, label));
                    friday_index += 1;
                } else {
                    rows.push(raw_row(&day.to_string(), close, close, None));
                }
            }
            _ => rows.push(raw_row(&day.to_string(), close, close, None)),
        }
        day = day.succ_opt().unwrap();
    }
    rows
}

/// Consecutive Fridays starting 2022-01-07, nothing else.
pub fn friday_slice(closes: &[f64], labels: &[Option<Label>]) -> YearSlice {
    let first = date(2022, 1, 7);
    let records = closes
        .iter()
        .zip(labels.iter())
        .enumerate()
        .map(|(i, (&close, &label))| {
            DailyRecord::new(first + chrono::Duration::weeks(i as i64), close, close, label)
        })
        .collect();
    YearSlice::from_records(2022, records).unwrap()
}
