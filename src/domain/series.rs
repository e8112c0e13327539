//! Series preparer: turns raw daily rows into per-year chronological slices.
//!
//! An unparseable date fails the whole batch since its year is unknown.
//! A missing price or a duplicated day only fails the year it belongs to.
//! A non-positive price is kept but logged; the simulator skips any Friday
//! step on it and the buy-and-hold baseline is undefined over it.
//! Rows with an absent or unrecognised label are kept.

use crate::domain::config::YearSelection;
use crate::domain::daily_record::{DailyRecord, Label, RawRow};
use crate::domain::error::DataError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;

/// Trading days of one calendar year in ascending date order.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSlice {
    year: i32,
    records: Vec<DailyRecord>,
}

impl YearSlice {
    /// Sorts the records by date and rejects repeated days.
    pub fn from_records(year: i32, mut records: Vec<DailyRecord>) -> Result<Self, DataError> {
        records.sort_by_key(|r| r.date);
        if let Some(pair) = records.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(DataError::DuplicateDate { date: pair[1].date });
        }
        Ok(YearSlice { year, records })
    }

    pub fn empty(year: i32) -> Self {
        YearSlice {
            year,
            records: Vec::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&DailyRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&DailyRecord> {
        self.records.last()
    }

    pub fn fridays(&self) -> impl Iterator<Item = &DailyRecord> {
        self.records.iter().filter(|r| r.is_friday())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparedSeries {
    pub slices: BTreeMap<i32, YearSlice>,
    pub failures: BTreeMap<i32, DataError>,
}

impl PreparedSeries {
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.slices.keys().copied()
    }
}

pub fn prepare_series(
    rows: &[RawRow],
    selection: &YearSelection,
) -> Result<PreparedSeries, DataError> {
    let mut by_year: BTreeMap<i32, Vec<DailyRecord>> = BTreeMap::new();
    let mut failures: BTreeMap<i32, DataError> = BTreeMap::new();

    for (i, row) in rows.iter().enumerate() {
        let date = parse_date(&row.date).ok_or_else(|| DataError::InvalidDate {
            row: i + 1,
            value: row.date.clone(),
        })?;
        let record_year = date.year();
        if !selection.contains(record_year) || failures.contains_key(&record_year) {
            continue;
        }

        let prices = price(row.open, date, "open")
            .and_then(|open| price(row.close, date, "adjusted close").map(|close| (open, close)));
        let (open, close) = match prices {
            Ok(p) => p,
            Err(e) => {
                by_year.remove(&record_year);
                failures.insert(record_year, e);
                continue;
            }
        };

        if open <= 0.0 || close <= 0.0 {
            log::warn!(
                "{}: non-positive price (open {}, adjusted close {})",
                date,
                open,
                close
            );
        }

        let label = row.label.as_deref().and_then(|text| {
            let label = Label::parse(text);
            if label.is_none() && !text.trim().is_empty() {
                log::debug!("{}: unrecognised label {:?} treated as absent", date, text);
            }
            label
        });

        let record = DailyRecord::new(date, open, close, label);
        let given = row.weekday.as_deref().map(str::trim).unwrap_or_default();
        if !given.is_empty() && !given.eq_ignore_ascii_case(record.weekday_name()) {
            log::warn!(
                "{}: weekday column says {:?}, using {}",
                date,
                given,
                record.weekday_name()
            );
        }

        by_year.entry(record_year).or_default().push(record);
    }

    if let YearSelection::Only(years) = selection {
        for &year in years {
            if !failures.contains_key(&year) && !by_year.contains_key(&year) {
                log::warn!("no rows for requested year {}", year);
                by_year.insert(year, Vec::new());
            }
        }
    }

    let mut slices = BTreeMap::new();
    for (year, records) in by_year {
        match YearSlice::from_records(year, records) {
            Ok(slice) => {
                slices.insert(year, slice);
            }
            Err(e) => {
                failures.insert(year, e);
            }
        }
    }

    Ok(PreparedSeries { slices, failures })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .ok()
}

fn price(value: Option<f64>, date: NaiveDate, field: &'static str) -> Result<f64, DataError> {
    value
        .filter(|v| v.is_finite())
        .ok_or(DataError::MissingPrice { date, field })
}
