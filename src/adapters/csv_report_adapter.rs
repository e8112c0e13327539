//! CSV report adapter implementing ReportPort.
//!
//! Writes the weekly balance table: one row per recorded balance.

use std::path::Path;

use serde::Serialize;

use crate::domain::error::LabeltraderError;
use crate::domain::simulator::SimulationReport;
use crate::ports::report_port::ReportPort;

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    ticker: &'a str,
    year: i32,
    week: usize,
    date: String,
    balance: f64,
}

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        CsvReportAdapter
    }

    fn write_rows<W: std::io::Write>(
        &self,
        writer: W,
        ticker: &str,
        report: &SimulationReport,
    ) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        for (&year, result) in &report.results {
            for (i, point) in result.balance_history.iter().enumerate() {
                wtr.serialize(BalanceRow {
                    ticker,
                    year,
                    week: i + 1,
                    date: point.date.format("%Y-%m-%d").to_string(),
                    balance: point.balance,
                })?;
            }
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        ticker: &str,
        report: &SimulationReport,
        output_path: &Path,
    ) -> Result<(), LabeltraderError> {
        let file = std::fs::File::create(output_path).map_err(|e| LabeltraderError::Report {
            reason: format!("failed to create {}: {}", output_path.display(), e),
        })?;
        self.write_rows(file, ticker, report)
            .map_err(|e| LabeltraderError::Report {
                reason: format!("failed to write {}: {}", output_path.display(), e),
            })
    }
}
