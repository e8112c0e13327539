//! CSV file data adapter.
//!
//! One file per ticker, `<directory>/<TICKER>.csv`, with a header row.
//! Columns are matched by name; extra columns are ignored.

use crate::domain::daily_record::RawRow;
use crate::domain::error::LabeltraderError;
use crate::ports::data_port::DataPort;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_daily_rows(&self, ticker: &str) -> Result<Vec<RawRow>, LabeltraderError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| LabeltraderError::DataSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        rdr.deserialize::<RawRow>()
            .enumerate()
            .map(|(i, result)| {
                result.map_err(|e| LabeltraderError::DataSource {
                    reason: format!("{} row {}: {}", path.display(), i + 1, e),
                })
            })
            .collect()
    }

    fn list_tickers(&self) -> Result<Vec<String>, LabeltraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| LabeltraderError::DataSource {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut tickers = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| LabeltraderError::DataSource {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(ticker) = name_str.strip_suffix(".csv") {
                tickers.push(ticker.to_string());
            }
        }

        tickers.sort();
        Ok(tickers)
    }
}
