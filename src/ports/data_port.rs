//! Daily price series access port trait.

use crate::domain::daily_record::RawRow;
use crate::domain::error::LabeltraderError;

pub trait DataPort {
    /// Every stored row for `ticker`, in source order.
    fn fetch_daily_rows(&self, ticker: &str) -> Result<Vec<RawRow>, LabeltraderError>;

    fn list_tickers(&self) -> Result<Vec<String>, LabeltraderError>;
}
