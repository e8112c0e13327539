//! Buy-and-hold comparator.

use super::series::YearSlice;

/// Capital bought at the year's first open and valued at its last
/// adjusted close. `None` for an empty year or when either price is not
/// positive.
pub fn buy_and_hold(slice: &YearSlice, initial_capital: f64) -> Option<f64> {
    let first = slice.first()?;
    let last = slice.last()?;
    if !(first.open > 0.0 && first.open.is_finite()) || !(last.close > 0.0) {
        return None;
    }
    Some(initial_capital / first.open * last.close)
}
