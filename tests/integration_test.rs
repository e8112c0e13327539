//! Integration tests for the preparer → simulator pipeline.
//!
//! Tests cover:
//! - End-to-end simulation over a mock data port
//! - Per-year failure isolation
//! - Holding/cash invariant, value conservation at trades, idempotence and
//!   absence of lookahead, checked with proptest

mod common;

use approx::assert_relative_eq;
use common::*;
use labeltrader::cli::run_simulation_pipeline;
use labeltrader::domain::config::{SimulationConfig, YearSelection};
use labeltrader::domain::daily_record::Label;
use labeltrader::domain::error::{DataError, LabeltraderError};
use labeltrader::domain::series::prepare_series;
use labeltrader::domain::simulator::simulate_year;
use labeltrader::domain::state::{Action, SimulationState};
use labeltrader::domain::statistics::StreakTracker;
use proptest::prelude::*;

fn years(list: &[i32]) -> YearSelection {
    YearSelection::Only(list.iter().copied().collect())
}

mod pipeline {
    use super::*;

    #[test]
    fn two_years_simulated_independently() {
        let mut rows = year_rows(
            2022,
            &[10.0, 12.0, 11.0],
            &[Some("Green"), Some("Red"), Some("Green")],
        );
        rows.extend(year_rows(2023, &[20.0, 25.0], &[Some("Green"), None]));
        let port = MockDataPort::new().with_rows("AAL", rows);

        let config = SimulationConfig::new(years(&[2022, 2023]));
        let report = run_simulation_pipeline(&port, "AAL", &config).unwrap();

        assert_eq!(report.results.len(), 2);
        let y2022 = &report.results[&2022];
        // the last Friday's close carries through to year end
        assert_relative_eq!(y2022.final_balance, 120.0, epsilon = 1e-9);
        assert_eq!(y2022.trades.len(), 3);

        let y2023 = &report.results[&2023];
        // fresh 100 of capital, bought at 20, held at 25 to year end
        assert_relative_eq!(y2023.final_balance, 125.0, epsilon = 1e-9);
        assert_eq!(
            y2023.balance_history.last().map(|p| p.balance),
            Some(y2023.final_balance)
        );
        assert!(report.comparison.is_some());
    }

    #[test]
    fn balance_history_has_one_entry_per_friday() {
        let rows = year_rows(2022, &[10.0], &[Some("Green")]);
        let fridays = rows
            .iter()
            .filter(|r| {
                chrono::NaiveDate::parse_from_str(&r.date, "%Y-%m-%d")
                    .map(|d| chrono::Datelike::weekday(&d) == chrono::Weekday::Fri)
                    .unwrap_or(false)
            })
            .count();
        let port = MockDataPort::new().with_rows("AAL", rows);

        let report =
            run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(years(&[2022]))).unwrap();
        let result = &report.results[&2022];

        // 2022 ended on a Friday, so no extra year-end mark
        assert_eq!(result.balance_history.len(), fridays);
        assert_relative_eq!(result.final_balance, 100.0, epsilon = 1e-9);
        assert_eq!(result.max_growth_weeks, 0);
        assert_eq!(result.max_decline_weeks, 0);
        assert_eq!(result.volatility, Some(0.0));
    }

    #[test]
    fn missing_price_fails_only_that_year() {
        let mut rows = year_rows(2022, &[10.0], &[Some("Green")]);
        rows[5].close = None;
        rows.extend(year_rows(2023, &[20.0], &[Some("Green")]));
        let port = MockDataPort::new().with_rows("AAL", rows);

        let report =
            run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(years(&[2022, 2023])))
                .unwrap();

        assert!(!report.results.contains_key(&2022));
        assert!(matches!(
            report.failures[&2022],
            DataError::MissingPrice { .. }
        ));
        assert!(report.results.contains_key(&2023));
    }

    #[test]
    fn unparseable_date_fails_batch() {
        let mut rows = year_rows(2022, &[10.0], &[Some("Green")]);
        rows[3].date = "03-01-2022".to_string();
        let port = MockDataPort::new().with_rows("AAL", rows);

        let err = run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(YearSelection::All))
            .unwrap_err();
        assert!(matches!(
            err,
            LabeltraderError::Data(DataError::InvalidDate { row: 4, .. })
        ));
    }

    #[test]
    fn empty_source_is_no_data() {
        let port = MockDataPort::new().with_rows("AAL", Vec::new());
        let err = run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(YearSelection::All))
            .unwrap_err();
        assert!(matches!(err, LabeltraderError::NoData { ticker } if ticker == "AAL"));
    }

    #[test]
    fn data_source_error_propagates() {
        let port = MockDataPort::new().with_error("AAL", "disk on fire");
        let err = run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(YearSelection::All))
            .unwrap_err();
        assert!(matches!(err, LabeltraderError::DataSource { .. }));
    }

    #[test]
    fn requested_year_absent_from_data() {
        let rows = year_rows(2022, &[10.0], &[Some("Green")]);
        let port = MockDataPort::new().with_rows("AAL", rows);

        let report =
            run_simulation_pipeline(&port, "AAL", &SimulationConfig::new(years(&[2024]))).unwrap();
        let result = &report.results[&2024];

        assert!(result.balance_history.is_empty());
        assert_eq!(result.final_balance, 100.0);
        assert_eq!(result.min_balance, None);
        assert_eq!(result.volatility, None);
        assert!(report.comparison.is_none());
    }

    #[test]
    fn custom_initial_capital_scales_results() {
        let rows = year_rows(2022, &[10.0, 15.0], &[Some("Green"), None]);
        let port = MockDataPort::new().with_rows("AAL", rows);
        let config = SimulationConfig {
            initial_capital: 1_000.0,
            years: years(&[2022]),
        };

        let report = run_simulation_pipeline(&port, "AAL", &config).unwrap();
        assert_relative_eq!(report.results[&2022].final_balance, 1_500.0, epsilon = 1e-9);
        assert_relative_eq!(report.results[&2022].baseline.unwrap(), 1_500.0, epsilon = 1e-9);
    }
}

mod streaks {
    use super::*;

    #[test]
    fn documented_sequence() {
        let mut tracker = StreakTracker::new();
        let expected = [(0, 0), (1, 0), (0, 1), (0, 1), (1, 0)];
        for (balance, (growth, decline)) in [100.0, 110.0, 105.0, 105.0, 120.0].iter().zip(expected) {
            tracker.observe(*balance);
            assert_eq!(tracker.current_growth(), growth);
            assert_eq!(tracker.current_decline(), decline);
        }
    }
}

fn label_strategy() -> impl Strategy<Value = Option<Label>> {
    prop_oneof![Just(None), Just(Some(Label::Green)), Just(Some(Label::Red))]
}

fn weeks() -> impl Strategy<Value = Vec<(f64, Option<Label>)>> {
    prop::collection::vec((1.0f64..500.0, label_strategy()), 0..52)
}

proptest! {
    #[test]
    fn holding_and_cash_never_coexist(weeks in weeks()) {
        let (closes, labels): (Vec<f64>, Vec<Option<Label>>) = weeks.into_iter().unzip();
        let slice = friday_slice(&closes, &labels);
        let mut state = SimulationState::new(100.0);

        for record in slice.records() {
            state.on_friday(record);
            if state.holding_stock() {
                prop_assert_eq!(state.capital(), 0.0);
                prop_assert!(state.stock_quantity() > 0.0);
            } else {
                prop_assert_eq!(state.stock_quantity(), 0.0);
            }
        }
    }

    #[test]
    fn trades_conserve_value(weeks in weeks()) {
        let (closes, labels): (Vec<f64>, Vec<Option<Label>>) = weeks.into_iter().unzip();
        let slice = friday_slice(&closes, &labels);
        let mut state = SimulationState::new(100.0);

        for record in slice.records() {
            let before = state.capital() + state.stock_quantity() * record.close;
            let action = state.on_friday(record);
            let after = state.capital() + state.stock_quantity() * record.close;
            if matches!(action, Action::Buy | Action::Sell) {
                prop_assert!((before - after).abs() <= 1e-9 * before.max(1.0));
            }
        }
    }

    #[test]
    fn rerun_is_bit_identical(weeks in weeks()) {
        let (closes, labels): (Vec<f64>, Vec<Option<Label>>) = weeks.into_iter().unzip();
        let slice = friday_slice(&closes, &labels);
        prop_assert_eq!(simulate_year(&slice, 100.0), simulate_year(&slice, 100.0));
    }

    #[test]
    fn decisions_ignore_later_rows(weeks in weeks(), cut in 0usize..52) {
        let (closes, labels): (Vec<f64>, Vec<Option<Label>>) = weeks.into_iter().unzip();
        let cut = cut.min(closes.len());
        let full = simulate_year(&friday_slice(&closes, &labels), 100.0);
        let prefix = simulate_year(&friday_slice(&closes[..cut], &labels[..cut]), 100.0);

        prop_assert_eq!(&full.trades[..prefix.trades.len()], &prefix.trades[..]);
        prop_assert_eq!(
            &full.balance_history[..prefix.balance_history.len()],
            &prefix.balance_history[..]
        );
    }

    #[test]
    fn final_balance_is_last_recorded(weeks in weeks()) {
        let (closes, labels): (Vec<f64>, Vec<Option<Label>>) = weeks.into_iter().unzip();
        let result = simulate_year(&friday_slice(&closes, &labels), 100.0);
        match result.balance_history.last() {
            Some(point) => prop_assert_eq!(point.balance, result.final_balance),
            None => prop_assert_eq!(result.final_balance, 100.0),
        }
    }

    #[test]
    fn prepared_rows_are_chronological(mut rows in prop::collection::vec(0i64..365, 1..40)) {
        rows.sort_unstable();
        rows.dedup();
        let start = date(2022, 1, 1);
        let mut raw: Vec<_> = rows
            .iter()
            .map(|&d| raw_row(&(start + chrono::Duration::days(d)).to_string(), 1.0, 1.0, None))
            .collect();
        raw.reverse();

        let prepared = prepare_series(&raw, &YearSelection::All).unwrap();
        for slice in prepared.slices.values() {
            prop_assert!(slice.records().windows(2).all(|w| w[0].date < w[1].date));
        }
    }
}
