//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config::{DEFAULT_INITIAL_CAPITAL, SimulationConfig, YearSelection};
use crate::domain::config_validation::{parse_years, resolve_ticker, validate_simulation_config};
use crate::domain::error::LabeltraderError;
use crate::domain::series::prepare_series;
use crate::domain::simulator::{SimulationReport, YearResult, simulate};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "labeltrader", about = "Weekly label-driven trading simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate the label strategy year by year
    Simulate {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        /// e.g. "2022,2023", "2019-2021" or "all"
        #[arg(long)]
        years: Option<String>,
        /// CSV file for the weekly balance table
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show per-year row and Friday counts for a ticker
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        ticker: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List tickers available in the data directory
    ListTickers {
        #[arg(long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Simulate {
            config,
            ticker,
            years,
            output,
            data_dir,
        } => run_simulate(
            &config,
            ticker.as_deref(),
            years.as_deref(),
            output.as_deref(),
            data_dir.as_deref(),
        ),
        Command::Info {
            config,
            ticker,
            data_dir,
        } => run_info(&config, ticker.as_deref(), data_dir.as_deref()),
        Command::ListTickers { data_dir, config } => {
            run_list_tickers(data_dir.as_deref(), config.as_deref())
        }
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Typed simulation parameters from `[simulation]`, with an optional
/// `--years` override.
pub fn build_simulation_config(
    adapter: &dyn ConfigPort,
    years_override: Option<&str>,
) -> Result<SimulationConfig, LabeltraderError> {
    let years = match years_override {
        Some(y) => parse_years(Some(y))?,
        None => parse_years(adapter.get_string("simulation", "years").as_deref())?,
    };

    Ok(SimulationConfig {
        initial_capital: adapter.get_double(
            "simulation",
            "initial_capital",
            DEFAULT_INITIAL_CAPITAL,
        ),
        years,
    })
}

pub fn resolve_data_dir(dir_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    match dir_override {
        Some(dir) => dir.to_path_buf(),
        None => config
            .get_path("data", "directory")
            .unwrap_or_else(|| PathBuf::from(".")),
    }
}

/// Fetch, prepare and simulate one ticker.
pub fn run_simulation_pipeline(
    data_port: &dyn DataPort,
    ticker: &str,
    config: &SimulationConfig,
) -> Result<SimulationReport, LabeltraderError> {
    let rows = data_port.fetch_daily_rows(ticker)?;
    if rows.is_empty() {
        return Err(LabeltraderError::NoData {
            ticker: ticker.to_string(),
        });
    }

    let prepared = prepare_series(&rows, &config.years)?;
    Ok(simulate(&prepared, config))
}

fn fmt_money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}

pub fn format_year_summary(result: &YearResult) -> String {
    let mut lines = vec![
        format!("Results for Year: {}", result.year),
        format!("  Final Account Balance:    ${:.2}", result.final_balance),
        format!("  Minimum Account Balance:  {}", fmt_money(result.min_balance)),
        format!("  Maximum Account Balance:  {}", fmt_money(result.max_balance)),
        format!("  Longest Growth Streak:    {} weeks", result.max_growth_weeks),
        format!("  Longest Decline Streak:   {} weeks", result.max_decline_weeks),
        format!("  Average Weekly Balance:   {}", fmt_money(result.average_balance)),
        format!(
            "  Weekly Volatility:        {}",
            result
                .volatility
                .map(|v| format!("{:.2}%", v))
                .unwrap_or_else(|| "n/a".to_string())
        ),
        format!("  Trades:                   {}", result.trades.len()),
        format!("  Buy-and-Hold Capital:     {}", fmt_money(result.baseline)),
    ];
    if let Some(diff) = result.difference() {
        lines.push(format!("  Difference vs Baseline:   {:+.2}", diff));
    }
    if !result.skipped_fridays.is_empty() {
        let dates: Vec<String> = result
            .skipped_fridays
            .iter()
            .map(|d| d.to_string())
            .collect();
        lines.push(format!("  Skipped Fridays:          {}", dates.join(", ")));
    }
    lines.join("\n")
}

fn run_simulate(
    config_path: &Path,
    ticker_override: Option<&str>,
    years_override: Option<&str>,
    output_override: Option<&Path>,
    data_dir_override: Option<&Path>,
) -> ExitCode {
    // Stage 1: Load and validate config
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 2: Resolve parameters
    let ticker = match resolve_ticker(ticker_override, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let sim_config = match build_simulation_config(&adapter, years_override) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let data_dir = resolve_data_dir(data_dir_override, &adapter);
    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| adapter.get_path("report", "output"));

    // Stage 3: Load data and simulate
    eprintln!(
        "Simulating {} from {} with initial capital {:.2}",
        ticker,
        data_dir.display(),
        sim_config.initial_capital
    );
    let data_port = CsvAdapter::new(data_dir);
    let report = match run_simulation_pipeline(&data_port, &ticker, &sim_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Print console summary to stderr
    for result in report.results.values() {
        eprintln!("\n{}", format_year_summary(result));
    }

    for (year, failure) in &report.failures {
        eprintln!("\nwarning: year {} not simulated ({})", year, failure);
    }

    if let Some(comparison) = &report.comparison {
        eprintln!("\n=== Label Strategy vs Buy-and-Hold ===");
        eprintln!("Minimum Annual Difference: {:+.2}", comparison.min_difference);
        eprintln!("Maximum Annual Difference: {:+.2}", comparison.max_difference);
        eprintln!("Average Annual Difference: {:+.2}", comparison.avg_difference);
    }

    // Stage 5: Export balance table
    if let Some(path) = output {
        if let Err(e) = CsvReportAdapter::new().write(&ticker, &report, &path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("\nBalance table written to: {}", path.display());
    }

    if report.results.is_empty() {
        if let Some(failure) = report.failures.values().next() {
            return (&LabeltraderError::Data(failure.clone())).into();
        }
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &Path, ticker_override: Option<&str>, data_dir: Option<&Path>) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };
    let ticker = match resolve_ticker(ticker_override, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let data_port = CsvAdapter::new(resolve_data_dir(data_dir, &adapter));
    let rows = match data_port.fetch_daily_rows(&ticker) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let prepared = match prepare_series(&rows, &YearSelection::All) {
        Ok(p) => p,
        Err(e) => {
            let err = LabeltraderError::from(e);
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    if prepared.slices.is_empty() && prepared.failures.is_empty() {
        eprintln!("{}: no data found", ticker);
        return ExitCode::SUCCESS;
    }

    for slice in prepared.slices.values() {
        let fridays = slice.fridays().count();
        let labelled = slice.fridays().filter(|r| r.label.is_some()).count();
        if let (Some(first), Some(last)) = (slice.first(), slice.last()) {
            println!(
                "{} {}: {} rows, {} to {}, {} Fridays ({} labelled)",
                ticker,
                slice.year(),
                slice.len(),
                first.date,
                last.date,
                fridays,
                labelled
            );
        }
    }
    for (year, failure) in &prepared.failures {
        println!("{} {}: unusable ({})", ticker, year, failure);
    }
    ExitCode::SUCCESS
}

fn run_list_tickers(data_dir: Option<&Path>, config_path: Option<&Path>) -> ExitCode {
    let dir = match (data_dir, config_path) {
        (Some(dir), _) => dir.to_path_buf(),
        (None, Some(path)) => match load_config(path) {
            Ok(adapter) => resolve_data_dir(None, &adapter),
            Err(code) => return code,
        },
        (None, None) => PathBuf::from("."),
    };

    let tickers = match CsvAdapter::new(dir.clone()).list_tickers() {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if tickers.is_empty() {
        eprintln!("No tickers found in {}", dir.display());
    } else {
        for ticker in &tickers {
            println!("{}", ticker);
        }
        eprintln!("{} tickers found", tickers.len());
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &Path) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let ticker = match resolve_ticker(None, &adapter) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let sim_config = match build_simulation_config(&adapter, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("  ticker:          {}", ticker);
    eprintln!("  initial capital: {:.2}", sim_config.initial_capital);
    match &sim_config.years {
        YearSelection::All => eprintln!("  years:           all"),
        YearSelection::Only(years) => {
            let list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
            eprintln!("  years:           {}", list.join(", "));
        }
    }
    eprintln!(
        "  data directory:  {}",
        resolve_data_dir(None, &adapter).display()
    );

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}
