//! Command-line parsing.
//!
//! Keeps **argument parsing** separate from the pipeline. Every forecast
//! setting has an environment fallback (`.env` is loaded first), so a site can
//! change horizon, interval or holidays without touching code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_HORIZON, DEFAULT_INTERVAL_WIDTH};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pickup-forecast", version, about = "Holiday-aware pickup stop forecaster")]
pub struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit on history, forecast the horizon, print the table and optionally export.
    Forecast(ForecastArgs),
    /// Print a previously exported forecast table.
    Show(ShowArgs),
    /// Write a synthetic pickup history CSV.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// History CSV (`date,value,holiday_indicator` or the StopDate export layout).
    #[arg(short, long, env = "PICKUP_INPUT", value_name = "CSV")]
    pub input: PathBuf,

    /// Business days to forecast past the last historical date.
    #[arg(long, env = "PICKUP_HORIZON", default_value_t = DEFAULT_HORIZON)]
    pub horizon: usize,

    /// Two-sided prediction interval width, strictly between 0 and 1.
    #[arg(long, env = "PICKUP_INTERVAL_WIDTH", default_value_t = DEFAULT_INTERVAL_WIDTH)]
    pub interval_width: f64,

    /// Declared holiday (YYYY-MM-DD). Repeat or comma-separate; replaces the built-in list.
    #[arg(long = "holiday", env = "PICKUP_HOLIDAYS", value_delimiter = ',', value_name = "DATE")]
    pub holidays: Vec<String>,

    /// Do not declare the built-in holidays when no `--holiday` is given.
    #[arg(long)]
    pub no_default_holidays: bool,

    /// Show only the last N table rows (0 = all).
    #[arg(long, default_value_t = 0)]
    pub last: usize,

    /// Skip printing the table.
    #[arg(long)]
    pub no_table: bool,

    /// Export the reconciled table to CSV (e.g. `ltl_forecast.csv`).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the fitted model (features + coefficients) to JSON.
    #[arg(long = "export-model", value_name = "JSON")]
    pub export_model: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Table CSV produced by `forecast --export`.
    #[arg(long, value_name = "CSV")]
    pub table: PathBuf,

    /// Show only the last N rows (0 = all).
    #[arg(long, default_value_t = 0)]
    pub last: usize,
}

#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(short, long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of business days to generate.
    #[arg(long, default_value_t = 130)]
    pub days: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First date (rolled forward to a business day).
    #[arg(long, default_value = "2025-01-02")]
    pub start: NaiveDate,

    /// Average stops per day at the start.
    #[arg(long, default_value_t = 40.0)]
    pub level: f64,

    /// Noise standard deviation (stops).
    #[arg(long, default_value_t = 3.0)]
    pub noise: f64,
}
