//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the forecast pipeline
//! - prints reports and writes optional exports

use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ForecastArgs, SampleArgs, ShowArgs};
use crate::data::{SampleConfig, generate_history, write_history_csv};
use crate::domain::ForecastConfig;
use crate::error::AppError;
use crate::holiday::KnownHolidays;

pub mod pipeline;

/// Entry point for the `pickup-forecast` binary.
pub fn run() -> Result<(), AppError> {
    // Env fallbacks in the CLI read the process environment, so `.env` goes first.
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Show(args) => handle_show(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pickup_forecast=info" } else { "pickup_forecast=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests); keep it.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = forecast_config_from_args(&args)?;
    let run = pipeline::run_forecast(&args.input, &config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));
    if !args.no_table {
        println!("{}", crate::report::format_table(&run.pipeline.rows, args.last));
    }

    if let Some(path) = &args.export {
        crate::io::export::write_display_csv(path, &run.pipeline.rows)?;
        tracing::info!(path = %path.display(), rows = run.pipeline.rows.len(), "table exported");
    }
    if let Some(path) = &args.export_model {
        crate::io::model::write_model_json(path, &run.pipeline.model)?;
        tracing::info!(path = %path.display(), "model exported");
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let rows = crate::io::export::read_display_csv(&args.table)?;
    println!("{}", crate::report::format_table(&rows, args.last));
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        start: args.start,
        days: args.days,
        seed: args.seed,
        base_level: args.level,
        noise_sd: args.noise,
        ..SampleConfig::default()
    };
    let records = generate_history(&config)?;
    write_history_csv(&args.out, &records)?;
    println!("Wrote {} business days to {}", records.len(), args.out.display());
    Ok(())
}

/// Resolve CLI flags into a validated pipeline config.
///
/// Explicit `--holiday` values replace the built-in list; `--no-default-holidays`
/// without any `--holiday` leaves the list empty.
pub fn forecast_config_from_args(args: &ForecastArgs) -> Result<ForecastConfig, AppError> {
    let known_holidays = if !args.holidays.is_empty() {
        KnownHolidays::parse(&args.holidays)?
    } else if args.no_default_holidays {
        KnownHolidays::new()
    } else {
        KnownHolidays::defaults()
    };

    let config = ForecastConfig {
        horizon: args.horizon,
        interval_width: args.interval_width,
        known_holidays,
    };
    config.validate()?;
    Ok(config)
}
