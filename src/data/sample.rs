//! Synthetic pickup history for demos and smoke tests.
//!
//! Generates a business-day series with a weekday pattern, a mild trend and
//! Gaussian noise. Fixed-date public holidays (Jan 1, Jul 4, Dec 25) that land
//! on a weekday are recorded as `"Yes"` with zero stops.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::calendar::{business_days_after, is_business_day};
use crate::domain::RawRecord;
use crate::error::AppError;
use crate::holiday::HOLIDAY_SENTINEL;

/// Relative demand Monday..Friday.
const WEEKDAY_FACTORS: [f64; 5] = [1.12, 1.0, 0.97, 1.0, 0.9];

/// Fixed (month, day) holidays.
const FIXED_HOLIDAYS: [(u32, u32); 3] = [(1, 1), (7, 4), (12, 25)];

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: usize,
    pub seed: u64,
    pub base_level: f64,
    /// Level change per business day.
    pub trend_per_day: f64,
    pub noise_sd: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap_or_default(),
            days: 130,
            seed: 42,
            base_level: 40.0,
            trend_per_day: 0.02,
            noise_sd: 3.0,
        }
    }
}

pub fn is_fixed_holiday(date: NaiveDate) -> bool {
    FIXED_HOLIDAYS.contains(&(date.month(), date.day()))
}

/// Generate `config.days` business days starting at the first business day on or after `start`.
pub fn generate_history(config: &SampleConfig) -> Result<Vec<RawRecord>, AppError> {
    if config.days == 0 {
        return Err(AppError::new(2, "Sample days must be > 0."));
    }
    if !(config.noise_sd.is_finite() && config.noise_sd >= 0.0) {
        return Err(AppError::new(2, "Noise standard deviation must be finite and >= 0."));
    }

    let normal = Normal::new(0.0, config.noise_sd)
        .map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let first = if is_business_day(config.start) {
        config.start
    } else {
        business_days_after(config.start, 1)
            .first()
            .copied()
            .ok_or_else(|| AppError::new(2, "Start date is at the end of the calendar."))?
    };
    let mut dates = vec![first];
    dates.extend(business_days_after(first, config.days - 1));

    let records = dates
        .into_iter()
        .enumerate()
        .map(|(i, date)| {
            if is_fixed_holiday(date) {
                return RawRecord {
                    date,
                    value: 0.0,
                    holiday_indicator: Some(HOLIDAY_SENTINEL.to_string()),
                };
            }
            let factor = WEEKDAY_FACTORS[date.weekday().num_days_from_monday() as usize];
            let level = config.base_level + config.trend_per_day * i as f64;
            let noise: f64 = normal.sample(&mut rng);
            RawRecord {
                date,
                value: (level * factor + noise).round().max(0.0),
                holiday_indicator: Some("No".to_string()),
            }
        })
        .collect();

    Ok(records)
}

/// Write records in the history CSV layout read by `io::ingest`.
pub fn write_history_csv(path: &Path, records: &[RawRecord]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create sample CSV '{}': {e}", path.display())))?;
    write_history(file, records)
}

pub fn write_history<W: Write>(output: W, records: &[RawRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(["date", "value", "holiday_indicator"])
        .map_err(|e| AppError::new(2, format!("Failed to write sample CSV header: {e}")))?;
    for r in records {
        writer
            .write_record([
                r.date.to_string(),
                r.value.to_string(),
                r.holiday_indicator.clone().unwrap_or_default(),
            ])
            .map_err(|e| AppError::new(2, format!("Failed to write sample CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush sample CSV: {e}")))
}
