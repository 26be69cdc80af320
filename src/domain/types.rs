//! Shared domain types.
//!
//! Records flow through the pipeline by value:
//!
//! - `RawRecord` (ingest) → `ObservationRecord` (filtered + encoded history)
//! - `CalendarEntry` (dates to predict, with final holiday flags)
//! - `ForecastPoint` (engine output after the adapter)
//! - `DisplayRow` (reconciled table handed to presentation/export)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};
use crate::holiday::KnownHolidays;

/// Default number of business days to forecast past the last observation.
pub const DEFAULT_HORIZON: usize = 14;

/// Longest accepted horizon, roughly ten years of business days.
pub const MAX_HORIZON: usize = 2610;

/// Default two-sided interval width.
pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.95;

/// A record as loaded from the historical source, before calendar filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub date: NaiveDate,
    pub value: f64,
    /// Raw categorical holiday marker (e.g. `"Yes"`), if the cell was present.
    pub holiday_indicator: Option<String>,
}

/// One historical business day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub date: NaiveDate,
    pub value: f64,
    pub holiday_flag: bool,
}

/// A date the engine is asked to predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub holiday_flag: bool,
    /// True for dates re-estimated from history, false for the forward horizon.
    pub is_history: bool,
}

/// Forecast for a single calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub holiday_flag: bool,
}

impl ForecastPoint {
    pub fn values(&self) -> ForecastValues {
        ForecastValues {
            point: self.point_estimate,
            lower: self.lower_bound,
            upper: self.upper_bound,
        }
    }
}

/// Forecast columns of a display row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastValues {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// One row of the reconciled actual + forecast table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub date: NaiveDate,
    pub actual: Option<f64>,
    pub forecast: Option<ForecastValues>,
    pub holiday_flag: bool,
}

/// Summary stats about the history actually used for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub value_min: f64,
    pub value_max: f64,
    pub holidays: usize,
}

impl DatasetStats {
    /// Compute stats for a non-empty, date-sorted series.
    pub fn from_observations(observations: &[ObservationRecord]) -> Option<Self> {
        let first = observations.first()?;
        let last = observations.last()?;

        let mut value_min = f64::INFINITY;
        let mut value_max = f64::NEG_INFINITY;
        for o in observations {
            value_min = value_min.min(o.value);
            value_max = value_max.max(o.value);
        }

        Some(Self {
            n_points: observations.len(),
            first_date: first.date,
            last_date: last.date,
            value_min,
            value_max,
            holidays: observations.iter().filter(|o| o.holiday_flag).count(),
        })
    }
}

/// Fit quality diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    /// Residual standard error used to size the prediction intervals.
    pub sigma: f64,
    pub n: usize,
    pub n_features: usize,
}

/// Resolved settings for one pipeline run.
///
/// Built from CLI flags / environment; `Default` carries the documented defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastConfig {
    /// Business days to forecast past the last historical date.
    pub horizon: usize,
    /// Two-sided interval width in (0, 1).
    pub interval_width: f64,
    /// Manually declared holidays; always win over any other flag.
    pub known_holidays: KnownHolidays,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            interval_width: DEFAULT_INTERVAL_WIDTH,
            known_holidays: KnownHolidays::defaults(),
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.horizon > MAX_HORIZON {
            return Err(ForecastError::InvalidParameter(format!(
                "horizon must be at most {MAX_HORIZON} business days, got {}",
                self.horizon
            )));
        }
        let w = self.interval_width;
        if !(w.is_finite() && w > 0.0 && w < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval width must lie strictly between 0 and 1, got {w}"
            )));
        }
        Ok(())
    }
}
