//! The forecasting capability the pipeline depends on.
//!
//! The pipeline only relies on this contract; the numerical model behind it is
//! swappable (the production [`AdditiveEngine`](crate::models::AdditiveEngine),
//! or a deterministic mock in tests).

use chrono::NaiveDate;

use crate::domain::{CalendarEntry, FitQuality, ObservationRecord};
use crate::error::Result;

/// Raw engine output for one requested date, before holiday overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnginePrediction {
    pub date: NaiveDate,
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Fit a holiday-aware model on history and predict arbitrary dates.
pub trait ForecastEngine {
    type Model;

    /// Fewest observations `fit` accepts.
    fn min_observations(&self) -> usize;

    /// Fit on a date-sorted, unique history.
    ///
    /// Fails with `InsufficientData` below [`min_observations`](Self::min_observations).
    fn fit(&self, series: &[ObservationRecord]) -> Result<Self::Model>;

    /// Predict every calendar entry, using its holiday flag as the regressor value.
    fn predict(&self, model: &Self::Model, calendar: &[CalendarEntry]) -> Result<Vec<EnginePrediction>>;

    /// Optional fit diagnostics for reporting.
    fn diagnostics(&self, _model: &Self::Model) -> Option<FitQuality> {
        None
    }
}
