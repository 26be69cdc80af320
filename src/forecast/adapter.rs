//! Engine adapter: call the engine and hold it to its coverage contract.

use std::collections::HashMap;

use crate::domain::{CalendarEntry, ForecastPoint, ObservationRecord};
use crate::error::{ForecastError, Result};
use crate::models::ForecastEngine;

/// Fit the engine on history. Engine errors propagate unchanged.
pub fn fit_series<E: ForecastEngine>(engine: &E, series: &[ObservationRecord]) -> Result<E::Model> {
    tracing::info!(
        n = series.len(),
        min = engine.min_observations(),
        "fitting forecast engine"
    );
    engine.fit(series)
}

/// Predict every calendar entry and attach the calendar's holiday flag.
///
/// Output follows calendar order. A calendar date the engine did not return is
/// a `MissingSchedule` error; extra engine output is ignored.
pub fn predict_calendar<E: ForecastEngine>(
    engine: &E,
    model: &E::Model,
    calendar: &[CalendarEntry],
) -> Result<Vec<ForecastPoint>> {
    let predictions = engine.predict(model, calendar)?;
    let by_date: HashMap<_, _> = predictions.iter().map(|p| (p.date, p)).collect();

    let mut out = Vec::with_capacity(calendar.len());
    for entry in calendar {
        let Some(p) = by_date.get(&entry.date) else {
            return Err(ForecastError::MissingSchedule { date: entry.date });
        };
        out.push(ForecastPoint {
            date: entry.date,
            point_estimate: p.point,
            lower_bound: p.lower,
            upper_bound: p.upper,
            holiday_flag: entry.holiday_flag,
        });
    }

    if predictions.len() > out.len() {
        tracing::debug!(
            extra = predictions.len() - out.len(),
            "ignoring engine output for unrequested dates"
        );
    }
    Ok(out)
}
