//! Merge actuals and forecasts into one row per date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{DisplayRow, ForecastPoint, ObservationRecord};
use crate::error::{ForecastError, Result};

#[derive(Default)]
struct Slot {
    actual: Option<f64>,
    history_flag: Option<bool>,
    forecast: Option<ForecastPoint>,
}

/// Outer-join `observations` and `forecast` on date, ascending.
///
/// The forecast's flag wins (it already carries declared holidays); history's
/// flag is the fallback; no flag at all means `false`. Either input repeating a
/// date is a `DuplicateObservation` error.
pub fn reconcile(observations: &[ObservationRecord], forecast: &[ForecastPoint]) -> Result<Vec<DisplayRow>> {
    let mut slots: BTreeMap<NaiveDate, Slot> = BTreeMap::new();

    for o in observations {
        let slot = slots.entry(o.date).or_default();
        if slot.actual.is_some() {
            return Err(ForecastError::DuplicateObservation { date: o.date });
        }
        slot.actual = Some(o.value);
        slot.history_flag = Some(o.holiday_flag);
    }

    for p in forecast {
        let slot = slots.entry(p.date).or_default();
        if slot.forecast.is_some() {
            return Err(ForecastError::DuplicateObservation { date: p.date });
        }
        slot.forecast = Some(*p);
    }

    let rows: Vec<DisplayRow> = slots
        .into_iter()
        .map(|(date, slot)| DisplayRow {
            date,
            actual: slot.actual,
            forecast: slot.forecast.map(|p| p.values()),
            holiday_flag: slot
                .forecast
                .map(|p| p.holiday_flag)
                .or(slot.history_flag)
                .unwrap_or(false),
        })
        .collect();

    tracing::info!(
        rows = rows.len(),
        history = observations.len(),
        forecast = forecast.len(),
        "actuals and forecast reconciled"
    );
    Ok(rows)
}
