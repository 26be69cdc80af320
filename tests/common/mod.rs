//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};

use pickup_forecast::calendar::business_days_after;
use pickup_forecast::domain::{CalendarEntry, ObservationRecord, RawRecord};
use pickup_forecast::error::{ForecastError, Result};
use pickup_forecast::models::{EnginePrediction, ForecastEngine};

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// `values.len()` consecutive business days starting at `start` (a weekday).
pub fn history(start: NaiveDate, values: &[f64], holidays: &[usize]) -> Vec<RawRecord> {
    let mut dates = vec![start];
    dates.extend(business_days_after(start, values.len().saturating_sub(1)));
    dates
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (date, &value))| RawRecord {
            date,
            value,
            holiday_indicator: Some(if holidays.contains(&i) { "Yes" } else { "No" }.to_string()),
        })
        .collect()
}

/// Deterministic engine: history mean plus a small date-dependent wiggle, ±2.
///
/// Ignores the holiday regressor on purpose, so any zero on a holiday must
/// come from the override stage.
#[derive(Debug, Default)]
pub struct MockEngine {
    /// Dates to leave out of `predict` output.
    pub drop_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct MockModel {
    pub mean: f64,
}

impl ForecastEngine for MockEngine {
    type Model = MockModel;

    fn min_observations(&self) -> usize {
        2
    }

    fn fit(&self, series: &[ObservationRecord]) -> Result<MockModel> {
        if series.len() < 2 {
            return Err(ForecastError::InsufficientData {
                needed: 2,
                got: series.len(),
            });
        }
        let mean = series.iter().map(|o| o.value).sum::<f64>() / series.len() as f64;
        Ok(MockModel { mean })
    }

    fn predict(&self, model: &MockModel, calendar: &[CalendarEntry]) -> Result<Vec<EnginePrediction>> {
        Ok(calendar
            .iter()
            .filter(|e| !self.drop_dates.contains(&e.date))
            .map(|e| {
                let point = model.mean + (e.date.ordinal() % 7) as f64 * 0.25;
                EnginePrediction {
                    date: e.date,
                    point,
                    lower: point - 2.0,
                    upper: point + 2.0,
                }
            })
            .collect())
    }
}
