//! The forecast pipeline shared by every front-end.
//!
//! raw records -> calendar filter -> fit -> prediction calendar -> predict
//! -> holiday overrides -> reconcile
//!
//! Each stage owns its output and hands it to the next; nothing is cached
//! between runs.

use std::path::Path;

use crate::calendar::{PredictionCalendar, build_calendar, filter_business_days};
use crate::domain::{DatasetStats, DisplayRow, FitQuality, ForecastConfig, ForecastPoint, ObservationRecord, RawRecord};
use crate::error::{AppError, ForecastError, Result};
use crate::forecast::{apply_holiday_overrides, fit_series, predict_calendar, reconcile};
use crate::io::ingest::{IngestedData, load_history};
use crate::models::{AdditiveEngine, AdditiveModel, ForecastEngine};

/// Everything one pipeline pass produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput<M> {
    pub observations: Vec<ObservationRecord>,
    pub stats: DatasetStats,
    pub calendar: PredictionCalendar,
    pub model: M,
    pub quality: Option<FitQuality>,
    /// Forecast after holiday overrides.
    pub forecast: Vec<ForecastPoint>,
    pub overridden: usize,
    pub rows: Vec<DisplayRow>,
}

/// Output of a file-backed run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedData,
    pub pipeline: PipelineOutput<AdditiveModel>,
}

/// Load history from `input` and run the pipeline with the additive engine.
pub fn run_forecast(input: &Path, config: &ForecastConfig) -> std::result::Result<RunOutput, AppError> {
    config.validate()?;
    let ingest = load_history(input)?;
    let engine = AdditiveEngine::new(config.interval_width)?;
    let pipeline = run_with_records(&ingest.records, config, &engine)?;
    Ok(RunOutput { ingest, pipeline })
}

/// Run the pipeline on already-loaded records with any engine.
///
/// Fails before producing any table if a stage's precondition is violated.
pub fn run_with_records<E: ForecastEngine>(
    records: &[RawRecord],
    config: &ForecastConfig,
    engine: &E,
) -> Result<PipelineOutput<E::Model>> {
    config.validate()?;

    // 1) Weekday-only, encoded, sorted history.
    let observations = filter_business_days(records)?;
    let stats = DatasetStats::from_observations(&observations).ok_or(ForecastError::InsufficientData {
        needed: engine.min_observations().max(1),
        got: 0,
    })?;

    // 2) Fit on history.
    let model = fit_series(engine, &observations)?;
    let quality = engine.diagnostics(&model);

    // 3) History + horizon with final holiday flags.
    let calendar = build_calendar(&observations, config.horizon, &config.known_holidays)?;
    tracing::info!(
        history = observations.len(),
        future = calendar.future_len(),
        matched_holidays = calendar.matched_holidays.len(),
        "prediction calendar built"
    );

    // 4) Predict, then force holidays to zero.
    let mut forecast = predict_calendar(engine, &model, &calendar.entries)?;
    let overridden = apply_holiday_overrides(&mut forecast);

    // 5) One row per date.
    let rows = reconcile(&observations, &forecast)?;

    Ok(PipelineOutput {
        observations,
        stats,
        calendar,
        model,
        quality,
        forecast,
        overridden,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::KnownHolidays;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn raw(date: NaiveDate, value: f64, flag: &str) -> RawRecord {
        RawRecord {
            date,
            value,
            holiday_indicator: Some(flag.to_string()),
        }
    }

    fn history() -> Vec<RawRecord> {
        // Three weeks around US Independence Day 2025 (Friday), plus a stray weekend row.
        let mut out = Vec::new();
        let mut date = d(2025, 6, 23);
        let mut i = 0;
        while date <= d(2025, 7, 11) {
            if crate::calendar::is_business_day(date) {
                if date == d(2025, 7, 4) {
                    out.push(raw(date, 0.0, "Yes"));
                } else {
                    out.push(raw(date, 30.0 + (i % 5) as f64, "No"));
                }
                i += 1;
            }
            date = date.succ_opt().unwrap();
        }
        out.push(raw(d(2025, 7, 5), 2.0, "No"));
        out
    }

    #[test]
    fn end_to_end_with_additive_engine() {
        let config = ForecastConfig {
            horizon: 5,
            interval_width: 0.9,
            known_holidays: [d(2025, 7, 16)].into_iter().collect(),
        };
        let engine = AdditiveEngine::new(config.interval_width).unwrap();
        let out = run_with_records(&history(), &config, &engine).unwrap();

        assert_eq!(out.observations.len(), 15);
        assert_eq!(out.stats.holidays, 1);
        assert_eq!(out.rows.len(), 20);
        assert_eq!(out.overridden, 2);
        assert!(out.quality.is_some());

        let row = |date| out.rows.iter().find(|r| r.date == date).unwrap();
        let july4 = row(d(2025, 7, 4));
        assert!(july4.holiday_flag);
        assert_eq!(july4.forecast.map(|f| (f.point, f.lower, f.upper)), Some((0.0, 0.0, 0.0)));

        let declared = row(d(2025, 7, 16));
        assert!(declared.holiday_flag);
        assert_eq!(declared.actual, None);
        assert_eq!(declared.forecast.map(|f| f.point), Some(0.0));

        assert!(out.rows.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn invalid_width_fails_before_any_work() {
        let config = ForecastConfig {
            interval_width: 1.2,
            ..ForecastConfig::default()
        };
        let err = run_with_records(&history(), &config, &AdditiveEngine::default()).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter(_)));
    }

    #[test]
    fn weekend_only_history_is_insufficient() {
        let records = vec![raw(d(2025, 7, 5), 1.0, "No"), raw(d(2025, 7, 6), 1.0, "No")];
        let config = ForecastConfig {
            known_holidays: KnownHolidays::new(),
            ..ForecastConfig::default()
        };
        let err = run_with_records(&records, &config, &AdditiveEngine::default()).unwrap_err();
        assert_eq!(err, ForecastError::InsufficientData { needed: 2, got: 0 });
    }
}
