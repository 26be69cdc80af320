//! Additive regression model: trend + seasonality + holiday regressor.
//!
//! ```text
//! y(t) = β0 + β1·trend(t) + Σ weekly Fourier + Σ yearly Fourier + βh·holiday(t)
//! ```
//!
//! - `trend(t)` is days since the first observation, scaled to `[0, 1]` over history.
//! - Weekly terms (period 7, order 3) need at least two weeks of history.
//! - Yearly terms (period 365.25, order 10) need at least two years.
//!
//! Coefficients are solved in one OLS pass. Intervals use the classic OLS
//! prediction error `σ·sqrt(1 + xᵀ(XᵀX)⁺x)`, so they widen as the trend is
//! extrapolated past the history.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::domain::{CalendarEntry, FitQuality, ObservationRecord, DEFAULT_INTERVAL_WIDTH};
use crate::error::{ForecastError, Result};
use crate::math::{fourier_terms, leverage, solve_least_squares};
use crate::models::{EnginePrediction, ForecastEngine};

const WEEKLY_PERIOD: f64 = 7.0;
const WEEKLY_ORDER: usize = 3;
const YEARLY_PERIOD: f64 = 365.25;
const YEARLY_ORDER: usize = 10;

/// History span (days) needed before each seasonality is fitted.
const WEEKLY_MIN_SPAN_DAYS: i64 = 14;
const YEARLY_MIN_SPAN_DAYS: i64 = 730;

/// Two points pin down intercept + trend; anything less cannot be fitted.
pub const MIN_OBSERVATIONS: usize = 2;

/// Which seasonal blocks a fitted model carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureLayout {
    pub weekly: bool,
    pub yearly: bool,
}

impl FeatureLayout {
    fn for_span(span_days: i64) -> Self {
        Self {
            weekly: span_days >= WEEKLY_MIN_SPAN_DAYS,
            yearly: span_days >= YEARLY_MIN_SPAN_DAYS,
        }
    }

    pub fn len(&self) -> usize {
        let mut n = 3; // intercept, trend, holiday
        if self.weekly {
            n += 2 * WEEKLY_ORDER;
        }
        if self.yearly {
            n += 2 * YEARLY_ORDER;
        }
        n
    }

    pub fn names(&self) -> Vec<String> {
        let mut out = vec!["intercept".to_string(), "trend".to_string()];
        if self.weekly {
            push_fourier_names(&mut out, "weekly", WEEKLY_ORDER);
        }
        if self.yearly {
            push_fourier_names(&mut out, "yearly", YEARLY_ORDER);
        }
        out.push("holiday".to_string());
        out
    }

    /// Fill one design row. `out.len()` must equal `self.len()`.
    fn fill_row(&self, t_days: f64, t_scale: f64, holiday: bool, out: &mut [f64]) {
        out[0] = 1.0;
        out[1] = t_days / t_scale;
        let mut col = 2;
        if self.weekly {
            fourier_terms(t_days, WEEKLY_PERIOD, WEEKLY_ORDER, &mut out[col..col + 2 * WEEKLY_ORDER]);
            col += 2 * WEEKLY_ORDER;
        }
        if self.yearly {
            fourier_terms(t_days, YEARLY_PERIOD, YEARLY_ORDER, &mut out[col..col + 2 * YEARLY_ORDER]);
            col += 2 * YEARLY_ORDER;
        }
        out[col] = if holiday { 1.0 } else { 0.0 };
    }
}

fn push_fourier_names(out: &mut Vec<String>, prefix: &str, order: usize) {
    for k in 1..=order {
        out.push(format!("{prefix}_sin{k}"));
        out.push(format!("{prefix}_cos{k}"));
    }
}

/// A fitted additive model.
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    pub origin: NaiveDate,
    /// Days covered by the history; trend is `days / t_scale`.
    pub t_scale: f64,
    pub layout: FeatureLayout,
    pub betas: Vec<f64>,
    pub interval_width: f64,
    pub quality: FitQuality,
    z: f64,
    xtx_pinv: DMatrix<f64>,
}

impl AdditiveModel {
    /// Coefficient per feature name, in design order.
    pub fn coefficients(&self) -> Vec<(String, f64)> {
        self.layout.names().into_iter().zip(self.betas.iter().copied()).collect()
    }

    fn design_row(&self, date: NaiveDate, holiday: bool) -> Vec<f64> {
        let mut row = vec![0.0; self.layout.len()];
        let t_days = (date - self.origin).num_days() as f64;
        self.layout.fill_row(t_days, self.t_scale, holiday, &mut row);
        row
    }
}

/// OLS-backed [`ForecastEngine`].
#[derive(Debug, Clone)]
pub struct AdditiveEngine {
    interval_width: f64,
}

impl Default for AdditiveEngine {
    fn default() -> Self {
        Self {
            interval_width: DEFAULT_INTERVAL_WIDTH,
        }
    }
}

impl AdditiveEngine {
    pub fn new(interval_width: f64) -> Result<Self> {
        if !(interval_width.is_finite() && interval_width > 0.0 && interval_width < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "interval width must lie strictly between 0 and 1, got {interval_width}"
            )));
        }
        Ok(Self { interval_width })
    }

    pub fn interval_width(&self) -> f64 {
        self.interval_width
    }
}

impl ForecastEngine for AdditiveEngine {
    type Model = AdditiveModel;

    fn min_observations(&self) -> usize {
        MIN_OBSERVATIONS
    }

    fn fit(&self, series: &[ObservationRecord]) -> Result<AdditiveModel> {
        let n = series.len();
        if n < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        }
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(ForecastError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        };

        let origin = first.date;
        let span_days = (last.date - origin).num_days();
        if span_days <= 0 {
            return Err(ForecastError::InvalidParameter(
                "history must be date-sorted with distinct dates".to_string(),
            ));
        }
        let t_scale = span_days as f64;
        let layout = FeatureLayout::for_span(span_days);
        let p = layout.len();

        let mut x = DMatrix::<f64>::zeros(n, p);
        let mut row = vec![0.0; p];
        for (i, o) in series.iter().enumerate() {
            let t_days = (o.date - origin).num_days() as f64;
            layout.fill_row(t_days, t_scale, o.holiday_flag, &mut row);
            for (j, v) in row.iter().enumerate() {
                x[(i, j)] = *v;
            }
        }
        let y = DVector::from_iterator(n, series.iter().map(|o| o.value));

        let ls = solve_least_squares(&x, &y)
            .ok_or_else(|| ForecastError::Computation("least squares solve failed".to_string()))?;

        let residuals = &y - &x * &ls.beta;
        let sse = residuals.norm_squared();
        let dof = n.saturating_sub(ls.rank);
        let sigma = if dof > 0 { (sse / dof as f64).sqrt() } else { 0.0 };
        let rmse = (sse / n as f64).sqrt();

        let normal = Normal::new(0.0, 1.0)
            .map_err(|e| ForecastError::Computation(format!("normal distribution: {e}")))?;
        let z = normal.inverse_cdf(0.5 + self.interval_width / 2.0);

        tracing::info!(
            n,
            features = p,
            rank = ls.rank,
            weekly = layout.weekly,
            yearly = layout.yearly,
            rmse,
            "additive model fitted"
        );

        Ok(AdditiveModel {
            origin,
            t_scale,
            layout,
            betas: ls.beta.iter().copied().collect(),
            interval_width: self.interval_width,
            quality: FitQuality {
                sse,
                rmse,
                sigma,
                n,
                n_features: p,
            },
            z,
            xtx_pinv: ls.xtx_pinv,
        })
    }

    fn predict(&self, model: &AdditiveModel, calendar: &[CalendarEntry]) -> Result<Vec<EnginePrediction>> {
        let mut out = Vec::with_capacity(calendar.len());
        for entry in calendar {
            let row = model.design_row(entry.date, entry.holiday_flag);
            let point: f64 = row.iter().zip(&model.betas).map(|(x, b)| x * b).sum();
            let se = model.quality.sigma * (1.0 + leverage(&model.xtx_pinv, &row).max(0.0)).sqrt();
            let margin = model.z * se;

            if !(point.is_finite() && margin.is_finite()) {
                return Err(ForecastError::Computation(format!(
                    "non-finite prediction for {}",
                    entry.date
                )));
            }
            out.push(EnginePrediction {
                date: entry.date,
                point,
                lower: point - margin,
                upper: point + margin,
            });
        }
        Ok(out)
    }

    fn diagnostics(&self, model: &AdditiveModel) -> Option<FitQuality> {
        Some(model.quality.clone())
    }
}
