//! Holiday override: a flagged date forecasts exactly zero.

use crate::domain::ForecastPoint;

/// Zero point, lower and upper on every holiday-flagged point.
///
/// Runs once on engine output. Returns how many points were overridden.
pub fn apply_holiday_overrides(points: &mut [ForecastPoint]) -> usize {
    let mut count = 0;
    for p in points.iter_mut().filter(|p| p.holiday_flag) {
        p.point_estimate = 0.0;
        p.lower_bound = 0.0;
        p.upper_bound = 0.0;
        count += 1;
    }
    tracing::info!(overridden = count, "holiday overrides applied");
    count
}
