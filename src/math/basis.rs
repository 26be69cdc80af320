//! Seasonal basis functions.
//!
//! A Fourier seasonality of period `P` and order `K` contributes `2K` columns:
//!
//! - `sin(2π k t / P)` and `cos(2π k t / P)` for `k = 1..=K`
//!
//! where `t` is measured in days from the model origin.

use std::f64::consts::PI;

/// Fill `out` (length `2 * order`) with Fourier terms at `t_days`.
///
/// # Panics
/// Panics if `out.len() < 2 * order`.
pub fn fourier_terms(t_days: f64, period: f64, order: usize, out: &mut [f64]) {
    for k in 1..=order {
        let x = 2.0 * PI * k as f64 * t_days / period;
        out[2 * (k - 1)] = x.sin();
        out[2 * (k - 1) + 1] = x.cos();
    }
}
