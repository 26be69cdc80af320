//! Ordinary least squares via SVD.
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Demand designs are often rank-deficient: a holiday column that is all zeros
//! in a short history, or weekly Fourier columns sampled only on weekdays. The
//! SVD solve treats tiny singular values as zero and returns the minimum-norm
//! solution instead of failing.

use nalgebra::{DMatrix, DVector};

/// Singular values below this (relative to the largest) are treated as zero.
const RANK_TOL: f64 = 1e-10;

/// Least squares solution plus what the interval code needs.
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub beta: DVector<f64>,
    /// Pseudo-inverse of `XᵀX`, used for prediction leverage.
    pub xtx_pinv: DMatrix<f64>,
    /// Numerical rank of the design.
    pub rank: usize,
}

/// Solve a least squares problem.
///
/// Returns `None` if the design is empty or the solution is not finite.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<LeastSquares> {
    if x.nrows() == 0 || x.ncols() == 0 || x.nrows() != y.len() {
        return None;
    }

    let svd = x.clone().svd(true, true);
    let s_max = svd.singular_values.max();
    let eps = if s_max > 0.0 { s_max * RANK_TOL } else { RANK_TOL };
    let rank = svd.rank(eps);

    let beta = svd.solve(y, eps).ok()?;
    if !beta.iter().all(|v| v.is_finite()) {
        return None;
    }

    let xtx = x.transpose() * x;
    let xtx_pinv = xtx.pseudo_inverse(eps * eps).ok()?;

    Some(LeastSquares { beta, xtx_pinv, rank })
}

/// `xᵀ (XᵀX)⁺ x` for a single design row.
pub fn leverage(xtx_pinv: &DMatrix<f64>, row: &[f64]) -> f64 {
    let r = DVector::from_row_slice(row);
    (r.transpose() * xtx_pinv * &r)[(0, 0)]
}
