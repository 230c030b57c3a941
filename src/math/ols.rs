//! Least squares solver and the straight-line fit built on it.
//!
//! The power-law fit reduces to one small regression problem:
//!
//! ```text
//! minimize Σ (v_i - (c + m·u_i))^2
//! ```
//!
//! with `u = ln x` and `v = ln y`. We build the two-column design matrix
//! `[1, u_i]` and solve it with SVD, which handles tall (more rows than
//! columns) systems without forming the normal equations.
//! (Nalgebra's `QR::solve` is intended for square systems and will panic for
//! non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// Singular values below this fraction of the largest one count as zero.
const RANK_RTOL: f64 = 1e-12;

/// Slope/intercept of a fitted line `v = intercept + slope·u`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn at(&self, u: f64) -> f64 {
        self.intercept + self.slope * u
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the design matrix is rank-deficient at a relative
/// tolerance of `RANK_RTOL`. `SVD::solve` alone would zero the small singular
/// values and hand back a minimum-norm answer instead of failing.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    let tol = (svd.singular_values.max() * RANK_RTOL).max(f64::MIN_POSITIVE);
    if svd.rank(tol) < x.ncols() {
        return None;
    }

    let beta = svd.solve(y, tol).ok()?;
    beta.iter().all(|v| v.is_finite()).then_some(beta)
}

/// Degree-1 ordinary least squares fit of `v` against `u`.
///
/// Returns `None` when the inputs differ in length, hold fewer than two
/// points, or `u` is (numerically) constant so the slope is undetermined.
pub fn fit_line(u: &[f64], v: &[f64]) -> Option<Line> {
    let n = u.len();
    if n < 2 || v.len() != n {
        return None;
    }

    let design = DMatrix::from_fn(n, 2, |row, col| if col == 0 { 1.0 } else { u[row] });
    let rhs = DVector::from_column_slice(v);

    let beta = solve_least_squares(&design, &rhs)?;
    Some(Line {
        intercept: beta[0],
        slope: beta[1],
    })
}
