//! inference::ols — ordinary least squares via a Cholesky solve.
//!
//! Purpose
//! -------
//! Fit `y = Xβ + e` for the small dense designs used by the ADF and KPSS
//! regressions, and report the quantities those tests consume: coefficients,
//! classical standard errors, residuals, the Gaussian log-likelihood, and
//! the AIC/BIC used for lag selection.
//!
//! Key behaviors
//! -------------
//! - Form the Gram matrix `XᵀX` in `ndarray`, copy it into a
//!   `nalgebra::DMatrix` with [`fill_dmatrix`], and factor it with a
//!   Cholesky decomposition.
//! - Solve for `β̂`, compute `σ̂² = SSR/(n−k)` and `se_j = √(σ̂² [(XᵀX)⁻¹]_jj)`.
//! - Compute `llf = −n/2 · (ln 2π + ln(SSR/n) + 1)`,
//!   `AIC = −2 llf + 2k` and `BIC = −2 llf + k ln n`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `design` is `n×k` with rows indexing observations; `y` has length `n`.
//! - Regressors are assumed to have full column rank. Near-collinearity is
//!   detected through the Cholesky pivots and reported as
//!   [`InferenceError::SingularDesign`].
//! - A perfect fit has no defined t-ratio or log-likelihood and is reported
//!   as [`InferenceError::ZeroResidualVariance`].
//!
//! Conventions
//! -----------
//! - Column order of `design` is preserved in `params` and `std_errors`.
//!
//! Downstream usage
//! ----------------
//! - `statistical_tests::adf` builds one design per candidate lag and reads
//!   `t_value(0)` and the information criteria.
//! - `statistical_tests::kpss` uses `resid` only.
//!
//! Testing notes
//! -------------
//! - Unit tests cover an exact-line fit with noise, the singular design
//!   guard, the perfect-fit guard, and the Gram-matrix bridge.
use crate::inference::errors::{InferenceError, InferenceResult};
use nalgebra::{Cholesky, DMatrix, DVector};
use ndarray::{Array1, Array2, ArrayView1};

/// Relative pivot below which a regressor is treated as collinear.
const PIVOT_TOL: f64 = 1e-12;

/// Relative SSR below which the fit is treated as exact.
const PERFECT_FIT_TOL: f64 = 1e-24;

/// OlsFit — estimates and diagnostics from a single OLS regression.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub params: Array1<f64>,
    pub std_errors: Array1<f64>,
    pub resid: Array1<f64>,
    pub ssr: f64,
    pub nobs: usize,
    pub log_likelihood: f64,
    pub aic: f64,
    pub bic: f64,
}

impl OlsFit {
    /// t-ratio `β̂_j / se_j` of coefficient `j`.
    pub fn t_value(&self, j: usize) -> f64 {
        self.params[j] / self.std_errors[j]
    }

    /// Number of estimated coefficients.
    pub fn nparams(&self) -> usize {
        self.params.len()
    }
}

/// Fit `y` on the columns of `design` by ordinary least squares.
///
/// Parameters
/// ----------
/// - `design`: `&Array2<f64>`
///   `n×k` regressor matrix.
/// - `y`: `ArrayView1<f64>`
///   Response of length `n`.
///
/// Returns
/// -------
/// `InferenceResult<OlsFit>`
///
/// Errors
/// ------
/// - `InferenceError::InsufficientDof` when `n ≤ k`.
/// - `InferenceError::SingularDesign` when `XᵀX` is not numerically
///   positive definite.
/// - `InferenceError::Overflow` when the cross-products or the residual
///   sum of squares are not finite.
/// - `InferenceError::ZeroResidualVariance` when `SSR ≤ 1e-24 · Σy²`.
///
/// Panics
/// ------
/// - Panics if `design.nrows() != y.len()` (ndarray shape mismatch).
pub fn fit_ols(design: &Array2<f64>, y: ArrayView1<f64>) -> InferenceResult<OlsFit> {
    let (nobs, nparams) = design.dim();
    if nobs <= nparams {
        return Err(InferenceError::InsufficientDof { nobs, nparams });
    }

    let gram = design.t().dot(design);
    let xty = design.t().dot(&y);
    if !gram.iter().chain(xty.iter()).all(|v| v.is_finite()) {
        return Err(InferenceError::Overflow { quantity: "cross-product matrix" });
    }

    let mut gram_nalg = DMatrix::<f64>::zeros(nparams, nparams);
    fill_dmatrix(&gram, &mut gram_nalg);

    let chol = Cholesky::new(gram_nalg).ok_or(InferenceError::SingularDesign)?;
    let lower = chol.l();
    for j in 0..nparams {
        let pivot = lower[(j, j)];
        if !(pivot * pivot > PIVOT_TOL * gram[[j, j]]) {
            return Err(InferenceError::SingularDesign);
        }
    }

    let beta = chol.solve(&DVector::from_iterator(nparams, xty.iter().copied()));
    let params = Array1::from_iter(beta.iter().copied());
    let resid = &y - &design.dot(&params);
    let ssr = resid.dot(&resid);

    let scale = y.dot(&y);
    if !ssr.is_finite() || !scale.is_finite() {
        return Err(InferenceError::Overflow { quantity: "residual sum of squares" });
    }
    if !(ssr > PERFECT_FIT_TOL * scale) {
        return Err(InferenceError::ZeroResidualVariance);
    }

    let sigma2 = ssr / (nobs - nparams) as f64;
    let gram_inv = chol.inverse();
    let std_errors = Array1::from_iter((0..nparams).map(|j| (sigma2 * gram_inv[(j, j)]).sqrt()));

    let n = nobs as f64;
    let k = nparams as f64;
    let log_likelihood =
        -n / 2.0 * ((2.0 * std::f64::consts::PI).ln() + (ssr / n).ln() + 1.0);
    let aic = -2.0 * log_likelihood + 2.0 * k;
    let bic = -2.0 * log_likelihood + k * n.ln();

    Ok(OlsFit { params, std_errors, resid, ssr, nobs, log_likelihood, aic, bic })
}

/// fill_dmatrix — copy a symmetric `ndarray` matrix into a `nalgebra::DMatrix`.
///
/// Walks the lower triangle column by column and mirrors each off-diagonal
/// entry, so `target` must be preallocated with the same `k×k` shape.
fn fill_dmatrix(source: &Array2<f64>, target: &mut DMatrix<f64>) {
    let k = source.ncols();
    for j in 0..k {
        for i in j..k {
            if i == j {
                target[(i, i)] = source[[i, i]];
            } else {
                target[(i, j)] = source[[i, j]];
                target[(j, i)] = source[[j, i]];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coefficients, residuals and information criteria of a small fit.
    // - The singular-design and perfect-fit guards.
    // - The ndarray → nalgebra bridge.
    // -------------------------------------------------------------------------

    fn intercept_and_trend(n: usize) -> Array2<f64> {
        Array2::from_shape_fn((n, 2), |(i, j)| if j == 0 { 1.0 } else { i as f64 })
    }

    #[test]
    // Purpose
    // -------
    // Verify the fit on a line with alternating ±1 noise.
    //
    // Given
    // -----
    // - y_t = 2 + 0.5 t + (−1)^t for t = 0..3, design [1, t].
    //
    // Expect
    // ------
    // - Slope 0.5 − 2/5 = 0.1 and intercept 2 + 0.6 = 2.6 (OLS of the
    //   alternating component on t), residuals summing to zero, and
    //   AIC − BIC = 2k − k ln n.
    fn fit_ols_recovers_line_with_noise() {
        // Arrange
        let design = intercept_and_trend(4);
        let y = array![3.0, 1.5, 4.0, 2.5];

        // Act
        let fit = fit_ols(&design, y.view()).unwrap();

        // Assert
        assert_relative_eq!(fit.params[0], 2.6, epsilon = 1e-10);
        assert_relative_eq!(fit.params[1], 0.1, epsilon = 1e-10);
        assert_relative_eq!(fit.resid.sum(), 0.0, epsilon = 1e-10);
        assert_eq!(fit.nobs, 4);
        assert_relative_eq!(fit.aic - fit.bic, 4.0 - 2.0 * 4.0_f64.ln(), epsilon = 1e-10);
        assert!(fit.std_errors.iter().all(|se| se.is_finite() && *se > 0.0));
    }

    #[test]
    // Purpose
    // -------
    // Ensure duplicated regressors are reported as singular.
    //
    // Given
    // -----
    // - A design whose two columns are identical.
    //
    // Expect
    // ------
    // - `Err(SingularDesign)`.
    fn fit_ols_collinear_design_is_singular() {
        // Arrange
        let design = array![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0], [4.0, 4.0]];
        let y = array![1.0, 3.0, 2.0, 5.0];

        // Act
        let result = fit_ols(&design, y.view());

        // Assert
        assert_eq!(result, Err(InferenceError::SingularDesign));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an exact linear response is reported as a perfect fit.
    //
    // Given
    // -----
    // - y = 1 + 2t with design [1, t].
    //
    // Expect
    // ------
    // - `Err(ZeroResidualVariance)`.
    fn fit_ols_exact_fit_is_zero_residual_variance() {
        let design = intercept_and_trend(5);
        let y = array![1.0, 3.0, 5.0, 7.0, 9.0];

        let result = fit_ols(&design, y.view());

        assert_eq!(result, Err(InferenceError::ZeroResidualVariance));
    }

    #[test]
    // Purpose
    // -------
    // Ensure n ≤ k is rejected before any factorization.
    //
    // Given
    // -----
    // - Two observations and two regressors.
    //
    // Expect
    // ------
    // - `Err(InsufficientDof { nobs: 2, nparams: 2 })`.
    fn fit_ols_without_residual_dof_is_rejected() {
        let design = intercept_and_trend(2);
        let y = array![1.0, 2.0];

        let result = fit_ols(&design, y.view());

        assert_eq!(result, Err(InferenceError::InsufficientDof { nobs: 2, nparams: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure overflowing data are reported as overflow, not as a perfect fit.
    //
    // Given
    // -----
    // - y of magnitude 1e200 with design [1, t]; Σ t·y and Σy² exceed f64.
    //
    // Expect
    // ------
    // - `Err(Overflow { .. })`.
    fn fit_ols_overflowing_response_is_reported() {
        let design = intercept_and_trend(5);
        let y = array![1e200, -2e200, 3e200, -1e200, 2e200];

        let result = fit_ols(&design, y.view());

        assert!(matches!(result, Err(InferenceError::Overflow { .. })), "{result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `fill_dmatrix` copies a symmetric matrix unchanged.
    //
    // Given
    // -----
    // - A 2×2 symmetric matrix.
    //
    // Expect
    // ------
    // - The DMatrix has identical entries at all positions.
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        // Arrange
        let gram: Array2<f64> = array![[2.0, 0.5], [0.5, 1.0]];
        let mut gram_nalg = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(&gram, &mut gram_nalg);

        // Assert
        assert_eq!(gram_nalg[(0, 0)], 2.0);
        assert_eq!(gram_nalg[(0, 1)], 0.5);
        assert_eq!(gram_nalg[(1, 0)], 0.5);
        assert_eq!(gram_nalg[(1, 1)], 1.0);
    }
}
