//! inference::long_run_variance — kernel long-run variance of a residual series.
//!
//! Purpose
//! -------
//! Estimate the long-run (zero-frequency) variance of a univariate residual
//! series for the KPSS statistic, and select the truncation lag that goes
//! with it. The estimator has the form
//!
//! ```text
//! σ̂²  =  ( Σ e_t²  +  2 Σ_{k=1}^{L} w_k Σ_{t>k} e_t e_{t−k} ) / n,
//! w_k =  kernel( k/(L+1) ).
//! ```
//!
//! Key behaviors
//! -------------
//! - [`long_run_variance`] aggregates autocovariances with kernel weights,
//!   scaling every lag by `1/n` (no small-sample correction).
//! - [`hobijn_bandwidth`] implements the data-dependent rule of Hobijn,
//!   Franses & Ooms (1998).
//! - [`legacy_bandwidth`] implements the `⌈12 (n/100)^{1/4}⌉` rule.
//!
//! Invariants & assumptions
//! ------------------------
//! - The bandwidth is truncated to `L ≤ n−1` so that no lag exceeds the
//!   sample.
//! - Residuals are assumed mean-zero (they come from an OLS fit with an
//!   intercept); no centering is performed.
//!
//! Conventions
//! -----------
//! - The taper argument is `x = k/(L+1)` so that the weight stays positive
//!   at the maximum lag `k = L`.
//!
//! Testing notes
//! -------------
//! - Unit tests check the `L = 0` reduction to the residual variance, a
//!   hand-computed Bartlett example, truncation, and both bandwidth rules.
use crate::inference::{
    errors::{InferenceError, InferenceResult},
    kernel::KernelType,
};
use ndarray::{ArrayView1, s};
use std::cmp::min;

/// Kernel long-run variance of `resid` at truncation lag `bandwidth`.
///
/// Parameters
/// ----------
/// - `resid`: `ArrayView1<f64>`
///   Residual series of length `n ≥ 1`.
/// - `bandwidth`: `usize`
///   Requested truncation lag `L`; truncated to `n−1`.
/// - `kernel`: `KernelType`
///   Taper producing the per-lag weights.
///
/// Returns
/// -------
/// `InferenceResult<f64>`
///   The strictly positive estimate `σ̂²`.
///
/// Errors
/// ------
/// - `InferenceError::NonPositiveVariance` when the estimate is `≤ 0`
///   (e.g. all-zero residuals, or a non-Bartlett taper producing a negative
///   sum).
/// - `InferenceError::Overflow` when the weighted sum is not finite.
pub fn long_run_variance(
    resid: ArrayView1<f64>, bandwidth: usize, kernel: KernelType,
) -> InferenceResult<f64> {
    let n = resid.len();
    if n == 0 {
        return Err(InferenceError::NonPositiveVariance { value: 0.0 });
    }
    let bandwidth = min(bandwidth, n - 1);

    let mut s_hat = resid.dot(&resid);
    for lag in 1..=bandwidth {
        s_hat += 2.0 * kernel.lag_weight(lag, bandwidth) * autocovariance_sum(resid, lag);
    }
    let value = s_hat / n as f64;

    if !value.is_finite() {
        return Err(InferenceError::Overflow { quantity: "long-run variance" });
    }
    if value <= 0.0 {
        return Err(InferenceError::NonPositiveVariance { value });
    }
    Ok(value)
}

/// Hobijn–Franses–Ooms automatic bandwidth for a residual series.
///
/// Computes `s0` and `s1` from the first `⌊n^{2/9}⌋` autocovariances,
/// then `L = ⌊1.1447 · ((s1/s0)²)^{1/3} · n^{1/3}⌋`, truncated to `n−1`.
/// Returns 0 when `s0` is zero or the rule is not finite.
pub fn hobijn_bandwidth(resid: ArrayView1<f64>) -> usize {
    let n = resid.len();
    if n < 2 {
        return 0;
    }
    let nobs = n as f64;
    let covlags = min(nobs.powf(2.0 / 9.0) as usize, n - 1);

    let mut s0 = resid.dot(&resid) / nobs;
    let mut s1 = 0.0;
    for lag in 1..=covlags {
        let prod = autocovariance_sum(resid, lag) / (nobs / 2.0);
        s0 += prod;
        s1 += lag as f64 * prod;
    }
    if s0 == 0.0 {
        return 0;
    }

    let s_hat = s1 / s0;
    let gamma_hat = 1.1447 * (s_hat * s_hat).powf(1.0 / 3.0);
    let lags = gamma_hat * nobs.powf(1.0 / 3.0);
    if !lags.is_finite() {
        return 0;
    }
    min(lags as usize, n - 1)
}

/// Legacy Schwert-style bandwidth `⌈12 (n/100)^{1/4}⌉`, truncated to `n−1`.
pub fn legacy_bandwidth(n: usize) -> usize {
    let lags = (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize;
    min(lags, n.saturating_sub(1))
}

/// `Σ_{t=k}^{n−1} e_t e_{t−k}` for a lag `k < n`.
fn autocovariance_sum(resid: ArrayView1<f64>, lag: usize) -> f64 {
    let n = resid.len();
    resid.slice(s![lag..]).dot(&resid.slice(s![..n - lag]))
}
