//! statistical_tests::adf — Augmented Dickey-Fuller unit-root test.
//!
//! Purpose
//! -------
//! Test the null hypothesis that a series has a unit root against the
//! alternative of (trend-)stationarity, using the augmented regression
//!
//! ```text
//! Δx_{t+1} = γ x_t + Σ_{j=1}^{k} φ_j Δx_{t+1−j} + deterministic terms + e_t
//! ```
//!
//! and the t-ratio of `γ` as the test statistic.
//!
//! Key behaviors
//! -------------
//! - Maximum lag by the Schwert rule `⌈12 (n/100)^{1/4}⌉`, capped at
//!   `⌊n/2⌋ − n_trend − 1`.
//! - Lag selection by minimum AIC (or BIC) over `0..=maxlag`, every candidate
//!   fit on the common sample implied by `maxlag`; ties go to the smaller
//!   lag. The chosen lag is then refit on its own, longer sample.
//! - p-value from the MacKinnon (1994) response surface and 1/5/10%
//!   critical values from MacKinnon (2010), adjusted for the number of
//!   regression rows.
//!
//! Invariants & assumptions
//! ------------------------
//! - A negative lag cap means the sample cannot support the regression and
//!   is reported as `InsufficientObservations`.
//! - Candidate fits that are singular or exact are skipped during the lag
//!   search; a failing final fit is reported as `NumericalDegeneracy`.
//!
//! Conventions
//! -----------
//! - The verdict is `Stationary` iff `p < α` (unit root rejected).
//! - Column 0 of every design is the lagged level, so its t-ratio is the
//!   statistic regardless of the deterministic terms.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the lag cap, the sample-size guard, a stationary
//!   AR(1), an explosive AR(1), and fixed-lag mode.
use crate::{
    inference::{
        errors::InferenceError,
        mackinnon::{mackinnon_critical_values, mackinnon_p_value},
        ols::{OlsFit, fit_ols},
    },
    statistical_tests::{
        errors::{TrendError, TrendResult},
        options::{AdfOptions, AdfRegression, InformationCriterion, SignificanceLevel},
        outcome::{CriticalValues, Verdict},
        validation::validate_input,
    },
};
use ndarray::{Array1, Array2};

const TEST: &str = "adf";

/// AdfOutcome — result of an Augmented Dickey-Fuller test.
///
/// Fields
/// ------
/// - `statistic`: t-ratio of the lagged level.
/// - `p_value`: MacKinnon approximate p-value.
/// - `used_lag`: number of lagged differences in the final regression.
/// - `nobs`: rows of the final regression.
/// - `critical_values`: `"1%"`, `"5%"`, `"10%"`.
/// - `icbest`: minimum information criterion reached by the lag search,
///   `None` in fixed-lag mode.
/// - `regression`: deterministic terms used.
/// - `stationary`: `p_value < α`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdfOutcome {
    statistic: f64,
    p_value: f64,
    used_lag: usize,
    nobs: usize,
    critical_values: CriticalValues,
    icbest: Option<f64>,
    regression: AdfRegression,
    stationary: bool,
}

impl AdfOutcome {
    /// Run the ADF test on `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Ordered observations.
    /// - `opts`: `&AdfOptions`
    ///   Deterministic terms, lag-search criterion and optional lag cap.
    /// - `alpha`: `SignificanceLevel`
    ///   Level for the stationarity verdict.
    ///
    /// Returns
    /// -------
    /// `TrendResult<AdfOutcome>`
    ///
    /// Errors
    /// ------
    /// - Validation errors from `validate_input`.
    /// - `TrendError::InsufficientObservations` when
    ///   `⌊n/2⌋ − n_trend − 1 < 0`, or when `opts.max_lag` exceeds that cap.
    /// - `TrendError::NumericalDegeneracy` when the final regression is
    ///   singular or fits exactly (e.g. a perfectly linear series).
    pub fn adf(data: &[f64], opts: &AdfOptions, alpha: SignificanceLevel) -> TrendResult<Self> {
        validate_input(data, TEST, 2)?;
        let n = data.len();
        let ntrend = opts.regression.ntrend();
        let cap = (n / 2) as isize - ntrend as isize - 1;
        if cap < 0 {
            return Err(TrendError::InsufficientObservations {
                test: TEST,
                required: 2 * (ntrend + 1),
                actual: n,
            });
        }
        let cap = cap as usize;

        let maxlag = match opts.max_lag {
            Some(requested) if requested > cap => {
                return Err(TrendError::InsufficientObservations {
                    test: TEST,
                    required: 2 * (requested + ntrend + 1),
                    actual: n,
                });
            }
            Some(requested) => requested,
            None => schwert_max_lag(n).min(cap),
        };

        let xdiff: Vec<f64> = data.windows(2).map(|w| w[1] - w[0]).collect();

        let (used_lag, icbest) = match opts.autolag {
            Some(criterion) => {
                let (bestlag, icbest) =
                    select_lag(data, &xdiff, maxlag, opts.regression, criterion)?;
                (bestlag, Some(icbest))
            }
            None => (maxlag, None),
        };

        let (design, y) = adf_design(data, &xdiff, used_lag, used_lag, opts.regression);
        let fit = fit_ols(&design, y.view()).map_err(|e| e.within(TEST))?;

        let statistic = fit.t_value(0);
        let p_value = mackinnon_p_value(statistic, opts.regression);
        let critical_values =
            CriticalValues::new(mackinnon_critical_values(opts.regression, fit.nobs).to_vec());

        log::debug!(
            "adf: regression={} lag={used_lag} nobs={} stat={statistic:.4} p={p_value:.4}",
            opts.regression.code(),
            fit.nobs
        );

        Ok(AdfOutcome {
            statistic,
            p_value,
            used_lag,
            nobs: fit.nobs,
            critical_values,
            icbest,
            regression: opts.regression,
            stationary: alpha.rejects(p_value),
        })
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn used_lag(&self) -> usize {
        self.used_lag
    }

    pub fn nobs(&self) -> usize {
        self.nobs
    }

    pub fn critical_values(&self) -> &CriticalValues {
        &self.critical_values
    }

    pub fn icbest(&self) -> Option<f64> {
        self.icbest
    }

    pub fn regression(&self) -> AdfRegression {
        self.regression
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn verdict(&self) -> Verdict {
        if self.stationary { Verdict::Stationary } else { Verdict::NonStationary }
    }
}

/// `⌈12 (n/100)^{1/4}⌉`.
fn schwert_max_lag(n: usize) -> usize {
    (12.0 * (n as f64 / 100.0).powf(0.25)).ceil() as usize
}

/// Minimum-criterion lag over `0..=maxlag` on the common sample.
///
/// Returns `(bestlag, icbest)`. Candidates whose fit fails or whose
/// criterion is not finite are skipped; if none survive, the first error
/// is reported.
fn select_lag(
    data: &[f64], xdiff: &[f64], maxlag: usize, regression: AdfRegression,
    criterion: InformationCriterion,
) -> TrendResult<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    let mut first_error: Option<InferenceError> = None;

    for lag in 0..=maxlag {
        let (design, y) = adf_design(data, xdiff, lag, maxlag, regression);
        let fit = match fit_ols(&design, y.view()) {
            Ok(fit) => fit,
            Err(err) => {
                log::trace!("adf: lag {lag} skipped during search: {err}");
                first_error.get_or_insert(err);
                continue;
            }
        };
        let ic = information_criterion(&fit, criterion);
        if !ic.is_finite() {
            continue;
        }
        let improves = match best {
            Some((_, current)) => ic < current,
            None => true,
        };
        if improves {
            best = Some((lag, ic));
        }
    }

    match (best, first_error) {
        (Some(found), _) => Ok(found),
        (None, Some(err)) => Err(err.within(TEST)),
        (None, None) => Err(TrendError::NumericalDegeneracy {
            test: TEST,
            reason: "no candidate lag produced a finite information criterion".to_string(),
        }),
    }
}

fn information_criterion(fit: &OlsFit, criterion: InformationCriterion) -> f64 {
    match criterion {
        InformationCriterion::Aic => fit.aic,
        InformationCriterion::Bic => fit.bic,
    }
}

/// Build the ADF regression for `lags` lagged differences.
///
/// Rows run over `i ∈ start..xdiff.len()` with response `xdiff[i]`.
/// Columns: `x[i]`, then `xdiff[i−1], …, xdiff[i−lags]`, then the
/// constant and trend `1, 2, …` as requested. `start ≥ lags` must hold.
fn adf_design(
    data: &[f64], xdiff: &[f64], lags: usize, start: usize, regression: AdfRegression,
) -> (Array2<f64>, Array1<f64>) {
    let rows = xdiff.len() - start;
    let cols = 1 + lags + regression.ntrend();
    let design = Array2::from_shape_fn((rows, cols), |(r, c)| {
        let i = start + r;
        match c {
            0 => data[i],
            c if c <= lags => xdiff[i - c],
            c if c == lags + 1 => 1.0,
            _ => (r + 1) as f64,
        }
    });
    let y = Array1::from_iter(xdiff[start..].iter().copied());
    (design, y)
}
