//! statistical_tests::linear_regression — OLS trend on the time index.
//!
//! Purpose
//! -------
//! Regress the series on `t = 0, …, n−1` and test the slope against zero
//! with the Student-t distribution on `n − 2` degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - Slope and intercept from population (bias = 1) second moments.
//! - Pearson r (set to 0 when the response is constant, clamped to
//!   `[−1, 1]` otherwise), R² = r².
//! - t = r √((n−2)/((1−r)(1+r))); two-sided p-value; `|r| = 1` gives p = 0.
//! - Standard errors of slope and intercept, and a two-sided confidence
//!   interval `slope ± t_{(1+c)/2, n−2} · se`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 3; n = 2 fits exactly and has no residual degrees of
//!   freedom.
//! - The regressor always varies, so a constant series is well defined:
//!   slope 0, r 0, p 1, se 0.
use crate::{
    inference::{
        distributions::{students_t_quantile, students_t_two_sided_p},
        errors::InferenceError,
    },
    statistical_tests::{
        errors::TrendResult,
        options::{ConfidenceLevel, SignificanceLevel},
        outcome::{TrendDirection, Verdict},
        validation::validate_input,
    },
};

const TEST: &str = "linear_regression";

/// Guard against division by zero in the t-ratio for |r| → 1.
const TINY: f64 = 1.0e-20;

/// LinearRegressionOutcome — OLS trend of value on time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinearRegressionOutcome {
    slope: f64,
    intercept: f64,
    r: f64,
    t_statistic: f64,
    p_value: f64,
    std_err: f64,
    intercept_stderr: f64,
    confidence: f64,
    confidence_interval: (f64, f64),
    significant: bool,
}

impl LinearRegressionOutcome {
    /// Fit the time trend of `data` and test its slope.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Ordered observations, n ≥ 3.
    /// - `alpha`: `SignificanceLevel`
    ///   Level for the significance flag.
    /// - `confidence`: `ConfidenceLevel`
    ///   Coverage of the slope interval.
    ///
    /// Returns
    /// -------
    /// `TrendResult<LinearRegressionOutcome>`
    ///
    /// Errors
    /// ------
    /// - `TrendError::InsufficientObservations` for n ≤ 2.
    /// - `TrendError::NumericalDegeneracy` when the moments overflow `f64`.
    /// - Other validation errors from `validate_input`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use trend_diagnostics::statistical_tests::{LinearRegressionOutcome, SignificanceLevel, ConfidenceLevel};
    /// let lr = LinearRegressionOutcome::linear_regression(
    ///     &[1.0, 3.0, 2.0, 5.0, 4.0],
    ///     SignificanceLevel::default(),
    ///     ConfidenceLevel::default(),
    /// ).unwrap();
    /// assert!((lr.slope() - 0.8).abs() < 1e-12);
    /// ```
    pub fn linear_regression(
        data: &[f64], alpha: SignificanceLevel, confidence: ConfidenceLevel,
    ) -> TrendResult<Self> {
        validate_input(data, TEST, 3)?;
        let n = data.len();
        let nf = n as f64;

        let xmean = (nf - 1.0) / 2.0;
        let ymean = data.iter().sum::<f64>() / nf;
        let (mut ssxm, mut ssxym, mut ssym) = (0.0, 0.0, 0.0);
        for (t, &y) in data.iter().enumerate() {
            let dx = t as f64 - xmean;
            let dy = y - ymean;
            ssxm += dx * dx;
            ssxym += dx * dy;
            ssym += dy * dy;
        }
        ssxm /= nf;
        ssxym /= nf;
        ssym /= nf;

        let slope = ssxym / ssxm;
        let intercept = ymean - slope * xmean;
        let r_den = (ssxm * ssym).sqrt();
        if ![ymean, ssxym, ssym, slope, intercept, r_den].iter().all(|v| v.is_finite()) {
            return Err(InferenceError::Overflow { quantity: "sums of squares" }.within(TEST));
        }
        let r = if r_den == 0.0 { 0.0 } else { (ssxym / r_den).clamp(-1.0, 1.0) };

        let df = nf - 2.0;
        let t_statistic = r * (df / ((1.0 - r + TINY) * (1.0 + r + TINY))).sqrt();
        if !t_statistic.is_finite() {
            return Err(InferenceError::Overflow { quantity: "t statistic" }.within(TEST));
        }
        let p_value = if r.abs() == 1.0 {
            0.0
        } else {
            students_t_two_sided_p(t_statistic, df).map_err(|e| e.within(TEST))?
        };

        let std_err = ((1.0 - r * r).max(0.0) * ssym / ssxm / df).sqrt();
        let intercept_stderr = std_err * (ssxm + xmean * xmean).sqrt();
        if !intercept_stderr.is_finite() {
            return Err(InferenceError::Overflow { quantity: "standard error" }.within(TEST));
        }

        let quantile =
            students_t_quantile(confidence.upper_quantile(), df).map_err(|e| e.within(TEST))?;
        let half_width = quantile * std_err;
        let confidence_interval = (slope - half_width, slope + half_width);

        Ok(LinearRegressionOutcome {
            slope,
            intercept,
            r,
            t_statistic,
            p_value,
            std_err,
            intercept_stderr,
            confidence: confidence.value(),
            confidence_interval,
            significant: alpha.rejects(p_value),
        })
    }

    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Pearson correlation between value and time.
    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn r_squared(&self) -> f64 {
        self.r * self.r
    }

    pub fn t_statistic(&self) -> f64 {
        self.t_statistic
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Standard error of the slope.
    pub fn std_err(&self) -> f64 {
        self.std_err
    }

    pub fn intercept_stderr(&self) -> f64 {
        self.intercept_stderr
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn confidence_interval(&self) -> (f64, f64) {
        self.confidence_interval
    }

    pub fn is_significant(&self) -> bool {
        self.significant
    }

    /// Sign of the slope when significant, `NoTrend` otherwise.
    pub fn direction(&self) -> TrendDirection {
        if self.significant { TrendDirection::from_sign(self.slope) } else { TrendDirection::NoTrend }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_direction(self.direction())
    }
}
