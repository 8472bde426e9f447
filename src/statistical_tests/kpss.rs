//! statistical_tests::kpss — KPSS stationarity test.
//!
//! Purpose
//! -------
//! Test the null hypothesis that a series is stationary around a linear
//! trend (default) or around a constant, following Kwiatkowski, Phillips,
//! Schmidt & Shin (1992). The null is the *opposite* of ADF's, so the two
//! tests are read separately and may legitimately disagree.
//!
//! Key behaviors
//! -------------
//! - Residuals from OLS of `x` on `[1, t]` (trend) or from demeaning (level).
//! - η = Σ S_t² / n², with `S_t` the partial sums of residuals.
//! - Statistic η / σ̂², with σ̂² the kernel long-run variance of the
//!   residuals (`inference::long_run_variance`).
//! - p-value by linear interpolation in the KPSS table, clamped to
//!   `[0.01, 0.10]`; the clamp side is recorded as a [`PValueBound`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The truncation lag never exceeds `n − 1`.
//! - Zero residual or long-run variance (a constant series, or an exactly
//!   linear one under the trend null) is reported as `NumericalDegeneracy`.
//!
//! Conventions
//! -----------
//! - The verdict is `Stationary` iff `p ≥ α`.
//! - Critical values are labeled `"10%"`, `"5%"`, `"2.5%"`, `"1%"`.
use crate::{
    inference::{
        errors::InferenceError,
        long_run_variance::{hobijn_bandwidth, legacy_bandwidth, long_run_variance},
        ols::fit_ols,
    },
    statistical_tests::{
        errors::TrendResult,
        options::{KpssLags, KpssOptions, KpssRegression, SignificanceLevel},
        outcome::{CriticalValues, Verdict},
        validation::validate_input,
    },
};
use ndarray::{Array1, Array2};

const TEST: &str = "kpss";

const P_VALUES: [f64; 4] = [0.10, 0.05, 0.025, 0.01];
const CRIT_LABELS: [&str; 4] = ["10%", "5%", "2.5%", "1%"];
const CRIT_TREND: [f64; 4] = [0.119, 0.146, 0.176, 0.216];
const CRIT_LEVEL: [f64; 4] = [0.347, 0.463, 0.574, 0.739];

/// Side on which the interpolated p-value hit the edge of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PValueBound {
    /// Statistic below the 10% value; the true p-value is at least 0.10.
    AtLeast,
    /// Statistic above the 1% value; the true p-value is at most 0.01.
    AtMost,
}

/// KpssOutcome — result of a KPSS test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KpssOutcome {
    statistic: f64,
    p_value: f64,
    lags: usize,
    critical_values: CriticalValues,
    regression: KpssRegression,
    p_value_bound: Option<PValueBound>,
    stationary: bool,
}

impl KpssOutcome {
    /// Run the KPSS test on `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Ordered observations.
    /// - `opts`: `&KpssOptions`
    ///   Null hypothesis (level or trend), lag rule, and kernel.
    /// - `alpha`: `SignificanceLevel`
    ///   Level for the stationarity verdict.
    ///
    /// Returns
    /// -------
    /// `TrendResult<KpssOutcome>`
    ///
    /// Errors
    /// ------
    /// - Validation errors from `validate_input`.
    /// - `TrendError::InsufficientObservations` for n < 3 under the trend
    ///   null (no residual degrees of freedom).
    /// - `TrendError::NumericalDegeneracy` when the residuals or their
    ///   long-run variance vanish.
    ///
    /// Notes
    /// -----
    /// - `KpssLags::Fixed(L)` with `L ≥ n` is truncated to `n − 1`.
    pub fn kpss(data: &[f64], opts: &KpssOptions, alpha: SignificanceLevel) -> TrendResult<Self> {
        validate_input(data, TEST, 2)?;
        let n = data.len();

        let resid = residuals(data, opts.regression)?;
        if !resid.iter().all(|e| e.is_finite()) {
            return Err(InferenceError::Overflow { quantity: "residuals" }.within(TEST));
        }

        let lags = match opts.lags {
            KpssLags::Auto => hobijn_bandwidth(resid.view()),
            KpssLags::Legacy => legacy_bandwidth(n),
            KpssLags::Fixed(l) => l,
        }
        .min(n - 1);

        let mut partial = 0.0;
        let eta = resid
            .iter()
            .map(|e| {
                partial += e;
                partial * partial
            })
            .sum::<f64>()
            / (n * n) as f64;
        if !eta.is_finite() {
            return Err(InferenceError::Overflow { quantity: "partial-sum statistic" }.within(TEST));
        }
        let s_hat = long_run_variance(resid.view(), lags, opts.kernel).map_err(|e| e.within(TEST))?;
        let statistic = eta / s_hat;

        let crit = match opts.regression {
            KpssRegression::Trend => CRIT_TREND,
            KpssRegression::Level => CRIT_LEVEL,
        };
        let p_value = interpolate(statistic, &crit, &P_VALUES);
        let p_value_bound = if statistic < crit[0] {
            Some(PValueBound::AtLeast)
        } else if statistic > crit[3] {
            Some(PValueBound::AtMost)
        } else {
            None
        };
        if let Some(bound) = p_value_bound {
            log::debug!("kpss: statistic {statistic:.4} outside table, p-value is {bound:?} {p_value}");
        }

        let critical_values =
            CriticalValues::new(CRIT_LABELS.iter().copied().zip(crit.iter().copied()).collect());

        Ok(KpssOutcome {
            statistic,
            p_value,
            lags,
            critical_values,
            regression: opts.regression,
            p_value_bound,
            stationary: !alpha.rejects(p_value),
        })
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn lags(&self) -> usize {
        self.lags
    }

    pub fn critical_values(&self) -> &CriticalValues {
        &self.critical_values
    }

    pub fn regression(&self) -> KpssRegression {
        self.regression
    }

    pub fn p_value_bound(&self) -> Option<PValueBound> {
        self.p_value_bound
    }

    pub fn is_stationary(&self) -> bool {
        self.stationary
    }

    pub fn verdict(&self) -> Verdict {
        if self.stationary { Verdict::Stationary } else { Verdict::NonStationary }
    }

    /// "trend stationary", "not level stationary", etc.
    pub fn stationarity_label(&self) -> &'static str {
        match (self.regression, self.stationary) {
            (KpssRegression::Trend, true) => "trend stationary",
            (KpssRegression::Trend, false) => "not trend stationary",
            (KpssRegression::Level, true) => "level stationary",
            (KpssRegression::Level, false) => "not level stationary",
        }
    }
}

/// Residuals under the chosen null.
fn residuals(data: &[f64], regression: KpssRegression) -> TrendResult<Array1<f64>> {
    let x = Array1::from(data.to_vec());
    match regression {
        KpssRegression::Level => {
            let mean = x.mean().unwrap_or(0.0);
            Ok(x - mean)
        }
        KpssRegression::Trend => {
            let design =
                Array2::from_shape_fn((data.len(), 2), |(t, j)| if j == 0 { 1.0 } else { (t + 1) as f64 });
            let fit = fit_ols(&design, x.view()).map_err(|e| e.within(TEST))?;
            Ok(fit.resid)
        }
    }
}

/// Piecewise-linear interpolation with flat extrapolation; `xp` increasing.
fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let last = xp.len() - 1;
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[last] {
        return fp[last];
    }
    let k = xp.iter().position(|&v| v > x).unwrap_or(last);
    let w = (x - xp[k - 1]) / (xp[k] - xp[k - 1]);
    fp[k - 1] + w * (fp[k] - fp[k - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::kernel::KernelType;
    use crate::statistical_tests::errors::TrendError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Table interpolation and its clamp.
    // - A hand-computed statistic with zero lags.
    // - Verdicts on a trend-stationary series and on a random walk.
    // - Degeneracy on constant and exactly linear input.
    // -------------------------------------------------------------------------

    fn shocks(n: usize, seed: u64) -> Vec<f64> {
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                ((state >> 11) as f64 / (1u64 << 53) as f64) - 0.5
            })
            .collect()
    }

    #[test]
    // Purpose
    // -------
    // Check interpolation between and beyond table points.
    //
    // Given
    // -----
    // - The trend table and statistics 0.05, 0.1325, 0.3.
    //
    // Expect
    // ------
    // - 0.10 below the table, 0.075 halfway between 10% and 5%, 0.01 above.
    fn interpolate_matches_table_and_clamps() {
        assert_eq!(interpolate(0.05, &CRIT_TREND, &P_VALUES), 0.10);
        assert_relative_eq!(interpolate(0.1325, &CRIT_TREND, &P_VALUES), 0.075, epsilon = 1e-12);
        assert_eq!(interpolate(0.3, &CRIT_TREND, &P_VALUES), 0.01);
    }

    #[test]
    // Purpose
    // -------
    // Validate the level statistic against a hand computation.
    //
    // Given
    // -----
    // - x = [1, 3, 2, 4], level null, fixed lag 0.
    //
    // Expect
    // ------
    // - Residuals [−1.5, 0.5, −0.5, 1.5]; partial sums [−1.5, −1, −1.5, 0];
    //   η = 5.5/16; σ̂² = 5/4; statistic = 0.275; p clamped to 0.10.
    fn kpss_level_statistic_matches_manual_computation() {
        // Arrange
        let opts = KpssOptions::new(KpssRegression::Level, KpssLags::Fixed(0), KernelType::Bartlett);

        // Act
        let kpss = KpssOutcome::kpss(&[1.0, 3.0, 2.0, 4.0], &opts, SignificanceLevel::default()).unwrap();

        // Assert
        assert_relative_eq!(kpss.statistic(), 0.275, epsilon = 1e-12);
        assert_eq!(kpss.lags(), 0);
        assert_eq!(kpss.p_value(), 0.10);
        assert_eq!(kpss.p_value_bound(), Some(PValueBound::AtLeast));
        assert_eq!(kpss.stationarity_label(), "level stationary");
    }

    #[test]
    // Purpose
    // -------
    // Verify that noise around a linear trend is trend stationary.
    //
    // Given
    // -----
    // - x_t = 0.5 t + e_t with 150 deterministic shocks; default options.
    //
    // Expect
    // ------
    // - p ≥ 0.05, verdict `Stationary`, four labeled critical values.
    fn kpss_trend_plus_noise_is_trend_stationary() {
        // Arrange
        let e = shocks(150, 21);
        let x: Vec<f64> = e.iter().enumerate().map(|(t, v)| 0.5 * t as f64 + v).collect();

        // Act
        let kpss = KpssOutcome::kpss(&x, &KpssOptions::default(), SignificanceLevel::default()).unwrap();

        // Assert
        assert!(kpss.p_value() >= 0.05, "p = {}", kpss.p_value());
        assert_eq!(kpss.verdict(), Verdict::Stationary);
        assert_eq!(kpss.critical_values().get("2.5%"), Some(0.176));
        assert_eq!(kpss.critical_values().len(), 4);
    }

    #[test]
    // Purpose
    // -------
    // Verify that a random walk is rejected under the level null.
    //
    // Given
    // -----
    // - Cumulative sum of 300 shocks shifted to mean 0.3 (a drifting walk),
    //   level null, legacy lags.
    //
    // Expect
    // ------
    // - p < 0.05 and verdict `NonStationary`.
    fn kpss_drifting_random_walk_is_not_level_stationary() {
        // Arrange
        let x: Vec<f64> = shocks(300, 4)
            .iter()
            .scan(0.0, |acc, v| {
                *acc += v + 0.3;
                Some(*acc)
            })
            .collect();
        let opts = KpssOptions::new(KpssRegression::Level, KpssLags::Legacy, KernelType::Bartlett);

        // Act
        let kpss = KpssOutcome::kpss(&x, &opts, SignificanceLevel::default()).unwrap();

        // Assert
        assert!(kpss.p_value() < 0.05, "p = {}", kpss.p_value());
        assert_eq!(kpss.verdict(), Verdict::NonStationary);
        assert_eq!(kpss.stationarity_label(), "not level stationary");
    }

    #[test]
    // Purpose
    // -------
    // Ensure vanishing residuals are reported as degenerate.
    //
    // Given
    // -----
    // - A constant series (level null) and an exact line (trend null).
    //
    // Expect
    // ------
    // - Both return a degeneracy error.
    fn kpss_zero_residuals_are_degenerate() {
        // Arrange
        let level = KpssOptions::new(KpssRegression::Level, KpssLags::Auto, KernelType::Bartlett);
        let line: Vec<f64> = (0..20).map(|t| 1.0 + 2.0 * t as f64).collect();

        // Act
        let constant = KpssOutcome::kpss(&[4.0; 12], &level, SignificanceLevel::default());
        let linear = KpssOutcome::kpss(&line, &KpssOptions::default(), SignificanceLevel::default());

        // Assert
        assert!(matches!(constant, Err(TrendError::NumericalDegeneracy { test: "kpss", .. })));
        assert!(matches!(linear, Err(TrendError::NumericalDegeneracy { test: "kpss", .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check that an oversized fixed lag is truncated to n − 1.
    //
    // Given
    // -----
    // - Ten observations with `Fixed(50)`.
    //
    // Expect
    // ------
    // - lags = 9.
    fn kpss_fixed_lag_is_truncated() {
        let x = shocks(10, 9);
        let opts = KpssOptions::new(KpssRegression::Trend, KpssLags::Fixed(50), KernelType::Bartlett);

        let kpss = KpssOutcome::kpss(&x, &opts, SignificanceLevel::default()).unwrap();

        assert_eq!(kpss.lags(), 9);
    }

    #[test]
    // Purpose
    // -------
    // Validate each taper against a hand computation with one lag.
    //
    // Given
    // -----
    // - x = [1, 3, 2, 4], level null, `Fixed(1)`; residual sum of squares 5
    //   and lag-1 cross-product −1.75, η = 5.5/16.
    // - w(½) = ½ (Bartlett), ¼ (Parzen), 0.686931 (QS).
    //
    // Expect
    // ------
    // - σ̂² = (5 − 3.5·w)/4 and statistics 0.423077, 1/3 and 0.529714.
    fn kpss_statistic_reflects_selected_kernel() {
        let cases = [
            (KernelType::Bartlett, 0.423_076_923),
            (KernelType::Parzen, 1.0 / 3.0),
            (KernelType::QuadraticSpectral, 0.529_713_571),
        ];

        for (kernel, expected) in cases {
            let opts = KpssOptions::new(KpssRegression::Level, KpssLags::Fixed(1), kernel);

            let kpss = KpssOutcome::kpss(&[1.0, 3.0, 2.0, 4.0], &opts, SignificanceLevel::default())
                .unwrap();

            assert_relative_eq!(kpss.statistic(), expected, epsilon = 1e-8);
            assert_eq!(kpss.lags(), 1);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure overflowing input is reported as overflow rather than as a
    // vanishing variance.
    //
    // Given
    // -----
    // - Values of magnitude 1e200 (trend null) and 1e308 (level null).
    //
    // Expect
    // ------
    // - `NumericalDegeneracy` whose reason mentions overflow.
    fn kpss_overflowing_input_is_reported_as_overflow() {
        let large = [1e200, -2e200, 3e200, -1e200, 2e200, 1.5e200];
        let huge = [1e308, 1.5e308, -1e308, 1.7e308, 0.5e308, 1.2e308];
        let level = KpssOptions::new(KpssRegression::Level, KpssLags::Legacy, KernelType::Bartlett);

        let results = [
            KpssOutcome::kpss(&large, &KpssOptions::default(), SignificanceLevel::default()),
            KpssOutcome::kpss(&huge, &level, SignificanceLevel::default()),
        ];

        for result in results {
            match result {
                Err(TrendError::NumericalDegeneracy { test: "kpss", reason }) => {
                    assert!(reason.contains("overflow"), "{reason}");
                }
                other => panic!("expected an overflow degeneracy, got {other:?}"),
            }
        }
    }
}
