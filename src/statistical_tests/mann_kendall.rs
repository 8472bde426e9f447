//! statistical_tests::mann_kendall — nonparametric monotonic trend test.
//!
//! Purpose
//! -------
//! Implement the Mann-Kendall test for a monotonic trend in an ordered
//! series, with the tie-corrected variance of S, Kendall's tau against time,
//! and the Theil–Sen slope estimate that usually accompanies it.
//!
//! Key behaviors
//! -------------
//! - S = Σ_{i<j} sign(x_j − x_i).
//! - Var(S) = [n(n−1)(2n+5) − Σ_g t_g(t_g−1)(2t_g+5)] / 18 over groups of
//!   tied values.
//! - Continuity-corrected z = (S − sign(S)) / √Var(S), with z = 0 at S = 0,
//!   and the two-sided normal p-value.
//! - Sen's slope = median_{i<j} (x_j − x_i)/(j − i); intercept
//!   = median(x) − median(0..n) · slope.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 2 finite observations.
//! - A constant series is well defined: S = 0, Var(S) = 0, z = 0, p = 1.
//!
//! Conventions
//! -----------
//! - Time is the observation index; the trend label is `Increasing` iff
//!   z > 0 and p < α, `Decreasing` iff z < 0 and p < α.
//!
//! Testing notes
//! -------------
//! - Unit tests cover a strictly increasing series, a constant series, the
//!   tie correction, and the Sen's slope/intercept on a noisy line.
use crate::{
    inference::distributions::normal_two_sided_p,
    statistical_tests::{
        errors::TrendResult,
        options::SignificanceLevel,
        outcome::{TrendDirection, Verdict},
        validation::validate_input,
    },
};
use std::cmp::Ordering;

/// MannKendallOutcome — result of a Mann-Kendall trend test.
///
/// Fields
/// ------
/// - `s`: Mann-Kendall score S.
/// - `var_s`: tie-corrected variance of S.
/// - `z`: continuity-corrected normal score.
/// - `tau`: Kendall's tau against time, `S / (n(n−1)/2)`.
/// - `p_value`: two-sided normal p-value of `z`.
/// - `h`: `p_value < α`.
/// - `trend`: direction label derived from `z` and `h`.
/// - `sen_slope`, `intercept`: Theil–Sen line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MannKendallOutcome {
    s: f64,
    var_s: f64,
    z: f64,
    tau: f64,
    p_value: f64,
    h: bool,
    trend: TrendDirection,
    sen_slope: f64,
    intercept: f64,
}

impl MannKendallOutcome {
    /// Run the Mann-Kendall test on `data`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Ordered observations, n ≥ 2.
    /// - `alpha`: `SignificanceLevel`
    ///   Level against which `h` and the trend label are decided.
    ///
    /// Returns
    /// -------
    /// `TrendResult<MannKendallOutcome>`
    ///
    /// Errors
    /// ------
    /// - Validation errors from `validate_input` (empty, non-finite, n < 2).
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use trend_diagnostics::statistical_tests::{MannKendallOutcome, SignificanceLevel, TrendDirection};
    /// let mk = MannKendallOutcome::mann_kendall(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], SignificanceLevel::default()).unwrap();
    /// assert_eq!(mk.s(), 15.0);
    /// assert_eq!(mk.trend(), TrendDirection::Increasing);
    /// ```
    pub fn mann_kendall(data: &[f64], alpha: SignificanceLevel) -> TrendResult<Self> {
        validate_input(data, "mann_kendall", 2)?;
        let n = data.len();
        let nf = n as f64;

        let s = mk_score(data);
        let var_s = variance_s(data);
        let z = if s > 0.0 {
            (s - 1.0) / var_s.sqrt()
        } else if s < 0.0 {
            (s + 1.0) / var_s.sqrt()
        } else {
            0.0
        };
        let p_value = normal_two_sided_p(z);
        let h = alpha.rejects(p_value);
        let trend = match (h, z.partial_cmp(&0.0)) {
            (true, Some(Ordering::Greater)) => TrendDirection::Increasing,
            (true, Some(Ordering::Less)) => TrendDirection::Decreasing,
            _ => TrendDirection::NoTrend,
        };
        let tau = s / (0.5 * nf * (nf - 1.0));
        let (sen_slope, intercept) = sens_slope(data);

        Ok(MannKendallOutcome { s, var_s, z, tau, p_value, h, trend, sen_slope, intercept })
    }

    pub fn s(&self) -> f64 {
        self.s
    }

    pub fn var_s(&self) -> f64 {
        self.var_s
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn h(&self) -> bool {
        self.h
    }

    pub fn trend(&self) -> TrendDirection {
        self.trend
    }

    pub fn sen_slope(&self) -> f64 {
        self.sen_slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `Trend(direction)` when significant, `NoTrend` otherwise.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_direction(self.trend)
    }
}

fn mk_score(data: &[f64]) -> f64 {
    let mut s: i64 = 0;
    for (i, &xi) in data.iter().enumerate() {
        for &xj in &data[i + 1..] {
            s += match xj.partial_cmp(&xi) {
                Some(Ordering::Greater) => 1,
                Some(Ordering::Less) => -1,
                _ => 0,
            };
        }
    }
    s as f64
}

/// Tie-corrected variance of S.
fn variance_s(data: &[f64]) -> f64 {
    let nf = data.len() as f64;
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut tie_term = 0.0;
    for group in sorted.chunk_by(|a, b| a == b) {
        let t = group.len() as f64;
        if group.len() > 1 {
            tie_term += t * (t - 1.0) * (2.0 * t + 5.0);
        }
    }
    (nf * (nf - 1.0) * (2.0 * nf + 5.0) - tie_term) / 18.0
}

/// Theil–Sen slope and matching intercept.
fn sens_slope(data: &[f64]) -> (f64, f64) {
    let n = data.len();
    let mut slopes = Vec::with_capacity(n * (n - 1) / 2);
    for i in 0..n {
        for j in i + 1..n {
            slopes.push((data[j] - data[i]) / (j - i) as f64);
        }
    }
    let slope = median(&mut slopes);
    let time_median = (n as f64 - 1.0) / 2.0;
    let intercept = median(&mut data.to_vec()) - time_median * slope;
    (slope, intercept)
}

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let m = values.len();
    if m % 2 == 1 { values[m / 2] } else { 0.5 * (values[m / 2 - 1] + values[m / 2]) }
}
