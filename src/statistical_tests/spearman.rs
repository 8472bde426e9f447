//! statistical_tests::spearman — Spearman rank correlation with time.
//!
//! Purpose
//! -------
//! Measure monotonic association between the series and its time index by
//! the Pearson correlation of their ranks, and test it with the Student-t
//! approximation on `n − 2` degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - Tied values receive the average of the ranks they span.
//! - rho is clamped to `[−1, 1]` against rounding.
//! - `|rho| = 1` gives p = 0 without evaluating the t distribution.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires n ≥ 3.
//! - A constant series has zero rank variance; the correlation is undefined
//!   and reported as `NumericalDegeneracy`.
use crate::{
    inference::distributions::students_t_two_sided_p,
    statistical_tests::{
        errors::{TrendError, TrendResult},
        options::SignificanceLevel,
        outcome::{TrendDirection, Verdict},
        validation::validate_input,
    },
};

const TEST: &str = "spearman";

/// SpearmanOutcome — rank correlation between value and time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpearmanOutcome {
    rho: f64,
    p_value: f64,
    significant: bool,
}

impl SpearmanOutcome {
    /// Run the Spearman test on `data`.
    ///
    /// # Errors
    /// - `TrendError::InsufficientObservations` for n ≤ 2.
    /// - `TrendError::NumericalDegeneracy` for a constant series.
    pub fn spearman(data: &[f64], alpha: SignificanceLevel) -> TrendResult<Self> {
        validate_input(data, TEST, 3)?;
        let n = data.len();
        let nf = n as f64;

        let ranks = average_ranks(data);
        // Time ranks are 1..=n with mean (n+1)/2, matching the value ranks.
        let mean = (nf + 1.0) / 2.0;
        let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
        for (t, &r) in ranks.iter().enumerate() {
            let dx = (t + 1) as f64 - mean;
            let dy = r - mean;
            sxy += dx * dy;
            sxx += dx * dx;
            syy += dy * dy;
        }
        if syy == 0.0 {
            return Err(TrendError::NumericalDegeneracy {
                test: TEST,
                reason: "series is constant, rank correlation is undefined".to_string(),
            });
        }

        let rho = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);
        let p_value = if rho.abs() == 1.0 {
            0.0
        } else {
            let df = nf - 2.0;
            let t = rho * (df / ((1.0 + rho) * (1.0 - rho))).sqrt();
            students_t_two_sided_p(t, df).map_err(|e| e.within(TEST))?
        };

        Ok(SpearmanOutcome { rho, p_value, significant: alpha.rejects(p_value) })
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn is_significant(&self) -> bool {
        self.significant
    }

    /// Sign of rho when significant, `NoTrend` otherwise.
    pub fn direction(&self) -> TrendDirection {
        if self.significant { TrendDirection::from_sign(self.rho) } else { TrendDirection::NoTrend }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_direction(self.direction())
    }
}

/// 1-based ranks with ties assigned their average rank.
fn average_ranks(data: &[f64]) -> Vec<f64> {
    let n = data.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| data[a].total_cmp(&data[b]));

    let mut ranks = vec![0.0; n];
    let mut start = 0;
    while start < n {
        let mut end = start + 1;
        while end < n && data[order[end]] == data[order[start]] {
            end += 1;
        }
        // Positions start..end hold ranks start+1..=end.
        let avg = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg;
        }
        start = end;
    }
    ranks
}
