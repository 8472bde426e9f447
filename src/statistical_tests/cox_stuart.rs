//! statistical_tests::cox_stuart — Cox-Stuart sign test for trend.
//!
//! Pairs each observation in the first half with its counterpart in the
//! second half (`x_i` with `x_{i+n−c}`, `c = ⌊n/2⌋`, dropping the middle
//! element when n is odd), counts increases and decreases, and tests the
//! count against Binomial(plus + minus, ½). Ties are excluded; a series
//! with every pair tied carries no information and is reported as
//! `NumericalDegeneracy`.
use crate::statistical_tests::{
    errors::{TrendError, TrendResult},
    options::SignificanceLevel,
    outcome::{TrendDirection, Verdict},
    validation::validate_input,
};
use statrs::distribution::{Binomial, DiscreteCDF};
use std::cmp::Ordering;

const TEST: &str = "cox_stuart";

/// CoxStuartOutcome — pair counts and binomial p-value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CoxStuartOutcome {
    plus: usize,
    minus: usize,
    ties: usize,
    pairs: usize,
    p_value: f64,
    direction: TrendDirection,
    significant: bool,
}

impl CoxStuartOutcome {
    /// Run the Cox-Stuart test on `data`.
    ///
    /// # Errors
    /// - Validation errors from `validate_input` (n ≥ 2 required).
    /// - `TrendError::NumericalDegeneracy` when every pair is tied.
    ///
    /// # Examples
    /// ```rust
    /// # use trend_diagnostics::statistical_tests::{CoxStuartOutcome, SignificanceLevel};
    /// let cs = CoxStuartOutcome::cox_stuart(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], SignificanceLevel::default()).unwrap();
    /// assert_eq!((cs.plus(), cs.minus(), cs.ties()), (3, 0, 0));
    /// assert!((cs.p_value() - 0.25).abs() < 1e-12);
    /// ```
    pub fn cox_stuart(data: &[f64], alpha: SignificanceLevel) -> TrendResult<Self> {
        validate_input(data, TEST, 2)?;
        let n = data.len();
        let pairs = n / 2;
        let (first, second) = (&data[..pairs], &data[n - pairs..]);

        let (mut plus, mut minus, mut ties) = (0usize, 0usize, 0usize);
        for (a, b) in first.iter().zip(second) {
            match b.partial_cmp(a) {
                Some(Ordering::Greater) => plus += 1,
                Some(Ordering::Less) => minus += 1,
                _ => ties += 1,
            }
        }

        let informative = plus + minus;
        if informative == 0 {
            return Err(TrendError::NumericalDegeneracy {
                test: TEST,
                reason: format!("all {pairs} pairs are tied"),
            });
        }

        let binom = Binomial::new(0.5, informative as u64)?;
        let k = plus.min(minus) as u64;
        let lower = binom.cdf(k);
        let upper = if k == 0 { 1.0 } else { 1.0 - binom.cdf(k - 1) };
        let p_value = (2.0 * lower.min(upper)).clamp(0.0, 1.0);

        let direction = match plus.cmp(&minus) {
            Ordering::Greater => TrendDirection::Increasing,
            Ordering::Less => TrendDirection::Decreasing,
            Ordering::Equal => TrendDirection::NoTrend,
        };

        Ok(CoxStuartOutcome {
            plus,
            minus,
            ties,
            pairs,
            p_value,
            direction,
            significant: alpha.rejects(p_value),
        })
    }

    pub fn plus(&self) -> usize {
        self.plus
    }

    pub fn minus(&self) -> usize {
        self.minus
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    /// Number of pairs compared, ties included.
    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Majority direction of the pairs, regardless of significance.
    pub fn direction(&self) -> TrendDirection {
        self.direction
    }

    pub fn is_significant(&self) -> bool {
        self.significant
    }

    pub fn verdict(&self) -> Verdict {
        if self.significant { Verdict::from_direction(self.direction) } else { Verdict::NoTrend }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Verify the even-length example.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4, 5, 6].
    //
    // Expect
    // ------
    // - plus 3, minus 0, ties 0, increasing, p = 2·0.125 = 0.25, not
    //   significant at 0.05.
    fn cox_stuart_even_length_example() {
        let cs = CoxStuartOutcome::cox_stuart(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], SignificanceLevel::default())
            .unwrap();

        assert_eq!((cs.plus(), cs.minus(), cs.ties(), cs.pairs()), (3, 0, 0, 3));
        assert_eq!(cs.direction(), TrendDirection::Increasing);
        assert_relative_eq!(cs.p_value(), 0.25, epsilon = 1e-12);
        assert_eq!(cs.verdict(), Verdict::NoTrend);
    }

    #[test]
    // Purpose
    // -------
    // Verify the middle element is dropped for odd n.
    //
    // Given
    // -----
    // - x = [1, 2, 3, 4, 5].
    //
    // Expect
    // ------
    // - Pairs (1,4), (2,5): plus 2, minus 0.
    fn cox_stuart_odd_length_drops_middle() {
        let cs =
            CoxStuartOutcome::cox_stuart(&[1.0, 2.0, 3.0, 4.0, 5.0], SignificanceLevel::default()).unwrap();

        assert_eq!((cs.plus(), cs.minus(), cs.pairs()), (2, 0, 2));
    }

    #[test]
    // Purpose
    // -------
    // Check that ties are excluded and a long decline is significant.
    //
    // Given
    // -----
    // - 20 values declining by one, with x_0 = x_10 forced equal.
    //
    // Expect
    // ------
    // - minus 9, ties 1, p = 2·0.5⁹ < 0.05, decreasing verdict.
    fn cox_stuart_excludes_ties_and_detects_decline() {
        let mut data: Vec<f64> = (0..20).map(|t| 20.0 - t as f64).collect();
        data[10] = data[0];

        let cs = CoxStuartOutcome::cox_stuart(&data, SignificanceLevel::default()).unwrap();

        assert_eq!((cs.plus(), cs.minus(), cs.ties()), (0, 9, 1));
        assert_relative_eq!(cs.p_value(), 2.0 * 0.5_f64.powi(9), epsilon = 1e-12);
        assert_eq!(cs.verdict(), Verdict::Trend(TrendDirection::Decreasing));
    }

    #[test]
    // Purpose
    // -------
    // Ensure a balanced split gives p capped at one.
    //
    // Given
    // -----
    // - x = [1, 2, 2, 1]: one increase, one decrease.
    //
    // Expect
    // ------
    // - p = 1, direction `NoTrend`.
    fn cox_stuart_balanced_pairs_cap_p_value_at_one() {
        let cs = CoxStuartOutcome::cox_stuart(&[1.0, 2.0, 2.0, 1.0], SignificanceLevel::default()).unwrap();

        assert_eq!(cs.p_value(), 1.0);
        assert_eq!(cs.direction(), TrendDirection::NoTrend);
    }

    #[test]
    // Purpose
    // -------
    // Ensure all-tied input is reported as degenerate.
    //
    // Given
    // -----
    // - A constant series of length 6.
    //
    // Expect
    // ------
    // - `NumericalDegeneracy` for "cox_stuart".
    fn cox_stuart_all_ties_is_degenerate() {
        let result = CoxStuartOutcome::cox_stuart(&[2.0; 6], SignificanceLevel::default());

        assert!(matches!(result, Err(TrendError::NumericalDegeneracy { test: "cox_stuart", .. })));
    }
}
