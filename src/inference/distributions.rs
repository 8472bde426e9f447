//! Reference-distribution helpers shared by the test battery.
//!
//! Thin wrappers around `statrs` that return two-sided p-values clamped to
//! `[0, 1]` and Student-t quantiles for confidence intervals.
use crate::inference::errors::InferenceResult;
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

/// Standard normal CDF `Φ(x)`.
pub fn normal_cdf(x: f64) -> f64 {
    Normal::standard().cdf(x)
}

/// Two-sided normal p-value `2 (1 − Φ(|z|))`.
pub fn normal_two_sided_p(z: f64) -> f64 {
    (2.0 * Normal::standard().sf(z.abs())).clamp(0.0, 1.0)
}

/// Two-sided Student-t p-value `2 (1 − F_df(|t|))`.
///
/// # Errors
/// `InvalidDistribution` if `df` is not strictly positive.
pub fn students_t_two_sided_p(t: f64, df: f64) -> InferenceResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)?;
    Ok((2.0 * dist.sf(t.abs())).clamp(0.0, 1.0))
}

/// Quantile `F_df⁻¹(prob)` of the standard Student-t distribution.
///
/// # Errors
/// `InvalidDistribution` if `df` is not strictly positive.
pub fn students_t_quantile(prob: f64, df: f64) -> InferenceResult<f64> {
    let dist = StudentsT::new(0.0, 1.0, df)?;
    Ok(dist.inverse_cdf(prob))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Sanity-check the normal helpers at textbook values.
    //
    // Given
    // -----
    // - z = 0 and z = 1.959964.
    //
    // Expect
    // ------
    // - p = 1 at zero and p ≈ 0.05 at the 97.5% quantile.
    fn normal_two_sided_p_matches_textbook_values() {
        assert_relative_eq!(normal_two_sided_p(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normal_two_sided_p(1.959964), 0.05, epsilon = 1e-6);
        assert_relative_eq!(normal_two_sided_p(-1.959964), 0.05, epsilon = 1e-6);
        assert_relative_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check the Student-t quantile and p-value against table values.
    //
    // Given
    // -----
    // - df = 10; t_{0.975, 10} = 2.228139.
    //
    // Expect
    // ------
    // - The quantile matches the table and maps back to p ≈ 0.05.
    fn students_t_quantile_and_p_value_are_consistent() {
        let q = students_t_quantile(0.975, 10.0).unwrap();

        assert_relative_eq!(q, 2.228139, epsilon = 1e-5);
        assert_relative_eq!(students_t_two_sided_p(q, 10.0).unwrap(), 0.05, epsilon = 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid degrees of freedom surface as errors.
    //
    // Given
    // -----
    // - df = 0.
    //
    // Expect
    // ------
    // - `Err(..)` from both helpers.
    fn students_t_helpers_reject_zero_df() {
        assert!(students_t_two_sided_p(1.0, 0.0).is_err());
        assert!(students_t_quantile(0.975, 0.0).is_err());
    }
}
