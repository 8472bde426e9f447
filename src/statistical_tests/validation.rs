//! statistical_tests::validation — shared input guards for the test battery.
//!
//! Purpose
//! -------
//! Centralize the checks every test performs before touching the data:
//! non-empty input, finite values, and the per-test minimum length implied
//! by its degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - Map invalid inputs into structured [`TrendError`] values so that each
//!   test fails the same way on the same bad input.
//! - Report the *first* offending element by index.
//!
//! Invariants & assumptions
//! ------------------------
//! - A successful [`validate_input`] guarantees `data.len() >= min_len` and
//!   that every value is finite.
//! - `min_len` is test-specific (e.g. 3 for linear regression, where
//!   `n − 2` residual degrees of freedom must be positive).
//!
//! Conventions
//! -----------
//! - Purely about validation; no allocation beyond error construction and
//!   no logging.
//! - Length is checked before finiteness so that the reported error for a
//!   too-short series does not depend on its contents.
//!
//! Testing notes
//! -------------
//! - Unit tests cover every error branch and a success path.

use crate::statistical_tests::errors::{TrendError, TrendResult};

/// Validate a series before running a single test.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Ordered observations.
/// - `test`: `&'static str`
///   Stable name of the calling test, embedded in length errors.
/// - `min_len`: `usize`
///   Minimum number of observations the test needs.
///
/// Returns
/// -------
/// `TrendResult<()>`
///   `Ok(())` if the series is non-empty, long enough, and finite.
///
/// Errors
/// ------
/// - `TrendError::EmptySeries` when `data` is empty.
/// - `TrendError::InsufficientObservations` when `data.len() < min_len`.
/// - `TrendError::InvalidElement` for the first non-finite value.
///
/// Examples
/// --------
/// ```rust
/// # use trend_diagnostics::statistical_tests::validation::validate_input;
/// # use trend_diagnostics::statistical_tests::errors::TrendError;
/// assert!(validate_input(&[1.0, 2.0, 3.0], "spearman", 3).is_ok());
/// assert!(matches!(
///     validate_input(&[1.0, 2.0], "spearman", 3),
///     Err(TrendError::InsufficientObservations { required: 3, actual: 2, .. })
/// ));
/// ```
pub fn validate_input(data: &[f64], test: &'static str, min_len: usize) -> TrendResult<()> {
    if data.is_empty() {
        return Err(TrendError::EmptySeries);
    }

    if data.len() < min_len {
        return Err(TrendError::InsufficientObservations {
            test,
            required: min_len,
            actual: data.len(),
        });
    }

    if let Some(index) = data.iter().position(|v| !v.is_finite()) {
        return Err(TrendError::InvalidElement { index, reason: "value is NaN or infinite" });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Successful validation of a well-formed series.
    // - Each error branch: empty input, too-short input, non-finite value.
    //
    // They intentionally DO NOT cover:
    // - Conversion of heterogeneous inputs into `f64`, handled by
    //   `series::observation`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a finite series meeting the minimum length passes.
    //
    // Given
    // -----
    // - A finite series of length 3 and min_len = 3.
    //
    // Expect
    // ------
    // - `validate_input` returns `Ok(())`.
    fn validate_input_valid_series_succeeds() {
        // Arrange
        let data = vec![0.1_f64, -0.2, 0.3];

        // Act
        let result = validate_input(&data, "linear_regression", 3);

        // Assert
        assert!(result.is_ok(), "Expected Ok(()) for valid inputs, got {result:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that an empty series is rejected with `EmptySeries` even when
    // the minimum length would also be violated.
    //
    // Given
    // -----
    // - An empty series and min_len = 2.
    //
    // Expect
    // ------
    // - `Err(TrendError::EmptySeries)`.
    fn validate_input_empty_series_returns_empty_series() {
        // Arrange
        let data: Vec<f64> = Vec::new();

        // Act
        let result = validate_input(&data, "mann_kendall", 2);

        // Assert
        assert_eq!(result, Err(TrendError::EmptySeries));
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a series shorter than `min_len` reports both counts.
    //
    // Given
    // -----
    // - A series of length 2 and min_len = 3.
    //
    // Expect
    // ------
    // - `Err(InsufficientObservations { required: 3, actual: 2 })`.
    fn validate_input_short_series_returns_insufficient_observations() {
        // Arrange
        let data = vec![1.0_f64, 2.0];

        // Act
        let result = validate_input(&data, "linear_regression", 3);

        // Assert
        match result {
            Err(TrendError::InsufficientObservations { test, required, actual }) => {
                assert_eq!(test, "linear_regression");
                assert_eq!(required, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected InsufficientObservations, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the first non-finite value is reported by index.
    //
    // Given
    // -----
    // - A series with an infinity at index 1 and NaN at index 2.
    //
    // Expect
    // ------
    // - `Err(InvalidElement { index: 1, .. })`.
    fn validate_input_non_finite_value_returns_invalid_element() {
        // Arrange
        let data = vec![0.1_f64, f64::INFINITY, f64::NAN, 0.3];

        // Act
        let result = validate_input(&data, "kpss", 2);

        // Assert
        match result {
            Err(TrendError::InvalidElement { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidElement, got {other:?}"),
        }
    }
}
