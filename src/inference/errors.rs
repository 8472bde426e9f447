//! Unified error handling for the numerical layer.
//!
//! This module defines `InferenceError`, the error type shared by the OLS
//! solver, long-run variance estimation, and the distribution helpers used by
//! the trend tests. The variants describe *why* a computation has no answer
//! (too few degrees of freedom, collinear regressors, a perfect fit) without
//! knowing which test asked. [`InferenceError::within`] attaches that context
//! at the test boundary. An alias `InferenceResult<T>` standardizes the return
//! type across inference code.

use crate::statistical_tests::errors::TrendError;
use statrs::distribution::StudentsTError;

/// Unified error type for inference routines.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Regression ----
    /// Fewer observations than regressors (`n ≤ k`).
    InsufficientDof { nobs: usize, nparams: usize },

    /// Cholesky factorization of `XᵀX` failed or hit a near-zero pivot.
    SingularDesign,

    /// Residual sum of squares is zero relative to the data scale.
    ZeroResidualVariance,

    /// An intermediate sum overflowed `f64`.
    Overflow { quantity: &'static str },

    // ---- Long-run variance ----
    /// Long-run variance estimate is zero or negative.
    NonPositiveVariance { value: f64 },

    // ---- statrs ----
    InvalidDistribution(String),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl InferenceError {
    /// Re-tag a numerical failure as a degeneracy of the named test.
    ///
    /// `InsufficientDof` becomes `InsufficientObservations` (one extra
    /// observation beyond the parameter count is needed); everything else
    /// becomes `NumericalDegeneracy` carrying this error's message.
    pub fn within(self, test: &'static str) -> TrendError {
        match self {
            InferenceError::InsufficientDof { nobs, nparams } => {
                TrendError::InsufficientObservations { test, required: nparams + 1, actual: nobs }
            }
            InferenceError::InvalidDistribution(reason) => {
                TrendError::InvalidDistribution { reason }
            }
            other => TrendError::NumericalDegeneracy { test, reason: other.to_string() },
        }
    }
}

impl From<StudentsTError> for InferenceError {
    fn from(err: StudentsTError) -> Self {
        InferenceError::InvalidDistribution(err.to_string())
    }
}

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Regression ----
            InferenceError::InsufficientDof { nobs, nparams } => write!(
                f,
                "{nobs} observations leave no residual degrees of freedom for {nparams} regressors"
            ),
            InferenceError::SingularDesign => write!(f, "design matrix is singular"),
            InferenceError::ZeroResidualVariance => write!(f, "residual variance is zero"),
            InferenceError::Overflow { quantity } => {
                write!(f, "{quantity} overflowed; the data are too large in magnitude")
            }

            // ---- Long-run variance ----
            InferenceError::NonPositiveVariance { value } => {
                write!(f, "long-run variance is not positive ({value})")
            }

            // ---- statrs ----
            InferenceError::InvalidDistribution(msg) => write!(f, "{msg}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The mapping performed by `within` at the test boundary.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that a degrees-of-freedom failure maps to an observation-count
    // error for the named test.
    //
    // Given
    // -----
    // - `InsufficientDof { nobs: 3, nparams: 3 }` raised inside "adf".
    //
    // Expect
    // ------
    // - `InsufficientObservations { test: "adf", required: 4, actual: 3 }`.
    fn within_maps_insufficient_dof_to_insufficient_observations() {
        // Arrange
        let err = InferenceError::InsufficientDof { nobs: 3, nparams: 3 };

        // Act
        let mapped = err.within("adf");

        // Assert
        assert_eq!(
            mapped,
            TrendError::InsufficientObservations { test: "adf", required: 4, actual: 3 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify that numerical failures become degeneracies with the message
    // preserved.
    //
    // Given
    // -----
    // - `SingularDesign` raised inside "kpss".
    //
    // Expect
    // ------
    // - `NumericalDegeneracy` naming "kpss" whose reason mentions "singular".
    fn within_maps_singular_design_to_numerical_degeneracy() {
        // Act
        let mapped = InferenceError::SingularDesign.within("kpss");

        // Assert
        match mapped {
            TrendError::NumericalDegeneracy { test, reason } => {
                assert_eq!(test, "kpss");
                assert!(reason.contains("singular"), "Got: {reason}");
            }
            other => panic!("expected NumericalDegeneracy, got {other:?}"),
        }
    }
}
