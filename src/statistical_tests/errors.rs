//! statistical_tests::errors — shared error type for the trend test battery.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by series validation, every
//! trend/stationarity test, and the option builders. Failures stay local to a
//! single test: the suite turns them into degenerate outcomes instead of
//! aborting the whole analysis.
//!
//! Key behaviors
//! -------------
//! - Define [`TrendResult`] and [`TrendError`] as the canonical result and
//!   error types for this crate.
//! - Attach human-readable `Display` messages to each variant so logs and
//!   formatted reports are meaningful without extra context.
//! - Convert `statrs` distribution construction errors into
//!   [`TrendError::InvalidDistribution`].
//! - Implement `From<TrendError> for PyErr` when the `python-bindings`
//!   feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - Validation-time errors (`EmptySeries`, `InvalidElement`) are fatal for
//!   the analysis call that produced them and never reach a test outcome.
//! - `InsufficientObservations` and `NumericalDegeneracy` are the only
//!   variants a test is expected to produce on valid, finite input.
//! - Values are small and cloneable so they can be stored inside reports.
//!
//! Conventions
//! -----------
//! - `test` payloads hold the stable snake_case test name
//!   (e.g. `"linear_regression"`), or `"series"` for validation failures.
//! - Messages are phrased in terms of domain constraints ("needs at least 3
//!   observations") rather than low-level details.
//!
//! Testing notes
//! -------------
//! - Unit tests verify payload embedding in `Display` messages. The PyO3
//!   conversion is left to Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};
use statrs::distribution::{BinomialError, StudentsTError};

pub type TrendResult<T> = Result<T, TrendError>;

/// TrendError — validation, degeneracy, and configuration failures.
///
/// Variants
/// --------
/// - `EmptySeries`
///   The input sequence contained no elements.
/// - `InvalidElement { index, reason }`
///   The element at `index` is not a finite number (unparseable text,
///   missing value, NaN or ±∞).
/// - `InsufficientObservations { test, required, actual }`
///   The series is too short for the degrees-of-freedom requirement of
///   `test`.
/// - `NumericalDegeneracy { test, reason }`
///   The statistic of `test` is undefined for this input (zero variance,
///   singular design, no informative pairs).
/// - `InvalidSignificanceLevel { alpha }` / `InvalidConfidenceLevel { level }`
///   A probability option is outside the open interval (0, 1).
/// - `InvalidOption { name, reason }`
///   A string option could not be parsed into its enum.
/// - `InvalidDistribution { reason }`
///   A `statrs` distribution rejected its parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrendError {
    // ---- Input validation ----
    EmptySeries,
    InvalidElement { index: usize, reason: &'static str },
    InsufficientObservations { test: &'static str, required: usize, actual: usize },

    // ---- Numerical ----
    NumericalDegeneracy { test: &'static str, reason: String },

    // ---- Configuration ----
    InvalidSignificanceLevel { alpha: f64 },
    InvalidConfidenceLevel { level: f64 },
    InvalidOption { name: String, reason: &'static str },

    // ---- statrs ----
    InvalidDistribution { reason: String },
}

impl TrendError {
    /// `true` for the variants a test may legitimately produce on valid input.
    pub fn is_degeneracy(&self) -> bool {
        matches!(
            self,
            TrendError::InsufficientObservations { .. } | TrendError::NumericalDegeneracy { .. }
        )
    }
}

impl std::error::Error for TrendError {}

impl std::fmt::Display for TrendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input validation ----
            TrendError::EmptySeries => write!(f, "Input series is empty."),
            TrendError::InvalidElement { index, reason } => {
                write!(f, "Element at index {index} is not a finite number: {reason}.")
            }
            TrendError::InsufficientObservations { test, required, actual } => {
                write!(f, "{test} needs at least {required} observations; got {actual}.")
            }

            // ---- Numerical ----
            TrendError::NumericalDegeneracy { test, reason } => {
                write!(f, "{test} is undefined for this series: {reason}.")
            }

            // ---- Configuration ----
            TrendError::InvalidSignificanceLevel { alpha } => {
                write!(f, "Invalid significance level {alpha}. Must satisfy 0 < alpha < 1.")
            }
            TrendError::InvalidConfidenceLevel { level } => {
                write!(f, "Invalid confidence level {level}. Must satisfy 0 < level < 1.")
            }
            TrendError::InvalidOption { name, reason } => {
                write!(f, "Invalid option {name:?}. {reason}")
            }

            // ---- statrs ----
            TrendError::InvalidDistribution { reason } => {
                write!(f, "Distribution rejected its parameters: {reason}")
            }
        }
    }
}

impl From<StudentsTError> for TrendError {
    fn from(err: StudentsTError) -> TrendError {
        TrendError::InvalidDistribution { reason: err.to_string() }
    }
}

impl From<BinomialError> for TrendError {
    fn from(err: BinomialError) -> TrendError {
        TrendError::InvalidDistribution { reason: err.to_string() }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TrendError> for PyErr {
    fn from(err: TrendError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
