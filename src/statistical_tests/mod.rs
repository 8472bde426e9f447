//! statistical_tests — the trend and stationarity test battery.
//!
//! Purpose
//! -------
//! Collect the six hypothesis tests that make up the battery together with
//! their shared infrastructure: input validation, configuration, the error
//! type, and the uniform outcome vocabulary used by aggregation.
//!
//! Key behaviors
//! -------------
//! - Trend tests (null: no trend): [`MannKendallOutcome`],
//!   [`LinearRegressionOutcome`], [`CoxStuartOutcome`], [`SpearmanOutcome`].
//! - Stationarity tests, read in opposite directions: [`AdfOutcome`]
//!   (null: unit root) and [`KpssOutcome`] (null: stationarity).
//! - Every test is a constructor on its outcome type taking `&[f64]` and a
//!   [`SignificanceLevel`], returning [`TrendResult`].
//! - [`TestResult`] and [`TestOutcome`] wrap the six outcomes for
//!   uniform access by `analysis`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each test calls [`validate_input`] before any arithmetic and never
//!   panics on user-facing input; undefined statistics are returned as
//!   [`TrendError::NumericalDegeneracy`].
//! - Tests share no state; running them in any order or concurrently on
//!   the same slice yields the same results.
//!
//! Conventions
//! -----------
//! - Per-test error payloads carry the snake_case test name from
//!   [`TestKind::name`].
//! - Numerical building blocks (OLS, long-run variance, response surfaces,
//!   distribution helpers) live in `crate::inference`; this subtree only
//!   assembles them into tests.
//!
//! Downstream usage
//! ----------------
//! - Run a single test directly:
//!
//!   ```rust
//!   use trend_diagnostics::statistical_tests::{MannKendallOutcome, SignificanceLevel};
//!
//!   let mk = MannKendallOutcome::mann_kendall(&[3.0, 1.0, 4.0, 1.0, 5.0], SignificanceLevel::default())?;
//!   println!("tau = {:.3}, p = {:.3}", mk.tau(), mk.p_value());
//!   # Ok::<(), trend_diagnostics::statistical_tests::TrendError>(())
//!   ```
//!
//! - Run the full battery through `crate::analysis::TrendSuite`.
//!
//! Testing notes
//! -------------
//! - Each test module carries unit tests for its formulas, its edge cases,
//!   and its degeneracy paths; the end-to-end pipeline is exercised by the
//!   integration tests under `tests/`.

pub mod adf;
pub mod cox_stuart;
pub mod errors;
pub mod kpss;
pub mod linear_regression;
pub mod mann_kendall;
pub mod options;
pub mod outcome;
pub mod spearman;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adf::AdfOutcome;
pub use self::cox_stuart::CoxStuartOutcome;
pub use self::errors::{TrendError, TrendResult};
pub use self::kpss::{KpssOutcome, PValueBound};
pub use self::linear_regression::LinearRegressionOutcome;
pub use self::mann_kendall::MannKendallOutcome;
pub use self::options::{
    AdfOptions, AdfRegression, ConfidenceLevel, InformationCriterion, KpssLags, KpssOptions,
    KpssRegression, SignificanceLevel,
};
pub use self::outcome::{
    CriticalValues, TestKind, TestOutcome, TestResult, TrendDirection, Verdict,
};
pub use self::spearman::SpearmanOutcome;
pub use self::validation::validate_input;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use trend_diagnostics::statistical_tests::prelude::*;
//
// to import the main statistical-testing surface in a single line.

pub mod prelude {
    pub use super::errors::{TrendError, TrendResult};
    pub use super::options::{AdfOptions, ConfidenceLevel, KpssOptions, SignificanceLevel};
    pub use super::outcome::{TestKind, TestOutcome, TestResult, TrendDirection, Verdict};
    pub use super::{
        AdfOutcome, CoxStuartOutcome, KpssOutcome, LinearRegressionOutcome, MannKendallOutcome,
        SpearmanOutcome,
    };
}
