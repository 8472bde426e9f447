//! inference — numerical building blocks for the test battery.
//!
//! Purpose
//! -------
//! Provide the regression, variance and reference-distribution machinery
//! that the trend and stationarity tests are assembled from. Nothing here
//! knows which test it serves; errors are tagged with the test name at the
//! boundary via [`InferenceError::within`].
//!
//! Key behaviors
//! -------------
//! - [`fit_ols`]: dense OLS by Cholesky solve with classical standard
//!   errors, Gaussian log-likelihood, AIC and BIC.
//! - [`long_run_variance`]: kernel-weighted long-run variance of a
//!   residual series, with [`hobijn_bandwidth`] and [`legacy_bandwidth`]
//!   lag rules.
//! - [`KernelType`]: Bartlett, Parzen and quadratic-spectral tapers.
//! - [`mackinnon_p_value`] and [`mackinnon_critical_values`]: Dickey-Fuller
//!   response surfaces.
//! - `distributions`: normal and Student-t p-values and quantiles.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; validation happens upstream in
//!   `statistical_tests::validation`.
//! - All routines return [`InferenceError`] rather than panicking on
//!   degenerate numerics (singular designs, zero variance).
//!
//! Conventions
//! -----------
//! - Matrices are `ndarray` with rows indexing time; `nalgebra` is used only
//!   inside the OLS solve.
//! - No logging and no global state.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests against hand-computed values and
//!   published table entries.

pub mod distributions;
pub mod errors;
pub mod kernel;
pub mod long_run_variance;
pub mod mackinnon;
pub mod ols;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::kernel::KernelType;
pub use self::long_run_variance::{hobijn_bandwidth, legacy_bandwidth, long_run_variance};
pub use self::mackinnon::{mackinnon_critical_values, mackinnon_p_value};
pub use self::ols::{OlsFit, fit_ols};
