//! trend_diagnostics — trend and stationarity test battery with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the test battery to Python via the `_trend_diagnostics` extension module.
//! A univariate series is validated once, run through Mann-Kendall, ADF, KPSS,
//! linear regression on time, Cox-Stuart and Spearman, and the conclusions are
//! reconciled into a single report.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules as the public crate surface:
//!   `series` (validation), `statistical_tests` (the six tests),
//!   `inference` (OLS, long-run variance, response surfaces) and
//!   `analysis` (suite, consensus, text report).
//! - Define the `TrendAnalysis` `#[pyclass]` and the `#[pymodule]`
//!   initializer for the `_trend_diagnostics` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue and error mapping.
//! - A failing test never aborts an analysis; only input validation and
//!   option parsing raise from Python.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_trend_diagnostics.statistical_tests`.
//! - Errors from core Rust code are `TrendError` internally and are converted
//!   to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use trend_diagnostics::analysis::analyze_series;
//!
//! let sales = [112.0, 118.0, 132.0, 129.0, 121.0, 135.0, 148.0, 148.0, 136.0, 119.0,
//!              104.0, 118.0, 115.0, 126.0, 141.0, 135.0, 125.0, 149.0, 170.0, 170.0];
//! let report = analyze_series(sales, "monthly sales")?;
//! println!("{report}");
//! println!("{}", report.consensus);
//! # Ok::<(), trend_diagnostics::statistical_tests::TrendError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_trend_pipeline.rs`.
//! - The PyO3 classes are exercised from Python.

pub mod analysis;
pub mod inference;
pub mod series;
pub mod statistical_tests;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::{PyAny, PyDict}};

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::{SuiteReport, TrendSuite},
    statistical_tests::TestKind,
    utils::{build_suite_options, consensus_to_dict, extract_series, outcome_to_dict},
};

/// TrendAnalysis — Python-facing wrapper for a full battery run.
///
/// Purpose
/// -------
/// Validate a Python series, run the six tests, and expose each outcome,
/// the consensus, and the formatted report.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `TrendAnalysis(data, name="series", alpha=0.05, confidence=0.95,
/// adf_regression="c", adf_autolag="aic", adf_max_lag=None,
/// kpss_regression="ct", kpss_lags="auto", kpss_kernel="bartlett")`:
/// - `data`: 1-D numpy array, pandas Series, or sequence of numbers; `None`
///   and NaN are rejected with their index.
/// - `alpha` / `confidence`: probabilities in (0, 1).
/// - `adf_regression`: `"n"`, `"c"` or `"ct"`.
/// - `adf_autolag`: `"aic"`, `"bic"` or `None` for a fixed `adf_max_lag`.
/// - `kpss_regression`: `"c"` (level) or `"ct"` (trend).
/// - `kpss_lags`: `"auto"`, `"legacy"` or an integer as a string.
///
/// Fields
/// ------
/// - `inner`: [`SuiteReport`]
///   Rust-side report backing every accessor.
///
/// Notes
/// -----
/// - Native Rust code should call [`analysis::analyze_series`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "trend_diagnostics.statistical_tests")]
pub struct TrendAnalysis {
    inner: SuiteReport,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl TrendAnalysis {
    #[new]
    #[pyo3(
        text_signature = "(data, /, name='series', alpha=0.05, confidence=0.95, adf_regression='c', \
                          adf_autolag='aic', adf_max_lag=None, kpss_regression='ct', \
                          kpss_lags='auto', kpss_kernel='bartlett')",
        signature = (
            raw_data,
            name = "series",
            alpha = 0.05,
            confidence = 0.95,
            adf_regression = "c",
            adf_autolag = Some("aic"),
            adf_max_lag = None,
            kpss_regression = "ct",
            kpss_lags = "auto",
            kpss_kernel = "bartlett"
        )
    )]
    #[allow(clippy::too_many_arguments)]
    pub fn new<'py>(
        py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str, alpha: f64, confidence: f64,
        adf_regression: &str, adf_autolag: Option<&str>, adf_max_lag: Option<usize>,
        kpss_regression: &str, kpss_lags: &str, kpss_kernel: &str,
    ) -> PyResult<TrendAnalysis> {
        let options = build_suite_options(
            alpha,
            confidence,
            adf_regression,
            adf_autolag,
            adf_max_lag,
            kpss_regression,
            kpss_lags,
            kpss_kernel,
        )?;
        let series = extract_series(py, raw_data, name)?;
        let inner = py.allow_threads(|| TrendSuite::new(options).analyze(&series));
        Ok(TrendAnalysis { inner })
    }

    #[getter]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Per-test dictionaries keyed by snake_case test name.
    #[getter]
    pub fn results<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let dict = PyDict::new(py);
        for (kind, outcome) in &self.inner.outcomes {
            dict.set_item(kind.name(), outcome_to_dict(py, outcome)?)?;
        }
        Ok(dict)
    }

    /// Dictionary for a single test, e.g. `result("kpss")`.
    pub fn result<'py>(&self, py: Python<'py>, test: &str) -> PyResult<Bound<'py, PyDict>> {
        let outcome = TestKind::ALL
            .into_iter()
            .find(|k| k.name() == test)
            .and_then(|k| self.inner.outcome(k))
            .ok_or_else(|| {
                pyo3::exceptions::PyKeyError::new_err(format!("unknown test {test:?}"))
            })?;
        outcome_to_dict(py, outcome)
    }

    #[getter]
    pub fn consensus<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        consensus_to_dict(py, &self.inner.consensus)
    }

    #[getter]
    pub fn summary<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let s = &self.inner.summary;
        let dict = PyDict::new(py);
        dict.set_item("n", s.n)?;
        dict.set_item("mean", s.mean)?;
        dict.set_item("std", s.std)?;
        dict.set_item("min", s.min)?;
        dict.set_item("max", s.max)?;
        Ok(dict)
    }

    /// Full plain-text report.
    pub fn report(&self) -> String {
        self.inner.to_string()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("TrendAnalysis(name={:?}, {})", self.inner.name, self.inner.consensus)
    }
}

/// _trend_diagnostics — PyO3 module initializer for the Python extension.
///
/// Creates the `statistical_tests` submodule, attaches it to the parent
/// module, and registers it in `sys.modules` so that
/// `import trend_diagnostics.statistical_tests` works.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _trend_diagnostics<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("trend_diagnostics.statistical_tests", statistical_tests_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, trend_diagnostics: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<TrendAnalysis>()?;
    trend_diagnostics.add_submodule(m)?;
    Ok(())
}
