//! utils — conversion helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! is used by the `#[pyclass]` wrappers in `lib.rs`: extracting a series
//! from numpy/pandas/sequence inputs, parsing string options into their
//! enums, and flattening test outcomes into Python dictionaries.

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyDict},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use std::str::FromStr;

#[cfg(feature = "python-bindings")]
use crate::{
    analysis::{Consensus, SuiteOptions},
    inference::KernelType,
    series::Series,
    statistical_tests::{
        AdfOptions, CriticalValues, InformationCriterion, KpssOptions, TestOutcome, TestResult,
        TrendError,
    },
};

/// Borrow a 1-D `float64` view of a numpy array, pandas Series or sequence.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract()?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Validate Python input into a [`Series`].
///
/// Contiguous float arrays are read in place; other sequences are read
/// element by element so that `None` is reported as a missing value at its
/// index rather than as a type error.
///
/// Errors
/// ------
/// - `ValueError` for validation failures (`TrendError`).
/// - `TypeError` when the input is not a 1-D numeric sequence.
#[cfg(feature = "python-bindings")]
pub fn extract_series<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Series> {
    if let Ok(arr) = extract_f64_array(py, raw_data) {
        if let Ok(data) = arr.as_slice() {
            return Ok(Series::new(name, data)?);
        }
    }

    let elements: Vec<Option<f64>> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(Series::new(name, elements)?)
}

/// Parse a string option through its `FromStr` impl.
#[cfg(feature = "python-bindings")]
pub fn parse_option<T>(value: &str) -> PyResult<T>
where
    T: FromStr<Err = TrendError>,
{
    value.parse::<T>().map_err(PyErr::from)
}

/// Build [`SuiteOptions`] from the keyword arguments of `TrendAnalysis`.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_suite_options(
    alpha: f64, confidence: f64, adf_regression: &str, adf_autolag: Option<&str>,
    adf_max_lag: Option<usize>, kpss_regression: &str, kpss_lags: &str, kpss_kernel: &str,
) -> PyResult<SuiteOptions> {
    let autolag = adf_autolag.map(parse_option::<InformationCriterion>).transpose()?;
    let adf = AdfOptions::new(parse_option(adf_regression)?, autolag, adf_max_lag);
    let kpss = KpssOptions::new(
        parse_option(kpss_regression)?,
        parse_option(kpss_lags)?,
        parse_option::<KernelType>(kpss_kernel)?,
    );
    Ok(SuiteOptions::new(alpha, confidence, adf, kpss)?)
}

#[cfg(feature = "python-bindings")]
fn critical_values_dict<'py>(
    py: Python<'py>, crit: &CriticalValues,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    for (label, value) in crit.iter() {
        dict.set_item(*label, *value)?;
    }
    Ok(dict)
}

/// Flatten one outcome into a dict; degenerate outcomes carry `"error"`.
#[cfg(feature = "python-bindings")]
pub fn outcome_to_dict<'py>(
    py: Python<'py>, outcome: &TestOutcome,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("test", outcome.kind().name())?;
    dict.set_item("statistic", outcome.statistic())?;
    dict.set_item("p_value", outcome.p_value())?;
    dict.set_item("verdict", outcome.verdict().map(|v| v.to_string()))?;
    dict.set_item("error", outcome.error().map(TrendError::to_string))?;

    match outcome.result() {
        Some(TestResult::MannKendall(r)) => {
            dict.set_item("trend", r.trend().to_string())?;
            dict.set_item("h", r.h())?;
            dict.set_item("s", r.s())?;
            dict.set_item("var_s", r.var_s())?;
            dict.set_item("z", r.z())?;
            dict.set_item("tau", r.tau())?;
            dict.set_item("sen_slope", r.sen_slope())?;
            dict.set_item("intercept", r.intercept())?;
        }
        Some(TestResult::Adf(r)) => {
            dict.set_item("used_lag", r.used_lag())?;
            dict.set_item("nobs", r.nobs())?;
            dict.set_item("icbest", r.icbest())?;
            dict.set_item("regression", r.regression().code())?;
            dict.set_item("critical_values", critical_values_dict(py, r.critical_values())?)?;
        }
        Some(TestResult::Kpss(r)) => {
            dict.set_item("lags", r.lags())?;
            dict.set_item("regression", r.regression().code())?;
            dict.set_item("stationarity", r.stationarity_label())?;
            dict.set_item("critical_values", critical_values_dict(py, r.critical_values())?)?;
        }
        Some(TestResult::LinearRegression(r)) => {
            dict.set_item("slope", r.slope())?;
            dict.set_item("intercept", r.intercept())?;
            dict.set_item("r", r.r())?;
            dict.set_item("r_squared", r.r_squared())?;
            dict.set_item("std_err", r.std_err())?;
            dict.set_item("intercept_stderr", r.intercept_stderr())?;
            dict.set_item("confidence_interval", r.confidence_interval())?;
        }
        Some(TestResult::CoxStuart(r)) => {
            dict.set_item("plus", r.plus())?;
            dict.set_item("minus", r.minus())?;
            dict.set_item("ties", r.ties())?;
            dict.set_item("pairs", r.pairs())?;
            dict.set_item("direction", r.direction().to_string())?;
        }
        Some(TestResult::Spearman(r)) => {
            dict.set_item("rho", r.rho())?;
        }
        None => {}
    }
    Ok(dict)
}

/// Flatten the consensus into a dict.
#[cfg(feature = "python-bindings")]
pub fn consensus_to_dict<'py>(py: Python<'py>, consensus: &Consensus) -> PyResult<Bound<'py, PyDict>> {
    let names = |kinds: &[crate::statistical_tests::TestKind]| -> Vec<&'static str> {
        kinds.iter().map(|k| k.name()).collect()
    };

    let dict = PyDict::new(py);
    dict.set_item("rejecting", names(&consensus.rejecting))?;
    dict.set_item("excluded", names(&consensus.excluded))?;
    dict.set_item("rejecting_count", consensus.rejecting_count())?;
    dict.set_item("evaluated_count", consensus.evaluated_count())?;
    dict.set_item("stationarity", consensus.stationarity.to_string())?;
    dict.set_item("stationarity_agreement", consensus.stationarity.is_agreement())?;
    Ok(dict)
}
