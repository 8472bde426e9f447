//! series — validated, immutable input series.
//!
//! Purpose
//! -------
//! Turn whatever a caller loaded (floats, integers, numeric text, optional
//! values, labeled pairs) into a dense `f64` series that every test in the
//! battery can consume without re-checking its input.
//!
//! Key behaviors
//! -------------
//! - [`Series::new`] converts each element through [`Observation`],
//!   preserving input order, and rejects the first element that is not a
//!   finite number with its index.
//! - [`Series::summary`] computes the descriptive statistics printed in the
//!   report header.
//!
//! Invariants & assumptions
//! ------------------------
//! - A constructed `Series` holds n ≥ 2 finite values and is never mutated.
//! - Error precedence: a bad element is reported before emptiness or length
//!   is considered, so the caller learns about the first unusable index.
//!
//! Conventions
//! -----------
//! - Length errors carry `"series"` as the test name.
//! - The standard deviation in [`SeriesSummary`] is the population
//!   (divide-by-n) version.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use trend_diagnostics::series::Series;
//!
//! let series = Series::new("sales", [("2024-01", "10.5"), ("2024-02", "11.0")])?;
//! assert_eq!(series.len(), 2);
//! # Ok::<(), trend_diagnostics::statistical_tests::TrendError>(())
//! ```
pub mod observation;

pub use self::observation::Observation;

use crate::statistical_tests::errors::{TrendError, TrendResult};
use ndarray::{Array1, ArrayView1};

/// Series — named, finite, ordered observations (n ≥ 2).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Array1<f64>,
}

impl Series {
    /// Validate `elements` and build a series called `name`.
    ///
    /// # Errors
    /// - `TrendError::InvalidElement` for the first element that cannot be
    ///   converted or is NaN/±∞.
    /// - `TrendError::EmptySeries` when there are no elements.
    /// - `TrendError::InsufficientObservations` for a single element.
    pub fn new<I>(name: impl Into<String>, elements: I) -> TrendResult<Series>
    where
        I: IntoIterator,
        I::Item: Observation,
    {
        let values = elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                let value =
                    element.to_value().map_err(|reason| TrendError::InvalidElement { index, reason })?;
                if !value.is_finite() {
                    return Err(TrendError::InvalidElement { index, reason: "value is NaN or infinite" });
                }
                Ok(value)
            })
            .collect::<TrendResult<Vec<f64>>>()?;

        match values.len() {
            0 => Err(TrendError::EmptySeries),
            1 => Err(TrendError::InsufficientObservations { test: "series", required: 2, actual: 1 }),
            _ => Ok(Series { name: name.into(), values: Array1::from(values) }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a constructed series.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Contiguous view of the values, as taken by the individual tests.
    pub fn as_slice(&self) -> &[f64] {
        // Built from a Vec, so the storage is always standard-layout.
        self.values.as_slice().unwrap_or(&[])
    }

    pub fn view(&self) -> ArrayView1<'_, f64> {
        self.values.view()
    }

    /// Descriptive statistics of the values.
    pub fn summary(&self) -> SeriesSummary {
        let n = self.values.len();
        let mean = self.values.sum() / n as f64;
        let variance = self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        SeriesSummary { n, mean, std: variance.sqrt(), min, max }
    }
}

/// Descriptive statistics of a [`Series`]; `std` is the population value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SeriesSummary {
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}
