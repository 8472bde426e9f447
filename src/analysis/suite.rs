//! analysis::suite — run the full battery on one series.
//!
//! Purpose
//! -------
//! Fan a validated [`Series`] out to the six tests, collect each result as a
//! [`TestOutcome`], and derive the [`Consensus`] in the same call.
//!
//! Key behaviors
//! -------------
//! - A test error never aborts the others; it becomes
//!   `TestOutcome::Degenerate` and is logged at `warn`.
//! - Without the `parallel` feature the tests run sequentially in report
//!   order; with it they run on the rayon pool and are joined before
//!   aggregation. Outcomes are keyed by [`TestKind`], so both modes give the
//!   same report.
//!
//! Invariants & assumptions
//! ------------------------
//! - The series is borrowed immutably and never transformed.
//! - All option validation happens in [`SuiteOptions::new`]; `analyze`
//!   itself cannot fail.
use crate::{
    analysis::{consensus::Consensus, report::summary_text},
    series::{Observation, Series, SeriesSummary},
    statistical_tests::{
        adf::AdfOutcome,
        cox_stuart::CoxStuartOutcome,
        errors::TrendResult,
        kpss::KpssOutcome,
        linear_regression::LinearRegressionOutcome,
        mann_kendall::MannKendallOutcome,
        options::{AdfOptions, ConfidenceLevel, KpssOptions, SignificanceLevel},
        outcome::{TestKind, TestOutcome, TestResult},
        spearman::SpearmanOutcome,
    },
};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

/// Iterate `$expr` on the rayon pool under `parallel`, sequentially otherwise.
macro_rules! iter_maybe_parallel {
    ($expr:expr) => {{
        #[cfg(feature = "parallel")]
        {
            use rayon::iter::IntoParallelIterator;

            IntoParallelIterator::into_par_iter($expr)
        }
        #[cfg(not(feature = "parallel"))]
        {
            IntoIterator::into_iter($expr)
        }
    }};
}

/// SuiteOptions — configuration shared by every test in one run.
///
/// Fields
/// ------
/// - `alpha`: significance level for every verdict (default 0.05).
/// - `confidence`: level of the regression slope interval (default 0.95).
/// - `adf`: ADF deterministic terms and lag search.
/// - `kpss`: KPSS null, lag rule and kernel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SuiteOptions {
    pub alpha: SignificanceLevel,
    pub confidence: ConfidenceLevel,
    pub adf: AdfOptions,
    pub kpss: KpssOptions,
}

impl SuiteOptions {
    /// Validate the probability levels and bundle the per-test options.
    ///
    /// # Errors
    /// - `TrendError::InvalidSignificanceLevel` unless `0 < alpha < 1`.
    /// - `TrendError::InvalidConfidenceLevel` unless `0 < confidence < 1`.
    pub fn new(
        alpha: f64, confidence: f64, adf: AdfOptions, kpss: KpssOptions,
    ) -> TrendResult<SuiteOptions> {
        Ok(SuiteOptions {
            alpha: SignificanceLevel::new(alpha)?,
            confidence: ConfidenceLevel::new(confidence)?,
            adf,
            kpss,
        })
    }
}

/// TrendSuite — the configured battery.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrendSuite {
    options: SuiteOptions,
}

impl TrendSuite {
    pub fn new(options: SuiteOptions) -> TrendSuite {
        TrendSuite { options }
    }

    pub fn options(&self) -> &SuiteOptions {
        &self.options
    }

    /// Run one test on `data`.
    pub fn run(&self, kind: TestKind, data: &[f64]) -> TestOutcome {
        let alpha = self.options.alpha;
        let result = match kind {
            TestKind::MannKendall => {
                MannKendallOutcome::mann_kendall(data, alpha).map(TestResult::MannKendall)
            }
            TestKind::Adf => AdfOutcome::adf(data, &self.options.adf, alpha).map(TestResult::Adf),
            TestKind::Kpss => {
                KpssOutcome::kpss(data, &self.options.kpss, alpha).map(TestResult::Kpss)
            }
            TestKind::LinearRegression => {
                LinearRegressionOutcome::linear_regression(data, alpha, self.options.confidence)
                    .map(TestResult::LinearRegression)
            }
            TestKind::CoxStuart => {
                CoxStuartOutcome::cox_stuart(data, alpha).map(TestResult::CoxStuart)
            }
            TestKind::Spearman => SpearmanOutcome::spearman(data, alpha).map(TestResult::Spearman),
        };

        let outcome = TestOutcome::from_result(kind, result);
        match &outcome {
            TestOutcome::Completed(res) => log::debug!(
                "{}: statistic = {:.6}, p = {:.6}, verdict = {}",
                kind.name(),
                res.statistic(),
                res.p_value(),
                res.verdict()
            ),
            TestOutcome::Degenerate { error, .. } => log::warn!("{}: {error}", kind.name()),
        }
        outcome
    }

    /// Run the whole battery on `series`.
    pub fn analyze(&self, series: &Series) -> SuiteReport {
        let data = series.as_slice();
        log::debug!("analyzing {:?}: n = {}", series.name(), series.len());

        let outcomes: BTreeMap<TestKind, TestOutcome> = iter_maybe_parallel!(TestKind::ALL)
            .map(|kind| (kind, self.run(kind, data)))
            .collect::<Vec<_>>()
            .into_iter()
            .collect();
        let consensus = Consensus::from_outcomes(&outcomes);

        let report = SuiteReport {
            name: series.name().to_string(),
            summary: series.summary(),
            alpha: self.options.alpha,
            outcomes,
            consensus,
        };
        log::debug!("{}", summary_text(&report));
        report
    }
}

/// SuiteReport — every outcome of one run plus the derived consensus.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SuiteReport {
    pub name: String,
    pub summary: SeriesSummary,
    pub alpha: SignificanceLevel,
    pub outcomes: BTreeMap<TestKind, TestOutcome>,
    pub consensus: Consensus,
}

impl SuiteReport {
    pub fn outcome(&self, kind: TestKind) -> Option<&TestOutcome> {
        self.outcomes.get(&kind)
    }

    /// Completed result of `kind`, `None` when it was degenerate.
    pub fn result(&self, kind: TestKind) -> Option<&TestResult> {
        self.outcome(kind).and_then(TestOutcome::result)
    }
}

/// Validate `values` and run the battery with default options.
///
/// # Errors
/// Validation errors from [`Series::new`]; per-test failures are reported
/// inside the returned report.
///
/// # Examples
/// ```rust
/// use trend_diagnostics::analysis::analyze_series;
/// use trend_diagnostics::statistical_tests::TestKind;
///
/// let values: Vec<f64> = (0..40).map(|t| t as f64 + (t % 3) as f64).collect();
/// let report = analyze_series(values, "demo")?;
/// assert!(report.result(TestKind::MannKendall).is_some());
/// println!("{report}");
/// # Ok::<(), trend_diagnostics::statistical_tests::TrendError>(())
/// ```
pub fn analyze_series<I>(values: I, name: &str) -> TrendResult<SuiteReport>
where
    I: IntoIterator,
    I::Item: Observation,
{
    analyze_series_with(values, name, SuiteOptions::default())
}

/// Like [`analyze_series`] with explicit options.
pub fn analyze_series_with<I>(values: I, name: &str, options: SuiteOptions) -> TrendResult<SuiteReport>
where
    I: IntoIterator,
    I::Item: Observation,
{
    let series = Series::new(name, values)?;
    Ok(TrendSuite::new(options).analyze(&series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::{errors::TrendError, outcome::Verdict};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Option validation in `SuiteOptions::new`.
    // - Isolation of per-test failures inside one run.
    // - Use of the configured α by every test.
    //
    // They intentionally DO NOT cover:
    // - Report formatting (see `report.rs`) or the end-to-end pipeline
    //   (see `tests/`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure invalid probability levels are rejected.
    //
    // Given
    // -----
    // - alpha = 0 and confidence = 1.
    //
    // Expect
    // ------
    // - `InvalidSignificanceLevel` and `InvalidConfidenceLevel`.
    fn suite_options_validate_levels() {
        let bad_alpha = SuiteOptions::new(0.0, 0.95, AdfOptions::default(), KpssOptions::default());
        let bad_conf = SuiteOptions::new(0.05, 1.0, AdfOptions::default(), KpssOptions::default());

        assert_eq!(bad_alpha, Err(TrendError::InvalidSignificanceLevel { alpha: 0.0 }));
        assert_eq!(bad_conf, Err(TrendError::InvalidConfidenceLevel { level: 1.0 }));
    }

    #[test]
    // Purpose
    // -------
    // Check that a short series yields degenerate outcomes without
    // aborting the others.
    //
    // Given
    // -----
    // - x = [1, 2] (valid series, too short for most tests).
    //
    // Expect
    // ------
    // - Six outcomes; Mann-Kendall and Cox-Stuart complete; linear
    //   regression is `InsufficientObservations`.
    fn analyze_isolates_per_test_failures() {
        // Arrange
        let series = Series::new("short", [1.0, 2.0]).unwrap();

        // Act
        let report = TrendSuite::default().analyze(&series);

        // Assert
        assert_eq!(report.outcomes.len(), 6);
        assert!(report.result(TestKind::MannKendall).is_some());
        assert!(report.result(TestKind::CoxStuart).is_some());
        assert!(matches!(
            report.outcome(TestKind::LinearRegression).and_then(TestOutcome::error),
            Some(TrendError::InsufficientObservations { test: "linear_regression", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Verify that the configured α reaches the verdicts.
    //
    // Given
    // -----
    // - x = 1..=6, whose Cox-Stuart p-value is 0.25.
    //
    // Expect
    // ------
    // - No trend at α = 0.05; upward trend at α = 0.30.
    fn analyze_applies_configured_alpha() {
        // Arrange
        let series = Series::new("ramp", [1, 2, 3, 4, 5, 6]).unwrap();
        let loose =
            SuiteOptions::new(0.30, 0.95, AdfOptions::default(), KpssOptions::default()).unwrap();

        // Act
        let strict_report = TrendSuite::default().analyze(&series);
        let loose_report = TrendSuite::new(loose).analyze(&series);

        // Assert
        let verdict = |r: &SuiteReport| r.outcome(TestKind::CoxStuart).and_then(TestOutcome::verdict);
        assert_eq!(verdict(&strict_report), Some(Verdict::NoTrend));
        assert!(verdict(&loose_report).is_some_and(|v| v.is_trend()));
    }
}
