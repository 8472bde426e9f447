//! statistical_tests::outcome — uniform result vocabulary for the battery.
//!
//! Purpose
//! -------
//! Give the six heterogeneous test outcomes one shape so that aggregation
//! and reporting can treat them uniformly: a [`TestKind`] key, a
//! [`TestResult`] tagged union with common accessors, and a [`TestOutcome`]
//! that is either a completed result or a degenerate marker.
//!
//! Key behaviors
//! -------------
//! - [`TestResult`] exposes `statistic`, `p_value`, and `verdict` for every
//!   variant without the caller matching on the test.
//! - [`TestOutcome::Degenerate`] keeps the diagnostic [`TrendError`] and
//!   exposes no statistic and no p-value.
//! - [`Verdict`] keeps trend and stationarity conclusions in separate
//!   variants so that ADF and KPSS are never conflated with trend tests.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every p-value stored in a [`TestResult`] lies in `[0, 1]`.
//! - The verdict of a result depends only on its own p-value and α.
//!
//! Conventions
//! -----------
//! - `TestKind` orders tests in report order: Mann-Kendall, ADF, KPSS,
//!   linear regression, Cox-Stuart, Spearman.
use crate::statistical_tests::{
    adf::AdfOutcome, cox_stuart::CoxStuartOutcome, errors::TrendError, kpss::KpssOutcome,
    linear_regression::LinearRegressionOutcome, mann_kendall::MannKendallOutcome,
    spearman::SpearmanOutcome,
};

/// Identifier of a test in the battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TestKind {
    MannKendall,
    Adf,
    Kpss,
    LinearRegression,
    CoxStuart,
    Spearman,
}

impl TestKind {
    /// All tests, in report order.
    pub const ALL: [TestKind; 6] = [
        TestKind::MannKendall,
        TestKind::Adf,
        TestKind::Kpss,
        TestKind::LinearRegression,
        TestKind::CoxStuart,
        TestKind::Spearman,
    ];

    /// Stable snake_case name, as used in error payloads.
    pub fn name(&self) -> &'static str {
        match self {
            TestKind::MannKendall => "mann_kendall",
            TestKind::Adf => "adf",
            TestKind::Kpss => "kpss",
            TestKind::LinearRegression => "linear_regression",
            TestKind::CoxStuart => "cox_stuart",
            TestKind::Spearman => "spearman",
        }
    }

    /// Human-readable title for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            TestKind::MannKendall => "Mann-Kendall Trend Test",
            TestKind::Adf => "Augmented Dickey-Fuller Test",
            TestKind::Kpss => "KPSS Test",
            TestKind::LinearRegression => "Linear Regression Trend",
            TestKind::CoxStuart => "Cox-Stuart Trend Test",
            TestKind::Spearman => "Spearman Rank Correlation",
        }
    }

    /// Short label used in summaries ("ADF", "Cox-Stuart").
    pub fn short_name(&self) -> &'static str {
        match self {
            TestKind::MannKendall => "Mann-Kendall",
            TestKind::Adf => "ADF",
            TestKind::Kpss => "KPSS",
            TestKind::LinearRegression => "Linear Regression",
            TestKind::CoxStuart => "Cox-Stuart",
            TestKind::Spearman => "Spearman",
        }
    }

    /// `true` for the tests whose null hypothesis is "no trend".
    pub fn is_trend_test(&self) -> bool {
        !matches!(self, TestKind::Adf | TestKind::Kpss)
    }
}

impl std::fmt::Display for TestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Direction of a detected trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    NoTrend,
}

impl TrendDirection {
    /// Direction implied by the sign of `value`; zero maps to `NoTrend`.
    pub fn from_sign(value: f64) -> TrendDirection {
        if value > 0.0 {
            TrendDirection::Increasing
        } else if value < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::NoTrend
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendDirection::Increasing => f.write_str("increasing"),
            TrendDirection::Decreasing => f.write_str("decreasing"),
            TrendDirection::NoTrend => f.write_str("no trend"),
        }
    }
}

/// Conclusion of a single test at the configured α.
///
/// - `Trend(direction)` / `NoTrend`: trend tests rejecting or not.
/// - `Stationary` / `NonStationary`: ADF and KPSS, each read in its own
///   direction (ADF rejects a unit root; KPSS rejects stationarity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Verdict {
    Trend(TrendDirection),
    NoTrend,
    Stationary,
    NonStationary,
}

impl Verdict {
    pub(crate) fn from_direction(direction: TrendDirection) -> Verdict {
        match direction {
            TrendDirection::NoTrend => Verdict::NoTrend,
            other => Verdict::Trend(other),
        }
    }

    /// `true` when a trend test rejected its no-trend null.
    pub fn is_trend(&self) -> bool {
        matches!(self, Verdict::Trend(_))
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Trend(direction) => write!(f, "significant {direction} trend"),
            Verdict::NoTrend => f.write_str("no significant trend"),
            Verdict::Stationary => f.write_str("stationary"),
            Verdict::NonStationary => f.write_str("non-stationary"),
        }
    }
}

/// Labeled critical values, in table order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CriticalValues(Vec<(&'static str, f64)>);

impl CriticalValues {
    pub fn new(values: Vec<(&'static str, f64)>) -> CriticalValues {
        CriticalValues(values)
    }

    /// Critical value for `label` (e.g. `"5%"`), if tabulated.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.0.iter().find(|(l, _)| *l == label).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// TestResult — completed result of one test.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TestResult {
    MannKendall(MannKendallOutcome),
    Adf(AdfOutcome),
    Kpss(KpssOutcome),
    LinearRegression(LinearRegressionOutcome),
    CoxStuart(CoxStuartOutcome),
    Spearman(SpearmanOutcome),
}

impl TestResult {
    pub fn kind(&self) -> TestKind {
        match self {
            TestResult::MannKendall(_) => TestKind::MannKendall,
            TestResult::Adf(_) => TestKind::Adf,
            TestResult::Kpss(_) => TestKind::Kpss,
            TestResult::LinearRegression(_) => TestKind::LinearRegression,
            TestResult::CoxStuart(_) => TestKind::CoxStuart,
            TestResult::Spearman(_) => TestKind::Spearman,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Headline test statistic.
    ///
    /// Mann-Kendall: z. ADF: τ. KPSS: η. Linear regression: t of the slope.
    /// Cox-Stuart: number of increasing pairs. Spearman: rho.
    pub fn statistic(&self) -> f64 {
        match self {
            TestResult::MannKendall(r) => r.z(),
            TestResult::Adf(r) => r.statistic(),
            TestResult::Kpss(r) => r.statistic(),
            TestResult::LinearRegression(r) => r.t_statistic(),
            TestResult::CoxStuart(r) => r.plus() as f64,
            TestResult::Spearman(r) => r.rho(),
        }
    }

    pub fn p_value(&self) -> f64 {
        match self {
            TestResult::MannKendall(r) => r.p_value(),
            TestResult::Adf(r) => r.p_value(),
            TestResult::Kpss(r) => r.p_value(),
            TestResult::LinearRegression(r) => r.p_value(),
            TestResult::CoxStuart(r) => r.p_value(),
            TestResult::Spearman(r) => r.p_value(),
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            TestResult::MannKendall(r) => r.verdict(),
            TestResult::Adf(r) => r.verdict(),
            TestResult::Kpss(r) => r.verdict(),
            TestResult::LinearRegression(r) => r.verdict(),
            TestResult::CoxStuart(r) => r.verdict(),
            TestResult::Spearman(r) => r.verdict(),
        }
    }
}

/// TestOutcome — a completed result or a degenerate marker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TestOutcome {
    Completed(TestResult),
    Degenerate { kind: TestKind, error: TrendError },
}

impl TestOutcome {
    /// Wrap a per-test result, turning its error into a degenerate marker.
    pub fn from_result(kind: TestKind, result: Result<TestResult, TrendError>) -> TestOutcome {
        match result {
            Ok(res) => TestOutcome::Completed(res),
            Err(error) => TestOutcome::Degenerate { kind, error },
        }
    }

    pub fn kind(&self) -> TestKind {
        match self {
            TestOutcome::Completed(res) => res.kind(),
            TestOutcome::Degenerate { kind, .. } => *kind,
        }
    }

    pub fn result(&self) -> Option<&TestResult> {
        match self {
            TestOutcome::Completed(res) => Some(res),
            TestOutcome::Degenerate { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&TrendError> {
        match self {
            TestOutcome::Completed(_) => None,
            TestOutcome::Degenerate { error, .. } => Some(error),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, TestOutcome::Degenerate { .. })
    }

    pub fn statistic(&self) -> Option<f64> {
        self.result().map(TestResult::statistic)
    }

    pub fn p_value(&self) -> Option<f64> {
        self.result().map(TestResult::p_value)
    }

    pub fn verdict(&self) -> Option<Verdict> {
        self.result().map(TestResult::verdict)
    }
}
