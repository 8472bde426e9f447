//! analysis::report — plain-text rendering of a suite run.
//!
//! `Display` for [`SuiteReport`]: a header with the series name and its
//! descriptive statistics, one numbered section per test (degenerate
//! sections print the diagnostic instead of numbers), and a summary with
//! per-test verdicts, the trend vote count and the stationarity consensus.
//! Rendering is pure; callers decide where the text goes.
use crate::{
    analysis::suite::SuiteReport,
    statistical_tests::{
        adf::AdfOutcome,
        cox_stuart::CoxStuartOutcome,
        kpss::{KpssOutcome, PValueBound},
        linear_regression::LinearRegressionOutcome,
        mann_kendall::MannKendallOutcome,
        options::KpssRegression,
        outcome::{CriticalValues, TestKind, TestOutcome, TestResult, TrendDirection},
        spearman::SpearmanOutcome,
    },
};
use std::fmt::{self, Display, Formatter, Write};

const RULE_WIDTH: usize = 70;

impl Display for SuiteReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let banner = "#".repeat(RULE_WIDTH);
        writeln!(f, "{banner}")?;
        writeln!(f, "COMPREHENSIVE TREND ANALYSIS FOR: {}", self.name)?;
        writeln!(f, "{banner}")?;
        writeln!(f)?;
        writeln!(f, "Data points: {}", self.summary.n)?;
        writeln!(f, "Mean: {:.2}", self.summary.mean)?;
        writeln!(f, "Std Dev: {:.2}", self.summary.std)?;
        writeln!(f, "Min: {:.2}", self.summary.min)?;
        writeln!(f, "Max: {:.2}", self.summary.max)?;

        let alpha = self.alpha.value();
        for (number, kind) in TestKind::ALL.into_iter().enumerate() {
            section_header(f, &format!("{}. {}", number + 1, section_title(kind)))?;
            match self.outcomes.get(&kind) {
                Some(TestOutcome::Completed(result)) => write_result(f, result, alpha)?,
                Some(TestOutcome::Degenerate { error, .. }) => {
                    writeln!(f, "Not evaluated: {error}")?
                }
                None => writeln!(f, "Not evaluated: test was not run.")?,
            }
        }

        self.write_summary(f)
    }
}

impl SuiteReport {
    fn write_summary(&self, f: &mut Formatter<'_>) -> fmt::Result {
        section_header(f, "SUMMARY OF RESULTS")?;
        writeln!(f)?;
        writeln!(f, "Trend Detection Tests:")?;
        for kind in TestKind::ALL.into_iter().filter(TestKind::is_trend_test) {
            let label = match self.result(kind) {
                Some(TestResult::MannKendall(mk)) => mk.trend().to_string(),
                Some(result) if result.verdict().is_trend() => "Trend".to_string(),
                Some(_) => "No Trend".to_string(),
                None => "Not evaluated".to_string(),
            };
            writeln!(f, "  {}: {label}{}", kind.short_name(), p_suffix(self.result(kind)))?;
        }

        writeln!(f)?;
        writeln!(f, "Stationarity Tests:")?;
        let adf_label = match self.result(TestKind::Adf) {
            Some(TestResult::Adf(adf)) if adf.is_stationary() => "Stationary",
            Some(_) => "Non-Stationary",
            None => "Not evaluated",
        };
        writeln!(f, "  ADF: {adf_label}{}", p_suffix(self.result(TestKind::Adf)))?;
        let kpss_label = match self.result(TestKind::Kpss) {
            Some(TestResult::Kpss(kpss)) => title_case(kpss.stationarity_label()),
            _ => "Not evaluated".to_string(),
        };
        writeln!(f, "  KPSS: {kpss_label}{}", p_suffix(self.result(TestKind::Kpss)))?;

        writeln!(f)?;
        writeln!(f, "Consensus: {}", self.consensus)?;
        writeln!(f, "Stationarity: {}", self.consensus.stationarity)?;
        if !self.consensus.excluded.is_empty() {
            let names: Vec<&str> = self.consensus.excluded.iter().map(TestKind::short_name).collect();
            writeln!(f, "Excluded (degenerate): {}", names.join(", "))?;
        }
        Ok(())
    }
}

fn section_header(f: &mut Formatter<'_>, title: &str) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f)?;
    writeln!(f, "{rule}")?;
    writeln!(f, "{title}")?;
    writeln!(f, "{rule}")
}

fn section_title(kind: TestKind) -> &'static str {
    match kind {
        TestKind::MannKendall => "MANN-KENDALL TEST (Non-parametric)",
        TestKind::Adf => "AUGMENTED DICKEY-FULLER (ADF) TEST",
        TestKind::Kpss => "KPSS TEST (Kwiatkowski-Phillips-Schmidt-Shin)",
        TestKind::LinearRegression => "LINEAR REGRESSION TEST",
        TestKind::CoxStuart => "COX-STUART TEST (Non-parametric)",
        TestKind::Spearman => "SPEARMAN'S RANK CORRELATION TEST",
    }
}

fn p_suffix(result: Option<&TestResult>) -> String {
    result.map(|r| format!(" (p={:.4})", r.p_value())).unwrap_or_default()
}

/// "not trend stationary" -> "Not Trend Stationary".
fn title_case(label: &str) -> String {
    label
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_result(f: &mut Formatter<'_>, result: &TestResult, alpha: f64) -> fmt::Result {
    match result {
        TestResult::MannKendall(r) => write_mann_kendall(f, r, alpha),
        TestResult::Adf(r) => write_adf(f, r, alpha),
        TestResult::Kpss(r) => write_kpss(f, r, alpha),
        TestResult::LinearRegression(r) => write_linear_regression(f, r, alpha),
        TestResult::CoxStuart(r) => write_cox_stuart(f, r, alpha),
        TestResult::Spearman(r) => write_spearman(f, r, alpha),
    }
}

fn write_critical_values(f: &mut Formatter<'_>, crit: &CriticalValues) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Critical Values:")?;
    for (label, value) in crit.iter() {
        writeln!(f, "  {label}: {value:.3}")?;
    }
    Ok(())
}

fn write_mann_kendall(f: &mut Formatter<'_>, r: &MannKendallOutcome, alpha: f64) -> fmt::Result {
    writeln!(f, "Trend: {}", r.trend())?;
    writeln!(f, "Test Statistic (S): {}", r.s())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    writeln!(f, "Tau (correlation): {:.6}", r.tau())?;
    writeln!(f, "z-score: {:.6}", r.z())?;
    writeln!(f, "Sen's slope: {:.6}", r.sen_slope())?;
    writeln!(f)?;
    if r.h() {
        writeln!(f, " RESULT: Significant trend detected (p < {alpha})")?;
        writeln!(f, "  Direction: {}", r.trend())
    } else {
        writeln!(f, " RESULT: No significant trend (p >= {alpha})")
    }
}

fn write_adf(f: &mut Formatter<'_>, r: &AdfOutcome, alpha: f64) -> fmt::Result {
    writeln!(f, "ADF Statistic: {:.6}", r.statistic())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    writeln!(f, "Lags used: {}", r.used_lag())?;
    writeln!(f, "Number of observations: {}", r.nobs())?;
    write_critical_values(f, r.critical_values())?;
    writeln!(f)?;
    if r.is_stationary() {
        writeln!(f, " RESULT: Series is stationary (p < {alpha})")?;
        writeln!(f, "   No unit root, suggests no stochastic trend")
    } else {
        writeln!(f, " RESULT: Series is non-stationary (p >= {alpha})")?;
        writeln!(f, "   Unit root present, may have trend")
    }
}

fn write_kpss(f: &mut Formatter<'_>, r: &KpssOutcome, alpha: f64) -> fmt::Result {
    let variant = match r.regression() {
        KpssRegression::Trend => "with trend",
        KpssRegression::Level => "level",
    };
    writeln!(f, "KPSS Test ({variant}):")?;
    writeln!(f, "KPSS Statistic: {:.6}", r.statistic())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    match r.p_value_bound() {
        Some(PValueBound::AtLeast) => writeln!(f, "  (statistic below table; actual p-value is greater)")?,
        Some(PValueBound::AtMost) => writeln!(f, "  (statistic above table; actual p-value is smaller)")?,
        None => {}
    }
    writeln!(f, "Lags used: {}", r.lags())?;
    write_critical_values(f, r.critical_values())?;
    writeln!(f)?;
    if r.is_stationary() {
        writeln!(f, " RESULT: Series is {} (p >= {alpha})", r.stationarity_label())?;
        writeln!(f, "   Null hypothesis not rejected, no significant trend")
    } else {
        writeln!(f, " RESULT: Series is {} (p < {alpha})", r.stationarity_label())?;
        writeln!(f, "   Trend component present")
    }
}

fn write_linear_regression(
    f: &mut Formatter<'_>, r: &LinearRegressionOutcome, alpha: f64,
) -> fmt::Result {
    let (lower, upper) = r.confidence_interval();
    writeln!(f, "Slope: {:.6}", r.slope())?;
    writeln!(f, "Intercept: {:.2}", r.intercept())?;
    writeln!(f, "R-squared: {:.6}", r.r_squared())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    writeln!(f, "Standard Error: {:.6}", r.std_err())?;
    writeln!(f)?;
    writeln!(
        f,
        "{:.0}% Confidence Interval for slope: [{lower:.6}, {upper:.6}]",
        r.confidence() * 100.0
    )?;
    writeln!(f)?;
    match r.direction() {
        TrendDirection::Increasing => {
            writeln!(f, " RESULT: Significant positive linear trend (p < {alpha})")
        }
        TrendDirection::Decreasing => {
            writeln!(f, " RESULT: Significant negative linear trend (p < {alpha})")
        }
        TrendDirection::NoTrend => writeln!(f, " RESULT: No significant linear trend (p >= {alpha})"),
    }
}

fn write_cox_stuart(f: &mut Formatter<'_>, r: &CoxStuartOutcome, alpha: f64) -> fmt::Result {
    writeln!(f, "Number of pairs: {}", r.pairs())?;
    writeln!(f, "Plus signs (+): {} (second half > first half)", r.plus())?;
    writeln!(f, "Minus signs (-): {} (second half < first half)", r.minus())?;
    writeln!(f, "Ties: {}", r.ties())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    writeln!(f)?;
    match (r.is_significant(), r.direction()) {
        (true, TrendDirection::Increasing) => {
            writeln!(f, " RESULT: Significant upward trend (p < {alpha})")
        }
        (true, TrendDirection::Decreasing) => {
            writeln!(f, " RESULT: Significant downward trend (p < {alpha})")
        }
        _ => writeln!(f, " RESULT: No significant trend (p >= {alpha})"),
    }
}

fn write_spearman(f: &mut Formatter<'_>, r: &SpearmanOutcome, alpha: f64) -> fmt::Result {
    writeln!(f, "Spearman's rho: {:.6}", r.rho())?;
    writeln!(f, "p-value: {:.6}", r.p_value())?;
    writeln!(f)?;
    match r.direction() {
        TrendDirection::Increasing => {
            writeln!(f, " RESULT: Significant positive monotonic trend (p < {alpha})")
        }
        TrendDirection::Decreasing => {
            writeln!(f, " RESULT: Significant negative monotonic trend (p < {alpha})")
        }
        TrendDirection::NoTrend => {
            writeln!(f, " RESULT: No significant monotonic trend (p >= {alpha})")
        }
    }
}

/// Render only the summary block, e.g. for log lines.
pub fn summary_text(report: &SuiteReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write!(out, "{}: {}; {}", report.name, report.consensus, report.consensus.stationarity);
    out
}
