//! statistical_tests::options — validated configuration for the test battery.
//!
//! Purpose
//! -------
//! Hold every user-tunable knob of the six tests in small, validated value
//! types: the shared significance level, the slope confidence level, and the
//! ADF/KPSS regression and lag-selection choices.
//!
//! Key behaviors
//! -------------
//! - [`SignificanceLevel`] and [`ConfidenceLevel`] reject values outside the
//!   open interval `(0, 1)` at construction, so verdict code never re-checks.
//! - Enum choices parse from short strings (`"c"`, `"ct"`, `"aic"`,
//!   `"auto"`, ...) through `FromStr`, case-insensitively.
//! - `Default` impls reproduce the conventional settings: α = 0.05,
//!   95% slope interval, ADF with a constant and AIC lag search, KPSS
//!   trend-stationarity with the Hobijn bandwidth and a Bartlett kernel.
//!
//! Conventions
//! -----------
//! - Option structs expose public fields and a `new` constructor.
//! - Parse failures return [`TrendError::InvalidOption`] naming the rejected
//!   input and listing the accepted spellings.
use crate::{
    inference::kernel::KernelType,
    statistical_tests::errors::{TrendError, TrendResult},
};
use std::str::FromStr;

/// SignificanceLevel — the α every verdict is measured against.
///
/// A test rejects its null hypothesis iff `p < α` (strict).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    /// Validate and wrap `alpha`.
    ///
    /// Errors
    /// ------
    /// - `TrendError::InvalidSignificanceLevel` unless `0 < alpha < 1`.
    pub fn new(alpha: f64) -> TrendResult<Self> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(TrendError::InvalidSignificanceLevel { alpha });
        }
        Ok(SignificanceLevel(alpha))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `true` iff `p_value < α`.
    pub fn rejects(&self, p_value: f64) -> bool {
        p_value < self.0
    }
}

impl Default for SignificanceLevel {
    /// α = 0.05.
    fn default() -> Self {
        SignificanceLevel(0.05)
    }
}

/// ConfidenceLevel — coverage of the two-sided slope interval.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Validate and wrap `level`.
    ///
    /// Errors
    /// ------
    /// - `TrendError::InvalidConfidenceLevel` unless `0 < level < 1`.
    pub fn new(level: f64) -> TrendResult<Self> {
        if !(level > 0.0 && level < 1.0) {
            return Err(TrendError::InvalidConfidenceLevel { level });
        }
        Ok(ConfidenceLevel(level))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Upper-tail probability `(1 + c) / 2` of the two-sided interval.
    pub fn upper_quantile(&self) -> f64 {
        (1.0 + self.0) / 2.0
    }
}

impl Default for ConfidenceLevel {
    /// c = 0.95.
    fn default() -> Self {
        ConfidenceLevel(0.95)
    }
}

/// Deterministic terms included in the ADF regression.
///
/// - `NoConstant` (`"n"`): `Δx_t = γ x_{t−1} + Σ φ_j Δx_{t−j} + e_t`.
/// - `Constant` (`"c"`): adds an intercept.
/// - `ConstantTrend` (`"ct"`): adds an intercept and a linear time trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum AdfRegression {
    NoConstant,
    #[default]
    Constant,
    ConstantTrend,
}

impl AdfRegression {
    /// Number of deterministic regressors.
    pub fn ntrend(&self) -> usize {
        match self {
            AdfRegression::NoConstant => 0,
            AdfRegression::Constant => 1,
            AdfRegression::ConstantTrend => 2,
        }
    }

    /// Short code used in reports (`"n"`, `"c"`, `"ct"`).
    pub fn code(&self) -> &'static str {
        match self {
            AdfRegression::NoConstant => "n",
            AdfRegression::Constant => "c",
            AdfRegression::ConstantTrend => "ct",
        }
    }
}

impl FromStr for AdfRegression {
    type Err = TrendError;

    /// Accepts `"n"` (or `"nc"`), `"c"`, and `"ct"`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "nc" => Ok(AdfRegression::NoConstant),
            "c" => Ok(AdfRegression::Constant),
            "ct" => Ok(AdfRegression::ConstantTrend),
            _ => Err(TrendError::InvalidOption {
                name: s.to_string(),
                reason: "Valid ADF regressions are 'n', 'c' or 'ct'.",
            }),
        }
    }
}

/// Information criterion minimized by the ADF lag search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum InformationCriterion {
    #[default]
    Aic,
    Bic,
}

impl FromStr for InformationCriterion {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aic" => Ok(InformationCriterion::Aic),
            "bic" => Ok(InformationCriterion::Bic),
            _ => Err(TrendError::InvalidOption {
                name: s.to_string(),
                reason: "Valid information criteria are 'aic' or 'bic'.",
            }),
        }
    }
}

/// AdfOptions — regression and lag policy for the Augmented Dickey-Fuller test.
///
/// Fields
/// ------
/// - `regression`: deterministic terms, default [`AdfRegression::Constant`].
/// - `autolag`: criterion for the lag search; `None` uses `maxlag` directly.
/// - `max_lag`: upper bound of the search. `None` applies the Schwert rule
///   `⌈12 (n/100)^{1/4}⌉`, capped by the sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AdfOptions {
    pub regression: AdfRegression,
    pub autolag: Option<InformationCriterion>,
    pub max_lag: Option<usize>,
}

impl AdfOptions {
    pub fn new(
        regression: AdfRegression, autolag: Option<InformationCriterion>, max_lag: Option<usize>,
    ) -> AdfOptions {
        AdfOptions { regression, autolag, max_lag }
    }
}

impl Default for AdfOptions {
    /// Constant, AIC search, Schwert maximum lag.
    fn default() -> Self {
        AdfOptions::new(AdfRegression::Constant, Some(InformationCriterion::Aic), None)
    }
}

/// Null hypothesis of the KPSS test.
///
/// - `Level` (`"c"`): stationarity around a constant.
/// - `Trend` (`"ct"`): stationarity around a linear trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KpssRegression {
    Level,
    #[default]
    Trend,
}

impl KpssRegression {
    pub fn code(&self) -> &'static str {
        match self {
            KpssRegression::Level => "c",
            KpssRegression::Trend => "ct",
        }
    }
}

impl FromStr for KpssRegression {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "level" => Ok(KpssRegression::Level),
            "ct" | "trend" => Ok(KpssRegression::Trend),
            _ => Err(TrendError::InvalidOption {
                name: s.to_string(),
                reason: "Valid KPSS regressions are 'c' (level) or 'ct' (trend).",
            }),
        }
    }
}

/// Truncation-lag rule for the KPSS long-run variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KpssLags {
    /// Hobijn, Franses & Ooms (1998) data-dependent rule.
    #[default]
    Auto,
    /// `⌈12 (n/100)^{1/4}⌉`.
    Legacy,
    Fixed(usize),
}

impl FromStr for KpssLags {
    type Err = TrendError;

    /// Accepts `"auto"`, `"legacy"`, or a non-negative integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(KpssLags::Auto),
            "legacy" => Ok(KpssLags::Legacy),
            other => other.parse::<usize>().map(KpssLags::Fixed).map_err(|_| {
                TrendError::InvalidOption {
                    name: s.to_string(),
                    reason: "Valid KPSS lags are 'auto', 'legacy' or a non-negative integer.",
                }
            }),
        }
    }
}

/// KpssOptions — null hypothesis, lag rule, and kernel for the KPSS test.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KpssOptions {
    pub regression: KpssRegression,
    pub lags: KpssLags,
    pub kernel: KernelType,
}

impl KpssOptions {
    pub fn new(regression: KpssRegression, lags: KpssLags, kernel: KernelType) -> KpssOptions {
        KpssOptions { regression, lags, kernel }
    }
}

impl Default for KpssOptions {
    /// Trend stationarity, Hobijn bandwidth, Bartlett kernel.
    fn default() -> Self {
        KpssOptions::new(KpssRegression::Trend, KpssLags::Auto, KernelType::Bartlett)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Range validation of the significance and confidence levels.
    // - The strict `p < α` rejection rule.
    // - String parsing of the enum choices.
    // - Documented defaults.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure α outside (0, 1) is rejected and α inside is accepted.
    //
    // Given
    // -----
    // - α ∈ {0, 1, NaN, 0.01}.
    //
    // Expect
    // ------
    // - Only 0.01 is accepted.
    fn significance_level_new_validates_open_interval() {
        assert!(matches!(
            SignificanceLevel::new(0.0),
            Err(TrendError::InvalidSignificanceLevel { .. })
        ));
        assert!(SignificanceLevel::new(1.0).is_err());
        assert!(SignificanceLevel::new(f64::NAN).is_err());
        assert_eq!(SignificanceLevel::new(0.01).map(|a| a.value()), Ok(0.01));
    }

    #[test]
    // Purpose
    // -------
    // Verify the rejection rule is strict.
    //
    // Given
    // -----
    // - Default α = 0.05 and p ∈ {0.049, 0.05}.
    //
    // Expect
    // ------
    // - 0.049 rejects; 0.05 does not.
    fn significance_level_rejects_is_strict() {
        let alpha = SignificanceLevel::default();

        assert!(alpha.rejects(0.049));
        assert!(!alpha.rejects(0.05));
    }

    #[test]
    // Purpose
    // -------
    // Check confidence validation and the interval quantile.
    //
    // Given
    // -----
    // - c = 0.95 and c = 1.2.
    //
    // Expect
    // ------
    // - Upper quantile 0.975 for 0.95; `InvalidConfidenceLevel` for 1.2.
    fn confidence_level_validates_and_reports_upper_quantile() {
        let level = ConfidenceLevel::default();

        assert_eq!(level.upper_quantile(), 0.975);
        assert_eq!(
            ConfidenceLevel::new(1.2),
            Err(TrendError::InvalidConfidenceLevel { level: 1.2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Verify string parsing for the regression and lag enums.
    //
    // Given
    // -----
    // - Accepted spellings and one rejected value per enum.
    //
    // Expect
    // ------
    // - Correct variants; `InvalidOption` on unknown input.
    fn enum_options_parse_from_strings() {
        assert_eq!("CT".parse::<AdfRegression>(), Ok(AdfRegression::ConstantTrend));
        assert_eq!("nc".parse::<AdfRegression>(), Ok(AdfRegression::NoConstant));
        assert!("ctt".parse::<AdfRegression>().is_err());

        assert_eq!("BIC".parse::<InformationCriterion>(), Ok(InformationCriterion::Bic));

        assert_eq!("level".parse::<KpssRegression>(), Ok(KpssRegression::Level));
        assert_eq!("auto".parse::<KpssLags>(), Ok(KpssLags::Auto));
        assert_eq!("7".parse::<KpssLags>(), Ok(KpssLags::Fixed(7)));
        assert!(matches!("-1".parse::<KpssLags>(), Err(TrendError::InvalidOption { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Pin the documented defaults.
    //
    // Given
    // -----
    // - `Default` for both option structs.
    //
    // Expect
    // ------
    // - ADF: constant, AIC, no explicit max lag. KPSS: trend, auto, Bartlett.
    fn option_defaults_match_documentation() {
        let adf = AdfOptions::default();
        let kpss = KpssOptions::default();

        assert_eq!(adf.regression, AdfRegression::Constant);
        assert_eq!(adf.autolag, Some(InformationCriterion::Aic));
        assert_eq!(adf.max_lag, None);
        assert_eq!(kpss.regression, KpssRegression::Trend);
        assert_eq!(kpss.lags, KpssLags::Auto);
        assert_eq!(kpss.kernel, KernelType::Bartlett);
    }
}
