//! analysis::consensus — reconcile the battery's conclusions.
//!
//! Purpose
//! -------
//! Summarize what the six outcomes say together without overriding any of
//! them: how many trend tests reject "no trend", which tests could not be
//! evaluated, and whether ADF and KPSS agree on stationarity.
//!
//! Key behaviors
//! -------------
//! - One [`TrendVote`] per trend test (Mann-Kendall, linear regression,
//!   Cox-Stuart, Spearman); degenerate tests vote `None` and are listed in
//!   `excluded`.
//! - [`StationarityConsensus`] has four determined states and an
//!   `Undetermined` state naming the degenerate stationarity test(s).
//!   Disagreement between ADF and KPSS is reported as such.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pure read-only function of the outcomes; recomputing it on the same
//!   outcomes gives an identical value.
//! - A vote's `rejects_no_trend` is the underlying verdict's `is_trend()`,
//!   so α is applied exactly once, inside each test.
use crate::statistical_tests::outcome::{TestKind, TestOutcome, Verdict};
use std::collections::BTreeMap;

/// TrendVote — one trend test's contribution to the consensus.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TrendVote {
    pub kind: TestKind,
    /// `None` when the test was degenerate or missing.
    pub p_value: Option<f64>,
    /// `None` when the test was degenerate or missing.
    pub rejects_no_trend: Option<bool>,
}

/// Joint reading of ADF (null: unit root) and KPSS (null: stationarity).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StationarityConsensus {
    /// ADF rejects the unit root and KPSS does not reject stationarity.
    BothStationary,
    /// ADF does not reject the unit root and KPSS rejects stationarity.
    BothNonStationary,
    /// ADF says stationary, KPSS says non-stationary.
    AdfOnlyStationary,
    /// KPSS says stationary, ADF says non-stationary.
    KpssOnlyStationary,
    /// At least one of the two tests could not be evaluated.
    Undetermined { missing: Vec<TestKind> },
}

impl StationarityConsensus {
    fn from_outcomes(outcomes: &BTreeMap<TestKind, TestOutcome>) -> StationarityConsensus {
        let stationary = |kind: TestKind| {
            outcomes
                .get(&kind)
                .and_then(TestOutcome::verdict)
                .map(|verdict| verdict == Verdict::Stationary)
        };
        StationarityConsensus::from_flags(stationary(TestKind::Adf), stationary(TestKind::Kpss))
    }

    /// Classify from each test's "stationary" reading; `None` marks a test
    /// that could not be evaluated.
    pub fn from_flags(adf: Option<bool>, kpss: Option<bool>) -> StationarityConsensus {
        match (adf, kpss) {
            (Some(true), Some(true)) => StationarityConsensus::BothStationary,
            (Some(false), Some(false)) => StationarityConsensus::BothNonStationary,
            (Some(true), Some(false)) => StationarityConsensus::AdfOnlyStationary,
            (Some(false), Some(true)) => StationarityConsensus::KpssOnlyStationary,
            (adf, kpss) => {
                let mut missing = Vec::new();
                if adf.is_none() {
                    missing.push(TestKind::Adf);
                }
                if kpss.is_none() {
                    missing.push(TestKind::Kpss);
                }
                StationarityConsensus::Undetermined { missing }
            }
        }
    }

    /// `true` when ADF and KPSS reached the same conclusion.
    pub fn is_agreement(&self) -> bool {
        matches!(
            self,
            StationarityConsensus::BothStationary | StationarityConsensus::BothNonStationary
        )
    }
}

impl std::fmt::Display for StationarityConsensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationarityConsensus::BothStationary => {
                f.write_str("ADF and KPSS agree: series is stationary")
            }
            StationarityConsensus::BothNonStationary => {
                f.write_str("ADF and KPSS agree: series is non-stationary")
            }
            StationarityConsensus::AdfOnlyStationary => {
                f.write_str("ADF and KPSS disagree: ADF indicates stationarity, KPSS rejects it")
            }
            StationarityConsensus::KpssOnlyStationary => {
                f.write_str("ADF and KPSS disagree: KPSS indicates stationarity, ADF finds a unit root")
            }
            StationarityConsensus::Undetermined { missing } => {
                let names: Vec<&str> = missing.iter().map(TestKind::short_name).collect();
                write!(f, "undetermined: {} could not be evaluated", names.join(" and "))
            }
        }
    }
}

/// Consensus — aggregate reading of one suite run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Consensus {
    /// One vote per trend test, in report order.
    pub votes: Vec<TrendVote>,
    /// Trend tests that rejected the no-trend null.
    pub rejecting: Vec<TestKind>,
    /// Tests (trend or stationarity) that were degenerate.
    pub excluded: Vec<TestKind>,
    pub stationarity: StationarityConsensus,
}

impl Consensus {
    /// Derive the consensus from a full set of outcomes.
    pub fn from_outcomes(outcomes: &BTreeMap<TestKind, TestOutcome>) -> Consensus {
        let votes: Vec<TrendVote> = TestKind::ALL
            .into_iter()
            .filter(TestKind::is_trend_test)
            .map(|kind| {
                let outcome = outcomes.get(&kind);
                TrendVote {
                    kind,
                    p_value: outcome.and_then(TestOutcome::p_value),
                    rejects_no_trend: outcome
                        .and_then(TestOutcome::verdict)
                        .map(|verdict| verdict.is_trend()),
                }
            })
            .collect();

        let rejecting =
            votes.iter().filter(|v| v.rejects_no_trend == Some(true)).map(|v| v.kind).collect();
        let excluded = TestKind::ALL
            .into_iter()
            .filter(|kind| outcomes.get(kind).map_or(true, TestOutcome::is_degenerate))
            .collect();

        Consensus {
            votes,
            rejecting,
            excluded,
            stationarity: StationarityConsensus::from_outcomes(outcomes),
        }
    }

    /// Number of trend tests rejecting "no trend".
    pub fn rejecting_count(&self) -> usize {
        self.rejecting.len()
    }

    /// Number of trend tests that produced a verdict.
    pub fn evaluated_count(&self) -> usize {
        self.votes.iter().filter(|v| v.rejects_no_trend.is_some()).count()
    }
}

impl std::fmt::Display for Consensus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} trend tests reject no-trend",
            self.rejecting_count(),
            self.evaluated_count()
        )
    }
}
