//! analysis — run the battery, reconcile it, and render it.
//!
//! Purpose
//! -------
//! Tie the individual tests into the end-to-end pipeline: a validated
//! [`Series`](crate::series::Series) goes through [`TrendSuite`], the
//! outcomes are reconciled into a [`Consensus`], and the [`SuiteReport`]
//! renders itself as text through `Display`.
//!
//! Key behaviors
//! -------------
//! - [`analyze_series`] / [`analyze_series_with`]: validate raw values and
//!   run the suite in one call.
//! - [`TrendSuite::run`]: run a single test and wrap it as a
//!   `TestOutcome`.
//! - [`Consensus`]: trend vote count and the ADF/KPSS stationarity reading.
//!
//! Invariants & assumptions
//! ------------------------
//! - The report is a pure function of the series and the options; two runs
//!   on the same input give equal reports, with or without `parallel`.
//!
//! Conventions
//! -----------
//! - The library logs through the `log` facade only (`debug` per test,
//!   `warn` for degenerate tests) and never installs a logger.
//!
//! Testing notes
//! -------------
//! - Unit tests sit next to each submodule; `tests/integration_trend_pipeline.rs`
//!   drives the public surface end to end.

pub mod consensus;
pub mod report;
pub mod suite;

pub use self::consensus::{Consensus, StationarityConsensus, TrendVote};
pub use self::report::summary_text;
pub use self::suite::{
    SuiteOptions, SuiteReport, TrendSuite, analyze_series, analyze_series_with,
};
