//! Kernel taps for long-run variance estimation.
//!
//! This module provides:
//! - A `KernelType` enum with common HAC tapers (Bartlett/Newey–West, Parzen, QS).
//! - Per-lag weights `w(x)` where `x = k/(L+1)`.
//! - String parsing so that callers can select a kernel by name.
//!
//! The KPSS statistic uses Bartlett weights by default; the other tapers are
//! available for sensitivity checks.
use crate::statistical_tests::errors::TrendError;
use std::str::FromStr;

/// HAC taper family.
///
/// - `Bartlett`: triangular (Newey–West) kernel, compact support on |x|≤1.
/// - `Parzen`: smoother compact-support kernel with heavier down-weighting at high lags.
/// - `QuadraticSpectral`: infinite-support taper with high large-sample efficiency.
///
/// The taper argument is taken as `x = k/(L+1)` to avoid a zero weight at `k=L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KernelType {
    #[default]
    Bartlett,
    Parzen,
    QuadraticSpectral,
}

impl KernelType {
    /// Taper value `w(x)`; symmetric in `x`.
    pub fn weight(&self, x: f64) -> f64 {
        let x = x.abs();
        match self {
            KernelType::Bartlett => (1.0 - x).max(0.0),
            KernelType::Parzen => parzen(x),
            KernelType::QuadraticSpectral => quadratic_spectral(x),
        }
    }

    /// Weight for lag `k` at bandwidth `bandwidth`, i.e. `w(k / (L+1))`.
    pub fn lag_weight(&self, lag: usize, bandwidth: usize) -> f64 {
        self.weight(lag as f64 / (bandwidth + 1) as f64)
    }
}

/// Cubic on `[0, ½]`, `2(1 − x)³` on `[½, 1]`, zero beyond.
fn parzen(x: f64) -> f64 {
    match x {
        x if x <= 0.5 => 1.0 - 6.0 * x.powi(2) * (1.0 - x),
        x if x <= 1.0 => 2.0 * (1.0 - x).powi(3),
        _ => 0.0,
    }
}

/// Andrews (1991) QS taper; `w(0) = 1` by continuity.
fn quadratic_spectral(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let z = 6.0 * std::f64::consts::PI * x / 5.0;
    3.0 / z.powi(2) * (z.sin() / z - z.cos())
}

impl FromStr for KernelType {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bartlett" | "newey-west" | "nw" => Ok(KernelType::Bartlett),
            "parzen" => Ok(KernelType::Parzen),
            "qs" | "quadratic-spectral" | "quadraticspectral" => Ok(KernelType::QuadraticSpectral),
            _ => Err(TrendError::InvalidOption {
                name: s.to_string(),
                reason: "Valid kernels: 'bartlett', 'parzen', 'qs'.",
            }),
        }
    }
}
