//! MacKinnon response surfaces for the Dickey-Fuller τ statistic.
//!
//! - [`mackinnon_p_value`]: approximate asymptotic p-value from the
//!   MacKinnon (1994) regression surfaces for a single integrated series.
//! - [`mackinnon_critical_values`]: finite-sample 1/5/10% critical values
//!   from the MacKinnon (2010) table, `β₀ + β₁/T + β₂/T² + β₃/T³`.
use crate::{inference::distributions::normal_cdf, statistical_tests::options::AdfRegression};

/// Labels of the tabulated ADF critical values, in table order.
pub const ADF_CRITICAL_LABELS: [&str; 3] = ["1%", "5%", "10%"];

struct PValueSurface {
    tau_max: f64,
    tau_min: f64,
    tau_star: f64,
    small_p: [f64; 3],
    large_p: [f64; 4],
}

const SURFACE_N: PValueSurface = PValueSurface {
    tau_max: f64::INFINITY,
    tau_min: -19.04,
    tau_star: -1.04,
    small_p: [0.6344, 1.2378, 0.032496],
    large_p: [0.4797, 0.93557, -0.06999, 0.033066],
};

const SURFACE_C: PValueSurface = PValueSurface {
    tau_max: 2.74,
    tau_min: -18.83,
    tau_star: -1.61,
    small_p: [2.1659, 1.4412, 0.038269],
    large_p: [1.7339, 0.93202, -0.12745, -0.010368],
};

const SURFACE_CT: PValueSurface = PValueSurface {
    tau_max: 0.7,
    tau_min: -16.18,
    tau_star: -2.89,
    small_p: [3.2512, 1.6047, 0.049588],
    large_p: [2.5261, 0.61654, -0.37956, -0.060285],
};

const CRIT_N: [[f64; 4]; 3] = [
    [-2.56574, -2.2358, -3.627, 0.0],
    [-1.94100, -0.2686, -3.365, 31.223],
    [-1.61682, 0.2656, -2.714, 25.364],
];

const CRIT_C: [[f64; 4]; 3] = [
    [-3.43035, -6.5393, -16.786, -79.433],
    [-2.86154, -2.8903, -4.234, -40.040],
    [-2.56677, -1.5384, -2.809, 0.0],
];

const CRIT_CT: [[f64; 4]; 3] = [
    [-3.95877, -9.0531, -28.428, -134.155],
    [-3.41049, -4.3904, -9.036, -45.374],
    [-3.12705, -2.5856, -3.925, -22.380],
];

/// Approximate p-value of an ADF τ statistic.
///
/// Statistics above the surface's upper bound map to 1 and statistics below
/// its lower bound map to 0; otherwise `Φ(poly(τ))` with the small-p
/// polynomial for `τ ≤ τ*` and the large-p polynomial above it.
pub fn mackinnon_p_value(tau: f64, regression: AdfRegression) -> f64 {
    let surface = match regression {
        AdfRegression::NoConstant => &SURFACE_N,
        AdfRegression::Constant => &SURFACE_C,
        AdfRegression::ConstantTrend => &SURFACE_CT,
    };
    if tau > surface.tau_max {
        return 1.0;
    }
    if tau < surface.tau_min {
        return 0.0;
    }
    let z = if tau <= surface.tau_star {
        polyval(&surface.small_p, tau)
    } else {
        polyval(&surface.large_p, tau)
    };
    normal_cdf(z).clamp(0.0, 1.0)
}

/// Finite-sample critical values at 1/5/10% for `nobs` regression rows.
pub fn mackinnon_critical_values(regression: AdfRegression, nobs: usize) -> [(&'static str, f64); 3] {
    let table = match regression {
        AdfRegression::NoConstant => &CRIT_N,
        AdfRegression::Constant => &CRIT_C,
        AdfRegression::ConstantTrend => &CRIT_CT,
    };
    let inv_t = 1.0 / nobs as f64;
    let mut out = [("", 0.0); 3];
    for (slot, (label, coefs)) in out.iter_mut().zip(ADF_CRITICAL_LABELS.iter().zip(table)) {
        *slot = (*label, polyval(coefs, inv_t));
    }
    out
}

/// `c₀ + c₁x + c₂x² + …` by Horner's rule.
fn polyval(coefs: &[f64], x: f64) -> f64 {
    coefs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Saturation of the p-value outside the surface bounds.
    // - Monotonicity of the p-value in τ.
    // - Critical values at a finite sample and their ordering.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify saturation at both ends of the surface.
    //
    // Given
    // -----
    // - τ = 5 and τ = −25 under the constant regression.
    //
    // Expect
    // ------
    // - p = 1 and p = 0 respectively.
    fn mackinnon_p_value_saturates_outside_bounds() {
        assert_eq!(mackinnon_p_value(5.0, AdfRegression::Constant), 1.0);
        assert_eq!(mackinnon_p_value(-25.0, AdfRegression::Constant), 0.0);
        assert!(mackinnon_p_value(50.0, AdfRegression::NoConstant) <= 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Check that the p-value at the 5% asymptotic critical value is near 5%.
    //
    // Given
    // -----
    // - τ = −2.86154 (constant) and τ = −3.41049 (constant + trend).
    //
    // Expect
    // ------
    // - p ≈ 0.05 within the accuracy of the response surface.
    fn mackinnon_p_value_near_five_percent_at_asymptotic_critical_value() {
        let p_c = mackinnon_p_value(-2.86154, AdfRegression::Constant);
        let p_ct = mackinnon_p_value(-3.41049, AdfRegression::ConstantTrend);

        assert_relative_eq!(p_c, 0.05, epsilon = 5e-3);
        assert_relative_eq!(p_ct, 0.05, epsilon = 5e-3);
    }

    #[test]
    // Purpose
    // -------
    // Ensure p is non-decreasing in τ across the small/large split.
    //
    // Given
    // -----
    // - A grid of τ from −6 to 2 under each regression.
    //
    // Expect
    // ------
    // - p(τ_i) ≤ p(τ_{i+1}) + 1e-9.
    fn mackinnon_p_value_is_monotone_in_tau() {
        for regression in
            [AdfRegression::NoConstant, AdfRegression::Constant, AdfRegression::ConstantTrend]
        {
            let grid: Vec<f64> = (0..=80).map(|i| -6.0 + 0.1 * i as f64).collect();
            for pair in grid.windows(2) {
                let lo = mackinnon_p_value(pair[0], regression);
                let hi = mackinnon_p_value(pair[1], regression);
                assert!(lo <= hi + 1e-9, "{regression:?}: p({}) = {lo} > p({}) = {hi}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the finite-sample adjustment at T = 100.
    //
    // Given
    // -----
    // - Constant regression, nobs = 100.
    //
    // Expect
    // ------
    // - 1% value −3.43035 − 0.065393 − 0.0016786 − 0.000079433 ≈ −3.4975,
    //   and the three values strictly increase from 1% to 10%.
    fn mackinnon_critical_values_adjust_for_sample_size() {
        let crit = mackinnon_critical_values(AdfRegression::Constant, 100);

        assert_eq!(crit[0].0, "1%");
        assert_relative_eq!(crit[0].1, -3.497501, epsilon = 1e-5);
        assert!(crit[0].1 < crit[1].1 && crit[1].1 < crit[2].1);
    }
}
