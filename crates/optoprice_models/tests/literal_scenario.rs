//! Reference scenario and limiting-case tests.
//!
//! Reference: S=100, K=100, r=5%, T=30/365, σ=25%, q=1%.
//!
//! The published reference Greeks were produced with an undiscounted delta
//! and slightly different theta conventions, so delta, put theta and vega are
//! held to looser tolerances than the prices.

use approx::assert_abs_diff_eq;
use optoprice_core::types::{OptionParameters, OptionSide, PricingError};
use optoprice_models::analytical::{greeks, valuate, value};
use optoprice_models::sensitivity::{sweep_over_spot, SweepConfig};

fn reference(side: OptionSide) -> OptionParameters {
    OptionParameters::builder()
        .spot(100.0)
        .strike(100.0)
        .rate(0.05)
        .expiry(30.0 / 365.0)
        .dividend_yield(0.01)
        .volatility(0.25)
        .side(side)
        .build()
        .unwrap()
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn test_reference_call() {
    let result = valuate(&reference(OptionSide::Call), true).unwrap();
    let g = result.greeks.unwrap();

    assert_abs_diff_eq!(result.value, 3.018663, epsilon = 1e-5);
    assert_abs_diff_eq!(g.delta, 0.53256, epsilon = 1e-3);
    assert_abs_diff_eq!(g.theta, -0.0529, epsilon = 1e-4);
    assert_abs_diff_eq!(g.vega, 0.113992, epsilon = 1e-4);
    assert_abs_diff_eq!(g.rho, 0.041255, epsilon = 1e-6);
}

#[test]
fn test_reference_put() {
    let result = valuate(&reference(OptionSide::Put), true).unwrap();
    let g = result.greeks.unwrap();

    assert_abs_diff_eq!(result.value, 2.690706, epsilon = 1e-5);
    assert_abs_diff_eq!(g.delta, -0.46744, epsilon = 1e-3);
    assert_abs_diff_eq!(g.theta, -0.0430, epsilon = 2e-3);
}

#[test]
fn test_reference_put_call_parity() {
    let call = value(&reference(OptionSide::Call)).unwrap();
    let put = value(&reference(OptionSide::Put)).unwrap();
    let t: f64 = 30.0 / 365.0;
    let forward_gap = 100.0 * (-0.01 * t).exp() - 100.0 * (-0.05 * t).exp();
    assert_abs_diff_eq!(call - put, forward_gap, epsilon = 1e-6);
}

#[test]
fn test_reference_sweep_shape() {
    let curve = sweep_over_spot(&reference(OptionSide::Call), &SweepConfig::spot()).unwrap();
    let points = curve.points();
    assert_eq!(points.len(), 80);
    // Half-open grid: 40 points below S, S itself, 39 above
    assert_abs_diff_eq!(points[0].x, 96.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[40].x, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(points[79].x, 103.9, epsilon = 1e-9);
    for pair in points.windows(2) {
        assert_abs_diff_eq!(pair[1].x - pair[0].x, 0.1, epsilon = 1e-9);
    }
}

// ============================================================================
// Expiry limit
// ============================================================================

#[test]
fn test_value_tends_to_intrinsic_away_from_the_money() {
    for side in OptionSide::ALL {
        for (spot, strike) in [(110.0, 100.0), (90.0, 100.0), (100.0, 80.0), (50.0, 60.0)] {
            let params = reference(side)
                .with_spot(spot)
                .with_strike(strike)
                .with_expiry(1e-8);
            let intrinsic = match side {
                OptionSide::Call => f64::max(spot - strike, 0.0),
                OptionSide::Put => f64::max(strike - spot, 0.0),
            };
            assert_abs_diff_eq!(value(&params).unwrap(), intrinsic, epsilon = 1e-6);
        }
    }
}

#[test]
fn test_value_tends_to_zero_at_the_money() {
    for side in OptionSide::ALL {
        let params = reference(side).with_expiry(1e-10);
        assert_abs_diff_eq!(value(&params).unwrap(), 0.0, epsilon = 1e-3);
    }
}

#[test]
fn test_zero_expiry_is_rejected() {
    let params = reference(OptionSide::Call).with_expiry(0.0);
    assert!(matches!(
        value(&params),
        Err(PricingError::InvalidDomain { .. })
    ));
    assert!(matches!(
        greeks(&params),
        Err(PricingError::InvalidDomain { .. })
    ));
}
