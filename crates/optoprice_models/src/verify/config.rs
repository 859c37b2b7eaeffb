//! Bump sizes and pass thresholds for the consistency checks.

/// Perturbation applied to each input.
///
/// | Field | Default | Perturbs |
/// |-------|---------|----------|
/// | `spot` | 1e-4 | S, for delta |
/// | `gamma_spot` | 1e-3 | S, for gamma |
/// | `time_days` | 0.01 | T, in calendar days |
/// | `volatility` | 1e-4 | σ, for vega |
/// | `rate` | 1e-4 | r |
/// | `dividend_yield` | 1e-4 | q |
/// | `vanna_volatility` | 1e-4 | σ, for vanna through delta |
/// | `vanna_spot` | 1e-2 | S, for vanna through vega |
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BumpSizes {
    /// Spot bump for delta
    pub spot: f64,
    /// Spot bump for gamma
    pub gamma_spot: f64,
    /// Expiry bump in calendar days
    pub time_days: f64,
    /// Volatility bump for vega
    pub volatility: f64,
    /// Rate bump for rho
    pub rate: f64,
    /// Dividend-yield bump for epsilon
    pub dividend_yield: f64,
    /// Volatility bump for vanna through delta
    pub vanna_volatility: f64,
    /// Spot bump for vanna through vega
    pub vanna_spot: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot: 1e-4,
            gamma_spot: 1e-3,
            time_days: 1e-2,
            volatility: 1e-4,
            rate: 1e-4,
            dividend_yield: 1e-4,
            vanna_volatility: 1e-4,
            vanna_spot: 1e-2,
        }
    }
}

/// Largest acceptable gap between the first-order prediction and the repriced value.
///
/// Thresholds are absolute and expressed in the units of the repriced
/// quantity: option value for delta, theta, vega, rho and epsilon; delta for
/// gamma and vanna through delta; vega (per point) for vanna through vega.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyTolerances {
    /// Delta threshold
    pub delta: f64,
    /// Gamma threshold
    pub gamma: f64,
    /// Theta threshold
    pub theta: f64,
    /// Vega threshold
    pub vega: f64,
    /// Rho threshold
    pub rho: f64,
    /// Epsilon threshold
    pub epsilon: f64,
    /// Vanna-through-delta threshold
    pub vanna_via_delta: f64,
    /// Vanna-through-vega threshold
    pub vanna_via_vega: f64,
}

impl Default for ConsistencyTolerances {
    fn default() -> Self {
        Self {
            delta: 1e-6,
            gamma: 1e-4,
            theta: 1e-5,
            vega: 1e-5,
            rho: 1e-6,
            epsilon: 1e-6,
            vanna_via_delta: 1e-3,
            vanna_via_vega: 1e-4,
        }
    }
}
