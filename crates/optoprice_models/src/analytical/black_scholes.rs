//! Black-Scholes-Merton pricing for European options on a dividend-paying underlying.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put Price**: P = K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T

use optoprice_core::types::{OptionParameters, OptionSide, PricingError};

use super::distributions::norm_cdf;

/// Alternate spot, volatility or expiry to price at instead of the contract's own.
///
/// Sweeps and the implied-volatility solver evaluate many nearby points of the
/// same contract; overrides let them do so without rebuilding the parameters.
///
/// # Examples
/// ```
/// use optoprice_models::analytical::PricingOverrides;
///
/// let overrides = PricingOverrides::default().spot(105.0).volatility(0.3);
/// assert_eq!(overrides.spot, Some(105.0));
/// assert_eq!(overrides.expiry, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PricingOverrides {
    /// Spot to use instead of `OptionParameters::spot`
    pub spot: Option<f64>,
    /// Volatility to use instead of `OptionParameters::volatility`
    pub volatility: Option<f64>,
    /// Expiry (years) to use instead of `OptionParameters::expiry`
    pub expiry: Option<f64>,
}

impl PricingOverrides {
    /// Override the spot.
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Override the volatility.
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Override the time to expiry.
    pub fn expiry(mut self, expiry: f64) -> Self {
        self.expiry = Some(expiry);
        self
    }
}

/// A single validated evaluation point of the Black-Scholes-Merton formula.
///
/// Holds every input with the domain already checked, so `d1`, `d2`, the
/// price and the Greeks are infallible once constructed.
///
/// # Examples
/// ```
/// use optoprice_core::types::{OptionParameters, OptionSide};
/// use optoprice_models::analytical::BlackScholes;
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .expiry(1.0)
///     .volatility(0.2)
///     .build()
///     .unwrap();
///
/// let call = BlackScholes::new(&params).unwrap().price();
/// let put = BlackScholes::new(&params.with_side(OptionSide::Put)).unwrap().price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
    volatility: f64,
    side: OptionSide,
}

impl BlackScholes {
    /// Evaluation point for the contract as given.
    ///
    /// # Errors
    /// - `PricingError::MissingVolatility` if `params` carries an observed value instead
    /// - `PricingError::InvalidDomain` if any input is outside the formula's domain
    pub fn new(params: &OptionParameters) -> Result<Self, PricingError> {
        Self::with_overrides(params, PricingOverrides::default())
    }

    /// Evaluation point for the contract with some inputs replaced.
    ///
    /// A volatility override also prices parameters that only carry an
    /// observed value, which is how the implied-volatility solver evaluates them.
    ///
    /// # Errors
    /// - `PricingError::MissingVolatility` if neither `params` nor `overrides` supply σ
    /// - `PricingError::InvalidDomain` if S ≤ 0, σ ≤ 0, T ≤ 0 or an input is non-finite
    pub fn with_overrides(
        params: &OptionParameters,
        overrides: PricingOverrides,
    ) -> Result<Self, PricingError> {
        let volatility = overrides
            .volatility
            .or_else(|| params.volatility())
            .ok_or(PricingError::MissingVolatility)?;
        let spot = overrides.spot.unwrap_or_else(|| params.spot());
        let expiry = overrides.expiry.unwrap_or_else(|| params.expiry());

        let bs = Self {
            spot: positive("spot", spot)?,
            strike: positive("strike", params.strike())?,
            rate: finite("rate", params.rate())?,
            expiry: positive("expiry", expiry)?,
            dividend_yield: finite("dividend_yield", params.dividend_yield())?,
            volatility: positive("volatility", volatility)?,
            side: params.side(),
        };
        Ok(bs)
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the time to expiry in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Returns the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// σ√T
    #[inline]
    pub fn vol_sqrt_t(&self) -> f64 {
        self.volatility * self.expiry.sqrt()
    }

    /// Dividend discount factor e^(−qT).
    #[inline]
    pub fn dividend_discount(&self) -> f64 {
        (-self.dividend_yield * self.expiry).exp()
    }

    /// Rate discount factor e^(−rT).
    #[inline]
    pub fn rate_discount(&self) -> f64 {
        (-self.rate * self.expiry).exp()
    }

    /// Computes the d1 term.
    ///
    /// d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T)
    #[inline]
    pub fn d1(&self) -> f64 {
        let drift = self.rate - self.dividend_yield + 0.5 * self.volatility * self.volatility;
        ((self.spot / self.strike).ln() + drift * self.expiry) / self.vol_sqrt_t()
    }

    /// Computes the d2 term.
    ///
    /// d₂ = d₁ − σ√T
    #[inline]
    pub fn d2(&self) -> f64 {
        self.d1() - self.vol_sqrt_t()
    }

    /// Call price: S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂)
    pub fn price_call(&self) -> f64 {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        self.spot * self.dividend_discount() * norm_cdf(d1)
            - self.strike * self.rate_discount() * norm_cdf(d2)
    }

    /// Put price: K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
    pub fn price_put(&self) -> f64 {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        self.strike * self.rate_discount() * norm_cdf(-d2)
            - self.spot * self.dividend_discount() * norm_cdf(-d1)
    }

    /// Price for this evaluation point's side.
    pub fn price(&self) -> f64 {
        match self.side {
            OptionSide::Call => self.price_call(),
            OptionSide::Put => self.price_put(),
        }
    }
}

/// Prices a contract.
///
/// # Errors
/// See [`BlackScholes::new`].
pub fn value(params: &OptionParameters) -> Result<f64, PricingError> {
    Ok(BlackScholes::new(params)?.price())
}

/// Prices a contract with some inputs replaced.
///
/// # Errors
/// See [`BlackScholes::with_overrides`].
pub fn value_with(
    params: &OptionParameters,
    overrides: PricingOverrides,
) -> Result<f64, PricingError> {
    Ok(BlackScholes::with_overrides(params, overrides)?.price())
}

fn finite(parameter: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_domain(parameter, value))
    }
}

fn positive(parameter: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid_domain(parameter, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn scenario(side: OptionSide) -> OptionParameters {
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

    // ==========================================================
    // d1 / d2
    // ==========================================================

    #[test]
    fn test_d1_d2_at_the_money() {
        let bs = BlackScholes::new(&scenario(OptionSide::Call)).unwrap();
        let t: f64 = 30.0 / 365.0;
        let expected_d1 = (0.05 - 0.01 + 0.5 * 0.0625) * t / (0.25 * t.sqrt());
        assert_relative_eq!(bs.d1(), expected_d1, epsilon = 1e-14);
        assert_relative_eq!(bs.d2(), expected_d1 - 0.25 * t.sqrt(), epsilon = 1e-14);
    }

    #[test]
    fn test_d1_independent_of_side() {
        let call = BlackScholes::new(&scenario(OptionSide::Call)).unwrap();
        let put = BlackScholes::new(&scenario(OptionSide::Put)).unwrap();
        assert_eq!(call.d1(), put.d1());
        assert_eq!(call.d2(), put.d2());
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_call_price_reference() {
        let price = value(&scenario(OptionSide::Call)).unwrap();
        assert_abs_diff_eq!(price, 3.018663, epsilon = 1e-5);
    }

    #[test]
    fn test_put_price_reference() {
        let price = value(&scenario(OptionSide::Put)).unwrap();
        assert_abs_diff_eq!(price, 2.690706, epsilon = 1e-5);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let call = scenario(OptionSide::Call).with_spot(110.0).with_strike(95.0);
        let put = call.with_side(OptionSide::Put);
        let bs = BlackScholes::new(&call).unwrap();

        let lhs = value(&call).unwrap() - value(&put).unwrap();
        let rhs = 110.0 * bs.dividend_discount() - 95.0 * bs.rate_discount();
        assert_abs_diff_eq!(lhs, rhs, epsilon = 1e-6);
    }

    #[test]
    fn test_deep_in_the_money_call() {
        let params = scenario(OptionSide::Call).with_spot(200.0);
        let bs = BlackScholes::new(&params).unwrap();
        let forward_intrinsic = 200.0 * bs.dividend_discount() - 100.0 * bs.rate_discount();
        assert_abs_diff_eq!(bs.price(), forward_intrinsic, epsilon = 1e-6);
    }

    #[test]
    fn test_deep_out_of_the_money_put_is_worthless() {
        let params = scenario(OptionSide::Put).with_spot(200.0);
        assert!(value(&params).unwrap() < 1e-10);
    }

    #[test]
    fn test_zero_dividend_matches_black_scholes() {
        // Classic textbook case: S=K=100, r=5%, σ=20%, T=1 → C ≈ 10.4506
        let params = scenario(OptionSide::Call)
            .with_dividend_yield(0.0)
            .with_volatility(0.2)
            .with_expiry(1.0);
        assert_abs_diff_eq!(value(&params).unwrap(), 10.4506, epsilon = 1e-3);
    }

    // ==========================================================
    // Overrides
    // ==========================================================

    #[test]
    fn test_overrides_match_rebuilt_parameters() {
        let params = scenario(OptionSide::Call);
        let overridden = value_with(
            &params,
            PricingOverrides::default()
                .spot(104.0)
                .volatility(0.3)
                .expiry(0.2),
        )
        .unwrap();
        let rebuilt = value(&params.with_spot(104.0).with_volatility(0.3).with_expiry(0.2)).unwrap();
        assert_eq!(overridden, rebuilt);
    }

    #[test]
    fn test_volatility_override_prices_observed_value_parameters() {
        let params = OptionParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .expiry(0.5)
            .observed_value(5.0)
            .build()
            .unwrap();

        assert_eq!(value(&params), Err(PricingError::MissingVolatility));
        assert!(value_with(&params, PricingOverrides::default().volatility(0.2)).is_ok());
    }

    // ==========================================================
    // Domain errors
    // ==========================================================

    #[test]
    fn test_non_positive_volatility_is_invalid_domain() {
        let params = scenario(OptionSide::Call);
        for sigma in [0.0, -0.1, f64::NAN] {
            let result = value_with(&params, PricingOverrides::default().volatility(sigma));
            match result {
                Err(PricingError::InvalidDomain { parameter, .. }) => {
                    assert_eq!(parameter, "volatility")
                }
                other => panic!("Expected InvalidDomain, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_non_positive_expiry_is_invalid_domain() {
        let params = scenario(OptionSide::Put).with_expiry(0.0);
        assert_eq!(
            value(&params),
            Err(PricingError::invalid_domain("expiry", 0.0))
        );
    }

    #[test]
    fn test_non_positive_spot_is_invalid_domain() {
        let params = scenario(OptionSide::Call);
        let result = value_with(&params, PricingOverrides::default().spot(-1.0));
        assert_eq!(result, Err(PricingError::invalid_domain("spot", -1.0)));
    }

    #[test]
    fn test_non_finite_rate_is_invalid_domain() {
        let params = scenario(OptionSide::Call).with_rate(f64::INFINITY);
        assert!(matches!(
            value(&params),
            Err(PricingError::InvalidDomain { .. })
        ));
    }
}
