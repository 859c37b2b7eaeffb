//! Analytical Greeks for the Black-Scholes-Merton model.
//!
//! All Greeks are quoted in trading-desk units:
//! - theta per calendar day (annual theta ÷ 365)
//! - vega, rho and epsilon per one percentage point move (÷ 100)
//! - delta, gamma and vanna per unit move
//!
//! Theta always divides by [`CALENDAR_DAYS_PER_YEAR`]; a request's own
//! `days_in_year` only affects how its expiry was converted to years.

use optoprice_core::types::{OptionParameters, OptionSide, PricingError, CALENDAR_DAYS_PER_YEAR};

use super::black_scholes::BlackScholes;
use super::distributions::{norm_cdf, norm_pdf};

/// Scale from "per unit" to "per percentage point".
const PER_PERCENTAGE_POINT: f64 = 100.0;

/// Analytical sensitivities of one option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂t per calendar day of elapsed time
    pub theta: f64,
    /// ∂V/∂σ per percentage point
    pub vega: f64,
    /// ∂V/∂r per percentage point
    pub rho: f64,
    /// ∂V/∂q per percentage point
    pub epsilon: f64,
    /// ∂delta/∂σ = ∂vega/∂S, per unit σ
    pub vanna: f64,
}

/// Value of one option, with its Greeks when requested.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValuationResult {
    /// Option value
    pub value: f64,
    /// Analytical Greeks
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub greeks: Option<Greeks>,
}

impl BlackScholes {
    /// Delta.
    ///
    /// Call: e^(−qT)·N(d₁); Put: e^(−qT)·(N(d₁) − 1)
    pub fn delta(&self) -> f64 {
        let n_d1 = norm_cdf(self.d1());
        match self.side() {
            OptionSide::Call => self.dividend_discount() * n_d1,
            OptionSide::Put => self.dividend_discount() * (n_d1 - 1.0),
        }
    }

    /// Gamma, identical for calls and puts.
    ///
    /// e^(−qT)·φ(d₁) / (S·σ·√T)
    pub fn gamma(&self) -> f64 {
        self.dividend_discount() * norm_pdf(self.d1()) / (self.spot() * self.vol_sqrt_t())
    }

    /// Theta per calendar day.
    pub fn theta(&self) -> f64 {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        let spot_df = self.spot() * self.dividend_discount();
        let strike_df = self.strike() * self.rate_discount();

        let decay = -spot_df * norm_pdf(d1) * self.volatility() / (2.0 * self.expiry().sqrt());
        let annual = match self.side() {
            OptionSide::Call => {
                decay - self.rate() * strike_df * norm_cdf(d2)
                    + self.dividend_yield() * spot_df * norm_cdf(d1)
            }
            OptionSide::Put => {
                decay + self.rate() * strike_df * norm_cdf(-d2)
                    - self.dividend_yield() * spot_df * norm_cdf(-d1)
            }
        };
        annual / CALENDAR_DAYS_PER_YEAR
    }

    /// Vega per percentage point, identical for calls and puts.
    ///
    /// S·e^(−qT)·φ(d₁)·√T / 100
    pub fn vega(&self) -> f64 {
        self.spot() * self.dividend_discount() * norm_pdf(self.d1()) * self.expiry().sqrt()
            / PER_PERCENTAGE_POINT
    }

    /// Rho per percentage point.
    ///
    /// Call: K·T·e^(−rT)·N(d₂)/100; Put: −K·T·e^(−rT)·N(−d₂)/100
    pub fn rho(&self) -> f64 {
        let scale = self.strike() * self.expiry() * self.rate_discount();
        let d2 = self.d2();
        match self.side() {
            OptionSide::Call => scale * norm_cdf(d2) / PER_PERCENTAGE_POINT,
            OptionSide::Put => -scale * norm_cdf(-d2) / PER_PERCENTAGE_POINT,
        }
    }

    /// Epsilon (dividend-yield sensitivity) per percentage point.
    ///
    /// Call: −S·T·e^(−qT)·N(d₁)/100; Put: S·T·e^(−qT)·N(−d₁)/100
    pub fn epsilon(&self) -> f64 {
        let scale = self.spot() * self.expiry() * self.dividend_discount();
        let d1 = self.d1();
        match self.side() {
            OptionSide::Call => -scale * norm_cdf(d1) / PER_PERCENTAGE_POINT,
            OptionSide::Put => scale * norm_cdf(-d1) / PER_PERCENTAGE_POINT,
        }
    }

    /// Vanna, identical for calls and puts.
    ///
    /// −e^(−qT)·φ(d₁)·d₂/σ
    pub fn vanna(&self) -> f64 {
        let d1 = self.d1();
        let d2 = d1 - self.vol_sqrt_t();
        -self.dividend_discount() * norm_pdf(d1) * d2 / self.volatility()
    }

    /// All Greeks at once.
    pub fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta(),
            gamma: self.gamma(),
            theta: self.theta(),
            vega: self.vega(),
            rho: self.rho(),
            epsilon: self.epsilon(),
            vanna: self.vanna(),
        }
    }
}

/// Computes all Greeks of a contract.
///
/// # Errors
/// See [`BlackScholes::new`].
pub fn greeks(params: &OptionParameters) -> Result<Greeks, PricingError> {
    Ok(BlackScholes::new(params)?.greeks())
}

/// Values a contract, optionally with Greeks.
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::analytical::valuate;
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .expiry(30.0 / 365.0)
///     .dividend_yield(0.01)
///     .volatility(0.25)
///     .build()
///     .unwrap();
///
/// let result = valuate(&params, true).unwrap();
/// assert!((result.value - 3.018663).abs() < 1e-5);
/// assert!(result.greeks.is_some());
/// ```
///
/// # Errors
/// See [`BlackScholes::new`].
pub fn valuate(params: &OptionParameters, with_greeks: bool) -> Result<ValuationResult, PricingError> {
    let bs = BlackScholes::new(params)?;
    Ok(ValuationResult {
        value: bs.price(),
        greeks: with_greeks.then(|| bs.greeks()),
    })
}
