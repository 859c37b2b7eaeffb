//! Option contract inputs.
//!
//! This module provides:
//! - [`OptionSide`]: Call or put, the only two variants every formula switches on
//! - [`PricingInput`]: Either a volatility to price with or an observed value to invert
//! - [`OptionParameters`]: The immutable unit of computation
//! - [`OptionParametersBuilder`]: Validating builder for [`OptionParameters`]
//!
//! ## Immutability
//!
//! `OptionParameters` is `Copy` and has no setters. Scenario variants used by
//! sweeps and finite-difference checks are produced with the `with_*`
//! methods, each of which returns a new, independent value.

use std::fmt;
use std::str::FromStr;

use super::error::PricingError;

/// Side of a European vanilla option.
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionSide;
///
/// let side: OptionSide = "Put".parse().unwrap();
/// assert_eq!(side, OptionSide::Put);
/// assert!("straddle".parse::<OptionSide>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionSide {
    /// Right to buy at the strike: payoff max(S - K, 0)
    #[default]
    Call,
    /// Right to sell at the strike: payoff max(K - S, 0)
    Put,
}

impl OptionSide {
    /// Both sides, call first.
    pub const ALL: [OptionSide; 2] = [OptionSide::Call, OptionSide::Put];

    /// Returns true for [`OptionSide::Call`].
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionSide::Call)
    }

    /// Returns true for [`OptionSide::Put`].
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionSide::Put)
    }

    /// Lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSide::Call => "call",
            OptionSide::Put => "put",
        }
    }
}

impl FromStr for OptionSide {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionSide::Call),
            "put" | "p" => Ok(OptionSide::Put),
            _ => Err(PricingError::InvalidSide {
                side: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The second half of the contract inputs: exactly one of volatility or observed value.
///
/// Encoding the choice as an enum makes "both" and "neither" unrepresentable
/// once an [`OptionParameters`] exists.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PricingInput {
    /// Volatility (σ, decimal) used to compute a value.
    Volatility(f64),
    /// Observed market price used to solve for implied volatility.
    ObservedValue(f64),
}

/// Immutable inputs to the Black-Scholes-Merton formula.
///
/// All rates and yields are decimals (0.05 = 5%) and `expiry` is in years.
///
/// # Examples
/// ```
/// use optoprice_core::types::{OptionParameters, OptionSide, PricingError};
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(95.0)
///     .rate(0.01)
///     .expiry(0.25)
///     .volatility(0.3)
///     .side(OptionSide::Put)
///     .build()
///     .unwrap();
/// assert_eq!(params.volatility(), Some(0.3));
/// assert_eq!(params.observed_value(), None);
///
/// // Supplying both volatility and observed value is rejected
/// let both = OptionParameters::builder()
///     .spot(100.0)
///     .strike(95.0)
///     .expiry(0.25)
///     .volatility(0.3)
///     .observed_value(4.2)
///     .build();
/// assert!(matches!(both, Err(PricingError::Construction { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParameters {
    spot: f64,
    strike: f64,
    rate: f64,
    expiry: f64,
    dividend_yield: f64,
    input: PricingInput,
    side: OptionSide,
}

impl OptionParameters {
    /// Creates a new builder.
    pub fn builder() -> OptionParametersBuilder {
        OptionParametersBuilder::default()
    }

    /// Underlying price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Continuously compounded risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Time to expiry in years (t).
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Continuous dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Volatility or observed value, whichever was supplied.
    #[inline]
    pub fn input(&self) -> PricingInput {
        self.input
    }

    /// Volatility (σ), if these parameters are for pricing.
    #[inline]
    pub fn volatility(&self) -> Option<f64> {
        match self.input {
            PricingInput::Volatility(sigma) => Some(sigma),
            PricingInput::ObservedValue(_) => None,
        }
    }

    /// Observed market price, if these parameters are for implied volatility.
    #[inline]
    pub fn observed_value(&self) -> Option<f64> {
        match self.input {
            PricingInput::Volatility(_) => None,
            PricingInput::ObservedValue(value) => Some(value),
        }
    }

    /// Option side.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Returns a copy with a different spot.
    #[must_use]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Returns a copy with a different strike.
    #[must_use]
    pub fn with_strike(self, strike: f64) -> Self {
        Self { strike, ..self }
    }

    /// Returns a copy with a different rate.
    #[must_use]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }

    /// Returns a copy with a different time to expiry.
    #[must_use]
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self { expiry, ..self }
    }

    /// Returns a copy with a different dividend yield.
    #[must_use]
    pub fn with_dividend_yield(self, dividend_yield: f64) -> Self {
        Self {
            dividend_yield,
            ..self
        }
    }

    /// Returns a copy priced at `volatility`, replacing any observed value.
    #[must_use]
    pub fn with_volatility(self, volatility: f64) -> Self {
        Self {
            input: PricingInput::Volatility(volatility),
            ..self
        }
    }

    /// Returns a copy for the other side or the same side.
    #[must_use]
    pub fn with_side(self, side: OptionSide) -> Self {
        Self { side, ..self }
    }
}

/// Builder for [`OptionParameters`].
///
/// `spot`, `strike` and `expiry` are required; `rate` and `dividend_yield`
/// default to zero and `side` defaults to [`OptionSide::Call`]. Exactly one of
/// `volatility` or `observed_value` must be set.
#[derive(Debug, Default, Clone)]
pub struct OptionParametersBuilder {
    spot: Option<f64>,
    strike: Option<f64>,
    rate: Option<f64>,
    expiry: Option<f64>,
    dividend_yield: Option<f64>,
    volatility: Option<f64>,
    observed_value: Option<f64>,
    side: Option<OptionSide>,
}

impl OptionParametersBuilder {
    /// Sets the underlying price (must be positive).
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the strike (must be positive).
    pub fn strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the risk-free rate (decimal, any real).
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the time to expiry in years (must be positive).
    pub fn expiry(mut self, expiry: f64) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Sets the continuous dividend yield (decimal, default 0).
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the volatility (decimal, must be positive).
    pub fn volatility(mut self, volatility: f64) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Sets the observed market price to solve implied volatility against.
    pub fn observed_value(mut self, observed_value: f64) -> Self {
        self.observed_value = Some(observed_value);
        self
    }

    /// Sets the option side (default call).
    pub fn side(mut self, side: OptionSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Builds the parameters, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Construction`] when a required field is
    /// missing, a value is non-finite or non-positive where positivity is
    /// required, or when volatility and observed value are both or neither set.
    pub fn build(self) -> Result<OptionParameters, PricingError> {
        let spot = required("spot", self.spot)?;
        let strike = required("strike", self.strike)?;
        let expiry = required("expiry", self.expiry)?;
        let rate = finite("rate", self.rate.unwrap_or(0.0))?;
        let dividend_yield = finite("dividend_yield", self.dividend_yield.unwrap_or(0.0))?;

        positive("spot", spot)?;
        positive("strike", strike)?;
        positive("expiry", expiry)?;

        let input = match (self.volatility, self.observed_value) {
            (Some(sigma), None) => {
                positive("volatility", finite("volatility", sigma)?)?;
                PricingInput::Volatility(sigma)
            }
            (None, Some(value)) => PricingInput::ObservedValue(finite("observed_value", value)?),
            (Some(sigma), Some(value)) => {
                return Err(PricingError::construction(format!(
                    "exactly one of volatility and observed value must be supplied; \
                     got volatility {} and observed value {}",
                    sigma, value
                )));
            }
            (None, None) => {
                return Err(PricingError::construction(
                    "exactly one of volatility and observed value must be supplied; got neither",
                ));
            }
        };

        Ok(OptionParameters {
            spot,
            strike,
            rate,
            expiry,
            dividend_yield,
            input,
            side: self.side.unwrap_or_default(),
        })
    }
}

fn required(name: &str, value: Option<f64>) -> Result<f64, PricingError> {
    let value = value.ok_or_else(|| PricingError::construction(format!("{} is required", name)))?;
    finite(name, value)
}

fn finite(name: &str, value: f64) -> Result<f64, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::construction(format!(
            "{} must be finite, got {}",
            name, value
        )))
    }
}

fn positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::construction(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}
