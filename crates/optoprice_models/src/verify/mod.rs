//! Finite-difference consistency checks for the analytical Greeks.
//!
//! Each check reprices freshly built copies of the contract with one input
//! bumped up and down, predicts the repriced quantity from the analytical
//! Greek, and reports the larger of the two prediction errors:
//!
//! ```text
//! error = max(|f(x) + g·h − f(x + h)|, |f(x) − g·h − f(x − h)|)
//! ```
//!
//! where `g·h` is expressed in the Greek's quoting units (per day, per
//! percentage point). Vanna is checked twice, as ∂delta/∂σ and as ∂vega/∂S.

mod config;

pub use config::{BumpSizes, ConsistencyTolerances};

use std::fmt;

use optoprice_core::types::{OptionParameters, PricingError, CALENDAR_DAYS_PER_YEAR};

use crate::analytical::{greeks, value};

/// The relation a check exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GreekCheck {
    /// ∂V/∂S
    Delta,
    /// ∂delta/∂S
    Gamma,
    /// ∂V/∂t
    Theta,
    /// ∂V/∂σ
    Vega,
    /// ∂V/∂r
    Rho,
    /// ∂V/∂q
    Epsilon,
    /// ∂delta/∂σ
    VannaViaDelta,
    /// ∂vega/∂S
    VannaViaVega,
}

impl fmt::Display for GreekCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GreekCheck::Delta => "delta",
            GreekCheck::Gamma => "gamma",
            GreekCheck::Theta => "theta",
            GreekCheck::Vega => "vega",
            GreekCheck::Rho => "rho",
            GreekCheck::Epsilon => "epsilon",
            GreekCheck::VannaViaDelta => "vanna (via delta)",
            GreekCheck::VannaViaVega => "vanna (via vega)",
        };
        f.write_str(name)
    }
}

/// Result of one consistency check.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckOutcome {
    /// Which relation was checked
    pub greek: GreekCheck,
    /// Analytical Greek, in its quoting units
    pub analytic: f64,
    /// Greek implied by the worse one-sided difference, same units
    pub finite_difference: f64,
    /// Worse absolute prediction error
    pub error: f64,
    /// Threshold the error was held against
    pub tolerance: f64,
    /// `error < tolerance`
    pub passed: bool,
}

/// Validates analytical Greeks against bumped repricing.
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::verify::ConsistencyChecker;
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
/// let outcomes = ConsistencyChecker::default().check_all(&params).unwrap();
/// assert_eq!(outcomes.len(), 8);
/// assert!(outcomes.iter().all(|o| o.passed));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConsistencyChecker {
    bumps: BumpSizes,
    tolerances: ConsistencyTolerances,
}

impl ConsistencyChecker {
    /// Creates a checker with explicit bumps and thresholds.
    pub fn new(bumps: BumpSizes, tolerances: ConsistencyTolerances) -> Self {
        Self { bumps, tolerances }
    }

    /// Bump sizes in use.
    pub fn bumps(&self) -> &BumpSizes {
        &self.bumps
    }

    /// Thresholds in use.
    pub fn tolerances(&self) -> &ConsistencyTolerances {
        &self.tolerances
    }

    /// Delta against spot-bumped values.
    pub fn check_delta(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.spot;
        let s = params.spot();
        Ok(compare(
            GreekCheck::Delta,
            greeks(params)?.delta,
            value(params)?,
            value(&params.with_spot(s + h))?,
            value(&params.with_spot(s - h))?,
            h,
            self.tolerances.delta,
        ))
    }

    /// Gamma against spot-bumped deltas.
    pub fn check_gamma(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.gamma_spot;
        let s = params.spot();
        let base = greeks(params)?;
        Ok(compare(
            GreekCheck::Gamma,
            base.gamma,
            base.delta,
            greeks(&params.with_spot(s + h))?.delta,
            greeks(&params.with_spot(s - h))?.delta,
            h,
            self.tolerances.gamma,
        ))
    }

    /// Theta against expiry-bumped values.
    ///
    /// Lengthening the expiry runs time backwards, so the prediction for the
    /// longer-dated value is `V − θ·days`.
    pub fn check_theta(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let days = self.bumps.time_days;
        let dt = days / CALENDAR_DAYS_PER_YEAR;
        let t = params.expiry();
        Ok(compare(
            GreekCheck::Theta,
            greeks(params)?.theta,
            value(params)?,
            value(&params.with_expiry(t + dt))?,
            value(&params.with_expiry(t - dt))?,
            -days,
            self.tolerances.theta,
        ))
    }

    /// Vega against volatility-bumped values.
    pub fn check_vega(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.volatility;
        let sigma = params.volatility().ok_or(PricingError::MissingVolatility)?;
        Ok(compare(
            GreekCheck::Vega,
            greeks(params)?.vega,
            value(params)?,
            value(&params.with_volatility(sigma + h))?,
            value(&params.with_volatility(sigma - h))?,
            h * 100.0,
            self.tolerances.vega,
        ))
    }

    /// Rho against rate-bumped values.
    pub fn check_rho(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.rate;
        let r = params.rate();
        Ok(compare(
            GreekCheck::Rho,
            greeks(params)?.rho,
            value(params)?,
            value(&params.with_rate(r + h))?,
            value(&params.with_rate(r - h))?,
            h * 100.0,
            self.tolerances.rho,
        ))
    }

    /// Epsilon against dividend-yield-bumped values.
    pub fn check_epsilon(&self, params: &OptionParameters) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.dividend_yield;
        let q = params.dividend_yield();
        Ok(compare(
            GreekCheck::Epsilon,
            greeks(params)?.epsilon,
            value(params)?,
            value(&params.with_dividend_yield(q + h))?,
            value(&params.with_dividend_yield(q - h))?,
            h * 100.0,
            self.tolerances.epsilon,
        ))
    }

    /// Vanna against volatility-bumped deltas.
    pub fn check_vanna_via_delta(
        &self,
        params: &OptionParameters,
    ) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.vanna_volatility;
        let sigma = params.volatility().ok_or(PricingError::MissingVolatility)?;
        let base = greeks(params)?;
        Ok(compare(
            GreekCheck::VannaViaDelta,
            base.vanna,
            base.delta,
            greeks(&params.with_volatility(sigma + h))?.delta,
            greeks(&params.with_volatility(sigma - h))?.delta,
            h,
            self.tolerances.vanna_via_delta,
        ))
    }

    /// Vanna against spot-bumped vegas.
    ///
    /// Vega is quoted per percentage point, so the predicted vega change is
    /// `vanna·h/100`.
    pub fn check_vanna_via_vega(
        &self,
        params: &OptionParameters,
    ) -> Result<CheckOutcome, PricingError> {
        let h = self.bumps.vanna_spot;
        let s = params.spot();
        let base = greeks(params)?;
        Ok(compare(
            GreekCheck::VannaViaVega,
            base.vanna,
            base.vega,
            greeks(&params.with_spot(s + h))?.vega,
            greeks(&params.with_spot(s - h))?.vega,
            h / 100.0,
            self.tolerances.vanna_via_vega,
        ))
    }

    /// Runs every check, in declaration order.
    pub fn check_all(&self, params: &OptionParameters) -> Result<Vec<CheckOutcome>, PricingError> {
        Ok(vec![
            self.check_delta(params)?,
            self.check_gamma(params)?,
            self.check_theta(params)?,
            self.check_vega(params)?,
            self.check_rho(params)?,
            self.check_epsilon(params)?,
            self.check_vanna_via_delta(params)?,
            self.check_vanna_via_vega(params)?,
        ])
    }
}

/// Compares `base ± analytic·scale` against the repriced `up` / `down`.
fn compare(
    greek: GreekCheck,
    analytic: f64,
    base: f64,
    up: f64,
    down: f64,
    scale: f64,
    tolerance: f64,
) -> CheckOutcome {
    let step = analytic * scale;
    let error_up = (base + step - up).abs();
    let error_down = (base - step - down).abs();

    let (error, finite_difference) = if error_up >= error_down {
        (error_up, (up - base) / scale)
    } else {
        (error_down, (base - down) / scale)
    };

    CheckOutcome {
        greek,
        analytic,
        finite_difference,
        error,
        tolerance,
        passed: error < tolerance,
    }
}
