//! Response shapes for valuation and implied-volatility requests.
//!
//! A request names a contract once and asks for the call, the put, or both.
//! The reports below evaluate each selected side and lay the results out as
//!
//! ```text
//! { call: {value, delta, gamma, theta, vega, rho, epsilon, vanna},
//!   put:  {...},
//!   sensitivity_V_wrt_S:   {call: [{S, V}, ...],   put: [...]},
//!   sensitivity_V_wrt_vol: {call: [{vol, V}, ...], put: [...]},
//!   sensitivity_V_wrt_t:   {call: [{t, V}, ...],   put: [...]} }
//! ```
//!
//! and `{ call: {s, iterations, converged}, put: {...} }`. Sides that were not
//! selected are left out.

use std::fmt;
use std::str::FromStr;

use optoprice_core::types::{OptionParameters, OptionSide, PricingError};

use crate::analytical::{BlackScholes, Greeks};
use crate::implied_vol::{implied_volatility, ImpliedVolConfig};
use crate::sensitivity::{
    sweep_over_spot, sweep_over_time, sweep_over_volatility, SensitivityCurve, SweepConfig,
};

/// Which sides a request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SideSelection {
    /// Call only
    Call,
    /// Put only
    Put,
    /// Call and put
    #[default]
    Both,
}

impl SideSelection {
    /// Sides to evaluate, call first.
    pub fn sides(&self) -> &'static [OptionSide] {
        match self {
            SideSelection::Call => &[OptionSide::Call],
            SideSelection::Put => &[OptionSide::Put],
            SideSelection::Both => &OptionSide::ALL,
        }
    }
}

impl From<OptionSide> for SideSelection {
    fn from(side: OptionSide) -> Self {
        match side {
            OptionSide::Call => SideSelection::Call,
            OptionSide::Put => SideSelection::Put,
        }
    }
}

impl FromStr for SideSelection {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(SideSelection::Both);
        }
        s.parse::<OptionSide>().map(SideSelection::from)
    }
}

impl fmt::Display for SideSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SideSelection::Call => f.write_str("call"),
            SideSelection::Put => f.write_str("put"),
            SideSelection::Both => f.write_str("both"),
        }
    }
}

/// A value per selected side.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerSide<T> {
    /// Call entry, if selected
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub call: Option<T>,
    /// Put entry, if selected
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub put: Option<T>,
}

impl<T> Default for PerSide<T> {
    fn default() -> Self {
        Self {
            call: None,
            put: None,
        }
    }
}

impl<T> PerSide<T> {
    /// Entry for `side`.
    pub fn get(&self, side: OptionSide) -> Option<&T> {
        match side {
            OptionSide::Call => self.call.as_ref(),
            OptionSide::Put => self.put.as_ref(),
        }
    }

    fn set(&mut self, side: OptionSide, value: T) {
        match side {
            OptionSide::Call => self.call = Some(value),
            OptionSide::Put => self.put = Some(value),
        }
    }

    /// Evaluates `f` for every selected side, stopping at the first error.
    pub fn try_build<E, F>(selection: SideSelection, mut f: F) -> Result<Self, E>
    where
        F: FnMut(OptionSide) -> Result<T, E>,
    {
        let mut out = Self::default();
        for &side in selection.sides() {
            out.set(side, f(side)?);
        }
        Ok(out)
    }
}

/// Value and Greeks of one side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SideValuation {
    /// Option value
    pub value: f64,
    /// Analytical Greeks, serialised inline
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub greeks: Greeks,
}

/// Sweep grids used by [`value_report`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportSweeps {
    /// Spot grid
    pub spot: SweepConfig,
    /// Volatility grid
    pub volatility: SweepConfig,
}

impl Default for ReportSweeps {
    fn default() -> Self {
        Self {
            spot: SweepConfig::spot(),
            volatility: SweepConfig::volatility(),
        }
    }
}

/// Valuation response.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValuationReport {
    /// Value and Greeks per side
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub valuation: PerSide<SideValuation>,
    /// Value against spot
    #[cfg_attr(feature = "serde", serde(rename = "sensitivity_V_wrt_S"))]
    pub spot_sensitivity: PerSide<SensitivityCurve>,
    /// Value against volatility
    #[cfg_attr(feature = "serde", serde(rename = "sensitivity_V_wrt_vol"))]
    pub volatility_sensitivity: PerSide<SensitivityCurve>,
    /// Value against remaining days
    #[cfg_attr(feature = "serde", serde(rename = "sensitivity_V_wrt_t"))]
    pub time_sensitivity: PerSide<SensitivityCurve>,
}

/// Implied volatility of one side.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SideImpliedVol {
    /// Solved volatility
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    pub volatility: f64,
    /// Solver updates applied
    pub iterations: usize,
    /// Whether the solver met its precision
    pub converged: bool,
}

/// Implied-volatility response.
pub type ImpliedVolReport = PerSide<SideImpliedVol>;

/// Values the selected sides of a contract, with Greeks and the three sweeps.
///
/// The side carried by `params` is ignored in favour of `selection`.
///
/// # Errors
/// The first pricing error met on any selected side.
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::report::{value_report, ReportSweeps, SideSelection};
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.01)
///     .expiry(9.0 / 365.0)
///     .volatility(0.8)
///     .build()
///     .unwrap();
///
/// let report = value_report(&params, SideSelection::Put, &ReportSweeps::default()).unwrap();
/// assert!(report.valuation.call.is_none());
/// assert_eq!(report.time_sensitivity.put.as_ref().unwrap().len(), 9);
/// ```
pub fn value_report(
    params: &OptionParameters,
    selection: SideSelection,
    sweeps: &ReportSweeps,
) -> Result<ValuationReport, PricingError> {
    let for_side = |side: OptionSide| params.with_side(side);

    let valuation = PerSide::try_build(selection, |side| {
        let bs = BlackScholes::new(&for_side(side))?;
        Ok::<_, PricingError>(SideValuation {
            value: bs.price(),
            greeks: bs.greeks(),
        })
    })?;

    Ok(ValuationReport {
        valuation,
        spot_sensitivity: PerSide::try_build(selection, |side| {
            sweep_over_spot(&for_side(side), &sweeps.spot)
        })?,
        volatility_sensitivity: PerSide::try_build(selection, |side| {
            sweep_over_volatility(&for_side(side), &sweeps.volatility)
        })?,
        time_sensitivity: PerSide::try_build(selection, |side| sweep_over_time(&for_side(side)))?,
    })
}

/// Solves implied volatility for the selected sides of a contract.
///
/// The same observed value is inverted as a call price and as a put price.
///
/// # Errors
/// The first error from [`implied_volatility`].
pub fn implied_volatility_report(
    params: &OptionParameters,
    selection: SideSelection,
    config: &ImpliedVolConfig,
) -> Result<ImpliedVolReport, PricingError> {
    PerSide::try_build(selection, |side| {
        let result = implied_volatility(&params.with_side(side), config)?;
        Ok::<_, PricingError>(SideImpliedVol {
            volatility: result.volatility,
            iterations: result.iterations,
            converged: result.converged,
        })
    })
}
