//! Sensitivity sweeps: option value tabulated against one varying input.
//!
//! This module provides:
//! - [`sweep_over_spot`]: value against spot, ascending
//! - [`sweep_over_volatility`]: value against volatility, ascending
//! - [`sweep_over_time`]: value against remaining calendar days, descending
//!
//! Grid points where the varied input leaves the pricing domain (a spot or
//! volatility at or below zero) are omitted from the curve. The time sweep
//! covers at most [`MAX_TIME_SWEEP_DAYS`] days.

mod config;

pub use config::{SweepConfig, SweepConfigBuilder};

use optoprice_core::types::{OptionParameters, PricingError, CALENDAR_DAYS_PER_YEAR};

use crate::analytical::{value_with, BlackScholes, PricingOverrides};

/// Longest time sweep, in calendar days (100 years).
pub const MAX_TIME_SWEEP_DAYS: u64 = 36_500;

/// The input varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SweepAxis {
    /// Underlying price
    Spot,
    /// Volatility (decimal)
    Volatility,
    /// Remaining calendar days to expiry
    Time,
}

impl SweepAxis {
    /// Key naming the independent variable in serialised curve points.
    pub fn key(&self) -> &'static str {
        match self {
            SweepAxis::Spot => "S",
            SweepAxis::Volatility => "vol",
            SweepAxis::Time => "t",
        }
    }
}

/// One `(independent value, option value)` pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Value of the varied input
    pub x: f64,
    /// Option value at `x`
    pub value: f64,
}

/// Ordered option values across a grid of one input.
///
/// Serialises as a list of `{S, V}`, `{vol, V}` or `{t, V}` objects depending
/// on the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SensitivityCurve {
    axis: SweepAxis,
    points: Vec<CurvePoint>,
}

impl SensitivityCurve {
    /// The varied input.
    pub fn axis(&self) -> SweepAxis {
        self.axis
    }

    /// Points in curve order.
    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, CurvePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a SensitivityCurve {
    type Item = &'a CurvePoint;
    type IntoIter = std::slice::Iter<'a, CurvePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SensitivityCurve {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        struct Entry<'a>(&'a str, &'a CurvePoint);

        impl serde::Serialize for Entry<'_> {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(self.0, &self.1.x)?;
                map.serialize_entry("V", &self.1.value)?;
                map.end()
            }
        }

        let key = self.axis.key();
        let mut seq = serializer.serialize_seq(Some(self.points.len()))?;
        for point in &self.points {
            seq.serialize_element(&Entry(key, point))?;
        }
        seq.end()
    }
}

/// Values the contract across a spot grid centred on its own spot.
///
/// σ, T and every other input stay fixed. Points are in ascending spot order.
///
/// # Errors
/// - `PricingError::MissingVolatility` / `PricingError::InvalidDomain` if the
///   contract itself cannot be priced
/// - `PricingError::Construction` for an invalid `config`
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::sensitivity::{sweep_over_spot, SweepConfig};
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .expiry(0.25)
///     .volatility(0.2)
///     .build()
///     .unwrap();
///
/// let curve = sweep_over_spot(&params, &SweepConfig::spot()).unwrap();
/// assert_eq!(curve.len(), 80);
/// assert!((curve.points()[40].x - 100.0).abs() < 1e-12);
/// ```
pub fn sweep_over_spot(
    params: &OptionParameters,
    config: &SweepConfig,
) -> Result<SensitivityCurve, PricingError> {
    config.validate()?;
    BlackScholes::new(params)?;

    let spot = params.spot();
    let points = collect_points(
        "spot",
        config.offsets().map(|offset| spot + offset),
        |x| value_with(params, PricingOverrides::default().spot(x)),
    )?;

    Ok(SensitivityCurve {
        axis: SweepAxis::Spot,
        points,
    })
}

/// Values the contract across a volatility grid centred on its own volatility.
///
/// S, T and every other input stay fixed. Points are in ascending volatility order.
///
/// # Errors
/// As for [`sweep_over_spot`].
pub fn sweep_over_volatility(
    params: &OptionParameters,
    config: &SweepConfig,
) -> Result<SensitivityCurve, PricingError> {
    config.validate()?;
    let volatility = BlackScholes::new(params)?.volatility();

    let points = collect_points(
        "volatility",
        config.offsets().map(|offset| volatility + offset),
        |x| value_with(params, PricingOverrides::default().volatility(x)),
    )?;

    Ok(SensitivityCurve {
        axis: SweepAxis::Volatility,
        points,
    })
}

/// Values the contract as time passes, one calendar day at a time.
///
/// Starting from `round(T·365)` remaining days and counting down to 1, each
/// point is `(remaining days, value at remaining days / 365)`. A contract with
/// less than half a day left yields an empty curve.
///
/// # Errors
/// - `PricingError::MissingVolatility` / `PricingError::InvalidDomain` if the
///   contract itself cannot be priced
/// - `PricingError::Construction` if more than [`MAX_TIME_SWEEP_DAYS`] days remain
///
/// # Examples
/// ```
/// use optoprice_core::types::OptionParameters;
/// use optoprice_models::sensitivity::sweep_over_time;
///
/// let params = OptionParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .expiry(9.0 / 365.0)
///     .volatility(0.8)
///     .build()
///     .unwrap();
///
/// let curve = sweep_over_time(&params).unwrap();
/// let days: Vec<f64> = curve.iter().map(|p| p.x).collect();
/// assert_eq!(days, vec![9.0, 8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);
/// ```
pub fn sweep_over_time(params: &OptionParameters) -> Result<SensitivityCurve, PricingError> {
    BlackScholes::new(params)?;

    let days = (params.expiry() * CALENDAR_DAYS_PER_YEAR).round();
    if days > MAX_TIME_SWEEP_DAYS as f64 {
        return Err(PricingError::construction(format!(
            "time sweep over {} days exceeds the {} day limit",
            days, MAX_TIME_SWEEP_DAYS
        )));
    }
    let days = days as u64;
    let points = collect_points(
        "expiry",
        (1..=days).rev().map(|d| d as f64),
        |remaining| {
            value_with(
                params,
                PricingOverrides::default().expiry(remaining / CALENDAR_DAYS_PER_YEAR),
            )
        },
    )?;

    Ok(SensitivityCurve {
        axis: SweepAxis::Time,
        points,
    })
}

fn collect_points<I, F>(
    parameter: &str,
    grid: I,
    mut price: F,
) -> Result<Vec<CurvePoint>, PricingError>
where
    I: Iterator<Item = f64>,
    F: FnMut(f64) -> Result<f64, PricingError>,
{
    let mut points = Vec::new();
    for x in grid {
        match price(x) {
            Ok(value) => points.push(CurvePoint { x, value }),
            Err(PricingError::InvalidDomain { value, .. }) => {
                tracing::debug!(parameter, value, "sweep point outside pricing domain, omitted");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(points)
}
