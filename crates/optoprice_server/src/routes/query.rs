//! Query-string parameters shared by the pricing endpoints
//!
//! Rates, volatilities and dividend yields arrive in whole percent (`80`
//! meaning 80%) and time in days to expiry. They are converted to decimals
//! and year fractions here, before an `OptionParameters` is built.

use optoprice_core::types::{
    percent_to_decimal, OptionParameters, OptionParametersBuilder, PricingError, YearBasis,
};
use optoprice_models::report::SideSelection;
use serde::Deserialize;

/// Spot used when `S` is omitted
pub const DEFAULT_SPOT: f64 = 100.0;
/// Strike used when `K` is omitted
pub const DEFAULT_STRIKE: f64 = 100.0;
/// Rate in percent used when `r` is omitted
pub const DEFAULT_RATE_PERCENT: f64 = 1.0;
/// Days to expiry used when `t` is omitted
pub const DEFAULT_DAYS: f64 = 9.0;
/// Volatility in percent used when `s` is omitted
pub const DEFAULT_VOLATILITY_PERCENT: f64 = 80.0;
/// Dividend yield in percent used when `q` is omitted
pub const DEFAULT_DIVIDEND_PERCENT: f64 = 0.0;
/// Observed option value used when `V` is omitted
pub const DEFAULT_OBSERVED_VALUE: f64 = 10.0;

/// Contract description as it arrives on the query string
///
/// Every field is optional; omitted fields take the defaults above, and
/// `days_in_year` falls back to the server's configured year basis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptionQuery {
    /// Spot price
    #[serde(rename = "S")]
    pub spot: Option<f64>,
    /// Strike price
    #[serde(rename = "K")]
    pub strike: Option<f64>,
    /// Risk-free rate in percent
    pub r: Option<f64>,
    /// Days to expiry
    pub t: Option<f64>,
    /// Volatility in percent (valuation only)
    pub s: Option<f64>,
    /// Dividend yield in percent
    pub q: Option<f64>,
    /// Observed option value (implied volatility only)
    #[serde(rename = "V")]
    pub observed_value: Option<f64>,
    /// Year basis for `t`
    pub days_in_year: Option<f64>,
    /// `call`, `put` or `both`
    #[serde(rename = "type")]
    pub side: Option<String>,
}

impl OptionQuery {
    /// Requested sides; `both` when omitted
    pub fn selection(&self) -> Result<SideSelection, PricingError> {
        match &self.side {
            Some(side) => side.parse(),
            None => Ok(SideSelection::Both),
        }
    }

    /// Contract priced at the requested volatility
    pub fn valuation_params(&self, default_days_in_year: f64) -> Result<OptionParameters, PricingError> {
        let volatility = self.s.unwrap_or(DEFAULT_VOLATILITY_PERCENT);
        self.contract(default_days_in_year)?
            .volatility(percent_to_decimal(volatility))
            .build()
    }

    /// Contract carrying the observed value to invert
    pub fn implied_vol_params(
        &self,
        default_days_in_year: f64,
    ) -> Result<OptionParameters, PricingError> {
        self.contract(default_days_in_year)?
            .observed_value(self.observed_value.unwrap_or(DEFAULT_OBSERVED_VALUE))
            .build()
    }

    fn contract(&self, default_days_in_year: f64) -> Result<OptionParametersBuilder, PricingError> {
        let basis = YearBasis::new(self.days_in_year.unwrap_or(default_days_in_year))?;

        Ok(OptionParameters::builder()
            .spot(self.spot.unwrap_or(DEFAULT_SPOT))
            .strike(self.strike.unwrap_or(DEFAULT_STRIKE))
            .rate(percent_to_decimal(self.r.unwrap_or(DEFAULT_RATE_PERCENT)))
            .expiry(basis.year_fraction(self.t.unwrap_or(DEFAULT_DAYS)))
            .dividend_yield(percent_to_decimal(
                self.q.unwrap_or(DEFAULT_DIVIDEND_PERCENT),
            )))
    }
}
