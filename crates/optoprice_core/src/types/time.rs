//! Year basis and unit normalisation.
//!
//! Library code works in years and decimals throughout. Callers that receive
//! expiries in days or rates in percent (such as the HTTP service) convert
//! once at the boundary with [`YearBasis::year_fraction`] and
//! [`percent_to_decimal`].

use super::error::PricingError;

/// Calendar days in a year.
///
/// Used as the theta divisor and as the day count for time sweeps.
pub const CALENDAR_DAYS_PER_YEAR: f64 = 365.0;

/// Day count used to convert between days and year fractions.
///
/// # Examples
/// ```
/// use optoprice_core::types::YearBasis;
///
/// let basis = YearBasis::default();
/// assert_eq!(basis.year_fraction(365.0), 1.0);
///
/// let trading = YearBasis::new(252.0).unwrap();
/// assert_eq!(trading.days(0.5), 126.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearBasis {
    days_in_year: f64,
}

impl Default for YearBasis {
    fn default() -> Self {
        Self {
            days_in_year: CALENDAR_DAYS_PER_YEAR,
        }
    }
}

impl YearBasis {
    /// Creates a basis with the given number of days per year.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Construction`] if `days_in_year` is not a
    /// finite positive number.
    pub fn new(days_in_year: f64) -> Result<Self, PricingError> {
        if !days_in_year.is_finite() || days_in_year <= 0.0 {
            return Err(PricingError::construction(format!(
                "days_in_year must be finite and positive, got {}",
                days_in_year
            )));
        }
        Ok(Self { days_in_year })
    }

    /// Days per year for this basis.
    #[inline]
    pub fn days_in_year(&self) -> f64 {
        self.days_in_year
    }

    /// Converts a number of days to a year fraction.
    #[inline]
    pub fn year_fraction(&self, days: f64) -> f64 {
        days / self.days_in_year
    }

    /// Converts a year fraction to a number of days.
    #[inline]
    pub fn days(&self, years: f64) -> f64 {
        years * self.days_in_year
    }
}

/// Converts a percentage (5.0) to a decimal (0.05).
#[inline]
pub fn percent_to_decimal(percent: f64) -> f64 {
    percent / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_default_is_calendar() {
        let basis = YearBasis::default();
        assert_eq!(basis.days_in_year(), CALENDAR_DAYS_PER_YEAR);
        assert_relative_eq!(basis.year_fraction(30.0), 30.0 / 365.0);
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert!(YearBasis::new(0.0).is_err());
        assert!(YearBasis::new(-365.0).is_err());
        assert!(YearBasis::new(f64::NAN).is_err());
        assert!(YearBasis::new(f64::INFINITY).is_err());
        assert!(YearBasis::new(360.0).is_ok());
    }

    #[test]
    fn test_percent_to_decimal() {
        assert_relative_eq!(percent_to_decimal(5.0), 0.05);
        assert_relative_eq!(percent_to_decimal(-1.5), -0.015);
        assert_eq!(percent_to_decimal(0.0), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_days_round_trip(days in 0.0f64..10_000.0, basis in 200.0f64..400.0) {
            let basis = YearBasis::new(basis).unwrap();
            let back = basis.days(basis.year_fraction(days));
            prop_assert!((back - days).abs() <= 1e-9 * days.max(1.0));
        }
    }
}
