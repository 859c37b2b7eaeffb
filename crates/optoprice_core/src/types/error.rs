//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Errors from parameter construction, pricing and side parsing
//! - `SolverError`: Errors from root-finding solver configuration
//!
//! Solver non-convergence is not an error. It is reported through the
//! `converged` flag of the solver outcome alongside the last estimate.

use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for option pricing with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `Construction`: `OptionParameters` built with an invalid field combination
/// - `InvalidDomain`: A pricing input left the domain of the closed-form formula
/// - `InvalidSide`: An option side other than call or put was requested
/// - `MissingVolatility`: Pricing requested without any volatility
/// - `MissingObservedValue`: Implied volatility requested without a market price
///
/// # Examples
/// ```
/// use optoprice_core::types::PricingError;
///
/// let err = PricingError::invalid_domain("volatility", -0.2);
/// assert_eq!(format!("{}", err), "Invalid domain: volatility = -0.2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Parameters violate a construction invariant.
    #[error("Construction error: {message}")]
    Construction {
        /// Description of the violated invariant
        message: String,
    },

    /// A pricing input is outside the domain where ln, sqrt or division are defined.
    #[error("Invalid domain: {parameter} = {value}")]
    InvalidDomain {
        /// Name of the offending input
        parameter: String,
        /// The offending value
        value: f64,
    },

    /// Unknown option side.
    #[error("Invalid side: '{side}' (expected 'call' or 'put')")]
    InvalidSide {
        /// The rejected side string
        side: String,
    },

    /// Parameters carry an observed value but no volatility to price with.
    #[error("Missing volatility: parameters carry an observed value only")]
    MissingVolatility,

    /// Parameters carry a volatility but no observed value to invert.
    #[error("Missing observed value: parameters carry a volatility only")]
    MissingObservedValue,
}

impl PricingError {
    /// Creates a [`PricingError::Construction`] error.
    pub fn construction(message: impl Into<String>) -> Self {
        Self::Construction {
            message: message.into(),
        }
    }

    /// Creates a [`PricingError::InvalidDomain`] error.
    pub fn invalid_domain(parameter: impl Into<String>, value: f64) -> Self {
        Self::InvalidDomain {
            parameter: parameter.into(),
            value,
        }
    }
}

/// Root-finding solver errors.
///
/// # Examples
/// ```
/// use optoprice_core::types::SolverError;
///
/// let err = SolverError::InvalidConfig { message: "precision must be positive".to_string() };
/// assert!(format!("{}", err).contains("precision"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver configuration is out of range.
    #[error("Invalid solver configuration: {message}")]
    InvalidConfig {
        /// Description of the invalid setting
        message: String,
    },
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        PricingError::Construction {
            message: err.to_string(),
        }
    }
}
