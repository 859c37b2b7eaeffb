//! Closed-form Black-Scholes-Merton analytics for European options.
//!
//! This module provides:
//! - `distributions`: Standard normal CDF/PDF on a fixed erf approximation
//! - `black_scholes`: d1/d2 and prices for calls and puts with a continuous dividend yield
//! - `greeks`: Delta, gamma, theta, vega, rho, epsilon and vanna
//!
//! Every function takes an [`OptionParameters`](optoprice_core::types::OptionParameters)
//! and switches on its side; there is no per-side type hierarchy.

pub mod black_scholes;
pub mod distributions;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::{value, value_with, BlackScholes, PricingOverrides};
pub use distributions::{erf_approx, norm_cdf, norm_pdf};
pub use greeks::{greeks, valuate, Greeks, ValuationResult};
