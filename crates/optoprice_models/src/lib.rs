//! # Optoprice Models (L2: Business Logic)
//!
//! Black-Scholes-Merton analytics for European vanilla options on an
//! underlying with a continuous dividend yield.
//!
//! This crate provides:
//! - Closed-form prices and analytical Greeks (`analytical`)
//! - Sensitivity sweeps over spot, volatility and time (`sensitivity`)
//! - Implied volatility by damped fixed-point iteration (`implied_vol`)
//! - Finite-difference consistency checks for the Greeks (`verify`)
//! - Rayon batch evaluation over many contracts (`parallel`)
//! - Response shapes for call/put/both requests (`report`)
//!
//! ## Design Principles
//!
//! - **Tagged sides**: every formula switches on `OptionSide`; there is no
//!   per-side type
//! - **Immutable inputs**: what-if scenarios are new `OptionParameters` values
//!   or pricing overrides, never edits of a shared value
//! - **Errors, not NaN**: inputs outside the formula's domain are reported as
//!   `PricingError::InvalidDomain` before any logarithm or square root is taken

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod implied_vol;
pub mod parallel;
pub mod report;
pub mod sensitivity;
pub mod verify;
