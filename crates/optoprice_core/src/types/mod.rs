//! Option contract, time and error types.
//!
//! This module provides:
//! - `option`: `OptionSide` and the immutable `OptionParameters` value with its builder
//! - `time`: `YearBasis` and percentage conversion for inputs crossing the service boundary
//! - `error`: Structured error types for pricing and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionParameters`], [`OptionParametersBuilder`], [`OptionSide`], [`PricingInput`] from `option`
//! - [`YearBasis`], [`percent_to_decimal`], [`CALENDAR_DAYS_PER_YEAR`] from `time`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod option;
pub mod time;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use option::{OptionParameters, OptionParametersBuilder, OptionSide, PricingInput};
pub use time::{percent_to_decimal, YearBasis, CALENDAR_DAYS_PER_YEAR};
