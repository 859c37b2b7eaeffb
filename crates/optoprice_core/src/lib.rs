//! # optoprice_core: Foundation Types for Vanilla Option Analytics
//!
//! ## Layer 1 (Foundation) Role
//!
//! optoprice_core is the bottom layer of the workspace, providing:
//! - Option contract inputs: `OptionParameters`, `OptionSide` (`types::option`)
//! - Year basis and unit normalisation for boundary inputs (`types::time`)
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//! - Root-finding: ratio fixed-point iteration (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other optoprice_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use optoprice_core::types::{OptionParameters, OptionSide, YearBasis};
//!
//! let basis = YearBasis::default();
//! let params = OptionParameters::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.05)
//!     .expiry(basis.year_fraction(30.0))
//!     .dividend_yield(0.01)
//!     .volatility(0.25)
//!     .side(OptionSide::Call)
//!     .build()
//!     .unwrap();
//!
//! // Scenario variants are new values; the original is untouched
//! let bumped = params.with_spot(101.0);
//! assert_eq!(params.spot(), 100.0);
//! assert_eq!(bumped.spot(), 101.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for OptionSide, OptionParameters and errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
