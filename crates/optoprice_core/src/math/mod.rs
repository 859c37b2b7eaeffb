//! Numerical methods.
//!
//! - `solvers`: Root-finding for implied volatility

pub mod solvers;
