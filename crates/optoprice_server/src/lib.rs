//! REST API server for the optoprice pricing library
//!
//! This crate exposes the valuation and implied-volatility reports of
//! `optoprice_models` over HTTP:
//!
//! - `GET /api/v1/option_value` prices a contract for the call, the put or
//!   both, with Greeks and the spot/volatility/time sweeps
//! - `GET /api/v1/implied_volatility` inverts an observed option value
//! - `GET /health` and `GET /ready` for load balancers
//!
//! Query parameters arrive in market units (rates and volatilities in whole
//! percent, time in days) and are normalised before any pricing call.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export pricer dependencies for integration
pub use optoprice_core;
pub use optoprice_models;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
