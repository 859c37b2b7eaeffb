//! Route modules for the optoprice server
//!
//! - valuation: option value, Greeks and sensitivity sweeps
//! - implied_vol: implied volatility from an observed value
//! - health: health check and readiness endpoints

pub mod health;
pub mod implied_vol;
pub mod query;
pub mod valuation;

use axum::Router;
use optoprice_models::implied_vol::ImpliedVolConfig;
use optoprice_models::report::ReportSweeps;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
    /// Sweep grids for valuation reports
    pub sweeps: ReportSweeps,
    /// Solver settings for implied volatility
    pub implied_vol: ImpliedVolConfig,
}

impl AppState {
    /// Create a new AppState with the default sweep grids and solver settings
    pub fn new(config: Arc<ServerConfig>) -> Self {
        Self {
            config,
            start_time: std::time::Instant::now(),
            sweeps: ReportSweeps::default(),
            implied_vol: ImpliedVolConfig::default(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(config: Arc<ServerConfig>) -> Router {
    let state = AppState::new(config);

    Router::new()
        .merge(health::routes())
        .merge(valuation::routes())
        .merge(implied_vol::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
