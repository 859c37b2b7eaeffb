//! Option valuation endpoint
//!
//! `GET /api/v1/option_value?S=&K=&r=&t=&s=&q=&days_in_year=&type=` returns
//! the value and Greeks of each requested side together with the spot,
//! volatility and time sweeps.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use optoprice_models::report::{value_report, ValuationReport};

use super::query::OptionQuery;
use super::AppState;
use crate::error::ApiError;

/// Build the valuation routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/option_value", get(option_value_handler))
}

/// GET /api/v1/option_value
async fn option_value_handler(
    State(state): State<AppState>,
    query: Result<Query<OptionQuery>, QueryRejection>,
) -> Result<Json<ValuationReport>, ApiError> {
    let Query(query) = query?;
    tracing::debug!(?query, "Valuation request");

    let selection = query.selection()?;
    let params = query.valuation_params(state.config.days_in_year)?;
    let sweeps = state.sweeps;
    let report =
        tokio::task::spawn_blocking(move || value_report(&params, selection, &sweeps)).await??;

    Ok(Json(report))
}
