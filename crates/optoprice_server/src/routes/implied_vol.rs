//! Implied volatility endpoint
//!
//! `GET /api/v1/implied_volatility?S=&K=&r=&t=&V=&q=&days_in_year=&type=`
//! inverts the observed value `V` as a call price, a put price, or both.
//! A solve that stops without converging is still a 200; the `converged`
//! flag of each side reports it.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use optoprice_models::report::{implied_volatility_report, ImpliedVolReport};

use super::query::OptionQuery;
use super::AppState;
use crate::error::ApiError;

/// Build the implied volatility routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/implied_volatility", get(implied_volatility_handler))
}

/// GET /api/v1/implied_volatility
async fn implied_volatility_handler(
    State(state): State<AppState>,
    query: Result<Query<OptionQuery>, QueryRejection>,
) -> Result<Json<ImpliedVolReport>, ApiError> {
    let Query(query) = query?;
    tracing::debug!(?query, "Implied volatility request");

    let selection = query.selection()?;
    let params = query.implied_vol_params(state.config.days_in_year)?;
    let config = state.implied_vol;
    let report = tokio::task::spawn_blocking(move || {
        implied_volatility_report(&params, selection, &config)
    })
    .await??;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use approx::assert_abs_diff_eq;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn get(uri: &str) -> (StatusCode, Value) {
        let router = routes().with_state(AppState::new(Arc::new(ServerConfig::default())));
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_default_request_solves_both_sides() {
        let (status, body) = get("/api/v1/implied_volatility").await;

        assert_eq!(status, StatusCode::OK);
        // V=10 on S=K=100, r=1%, t=9d
        assert_abs_diff_eq!(body["call"]["s"].as_f64().unwrap(), 1.5987, epsilon = 1e-3);
        assert_abs_diff_eq!(body["put"]["s"].as_f64().unwrap(), 1.6027, epsilon = 1e-3);
        assert_eq!(body["call"]["converged"], true);
        assert!(body["call"]["iterations"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_recovers_the_pricing_volatility() {
        // 3.018663 is the call value at σ=25% for these terms
        let (status, body) =
            get("/api/v1/implied_volatility?S=100&K=100&r=5&t=30&q=1&V=3.018663&type=call").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("put").is_none());
        assert_abs_diff_eq!(body["call"]["s"].as_f64().unwrap(), 0.25, epsilon = 1e-3);
    }

    #[tokio::test]
    async fn test_non_convergence_is_reported_not_rejected() {
        let (status, body) = get("/api/v1/implied_volatility?K=200&V=1&type=call").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["call"]["converged"], false);
    }

    #[tokio::test]
    async fn test_rejections() {
        let (status, body) = get("/api/v1/implied_volatility?type=both&V=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_query");

        let (status, body) = get("/api/v1/implied_volatility?type=strangle").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_side");

        let (status, _) = get("/api/v1/implied_volatility?days_in_year=-1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
