//! HTTP error mapping
//!
//! Rejections are a 400 with a JSON body `{error, message}`; `error` is a
//! stable machine-readable code and `message` the human-readable description.
//! A pricing task that fails to complete is a 500 with the same body.

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use optoprice_core::types::PricingError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinError;

/// Errors returned by API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// The pricing library rejected the request
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// The query string could not be parsed
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// The pricing task was cancelled or panicked
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable description
    pub message: String,
}

impl ApiError {
    /// Stable error code for the response body
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Pricing(PricingError::Construction { .. }) => "construction_error",
            ApiError::Pricing(PricingError::InvalidDomain { .. }) => "invalid_domain",
            ApiError::Pricing(PricingError::InvalidSide { .. }) => "invalid_side",
            ApiError::Pricing(PricingError::MissingVolatility) => "missing_volatility",
            ApiError::Pricing(PricingError::MissingObservedValue) => "missing_observed_value",
            ApiError::InvalidQuery(_) => "invalid_query",
            ApiError::Internal(_) => "internal_error",
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<JoinError> for ApiError {
    fn from(error: JoinError) -> Self {
        ApiError::Internal(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(_) => {
                tracing::error!(error = self.code(), message = %self, "Request failed")
            }
            _ => tracing::warn!(error = self.code(), message = %self, "Request rejected"),
        }

        let body = ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
