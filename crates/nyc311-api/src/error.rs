//! HTTP error mapping.
//!
//! Every error leaves the API as `{"error": "<message>"}`. Validation
//! messages are passed through verbatim; store failures are logged here and
//! replaced with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Message returned in place of internal store diagnostics.
pub const STORE_UNAVAILABLE_MESSAGE: &str = "service unavailable";

/// Message returned for unexpected internal failures.
pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// API error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{}", STORE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable,

    /// Non-request failures, currently only `Error::Config`. Config errors are
    /// raised at startup, so handlers do not produce this today.
    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal,
}

/// JSON error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    #[schema(example = "bbox out of WGS84 range")]
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<nyc311_core::Error> for ApiError {
    fn from(err: nyc311_core::Error) -> Self {
        use nyc311_core::Error;

        match err {
            Error::InvalidBbox(_) | Error::InvalidLimit(_) | Error::InvalidSince(_) => {
                ApiError::BadRequest(err.to_string())
            }
            Error::StoreUnavailable(ref source) => {
                error!(
                    subsystem = "api",
                    component = "error",
                    error = %source,
                    "Store query failed"
                );
                ApiError::ServiceUnavailable
            }
            Error::Config(ref msg) => {
                error!(subsystem = "api", component = "error", error = %msg, "Configuration error");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}
