//! Liveness/readiness endpoint.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tracing::warn;

use crate::AppState;

/// Report whether the backing store answers a trivial query.
///
/// GET /health
#[utoipa::path(get, path = "/health", tag = "Health",
    responses(
        (status = 200, description = "Store reachable"),
        (status = 503, description = "Store unreachable"),
    ))]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (status, label) = match state.repository.ping().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!(subsystem = "api", component = "health", error = %e, "Store ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": label,
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
