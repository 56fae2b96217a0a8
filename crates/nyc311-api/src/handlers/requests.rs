//! `GET /requests`: list recent service requests.
//!
//! Pipeline: raw query string → [`SearchFilter`] (limit clamped, `since`
//! parsed, bbox validated) → one store search → [`ListRequestsResponse`].
//! Validation always completes before the store is touched.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use nyc311_core::SearchFilter;

use crate::error::{ApiError, ErrorBody};
use crate::response::ListRequestsResponse;
use crate::AppState;

/// Raw query parameters. Kept as strings so every parse failure is reported
/// through [`ApiError`] as a JSON body.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListRequestsQuery {
    /// Maximum number of items; clamped to 1..=100. Defaults to 100.
    pub limit: Option<String>,
    /// Only requests created at or after this ISO-8601 date-time (with offset).
    pub since: Option<String>,
    /// Bounding box `minLon,minLat,maxLon,maxLat` in WGS84 degrees.
    pub bbox: Option<String>,
}

/// List service requests, newest first.
///
/// GET /requests
#[utoipa::path(get, path = "/requests", tag = "Requests",
    params(ListRequestsQuery),
    responses(
        (status = 200, description = "Matching requests", body = ListRequestsResponse),
        (status = 400, description = "Invalid query parameter", body = ErrorBody),
        (status = 503, description = "Store unavailable", body = ErrorBody),
    ))]
pub async fn list_requests(
    State(state): State<AppState>,
    query: Result<Query<ListRequestsQuery>, QueryRejection>,
) -> Result<Json<ListRequestsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let filter = SearchFilter::from_params(
        query.limit.as_deref(),
        query.since.as_deref(),
        query.bbox.as_deref(),
    )
    .map_err(|e| {
        debug!(
            subsystem = "api",
            component = "requests_handler",
            op = "validate",
            error = %e,
            "Rejected request parameters"
        );
        ApiError::from(e)
    })?;

    let rows = state.repository.search(&filter).await?;

    debug!(
        subsystem = "api",
        component = "requests_handler",
        op = "search",
        limit = filter.limit(),
        has_since = filter.has_since(),
        has_bbox = filter.has_bbox(),
        result_count = rows.len(),
        "Listed service requests"
    );

    Ok(Json(ListRequestsResponse::from_rows(&rows)))
}
