//! OpenAPI description served at `/openapi.json`.

use axum::Json;
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers;
use crate::response::{ListRequestsResponse, Location, ServiceRequestItem};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NYC 311 Requests API",
        description = "Read-only listing of geotagged 311 service requests"
    ),
    paths(handlers::requests::list_requests, handlers::health::health_check),
    components(schemas(ListRequestsResponse, ServiceRequestItem, Location, ErrorBody)),
    tags(
        (name = "Requests", description = "Service request listing"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
