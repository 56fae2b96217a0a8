//! Response bodies for `GET /requests`.
//!
//! Field declaration order is the serialized key order, which clients rely on.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use nyc311_core::{GeoPoint, ServiceRequest};

/// Geographic point of a service request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

impl From<GeoPoint> for Location {
    fn from(point: GeoPoint) -> Self {
        Self {
            lon: point.lon,
            lat: point.lat,
        }
    }
}

/// One service request as exposed by the API.
///
/// `id`, `closed_at` and `raw` are intentionally absent. `location` is always
/// serialized, as `null` when the record has no point.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ServiceRequestItem {
    pub external_id: String,
    /// RFC 3339 timestamp with offset.
    pub created_at: DateTime<Utc>,
    pub status: Option<String>,
    pub agency: Option<String>,
    pub complaint_type: Option<String>,
    pub descriptor: Option<String>,
    pub location: Option<Location>,
}

impl From<&ServiceRequest> for ServiceRequestItem {
    fn from(r: &ServiceRequest) -> Self {
        Self {
            external_id: r.external_id.clone(),
            created_at: r.created_at,
            status: r.status.clone(),
            agency: r.agency.clone(),
            complaint_type: r.complaint_type.clone(),
            descriptor: r.descriptor.clone(),
            location: r.location.map(Location::from),
        }
    }
}

/// Body of a successful `GET /requests`.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListRequestsResponse {
    pub items: Vec<ServiceRequestItem>,
    /// Reserved for cursor pagination; always `null`.
    pub next_token: Option<String>,
}

impl ListRequestsResponse {
    /// Map store rows, preserving their order.
    pub fn from_rows(rows: &[ServiceRequest]) -> Self {
        Self {
            items: rows.iter().map(ServiceRequestItem::from).collect(),
            next_token: None,
        }
    }
}
