//! Domain records read from the service request store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A WGS84 longitude/latitude pair.
///
/// Serializes as `{"lon": .., "lat": ..}` in that key order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Build a point from nullable store columns.
    ///
    /// Returns `None` unless both coordinates are present.
    pub fn from_columns(lon: Option<f64>, lat: Option<f64>) -> Option<Self> {
        match (lon, lat) {
            (Some(lon), Some(lat)) => Some(Self { lon, lat }),
            _ => None,
        }
    }
}

/// One 311 complaint record, as loaded from `service_requests`.
///
/// Records are written by the ingestion process; this crate never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRequest {
    /// Store-assigned surrogate key. Used only as an ordering tiebreak.
    pub id: i64,
    /// Stable upstream identifier, unique across all records.
    pub external_id: String,
    pub created_at: DateTime<Utc>,
    /// Null while the request is open.
    pub closed_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub agency: Option<String>,
    pub complaint_type: Option<String>,
    pub descriptor: Option<String>,
    /// Null when the source record carried no usable coordinates.
    pub location: Option<GeoPoint>,
    /// Original source payload; never surfaced in API responses.
    pub raw: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_serializes_lon_then_lat() {
        let json = serde_json::to_string(&GeoPoint::new(-73.9, 40.7)).unwrap();
        assert_eq!(json, r#"{"lon":-73.9,"lat":40.7}"#);
    }

    #[test]
    fn test_from_columns_requires_both() {
        assert_eq!(
            GeoPoint::from_columns(Some(-73.9), Some(40.7)),
            Some(GeoPoint::new(-73.9, 40.7))
        );
        assert_eq!(GeoPoint::from_columns(None, Some(40.7)), None);
        assert_eq!(GeoPoint::from_columns(Some(-73.9), None), None);
        assert_eq!(GeoPoint::from_columns(None, None), None);
    }
}
