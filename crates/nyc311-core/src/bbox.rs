//! Bounding box parsing and validation.
//!
//! A bbox arrives as the raw `minLon,minLat,maxLon,maxLat` query string and is
//! turned into a [`BoundingBox`] whose invariants hold by construction:
//! `min_lon < max_lon`, `min_lat < max_lat`, and every bound inside WGS84.
//!
//! Checks run in a fixed order (field count, numeric, ordering, range) so a
//! given input always reports the same reason.

use serde::Serialize;

use crate::defaults::{MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
use crate::error::BboxError;
use crate::models::GeoPoint;

/// Axis-aligned WGS84 rectangle used as a spatial filter.
///
/// Fields are private; the only way to obtain one is through [`BoundingBox::new`]
/// or [`parse_bbox`], both of which validate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    min_lon: f64,
    min_lat: f64,
    max_lon: f64,
    max_lat: f64,
}

impl BoundingBox {
    /// Validate four bounds into a rectangle.
    pub fn new(
        min_lon: f64,
        min_lat: f64,
        max_lon: f64,
        max_lat: f64,
    ) -> Result<Self, BboxError> {
        // Written as a negated conjunction so NaN bounds are rejected here.
        if !(min_lon < max_lon && min_lat < max_lat) {
            return Err(BboxError::BadOrdering);
        }
        if min_lon < MIN_LON || max_lon > MAX_LON || min_lat < MIN_LAT || max_lat > MAX_LAT {
            return Err(BboxError::OutOfRange);
        }
        Ok(Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        })
    }

    pub fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub fn max_lon(&self) -> f64 {
        self.max_lon
    }

    pub fn max_lat(&self) -> f64 {
        self.max_lat
    }

    /// Closed-rectangle containment: points on an edge are inside.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.lon)
            && (self.min_lat..=self.max_lat).contains(&point.lat)
    }
}

/// Parse an optional raw `bbox` parameter.
///
/// Absent, empty, or whitespace-only input means "no spatial filter" and
/// yields `Ok(None)`.
pub fn parse_bbox(raw: Option<&str>) -> Result<Option<BoundingBox>, BboxError> {
    let raw = match raw {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(None),
    };

    // Trailing empty fields are dropped before counting, so `a,b,c,d,` has
    // four fields. Empty fields elsewhere still count.
    let parts: Vec<&str> = raw.trim_end_matches(',').split(',').collect();
    if parts.len() != 4 {
        return Err(BboxError::WrongFieldCount);
    }

    let mut values = [0.0_f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|_| BboxError::NonNumeric)?;
    }
    let [min_lon, min_lat, max_lon, max_lat] = values;

    BoundingBox::new(min_lon, min_lat, max_lon, max_lat).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_or_blank_is_no_filter() {
        assert_eq!(parse_bbox(None), Ok(None));
        assert_eq!(parse_bbox(Some("")), Ok(None));
        assert_eq!(parse_bbox(Some("   ")), Ok(None));
    }

    #[test]
    fn test_valid_bbox() {
        let bbox = parse_bbox(Some("-74,40,-73,41")).unwrap().unwrap();
        assert_eq!(bbox.min_lon(), -74.0);
        assert_eq!(bbox.min_lat(), 40.0);
        assert_eq!(bbox.max_lon(), -73.0);
        assert_eq!(bbox.max_lat(), 41.0);
    }

    #[test]
    fn test_tokens_are_trimmed() {
        let bbox = parse_bbox(Some(" -74 , 40.5,-73.25 ,41 ")).unwrap().unwrap();
        assert_eq!(bbox.min_lat(), 40.5);
        assert_eq!(bbox.max_lon(), -73.25);
    }

    #[test]
    fn test_three_fields_rejected() {
        assert_eq!(parse_bbox(Some("1,2,3")), Err(BboxError::WrongFieldCount));
    }

    #[test]
    fn test_five_fields_rejected() {
        assert_eq!(
            parse_bbox(Some("-74,40,-73,41,0")),
            Err(BboxError::WrongFieldCount)
        );
        assert_eq!(
            parse_bbox(Some("-74,40,,-73,41")),
            Err(BboxError::WrongFieldCount)
        );
    }

    #[test]
    fn test_trailing_commas_ignored() {
        let expected = BoundingBox::new(-74.0, 40.0, -73.0, 41.0).unwrap();
        assert_eq!(parse_bbox(Some("-74,40,-73,41,")), Ok(Some(expected)));
        assert_eq!(parse_bbox(Some("-74,40,-73,41,,")), Ok(Some(expected)));
    }

    #[test]
    fn test_only_commas_rejected() {
        assert_eq!(parse_bbox(Some(",,,,")), Err(BboxError::WrongFieldCount));
        assert_eq!(parse_bbox(Some(",,,1")), Err(BboxError::NonNumeric));
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert_eq!(
            parse_bbox(Some("-74,forty,-73,41")),
            Err(BboxError::NonNumeric)
        );
        assert_eq!(parse_bbox(Some("-74,,-73,41")), Err(BboxError::NonNumeric));
    }

    #[test]
    fn test_field_count_checked_before_numeric() {
        assert_eq!(parse_bbox(Some("a,b,c")), Err(BboxError::WrongFieldCount));
    }

    #[test]
    fn test_equal_lon_rejected_with_ordering_error() {
        assert_eq!(
            parse_bbox(Some("-74,40,-74,41")),
            Err(BboxError::BadOrdering)
        );
    }

    #[test]
    fn test_inverted_lat_rejected_with_ordering_error() {
        assert_eq!(
            parse_bbox(Some("-74,41,-73,40")),
            Err(BboxError::BadOrdering)
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(
            parse_bbox(Some("-200,40,-73,41")),
            Err(BboxError::OutOfRange)
        );
        assert_eq!(parse_bbox(Some("-74,40,181,41")), Err(BboxError::OutOfRange));
        assert_eq!(parse_bbox(Some("-74,-91,-73,41")), Err(BboxError::OutOfRange));
        assert_eq!(parse_bbox(Some("-74,40,-73,90.5")), Err(BboxError::OutOfRange));
    }

    #[test]
    fn test_ordering_checked_before_range() {
        // Both inverted and out of range: ordering wins.
        assert_eq!(
            parse_bbox(Some("200,40,-200,41")),
            Err(BboxError::BadOrdering)
        );
    }

    #[test]
    fn test_full_world_is_valid() {
        assert!(parse_bbox(Some("-180,-90,180,90")).unwrap().is_some());
    }

    #[test]
    fn test_nan_rejected_with_ordering_error() {
        assert_eq!(
            parse_bbox(Some("NaN,40,-73,41")),
            Err(BboxError::BadOrdering)
        );
    }

    #[test]
    fn test_contains_is_closed() {
        let bbox = BoundingBox::new(-74.0, 40.0, -73.0, 41.0).unwrap();
        assert!(bbox.contains(&GeoPoint::new(-73.9, 40.7)));
        assert!(bbox.contains(&GeoPoint::new(-74.0, 40.0)));
        assert!(bbox.contains(&GeoPoint::new(-73.0, 41.0)));
        assert!(!bbox.contains(&GeoPoint::new(-72.99, 40.5)));

        let narrow = BoundingBox::new(-73.8, 40.0, -73.7, 41.0).unwrap();
        assert!(!narrow.contains(&GeoPoint::new(-73.9, 40.7)));
    }
}
