//! Search filter construction.
//!
//! Turns the loosely-typed `limit`, `since` and `bbox` query parameters into a
//! [`SearchFilter`]: limit clamped to `[MIN_LIMIT, MAX_LIMIT]`, `since` parsed
//! to an instant, bbox validated. Parameters are validated in the order
//! limit, since, bbox and the first failure is returned.

use chrono::{DateTime, Utc};

use crate::bbox::{parse_bbox, BoundingBox};
use crate::defaults::{DEFAULT_LIMIT, MAX_LIMIT, MIN_LIMIT};
use crate::error::{Error, Result};

/// Everything the store needs to run one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchFilter {
    limit: i64,
    /// Inclusive lower bound on `created_at`.
    pub since: Option<DateTime<Utc>>,
    pub bbox: Option<BoundingBox>,
}

impl SearchFilter {
    /// Build a filter, clamping `limit` into range.
    pub fn new(limit: i64, since: Option<DateTime<Utc>>, bbox: Option<BoundingBox>) -> Self {
        Self {
            limit: clamp_limit(limit),
            since,
            bbox,
        }
    }

    /// Build a filter from raw query-string values.
    pub fn from_params(
        limit: Option<&str>,
        since: Option<&str>,
        bbox: Option<&str>,
    ) -> Result<Self> {
        let limit = parse_limit(limit)?;
        let since = parse_since(since)?;
        let bbox = parse_bbox(bbox)?;
        Ok(Self::new(limit, since, bbox))
    }

    /// Effective limit, always within `[MIN_LIMIT, MAX_LIMIT]`.
    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn has_since(&self) -> bool {
        self.since.is_some()
    }

    pub fn has_bbox(&self) -> bool {
        self.bbox.is_some()
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, None, None)
    }
}

/// Clamp a requested limit into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(limit: i64) -> i64 {
    limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Parse the raw `limit` parameter.
///
/// Absent or blank input yields [`DEFAULT_LIMIT`]. The result is not clamped.
pub fn parse_limit(raw: Option<&str>) -> Result<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_LIMIT),
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| Error::InvalidLimit(s.to_string())),
    }
}

/// Parse the raw `since` parameter as an RFC 3339 / ISO-8601 date-time with
/// offset, normalized to UTC.
///
/// Absent or blank input yields `None`. A `+hh:mm` offset whose `+` arrived
/// form-decoded as a space is accepted.
pub fn parse_since(raw: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let s = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(s) => s,
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }

    restore_plus_offset(s)
        .and_then(|fixed| DateTime::parse_from_rfc3339(&fixed).ok())
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .ok_or_else(|| Error::InvalidSince(s.to_string()))
}

/// `2024-01-15T10:30:00 05:00` -> `2024-01-15T10:30:00+05:00`
fn restore_plus_offset(s: &str) -> Option<String> {
    let idx = s.rfind(' ')?;
    let offset = &s[idx + 1..];
    let looks_like_offset = offset.len() == 5
        && offset.as_bytes()[2] == b':'
        && offset
            .bytes()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !looks_like_offset {
        return None;
    }
    Some(format!("{}+{}", &s[..idx], offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BboxError;
    use chrono::TimeZone;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(0), 1);
        assert_eq!(clamp_limit(-5), 1);
        assert_eq!(clamp_limit(i64::MIN), 1);
        assert_eq!(clamp_limit(1), 1);
        assert_eq!(clamp_limit(50), 50);
        assert_eq!(clamp_limit(100), 100);
        assert_eq!(clamp_limit(101), 100);
        assert_eq!(clamp_limit(500), 100);
        assert_eq!(clamp_limit(i64::MAX), 100);
    }

    #[test]
    fn test_clamp_matches_min_max_formula() {
        for limit in -10..=120 {
            assert_eq!(clamp_limit(limit), limit.max(1).min(100));
        }
    }

    #[test]
    fn test_parse_limit_default() {
        assert_eq!(parse_limit(None).unwrap(), 100);
        assert_eq!(parse_limit(Some("")).unwrap(), 100);
        assert_eq!(parse_limit(Some("  ")).unwrap(), 100);
    }

    #[test]
    fn test_parse_limit_integers_not_clamped() {
        assert_eq!(parse_limit(Some("0")).unwrap(), 0);
        assert_eq!(parse_limit(Some("-3")).unwrap(), -3);
        assert_eq!(parse_limit(Some("500")).unwrap(), 500);
    }

    #[test]
    fn test_parse_limit_rejects_non_integers() {
        for raw in ["abc", "1.5", "10a", "1e3"] {
            let err = parse_limit(Some(raw)).unwrap_err();
            assert!(matches!(err, Error::InvalidLimit(ref s) if s == raw), "{}", raw);
        }
    }

    #[test]
    fn test_parse_since_absent() {
        assert_eq!(parse_since(None).unwrap(), None);
        assert_eq!(parse_since(Some(" ")).unwrap(), None);
    }

    #[test]
    fn test_parse_since_utc() {
        let dt = parse_since(Some("2024-01-15T10:30:00Z")).unwrap().unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_since_offset_normalized_to_utc() {
        let dt = parse_since(Some("2024-01-15T10:30:00-05:00"))
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_since_form_decoded_plus() {
        let dt = parse_since(Some("2024-01-15T10:30:00 02:00"))
            .unwrap()
            .unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_since_rejects_garbage() {
        for raw in ["yesterday", "2024-01-15", "2024-01-15T10:30:00", "7d"] {
            let err = parse_since(Some(raw)).unwrap_err();
            assert!(matches!(err, Error::InvalidSince(_)), "{}", raw);
        }
    }

    #[test]
    fn test_from_params_defaults() {
        let filter = SearchFilter::from_params(None, None, None).unwrap();
        assert_eq!(filter, SearchFilter::default());
        assert_eq!(filter.limit(), 100);
        assert!(!filter.has_since());
        assert!(!filter.has_bbox());
    }

    #[test]
    fn test_from_params_clamps() {
        assert_eq!(
            SearchFilter::from_params(Some("0"), None, None)
                .unwrap()
                .limit(),
            1
        );
        assert_eq!(
            SearchFilter::from_params(Some("500"), None, None)
                .unwrap()
                .limit(),
            100
        );
    }

    #[test]
    fn test_from_params_all_filters() {
        let filter = SearchFilter::from_params(
            Some("25"),
            Some("2024-06-01T00:00:00Z"),
            Some("-74,40,-73,41"),
        )
        .unwrap();
        assert_eq!(filter.limit(), 25);
        assert!(filter.has_since());
        assert!(filter.has_bbox());
    }

    #[test]
    fn test_from_params_bbox_error() {
        let err = SearchFilter::from_params(None, None, Some("1,2,3")).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidBbox(BboxError::WrongFieldCount)
        ));
    }

    #[test]
    fn test_from_params_limit_checked_first() {
        let err = SearchFilter::from_params(Some("abc"), Some("bad"), Some("1,2,3")).unwrap_err();
        assert!(matches!(err, Error::InvalidLimit(_)));
    }
}
