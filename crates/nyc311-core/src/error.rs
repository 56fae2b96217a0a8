//! Error types for the nyc311 request API.

use thiserror::Error;

/// Result type alias using nyc311's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a `bbox` query parameter is rejected.
///
/// The `Display` strings are returned verbatim to API clients.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BboxError {
    /// Did not split into exactly four comma-separated fields.
    #[error("bbox must be 'minLon,minLat,maxLon,maxLat'")]
    WrongFieldCount,

    /// At least one field is not a floating-point number.
    #[error("bbox values must be numbers")]
    NonNumeric,

    /// `min_lon >= max_lon` or `min_lat >= max_lat`.
    #[error("bbox must have min<max for both lon and lat")]
    BadOrdering,

    /// A bound falls outside longitude [-180, 180] or latitude [-90, 90].
    #[error("bbox out of WGS84 range")]
    OutOfRange,
}

/// Core error type for nyc311 operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The bounding box filter failed validation
    #[error("{0}")]
    InvalidBbox(#[from] BboxError),

    /// The limit parameter is not an integer (holds the raw value)
    #[error("limit must be an integer")]
    InvalidLimit(String),

    /// The since parameter is not an ISO-8601 date-time (holds the raw value)
    #[error("since must be an ISO-8601 date-time with offset")]
    InvalidSince(String),

    /// The backing store could not be reached or the query failed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for errors caused by caller input rather than infrastructure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidBbox(_) | Error::InvalidLimit(_) | Error::InvalidSince(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bbox_error_messages() {
        assert_eq!(
            BboxError::WrongFieldCount.to_string(),
            "bbox must be 'minLon,minLat,maxLon,maxLat'"
        );
        assert_eq!(BboxError::NonNumeric.to_string(), "bbox values must be numbers");
        assert_eq!(
            BboxError::BadOrdering.to_string(),
            "bbox must have min<max for both lon and lat"
        );
        assert_eq!(BboxError::OutOfRange.to_string(), "bbox out of WGS84 range");
    }

    #[test]
    fn test_invalid_bbox_displays_reason_only() {
        let err: Error = BboxError::OutOfRange.into();
        assert_eq!(err.to_string(), "bbox out of WGS84 range");
    }

    #[test]
    fn test_invalid_limit_hides_raw_value() {
        let err = Error::InvalidLimit("abc".to_string());
        assert_eq!(err.to_string(), "limit must be an integer");
        assert!(format!("{:?}", err).contains("abc"));
    }

    #[test]
    fn test_invalid_since_display() {
        let err = Error::InvalidSince("yesterday".to_string());
        assert_eq!(
            err.to_string(),
            "since must be an ISO-8601 date-time with offset"
        );
    }

    #[test]
    fn test_store_unavailable_from_sqlx() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert!(err.to_string().starts_with("Store unavailable:"));
    }

    #[test]
    fn test_is_validation() {
        assert!(Error::from(BboxError::NonNumeric).is_validation());
        assert!(Error::InvalidLimit("x".into()).is_validation());
        assert!(Error::InvalidSince("x".into()).is_validation());
        assert!(!Error::StoreUnavailable(sqlx::Error::PoolClosed).is_validation());
        assert!(!Error::Config("bad".into()).is_validation());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
