//! Centralized default constants for the nyc311 request API.
//!
//! Every crate references these instead of defining its own magic numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Limit used when the caller omits `limit`.
pub const DEFAULT_LIMIT: i64 = 100;

/// Smallest effective limit after clamping.
pub const MIN_LIMIT: i64 = 1;

/// Largest effective limit after clamping.
pub const MAX_LIMIT: i64 = 100;

// =============================================================================
// GEOGRAPHY
// =============================================================================

/// Spatial reference identifier for WGS84 longitude/latitude.
pub const SRID_WGS84: i32 = 4326;

pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host for the HTTP server.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port for the HTTP server.
pub const SERVER_PORT: u16 = 8080;

/// Default database URL when `DATABASE_URL` is not set.
pub const DATABASE_URL: &str = "postgres://localhost/nyc311";

/// Default CORS origin list.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000";
