//! # nyc311-core
//!
//! Core types, validation, and trait definitions for the nyc311 service
//! request API.
//!
//! This crate owns every decision the API makes about a request: bounding
//! box validation, limit clamping, `since` parsing, and the error taxonomy.
//! Persistence and HTTP live in `nyc311-db` and `nyc311-api`.

pub mod bbox;
pub mod defaults;
pub mod error;
pub mod filter;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use bbox::{parse_bbox, BoundingBox};
pub use error::{BboxError, Error, Result};
pub use filter::{clamp_limit, parse_limit, parse_since, SearchFilter};
pub use models::{GeoPoint, ServiceRequest};
pub use traits::ServiceRequestRepository;
