//! HTTP handlers for nyc311-api.

pub mod health;
pub mod requests;

pub use health::health_check;
pub use requests::list_requests;
