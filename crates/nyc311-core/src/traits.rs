//! Core traits for nyc311 abstractions.
//!
//! The HTTP layer depends on these traits rather than on PostgreSQL directly,
//! which lets tests run the full request pipeline against an in-memory store.

use async_trait::async_trait;

use crate::error::Result;
use crate::filter::SearchFilter;
use crate::models::ServiceRequest;

/// Read-only access to persisted service requests.
#[async_trait]
pub trait ServiceRequestRepository: Send + Sync {
    /// Return at most `filter.limit()` records matching every present filter,
    /// ordered by `created_at` descending then `id` descending.
    ///
    /// A record matches when `since` is absent or `created_at >= since`, and
    /// the bbox is absent or the record has a location inside the closed
    /// rectangle. Failures surface as [`crate::Error::StoreUnavailable`].
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ServiceRequest>>;

    /// Cheap round-trip used by health checks.
    async fn ping(&self) -> Result<()>;
}
