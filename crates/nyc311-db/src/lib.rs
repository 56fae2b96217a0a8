//! # nyc311-db
//!
//! PostgreSQL + PostGIS data-access layer for the nyc311 request API.
//!
//! This crate provides:
//! - Connection pool management
//! - [`PgServiceRequestRepository`], the read-only spatial/temporal search
//! - Bundled schema migrations (feature `migrations`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use nyc311_db::{Database, SearchFilter, ServiceRequestRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/nyc311").await?;
//!     let filter = SearchFilter::from_params(Some("10"), None, Some("-74,40,-73,41"))?;
//!     for row in db.service_requests.search(&filter).await? {
//!         println!("{} {}", row.external_id, row.created_at);
//!     }
//!     Ok(())
//! }
//! ```
pub mod pool;
pub mod service_requests;

// Test fixtures for integration tests
// Note: Always compiled so integration tests (in tests/) can use DEFAULT_TEST_DATABASE_URL
pub mod test_fixtures;

// Re-export core types
pub use nyc311_core::*;

pub use pool::{
    create_lazy_pool, create_pool, create_pool_with_config, log_pool_metrics, PoolConfig,
};
pub use service_requests::PgServiceRequestRepository;

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Read-only service request search.
    pub service_requests: PgServiceRequestRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            service_requests: PgServiceRequestRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::StoreUnavailable(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
