//! Service request repository backed by PostgreSQL + PostGIS.
//!
//! One parameterized statement serves every filter combination. Each optional
//! predicate is switched off by a NULL/false parameter.

use std::time::Instant;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use nyc311_core::defaults::SRID_WGS84;
use nyc311_core::{
    Error, GeoPoint, Result, SearchFilter, ServiceRequest, ServiceRequestRepository,
};

/// Filtered listing in keyset order.
///
/// `ST_Covers` rather than `ST_Contains` so points on the envelope edge
/// match. A NULL `geom` makes `ST_Covers` NULL, which excludes the row.
const SEARCH_SQL: &str = r#"
    SELECT id, external_id, created_at, closed_at,
           status, agency, complaint_type, descriptor,
           ST_X(geom) AS lon, ST_Y(geom) AS lat,
           raw
    FROM service_requests
    WHERE ($2::timestamptz IS NULL OR created_at >= $2)
      AND (NOT $3::boolean
           OR ST_Covers(
                ST_MakeEnvelope($4::float8, $5::float8, $6::float8, $7::float8, $8::int),
                geom))
    ORDER BY created_at DESC, id DESC
    LIMIT $1
"#;

/// PostgreSQL service request repository.
#[derive(Clone)]
pub struct PgServiceRequestRepository {
    pool: Pool<Postgres>,
}

impl PgServiceRequestRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn map_row(row: PgRow) -> std::result::Result<ServiceRequest, sqlx::Error> {
        Ok(ServiceRequest {
            id: row.try_get("id")?,
            external_id: row.try_get("external_id")?,
            created_at: row.try_get("created_at")?,
            closed_at: row.try_get("closed_at")?,
            status: row.try_get("status")?,
            agency: row.try_get("agency")?,
            complaint_type: row.try_get("complaint_type")?,
            descriptor: row.try_get("descriptor")?,
            location: GeoPoint::from_columns(row.try_get("lon")?, row.try_get("lat")?),
            raw: row.try_get("raw")?,
        })
    }
}

#[async_trait]
impl ServiceRequestRepository for PgServiceRequestRepository {
    async fn search(&self, filter: &SearchFilter) -> Result<Vec<ServiceRequest>> {
        let start = Instant::now();
        let bbox = filter.bbox;

        let rows = sqlx::query(SEARCH_SQL)
            .bind(filter.limit())
            .bind(filter.since)
            .bind(bbox.is_some())
            .bind(bbox.map(|b| b.min_lon()))
            .bind(bbox.map(|b| b.min_lat()))
            .bind(bbox.map(|b| b.max_lon()))
            .bind(bbox.map(|b| b.max_lat()))
            .bind(SRID_WGS84)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::StoreUnavailable)?;

        let results = rows
            .into_iter()
            .map(Self::map_row)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(Error::StoreUnavailable)?;

        debug!(
            subsystem = "database",
            component = "service_requests",
            op = "search",
            limit = filter.limit(),
            has_since = filter.has_since(),
            has_bbox = filter.has_bbox(),
            result_count = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Service request search complete"
        );

        Ok(results)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(Error::StoreUnavailable)?;
        Ok(())
    }
}
