//! PostgreSQL implementation of the store gateway.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tokio::sync::Mutex;

use super::models::{
    CREATE_EARTHQUAKES_TABLE, CREATE_ORIGIN_TIME_INDEX, EARTHQUAKE_COLUMNS, EarthquakeRow,
};
use super::{EventRepository, EventStore};
use crate::config::DatabaseConfig;
use crate::domain::{EventFilter, EventRecord, EventStats, ReportId};
use crate::error::StoreError;

/// PostgreSQL-backed persistence layer using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    /// Creates a new persistence layer with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] if the database is unreachable.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the `earthquakes` table and its index if they are missing.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError::Database`] on database failure.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_EARTHQUAKES_TABLE)
            .execute(&self.pool)
            .await?;
        sqlx::query(CREATE_ORIGIN_TIME_INDEX)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl EventRepository for PostgresPersistence {
    async fn begin_session(&self) -> Result<Box<dyn EventStore>, StoreError> {
        let conn = self.pool.acquire().await?;
        Ok(Box::new(PostgresSession {
            conn: Mutex::new(conn),
        }))
    }

    async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError> {
        let mut query: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {EARTHQUAKE_COLUMNS} FROM earthquakes WHERE TRUE"));

        if let Some(min) = filter.min_magnitude {
            query.push(" AND magnitude >= ").push_bind(min);
        }
        if let Some((start, end)) = filter.date_bounds() {
            query
                .push(" AND origin_time >= ")
                .push_bind(start)
                .push(" AND origin_time < ")
                .push_bind(end);
        }
        query.push(" ORDER BY origin_time DESC NULLS LAST, report_id DESC");
        if let Some(limit) = filter.limit {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let rows = query
            .build_query_as::<EarthquakeRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    async fn get(&self, report_id: &ReportId) -> Result<Option<EventRecord>, StoreError> {
        let row = sqlx::query_as::<_, EarthquakeRow>(&format!(
            "SELECT {EARTHQUAKE_COLUMNS} FROM earthquakes WHERE report_id = $1"
        ))
        .bind(report_id.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(EventRecord::from))
    }

    async fn recent(&self, since: DateTime<Utc>) -> Result<Vec<EventRecord>, StoreError> {
        let rows = sqlx::query_as::<_, EarthquakeRow>(&format!(
            "SELECT {EARTHQUAKE_COLUMNS} FROM earthquakes \
             WHERE origin_time >= $1 ORDER BY origin_time DESC, report_id DESC"
        ))
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(EventRecord::from).collect())
    }

    async fn stats(&self, since: DateTime<Utc>) -> Result<EventStats, StoreError> {
        let (total, recent, max_magnitude, average_magnitude, latest_origin_time) =
            sqlx::query_as::<_, (i64, i64, Option<f64>, Option<f64>, Option<DateTime<Utc>>)>(
                "SELECT COUNT(*), COUNT(*) FILTER (WHERE origin_time >= $1), \
                 MAX(magnitude), AVG(magnitude), MAX(origin_time) FROM earthquakes",
            )
            .bind(since)
            .fetch_one(&self.pool)
            .await?;

        Ok(EventStats {
            total,
            recent,
            max_magnitude,
            average_magnitude,
            latest_origin_time,
        })
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// One pooled connection held for the duration of a sync run.
///
/// The connection returns to the pool when the session is dropped.
pub struct PostgresSession {
    conn: Mutex<PoolConnection<Postgres>>,
}

impl std::fmt::Debug for PostgresSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSession").finish_non_exhaustive()
    }
}

#[async_trait]
impl EventStore for PostgresSession {
    async fn exists(&self, report_id: &ReportId) -> Result<bool, StoreError> {
        let mut conn = self.conn.lock().await;
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM earthquakes WHERE report_id = $1)",
        )
        .bind(report_id.as_str())
        .fetch_one(&mut **conn)
        .await?;
        Ok(exists)
    }

    async fn insert(&self, record: &EventRecord) -> Result<(), StoreError> {
        let mut conn = self.conn.lock().await;
        sqlx::query(
            "INSERT INTO earthquakes (report_id, origin_time, arrival_time, magnitude, \
             depth_km, depth_reported, latitude, longitude, max_intensity, jp_location, \
             en_location, jp_comment, en_comment, tsunami_risk) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
        )
        .bind(record.report_id.as_str())
        .bind(record.origin_time)
        .bind(record.arrival_time)
        .bind(record.magnitude)
        .bind(record.depth_km)
        .bind(record.depth_reported)
        .bind(record.latitude)
        .bind(record.longitude)
        .bind(&record.max_intensity)
        .bind(&record.jp_location)
        .bind(&record.en_location)
        .bind(&record.jp_comment)
        .bind(&record.en_comment)
        .bind(&record.tsunami_risk)
        .execute(&mut **conn)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation());
            if duplicate {
                StoreError::Duplicate(record.report_id.to_string())
            } else {
                StoreError::from(e)
            }
        })?;
        Ok(())
    }
}
