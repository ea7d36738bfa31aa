//! Persistence layer: store gateway traits and their implementations.
//!
//! [`EventStore`] is the narrow gateway the sync pipeline writes through
//! (existence check and insert, keyed by report id). [`EventRepository`]
//! owns the backing store: it opens one [`EventStore`] session per sync
//! run and serves the read API. The concrete implementations are
//! [`PostgresPersistence`] over `sqlx::PgPool` and [`MemoryEventStore`].

pub mod memory;
pub mod models;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::MemoryEventStore;
pub use postgres::{PostgresPersistence, PostgresSession};

use crate::domain::{EventFilter, EventRecord, EventStats, ReportId};
use crate::error::StoreError;

/// Write-side store gateway used by a sync run.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Returns `true` if a record with this id is already stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store cannot be queried.
    async fn exists(&self, report_id: &ReportId) -> Result<bool, StoreError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Duplicate`] if the id is already present and
    /// [`StoreError::Database`] on any other failure.
    async fn insert(&self, record: &EventRecord) -> Result<(), StoreError>;
}

/// Owner of the backing store: session factory plus read queries.
#[async_trait]
pub trait EventRepository: Send + Sync + std::fmt::Debug {
    /// Opens a store session for one sync run. The session is released
    /// when dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if no connection can be acquired.
    async fn begin_session(&self) -> Result<Box<dyn EventStore>, StoreError>;

    /// Lists records newest first (by origin time) matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError>;

    /// Looks up a single record.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    async fn get(&self, report_id: &ReportId) -> Result<Option<EventRecord>, StoreError>;

    /// Lists records whose origin time is at or after `since`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    async fn recent(&self, since: DateTime<Utc>) -> Result<Vec<EventRecord>, StoreError>;

    /// Computes aggregate figures; `recent` counts origin times at or
    /// after `since`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    async fn stats(&self, since: DateTime<Utc>) -> Result<EventStats, StoreError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the store does not answer.
    async fn ping(&self) -> Result<(), StoreError>;
}
