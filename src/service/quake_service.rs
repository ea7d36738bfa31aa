//! Quake service: serializes sync runs and serves read queries.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::sync::Mutex;

use super::sync::{SyncOrchestrator, SyncReport};
use crate::domain::{EventFilter, EventRecord, EventStats, ReportId};
use crate::error::{StoreError, SyncError};
use crate::persistence::EventRepository;

/// Length of the "recent" window used by [`QuakeService::recent`] and
/// [`QuakeService::stats`].
pub const RECENT_WINDOW_HOURS: i64 = 24;

/// Coordinator between the HTTP layer, the sync orchestrator and the
/// repository.
///
/// At most one sync runs at a time: concurrent [`QuakeService::sync`]
/// callers queue on an internal lock, so a manual trigger and the
/// scheduled sync never interleave their existence checks.
#[derive(Debug)]
pub struct QuakeService {
    repository: Arc<dyn EventRepository>,
    orchestrator: SyncOrchestrator,
    sync_lock: Mutex<()>,
}

impl QuakeService {
    /// Creates a new `QuakeService`.
    #[must_use]
    pub fn new(repository: Arc<dyn EventRepository>, orchestrator: SyncOrchestrator) -> Self {
        Self {
            repository,
            orchestrator,
            sync_lock: Mutex::new(()),
        }
    }

    /// Runs one sync pass on a fresh store session.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::StoreUnavailable`] if no session can be
    /// opened, or the orchestrator's fatal list error.
    pub async fn sync(&self) -> Result<SyncReport, SyncError> {
        let _guard = self.sync_lock.lock().await;
        let session = self.repository.begin_session().await?;
        self.orchestrator.sync(session.as_ref()).await
    }

    /// Lists stored records matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    pub async fn list(&self, filter: &EventFilter) -> Result<Vec<EventRecord>, StoreError> {
        self.repository.list(filter).await
    }

    /// Looks up one record by report id.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    pub async fn get(&self, report_id: &ReportId) -> Result<Option<EventRecord>, StoreError> {
        self.repository.get(report_id).await
    }

    /// Records whose origin time falls within the last
    /// [`RECENT_WINDOW_HOURS`].
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    pub async fn recent(&self) -> Result<Vec<EventRecord>, StoreError> {
        self.repository.recent(window_start()).await
    }

    /// Aggregate figures over all stored records.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] on query failure.
    pub async fn stats(&self) -> Result<EventStats, StoreError> {
        self.repository.stats(window_start()).await
    }

    /// Returns `true` if the repository answers a ping.
    pub async fn is_healthy(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store health check failed");
                false
            }
        }
    }
}

fn window_start() -> chrono::DateTime<Utc> {
    Utc::now() - Duration::hours(RECENT_WINDOW_HOURS)
}
