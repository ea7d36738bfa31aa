//! Deduplicating sync orchestrator.
//!
//! One run is a single pass over the summary list:
//!
//! ```text
//! fetch list ──▶ parse ──▶ for each summary (list order):
//!                            fetch detail ─▶ normalize ─▶ exists? ─▶ insert
//! ```
//!
//! Only the list stage is fatal. Every per-event failure becomes a
//! [`SkippedEvent`] in the returned [`SyncReport`] and the run continues.
//! Detail fetch + normalize may run ahead of the store stage through an
//! order-preserving buffer; existence check and insert are strictly
//! sequential.

use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{EventRecord, ReportId};
use crate::error::SyncError;
use crate::feed::{QuakeFeed, QuakeSummary, parse_summary_list};
use crate::ingest::normalize_detail;
use crate::persistence::EventStore;

/// Pipeline stage at which an event was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SkipStage {
    /// The summary entry has no id or no detail reference.
    Summary,
    /// The detail document could not be fetched.
    Fetch,
    /// The detail document could not be normalized.
    Normalize,
    /// The store could not say whether the id exists.
    ExistenceCheck,
    /// The insert failed.
    Insert,
}

/// Diagnostic for one event that was not ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SkippedEvent {
    /// Report id from the summary list (may be empty).
    pub report_id: String,
    /// Stage that failed.
    pub stage: SkipStage,
    /// Error message.
    pub reason: String,
}

/// Outcome of a sync run that reached the per-event stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct SyncReport {
    /// Number of new records inserted.
    pub records_added: usize,
    /// Number of summaries whose id was already stored.
    pub already_stored: usize,
    /// Events skipped because of a per-event failure.
    pub skipped: Vec<SkippedEvent>,
}

impl SyncReport {
    /// Total number of summaries the run looked at.
    #[must_use]
    pub fn processed(&self) -> usize {
        self.records_added + self.already_stored + self.skipped.len()
    }

    fn skip(&mut self, event: SkippedEvent) {
        tracing::warn!(
            report_id = %event.report_id,
            stage = ?event.stage,
            reason = %event.reason,
            "skipping event"
        );
        self.skipped.push(event);
    }
}

/// Drives a sync run against a feed and a store session.
///
/// Holds no per-run state, so one orchestrator may serve many runs; the
/// store is passed into every [`SyncOrchestrator::sync`] call.
#[derive(Debug, Clone)]
pub struct SyncOrchestrator {
    feed: Arc<dyn QuakeFeed>,
    detail_concurrency: usize,
}

impl SyncOrchestrator {
    /// Creates an orchestrator that fetches details one at a time.
    #[must_use]
    pub fn new(feed: Arc<dyn QuakeFeed>) -> Self {
        Self {
            feed,
            detail_concurrency: 1,
        }
    }

    /// Sets how many detail documents may be fetched and normalized
    /// ahead of the store stage. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_detail_concurrency(mut self, detail_concurrency: usize) -> Self {
        self.detail_concurrency = detail_concurrency.max(1);
        self
    }

    /// Runs one sync pass.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::FeedUnavailable`] or [`SyncError::FeedFormat`]
    /// if the summary list cannot be fetched or parsed. Nothing is
    /// inserted in that case. Per-event failures never surface here.
    pub async fn sync(&self, store: &dyn EventStore) -> Result<SyncReport, SyncError> {
        let list = self.feed.fetch_summary_list().await?;
        let summaries = parse_summary_list(&list)?;
        tracing::info!(summaries = summaries.len(), "fetched summary list");

        let mut report = SyncReport::default();
        let prepared = stream::iter(summaries)
            .map(|summary| self.prepare(summary))
            .buffered(self.detail_concurrency);
        let mut prepared = std::pin::pin!(prepared);

        while let Some(outcome) = prepared.next().await {
            match outcome {
                Ok(record) => persist(store, record, &mut report).await,
                Err(skipped) => report.skip(skipped),
            }
        }

        tracing::info!(
            records_added = report.records_added,
            already_stored = report.already_stored,
            skipped = report.skipped.len(),
            "sync complete"
        );
        Ok(report)
    }

    /// Fetches and normalizes one summary's detail document.
    async fn prepare(&self, summary: QuakeSummary) -> Result<EventRecord, SkippedEvent> {
        let skipped = |stage, reason: String| SkippedEvent {
            report_id: summary.id.clone(),
            stage,
            reason,
        };

        let report_id = summary.report_id();
        if report_id.is_empty() || summary.detail_reference.trim().is_empty() {
            return Err(skipped(
                SkipStage::Summary,
                "summary entry is missing eid or json".to_string(),
            ));
        }

        let bytes = self
            .feed
            .fetch_detail(&summary.detail_reference)
            .await
            .map_err(|e| skipped(SkipStage::Fetch, e.to_string()))?;

        normalize_detail(report_id, &bytes)
            .map_err(|e| skipped(SkipStage::Normalize, e.to_string()))
    }
}

/// Existence check then insert for one record. A store error on the
/// check skips the record rather than risk a duplicate insert.
async fn persist(store: &dyn EventStore, record: EventRecord, report: &mut SyncReport) {
    let skipped = |id: &ReportId, stage, reason: String| SkippedEvent {
        report_id: id.to_string(),
        stage,
        reason,
    };

    match store.exists(&record.report_id).await {
        Ok(true) => {
            tracing::debug!(report_id = %record.report_id, "already stored");
            report.already_stored += 1;
        }
        Ok(false) => match store.insert(&record).await {
            Ok(()) => {
                tracing::debug!(report_id = %record.report_id, "inserted");
                report.records_added += 1;
            }
            Err(e) => report.skip(skipped(
                &record.report_id,
                SkipStage::Insert,
                e.to_string(),
            )),
        },
        Err(e) => report.skip(skipped(
            &record.report_id,
            SkipStage::ExistenceCheck,
            e.to_string(),
        )),
    }
}
