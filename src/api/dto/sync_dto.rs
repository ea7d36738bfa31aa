//! Sync trigger response.

use serde::Serialize;
use utoipa::ToSchema;

use crate::service::{SkippedEvent, SyncReport};

/// Response body for `POST /sync`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SyncResponse {
    /// Human-readable outcome.
    pub message: String,
    /// Number of new records inserted.
    pub records_added: usize,
    /// Number of summaries already present in the store.
    pub already_stored: usize,
    /// Events skipped during the run.
    pub skipped: Vec<SkippedEvent>,
}

impl From<SyncReport> for SyncResponse {
    fn from(report: SyncReport) -> Self {
        Self {
            message: "Sync completed successfully".to_string(),
            records_added: report.records_added,
            already_stored: report.already_stored,
            skipped: report.skipped,
        }
    }
}
