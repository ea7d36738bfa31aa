//! Service layer: sync orchestration and read-side coordination.
//!
//! [`SyncOrchestrator`] runs the fetch, normalize, deduplicate and insert
//! pipeline against one store session. [`QuakeService`] serializes sync
//! runs and forwards read queries to the repository.

pub mod quake_service;
pub mod sync;

pub use quake_service::{QuakeService, RECENT_WINDOW_HOURS};
pub use sync::{SkipStage, SkippedEvent, SyncOrchestrator, SyncReport};
