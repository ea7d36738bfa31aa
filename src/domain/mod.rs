//! Domain layer: report identity and the canonical event record.
//!
//! These types are shared by the ingestion pipeline, the store gateway,
//! and the HTTP read API.

pub mod event_record;
pub mod report_id;

pub use event_record::{EventFilter, EventRecord, EventStats};
pub use report_id::ReportId;
