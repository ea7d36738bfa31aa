//! # jishin-gateway
//!
//! Ingests earthquake reports published by the Japan Meteorological
//! Agency (JMA) into a relational store and serves them over a REST API.
//!
//! A sync run fetches the agency's summary list, fetches and normalizes
//! the detail document of every listed report, and inserts each report
//! whose id is not stored yet. Stored reports are never updated. A
//! failure on one report skips that report only; a failure to obtain the
//! summary list aborts the run.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── QuakeService (service/)
//!     ├── SyncOrchestrator (service/)
//!     │       │
//!     │       ├── QuakeFeed (feed/) ── JMA list.json + detail documents
//!     │       └── normalize_detail (ingest/)
//!     │
//!     └── EventRepository / EventStore (persistence/)
//!             ├── PostgreSQL
//!             └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod ingest;
pub mod persistence;
pub mod service;
