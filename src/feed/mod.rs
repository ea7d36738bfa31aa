//! Upstream feed: HTTP client, in-memory feed, and wire models.
//!
//! The agency publishes a two-tier feed: a summary list of recent reports
//! and one detail document per report. [`QuakeFeed`] abstracts both
//! fetches so the sync orchestrator can run against [`JmaFeedClient`] in
//! production and [`StaticFeed`] offline.

pub mod client;
pub mod models;
pub mod static_feed;

pub use client::{JmaFeedClient, QuakeFeed};
pub use models::{QuakeSummary, parse_summary_list};
pub use static_feed::StaticFeed;
