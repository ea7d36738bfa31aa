//! In-memory [`QuakeFeed`] serving fixed documents.
//!
//! Used for offline runs and tests: the summary list and every detail
//! document are held in memory, and individual references can be made to
//! fail with a chosen status.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::QuakeFeed;
use crate::error::FeedError;

/// A feed whose responses are fixed at construction time.
#[derive(Debug, Default)]
pub struct StaticFeed {
    list: Option<Vec<u8>>,
    details: HashMap<String, Vec<u8>>,
    detail_requests: AtomicUsize,
}

impl StaticFeed {
    /// Creates a feed with the given summary list body.
    #[must_use]
    pub fn new(list: impl Into<Vec<u8>>) -> Self {
        Self {
            list: Some(list.into()),
            ..Self::default()
        }
    }

    /// Creates a feed whose summary list request fails with status 503.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Registers a detail document under `reference`.
    #[must_use]
    pub fn with_detail(mut self, reference: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.details.insert(reference.into(), body.into());
        self
    }

    /// Number of detail requests served so far (including failures).
    #[must_use]
    pub fn detail_requests(&self) -> usize {
        self.detail_requests.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl QuakeFeed for StaticFeed {
    async fn fetch_summary_list(&self) -> Result<Vec<u8>, FeedError> {
        self.list.clone().ok_or_else(|| FeedError::Status {
            url: "static://list.json".to_string(),
            status: 503,
        })
    }

    async fn fetch_detail(&self, reference: &str) -> Result<Vec<u8>, FeedError> {
        self.detail_requests.fetch_add(1, Ordering::Relaxed);
        self.details
            .get(reference)
            .cloned()
            .ok_or_else(|| FeedError::Status {
                url: format!("static://{reference}"),
                status: 404,
            })
    }
}
