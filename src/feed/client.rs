//! HTTP client for the JMA quake feed.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::FeedConfig;
use crate::error::FeedError;

/// Source of summary lists and detail documents.
///
/// Both calls return the raw body; decoding belongs to the caller. No
/// retry or backoff is built in.
#[async_trait]
pub trait QuakeFeed: Send + Sync + std::fmt::Debug {
    /// Fetches the summary list body.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] on transport failure or a status ≥ 400.
    async fn fetch_summary_list(&self) -> Result<Vec<u8>, FeedError>;

    /// Fetches one detail document by its reference from the summary list.
    ///
    /// # Errors
    ///
    /// Returns a [`FeedError`] on transport failure or a status ≥ 400.
    async fn fetch_detail(&self, reference: &str) -> Result<Vec<u8>, FeedError>;
}

/// `reqwest`-backed [`QuakeFeed`] for the live agency endpoints.
#[derive(Debug, Clone)]
pub struct JmaFeedClient {
    http_client: reqwest::Client,
    list_url: String,
    detail_base_url: String,
}

impl JmaFeedClient {
    /// Builds a client from feed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Transport`] if the underlying HTTP client
    /// cannot be constructed (e.g. TLS backend initialisation failure).
    pub fn new(config: &FeedConfig) -> Result<Self, FeedError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| FeedError::Transport {
                url: config.list_url.clone(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            http_client,
            list_url: config.list_url.clone(),
            detail_base_url: config.detail_base_url.clone(),
        })
    }

    /// Resolves a detail reference against the detail base URL.
    #[must_use]
    pub fn detail_url(&self, reference: &str) -> String {
        join_url(&self.detail_base_url, reference)
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FeedError> {
        tracing::debug!(%url, "fetching feed document");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FeedError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| FeedError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl QuakeFeed for JmaFeedClient {
    async fn fetch_summary_list(&self) -> Result<Vec<u8>, FeedError> {
        self.get_bytes(&self.list_url).await
    }

    async fn fetch_detail(&self, reference: &str) -> Result<Vec<u8>, FeedError> {
        let url = self.detail_url(reference);
        self.get_bytes(&url).await
    }
}

/// Joins a base URL and a relative reference with exactly one `/`.
fn join_url(base: &str, reference: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        reference.trim_start_matches('/')
    )
}
