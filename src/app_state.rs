//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::service::QuakeService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Quake service for sync and read queries.
    pub quake_service: Arc<QuakeService>,
}

impl AppState {
    /// Wraps a service in shared state.
    #[must_use]
    pub fn new(quake_service: QuakeService) -> Self {
        Self {
            quake_service: Arc::new(quake_service),
        }
    }
}
