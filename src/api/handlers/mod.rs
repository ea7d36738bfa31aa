//! REST endpoint handlers organized by resource.

pub mod earthquakes;
pub mod sync;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(earthquakes::routes())
        .merge(sync::routes())
}
