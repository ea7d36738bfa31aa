//! Manual sync trigger.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::SyncResponse;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /sync` — Run one sync pass now.
///
/// Waits for any sync already in progress before starting.
///
/// # Errors
///
/// Returns [`ApiError::SyncFailed`] if the summary list cannot be fetched
/// or parsed, or no store session can be opened.
#[utoipa::path(
    post,
    path = "/api/v1/sync",
    tag = "Sync",
    summary = "Trigger a sync",
    description = "Fetches the upstream summary list and inserts every report not yet stored. Per-event failures are listed in `skipped` and do not fail the request.",
    responses(
        (status = 200, description = "Sync completed", body = SyncResponse),
        (status = 500, description = "Sync aborted", body = ErrorResponse),
    )
)]
pub async fn trigger_sync(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("manual sync requested");
    let report = state.quake_service.sync().await?;
    Ok(Json(SyncResponse::from(report)))
}

/// Sync routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sync", post(trigger_sync))
}
