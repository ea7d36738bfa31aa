//! Earthquake read handlers: list, recent, stats, get.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{
    EarthquakeDto, EarthquakeQuery, EarthquakeStatsResponse, RecentEarthquakesResponse,
};
use crate::app_state::AppState;
use crate::domain::ReportId;
use crate::error::{ApiError, ErrorResponse};

/// `GET /earthquakes` — List stored earthquakes, newest first.
///
/// # Errors
///
/// Returns [`ApiError::InvalidRequest`] on a malformed `date` and
/// [`ApiError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/earthquakes",
    tag = "Earthquakes",
    summary = "List earthquakes",
    description = "Returns stored earthquakes ordered by origin time, newest first. `limit` defaults to 50 and a negative value returns everything. `magnitude` is an inclusive minimum. `date` selects one calendar day in JST.",
    params(EarthquakeQuery),
    responses(
        (status = 200, description = "Earthquake list", body = Vec<EarthquakeDto>),
        (status = 400, description = "Invalid date", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_earthquakes(
    State(state): State<AppState>,
    Query(query): Query<EarthquakeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = query.to_filter()?;
    let records = state.quake_service.list(&filter).await?;
    let data: Vec<EarthquakeDto> = records.into_iter().map(EarthquakeDto::from).collect();
    Ok(Json(data))
}

/// `GET /earthquakes/recent` — Earthquakes from the last 24 hours.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/earthquakes/recent",
    tag = "Earthquakes",
    summary = "Recent earthquakes",
    description = "Returns earthquakes whose origin time falls within the last 24 hours.",
    responses(
        (status = 200, description = "Recent window", body = RecentEarthquakesResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn recent_earthquakes(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.quake_service.recent().await?;
    Ok(Json(RecentEarthquakesResponse::from_records(records)))
}

/// `GET /earthquakes/stats` — Aggregate figures.
///
/// # Errors
///
/// Returns [`ApiError::Persistence`] on store failure.
#[utoipa::path(
    get,
    path = "/api/v1/earthquakes/stats",
    tag = "Earthquakes",
    summary = "Earthquake statistics",
    description = "Returns the total record count, the count in the last 24 hours, magnitude extremes and the latest origin time.",
    responses(
        (status = 200, description = "Statistics", body = EarthquakeStatsResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn earthquake_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.quake_service.stats().await?;
    Ok(Json(EarthquakeStatsResponse::from(stats)))
}

/// `GET /earthquakes/{id}` — Single earthquake by report id.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if no record has this id.
#[utoipa::path(
    get,
    path = "/api/v1/earthquakes/{id}",
    tag = "Earthquakes",
    summary = "Get earthquake",
    description = "Returns one stored earthquake by its agency report id.",
    params(
        ("id" = String, Path, description = "Agency report id", example = "20250812113450"),
    ),
    responses(
        (status = 200, description = "Earthquake", body = EarthquakeDto),
        (status = 404, description = "Earthquake not found", body = ErrorResponse),
    )
)]
pub async fn get_earthquake(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report_id = ReportId::new(id);
    let record = state
        .quake_service
        .get(&report_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(report_id.to_string()))?;
    Ok(Json(EarthquakeDto::from(record)))
}

/// Earthquake read routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/earthquakes", get(list_earthquakes))
        .route("/earthquakes/recent", get(recent_earthquakes))
        .route("/earthquakes/stats", get(earthquake_stats))
        .route("/earthquakes/{id}", get(get_earthquake))
}
