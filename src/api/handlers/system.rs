//! System endpoints: service info and health check.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Service description returned by `GET /`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceInfo {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    data_source: &'static str,
    endpoints: BTreeMap<&'static str, &'static str>,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: &'static str,
    database: &'static str,
    timestamp: String,
    version: &'static str,
}

const ENDPOINTS: [(&str, &str); 12] = [
    ("GET /", "Service information"),
    ("GET /health", "Health check"),
    ("GET /api/v1/earthquakes", "Latest 50 earthquakes"),
    ("GET /api/v1/earthquakes?limit=10", "Latest 10 earthquakes"),
    ("GET /api/v1/earthquakes?limit=-1", "All earthquakes"),
    ("GET /api/v1/earthquakes?magnitude=5.0", "Magnitude 5.0 and above"),
    (
        "GET /api/v1/earthquakes?date=2025-08-12",
        "Earthquakes on one JST calendar day (YYYY-MM-DD)",
    ),
    ("GET /api/v1/earthquakes/recent", "Earthquakes in the last 24 hours"),
    ("GET /api/v1/earthquakes/stats", "Summary statistics"),
    ("GET /api/v1/earthquakes/{id}", "One earthquake by report id"),
    ("POST /api/v1/sync", "Sync with the JMA feed now"),
    ("GET /api-docs/openapi.json", "OpenAPI document"),
];

/// `GET /` — Service information and endpoint catalogue.
#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    summary = "Service information",
    description = "Returns the service name, version and a catalogue of endpoints.",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo),
    )
)]
pub async fn root_handler() -> impl IntoResponse {
    Json(ServiceInfo {
        name: "Jishin API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Earthquake reports from the Japan Meteorological Agency (JMA)",
        data_source: "Japan Meteorological Agency (JMA)",
        endpoints: ENDPOINTS.into_iter().collect(),
    })
}

/// `GET /health` — Service and database health.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Pings the store. Returns 503 when the store does not answer.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let healthy = state.quake_service.is_healthy().await;
    let (status, body_status, database) = if healthy {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
    };
    (
        status,
        Json(HealthResponse {
            status: body_status,
            database,
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
}
