//! `OpenAPI` document for the REST API.

use utoipa::OpenApi;

/// `OpenAPI` documentation for every route served by [`super::build_router`].
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Jishin API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Earthquake reports from the Japan Meteorological Agency"
    ),
    paths(
        crate::api::handlers::system::root_handler,
        crate::api::handlers::system::health_handler,
        crate::api::handlers::earthquakes::list_earthquakes,
        crate::api::handlers::earthquakes::recent_earthquakes,
        crate::api::handlers::earthquakes::earthquake_stats,
        crate::api::handlers::earthquakes::get_earthquake,
        crate::api::handlers::sync::trigger_sync,
    ),
    components(
        schemas(
            crate::error::ErrorResponse,
            crate::error::ErrorBody,
            crate::api::dto::EarthquakeDto,
            crate::api::dto::RecentEarthquakesResponse,
            crate::api::dto::EarthquakeStatsResponse,
            crate::api::dto::SyncResponse,
            crate::service::SkippedEvent,
            crate::service::SkipStage,
        )
    ),
    tags(
        (name = "System", description = "Service information and health"),
        (name = "Earthquakes", description = "Stored earthquake reports"),
        (name = "Sync", description = "Upstream synchronization"),
    ),
)]
pub struct ApiDoc;

/// Returns the generated `OpenAPI` document serialized as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
