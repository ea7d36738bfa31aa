//! jishin-gateway server entry point.
//!
//! Wires the store, the JMA feed client and the sync service together,
//! optionally schedules periodic syncs, and serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::Router;
use tokio::time::MissedTickBehavior;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use jishin_gateway::api;
use jishin_gateway::app_state::AppState;
use jishin_gateway::config::{JishinConfig, LogFormat};
use jishin_gateway::feed::JmaFeedClient;
use jishin_gateway::persistence::{EventRepository, MemoryEventStore, PostgresPersistence};
use jishin_gateway::service::{QuakeService, SyncOrchestrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = JishinConfig::from_env().context("invalid LISTEN_ADDR")?;
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting jishin-gateway");

    // Build persistence layer
    let repository: Arc<dyn EventRepository> = if config.persistence_enabled {
        let persistence = PostgresPersistence::connect(&config.database)
            .await
            .context("connecting to PostgreSQL")?;
        persistence
            .ensure_schema()
            .await
            .context("creating earthquakes schema")?;
        tracing::info!("PostgreSQL persistence enabled");
        Arc::new(persistence)
    } else {
        tracing::warn!("persistence disabled, records are kept in memory only");
        Arc::new(MemoryEventStore::new())
    };

    // Build service layer
    let feed = JmaFeedClient::new(&config.feed).context("building feed client")?;
    let orchestrator = SyncOrchestrator::new(Arc::new(feed))
        .with_detail_concurrency(config.sync.detail_concurrency);
    let app_state = AppState::new(QuakeService::new(repository, orchestrator));

    if config.sync.on_startup {
        run_sync(&app_state.quake_service, "startup").await;
    }
    if config.sync.interval_secs > 0 {
        spawn_scheduled_sync(
            Arc::clone(&app_state.quake_service),
            Duration::from_secs(config.sync.interval_secs),
        );
    }

    // Build router
    let app = Router::new().merge(api::build_router());

    #[cfg(feature = "swagger-ui")]
    let app = {
        use utoipa::OpenApi;
        app.merge(
            utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
                .url("/api-docs/swagger.json", api::ApiDoc::openapi()),
        )
    };

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}

/// Runs one sync and logs its outcome. Failures are logged, not returned.
async fn run_sync(service: &QuakeService, trigger: &'static str) {
    match service.sync().await {
        Ok(report) => tracing::info!(
            trigger,
            records_added = report.records_added,
            already_stored = report.already_stored,
            skipped = report.skipped.len(),
            "sync finished"
        ),
        Err(e) => tracing::error!(trigger, error = %e, "sync failed"),
    }
}

fn spawn_scheduled_sync(service: Arc<QuakeService>, every: Duration) {
    tracing::info!(interval_secs = every.as_secs(), "scheduled sync enabled");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            run_sync(&service, "scheduled").await;
        }
    });
}
