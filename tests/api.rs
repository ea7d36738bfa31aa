//! REST API over an in-memory store and a static feed.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::{Duration, Utc};
use jishin_gateway::api::build_router;
use jishin_gateway::app_state::AppState;
use jishin_gateway::feed::StaticFeed;
use jishin_gateway::persistence::MemoryEventStore;
use jishin_gateway::service::{QuakeService, SyncOrchestrator};
use serde_json::{Value, json};
use tower::ServiceExt;

fn detail(origin: &str, magnitude: &str, coordinate: &str) -> Vec<u8> {
    json!({
        "Body": {
            "Earthquake": {
                "OriginTime": origin,
                "ArrivalTime": origin,
                "Magnitude": magnitude,
                "Hypocenter": {"Area": {
                    "Name": "石川県能登地方",
                    "enName": "Noto, Ishikawa Prefecture",
                    "Coordinate": coordinate
                }}
            },
            "Intensity": {"Observation": {"MaxInt": "4"}},
            "Comments": {"ForecastComment": {"Text": "", "enText": ""}}
        }
    })
    .to_string()
    .into_bytes()
}

/// Three good reports plus one whose detail is missing upstream.
fn feed() -> StaticFeed {
    let recent = (Utc::now() - Duration::hours(1)).to_rfc3339();
    let list = json!([
        {"eid": "20250812003000", "json": "a.json"},
        {"eid": "20250811233000", "json": "b.json"},
        {"eid": "20250701120000", "json": "c.json"},
        {"eid": "20250701110000", "json": "gone.json"}
    ])
    .to_string();

    StaticFeed::new(list)
        // 2025-08-12 00:30 JST is still 2025-08-11 in UTC.
        .with_detail(
            "a.json",
            detail("2025-08-12T00:30:00+09:00", "5.1", "+37.5+137.2-10000/"),
        )
        .with_detail(
            "b.json",
            detail("2025-08-11T23:30:00+09:00", "3.0", "+37.5+137.2-20000/"),
        )
        .with_detail("c.json", detail(&recent, "2.4", "+37.5+137.2/"))
}

fn app(store: &MemoryEventStore, feed: StaticFeed) -> Router {
    let service = QuakeService::new(
        Arc::new(store.clone()),
        SyncOrchestrator::new(Arc::new(feed)),
    );
    build_router().with_state(AppState::new(service))
}

async fn call(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn synced() -> (Router, MemoryEventStore) {
    let store = MemoryEventStore::new();
    let app = app(&store, feed());
    let (status, _) = call(&app, Method::POST, "/api/v1/sync").await;
    assert_eq!(status, StatusCode::OK);
    (app, store)
}

#[tokio::test]
async fn sync_reports_counts_and_skips() {
    let store = MemoryEventStore::new();
    let app = app(&store, feed());

    let (status, body) = call(&app, Method::POST, "/api/v1/sync").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sync completed successfully");
    assert_eq!(body["records_added"], 3);
    assert_eq!(body["already_stored"], 0);
    assert_eq!(body["skipped"][0]["report_id"], "20250701110000");
    assert_eq!(body["skipped"][0]["stage"], "fetch");

    let (_, again) = call(&app, Method::POST, "/api/v1/sync").await;
    assert_eq!(again["records_added"], 0);
    assert_eq!(again["already_stored"], 3);
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn sync_failure_is_500() {
    let store = MemoryEventStore::new();
    let app = app(&store, StaticFeed::unavailable());

    let (status, body) = call(&app, Method::POST, "/api/v1/sync").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], 3002);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn list_is_newest_first_with_filters() {
    let (app, _) = synced().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/earthquakes").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["report_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids[0], "20250701120000");
    assert_eq!(ids.len(), 3);

    let (_, limited) = call(&app, Method::GET, "/api/v1/earthquakes?limit=1").await;
    assert_eq!(limited.as_array().unwrap().len(), 1);

    let (_, all) = call(&app, Method::GET, "/api/v1/earthquakes?limit=-1").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, strong) = call(&app, Method::GET, "/api/v1/earthquakes?magnitude=5.0").await;
    assert_eq!(strong.as_array().unwrap().len(), 1);
    assert_eq!(strong[0]["report_id"], "20250812003000");

    let (status, ignored) = call(&app, Method::GET, "/api/v1/earthquakes?magnitude=strong").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ignored.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn date_filter_uses_jst_calendar_day() {
    let (app, _) = synced().await;

    let (_, day) = call(&app, Method::GET, "/api/v1/earthquakes?date=2025-08-12").await;
    let day = day.as_array().unwrap();
    assert_eq!(day.len(), 1);
    assert_eq!(day[0]["report_id"], "20250812003000");
    assert_eq!(day[0]["origin_time"], "2025-08-11T15:30:00Z");

    let (_, before) = call(&app, Method::GET, "/api/v1/earthquakes?date=2025-08-11").await;
    assert_eq!(before.as_array().unwrap().len(), 1);
    assert_eq!(before[0]["report_id"], "20250811233000");

    let (status, body) = call(&app, Method::GET, "/api/v1/earthquakes?date=08-12-2025").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], 1001);
}

#[tokio::test]
async fn get_by_id_and_not_found() {
    let (app, _) = synced().await;

    let (status, body) = call(&app, Method::GET, "/api/v1/earthquakes/20250812003000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["magnitude"], 5.1);
    assert_eq!(body["depth_km"], -10);
    assert_eq!(body["depth_reported"], true);
    assert_eq!(body["en_location"], "Noto, Ishikawa Prefecture");

    let (status, body) = call(&app, Method::GET, "/api/v1/earthquakes/19990101000000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 2001);
}

#[tokio::test]
async fn recent_window_and_stats() {
    let store = MemoryEventStore::new();
    let app = app(&store, feed());

    let (_, empty) = call(&app, Method::GET, "/api/v1/earthquakes/recent").await;
    assert_eq!(empty["count"], 0);
    assert_eq!(empty["timeframe"], "24 hours");
    assert_eq!(empty["message"], "No earthquakes found in the last 24 hours");

    let (status, _) = call(&app, Method::POST, "/api/v1/sync").await;
    assert_eq!(status, StatusCode::OK);

    let (_, recent) = call(&app, Method::GET, "/api/v1/earthquakes/recent").await;
    assert_eq!(recent["count"], 1);
    assert_eq!(recent["earthquakes"][0]["report_id"], "20250701120000");
    assert_eq!(recent["earthquakes"][0]["depth_reported"], false);

    let (_, stats) = call(&app, Method::GET, "/api/v1/earthquakes/stats").await;
    assert_eq!(stats["total_earthquakes"], 3);
    assert_eq!(stats["last_24_hours"], 1);
    assert_eq!(stats["max_magnitude"], 5.1);
}

#[tokio::test]
async fn root_and_health() {
    let store = MemoryEventStore::new();
    let app = app(&store, feed());

    let (status, info) = call(&app, Method::GET, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["name"], "Jishin API");
    assert!(info["endpoints"]["POST /api/v1/sync"].is_string());

    let (status, health) = call(&app, Method::GET, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["database"], "connected");

    let (status, doc) = call(&app, Method::GET, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/api/v1/sync"].is_object());
}
