//! Database row model and schema for the `earthquakes` table.

use chrono::{DateTime, Utc};

use crate::domain::{EventRecord, ReportId};

/// DDL for the `earthquakes` table, applied by
/// [`super::PostgresPersistence::ensure_schema`].
pub const CREATE_EARTHQUAKES_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS earthquakes (
    report_id      TEXT PRIMARY KEY,
    origin_time    TIMESTAMPTZ,
    arrival_time   TIMESTAMPTZ,
    magnitude      DOUBLE PRECISION NOT NULL DEFAULT 0,
    depth_km       INTEGER NOT NULL DEFAULT 0,
    depth_reported BOOLEAN NOT NULL DEFAULT FALSE,
    latitude       DOUBLE PRECISION NOT NULL DEFAULT 0,
    longitude      DOUBLE PRECISION NOT NULL DEFAULT 0,
    max_intensity  TEXT NOT NULL DEFAULT '',
    jp_location    TEXT NOT NULL DEFAULT '',
    en_location    TEXT NOT NULL DEFAULT '',
    jp_comment     TEXT NOT NULL DEFAULT '',
    en_comment     TEXT NOT NULL DEFAULT '',
    tsunami_risk   TEXT NOT NULL DEFAULT '',
    ingested_at    TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Index backing the newest-first listing and the recent window.
pub const CREATE_ORIGIN_TIME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS earthquakes_origin_time_idx ON earthquakes (origin_time DESC)";

/// Column list shared by every `SELECT`, in [`EarthquakeRow`] order.
pub const EARTHQUAKE_COLUMNS: &str = "report_id, origin_time, arrival_time, magnitude, \
     depth_km, depth_reported, latitude, longitude, max_intensity, jp_location, \
     en_location, jp_comment, en_comment, tsunami_risk";

/// A stored row from the `earthquakes` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EarthquakeRow {
    /// Primary key.
    pub report_id: String,
    /// Origin time, NULL when the upstream omitted it.
    pub origin_time: Option<DateTime<Utc>>,
    /// Arrival time, NULL when the upstream omitted it.
    pub arrival_time: Option<DateTime<Utc>>,
    /// Magnitude.
    pub magnitude: f64,
    /// Depth in whole kilometers.
    pub depth_km: i32,
    /// Whether the depth segment was present upstream.
    pub depth_reported: bool,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Intensity code.
    pub max_intensity: String,
    /// Japanese place name.
    pub jp_location: String,
    /// English place name.
    pub en_location: String,
    /// Japanese forecast comment.
    pub jp_comment: String,
    /// English forecast comment.
    pub en_comment: String,
    /// Tsunami-risk code.
    pub tsunami_risk: String,
}

impl From<EarthquakeRow> for EventRecord {
    fn from(row: EarthquakeRow) -> Self {
        Self {
            report_id: ReportId::new(row.report_id),
            origin_time: row.origin_time,
            arrival_time: row.arrival_time,
            magnitude: row.magnitude,
            depth_km: row.depth_km,
            depth_reported: row.depth_reported,
            latitude: row.latitude,
            longitude: row.longitude,
            max_intensity: row.max_intensity,
            jp_location: row.jp_location,
            en_location: row.en_location,
            jp_comment: row.jp_comment,
            en_comment: row.en_comment,
            tsunami_risk: row.tsunami_risk,
        }
    }
}
