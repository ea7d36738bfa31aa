//! Earthquake DTOs for list, recent, stats, and single-record reads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{EventFilter, EventRecord, EventStats};
use crate::error::ApiError;

/// Number of records returned by `GET /earthquakes` when no usable
/// `limit` is given.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Label reported alongside recent-window responses.
pub const RECENT_TIMEFRAME: &str = "24 hours";

/// One earthquake as served by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EarthquakeDto {
    /// Agency report id.
    #[schema(example = "20250812113450")]
    pub report_id: String,
    /// Origin time (UTC), absent when the agency omitted it.
    pub origin_time: Option<DateTime<Utc>>,
    /// Report arrival time (UTC).
    pub arrival_time: Option<DateTime<Utc>>,
    /// Magnitude.
    pub magnitude: f64,
    /// Depth in whole kilometers.
    pub depth_km: i32,
    /// Whether the agency reported a depth.
    pub depth_reported: bool,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Maximum observed intensity code.
    #[schema(example = "5-")]
    pub max_intensity: String,
    /// Hypocenter area name in Japanese.
    pub jp_location: String,
    /// Hypocenter area name in English.
    pub en_location: String,
    /// Forecast comment in Japanese.
    pub jp_comment: String,
    /// Forecast comment in English.
    pub en_comment: String,
    /// Tsunami-risk code.
    pub tsunami_risk: String,
}

impl From<EventRecord> for EarthquakeDto {
    fn from(record: EventRecord) -> Self {
        Self {
            report_id: record.report_id.into(),
            origin_time: record.origin_time,
            arrival_time: record.arrival_time,
            magnitude: record.magnitude,
            depth_km: record.depth_km,
            depth_reported: record.depth_reported,
            latitude: record.latitude,
            longitude: record.longitude,
            max_intensity: record.max_intensity,
            jp_location: record.jp_location,
            en_location: record.en_location,
            jp_comment: record.jp_comment,
            en_comment: record.en_comment,
            tsunami_risk: record.tsunami_risk,
        }
    }
}

/// Query parameters for `GET /earthquakes`.
///
/// Kept as raw strings: an unparsable `limit` or `magnitude` falls back
/// to its default instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EarthquakeQuery {
    /// Maximum number of records. Defaults to 50; a negative value
    /// returns every record.
    pub limit: Option<String>,
    /// Minimum magnitude (inclusive).
    pub magnitude: Option<String>,
    /// Calendar day in JST, formatted `YYYY-MM-DD`.
    pub date: Option<String>,
}

impl EarthquakeQuery {
    /// Converts the raw parameters into a store filter.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if `date` is present but not a
    /// valid `YYYY-MM-DD` day.
    pub fn to_filter(&self) -> Result<EventFilter, ApiError> {
        let limit = match self.limit.as_deref().map(str::trim) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(n) if n < 0 => None,
                Ok(n) if n > 0 => Some(u32::try_from(n).unwrap_or(u32::MAX)),
                _ => Some(DEFAULT_LIST_LIMIT),
            },
            None => Some(DEFAULT_LIST_LIMIT),
        };

        let min_magnitude = self
            .magnitude
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|m| m.is_finite() && *m > 0.0);

        let date = match self.date.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ApiError::InvalidRequest(format!("invalid date {raw:?}, expected YYYY-MM-DD"))
            })?),
        };

        Ok(EventFilter {
            limit,
            min_magnitude,
            date,
        })
    }
}

/// Response body for `GET /earthquakes/recent`.
#[derive(Debug, Serialize, ToSchema)]
pub struct RecentEarthquakesResponse {
    /// Present only when the window is empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Number of records in the window.
    pub count: usize,
    /// Window length label.
    pub timeframe: String,
    /// Records in the window, newest first. Omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub earthquakes: Vec<EarthquakeDto>,
}

impl RecentEarthquakesResponse {
    /// Builds the response from the records in the window.
    #[must_use]
    pub fn from_records(records: Vec<EventRecord>) -> Self {
        let message = records
            .is_empty()
            .then(|| format!("No earthquakes found in the last {RECENT_TIMEFRAME}"));
        Self {
            message,
            count: records.len(),
            timeframe: RECENT_TIMEFRAME.to_string(),
            earthquakes: records.into_iter().map(EarthquakeDto::from).collect(),
        }
    }
}

/// Response body for `GET /earthquakes/stats`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EarthquakeStatsResponse {
    /// Number of stored records.
    pub total_earthquakes: i64,
    /// Records with an origin time in the last 24 hours.
    pub last_24_hours: i64,
    /// Largest stored magnitude.
    pub max_magnitude: Option<f64>,
    /// Mean stored magnitude.
    pub average_magnitude: Option<f64>,
    /// Most recent origin time.
    pub latest_earthquake: Option<DateTime<Utc>>,
}

impl From<EventStats> for EarthquakeStatsResponse {
    fn from(stats: EventStats) -> Self {
        Self {
            total_earthquakes: stats.total,
            last_24_hours: stats.recent,
            max_magnitude: stats.max_magnitude,
            average_magnitude: stats.average_magnitude,
            latest_earthquake: stats.latest_origin_time,
        }
    }
}
