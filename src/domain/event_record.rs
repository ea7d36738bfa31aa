//! Canonical earthquake record persisted by the sync pipeline.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use serde::Serialize;

use super::ReportId;

/// UTC offset of the upstream agency (JST, +09:00), in seconds.
pub const JST_OFFSET_SECS: i32 = 9 * 3600;

/// A normalized earthquake report.
///
/// Created once per unique [`ReportId`] and never mutated afterwards:
/// the pipeline skips ids that are already stored even if the upstream
/// content for that id has changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    /// Agency-assigned identifier (primary key).
    pub report_id: ReportId,

    /// When the quake occurred. `None` if the upstream omitted it.
    pub origin_time: Option<DateTime<Utc>>,

    /// When the report was issued. Parsed independently of `origin_time`.
    pub arrival_time: Option<DateTime<Utc>>,

    /// Seismic magnitude; `0.0` when the upstream field is empty or unparsable.
    pub magnitude: f64,

    /// Hypocenter depth in kilometers, truncated toward zero.
    pub depth_km: i32,

    /// Whether the coordinate string carried a depth segment at all.
    ///
    /// Distinguishes "not reported" from a genuine surface-level event,
    /// both of which have `depth_km == 0`.
    pub depth_reported: bool,

    /// Hypocenter latitude in signed decimal degrees.
    pub latitude: f64,

    /// Hypocenter longitude in signed decimal degrees.
    pub longitude: f64,

    /// Agency intensity code (opaque label such as `"5-"`).
    pub max_intensity: String,

    /// Place name in Japanese.
    pub jp_location: String,

    /// Place name in English.
    pub en_location: String,

    /// Forecast comment in Japanese; empty when absent.
    pub jp_comment: String,

    /// Forecast comment in English; empty when absent.
    pub en_comment: String,

    /// Tsunami-risk code. Empty means "no information", not "no risk".
    pub tsunami_risk: String,
}

impl EventRecord {
    /// Creates an empty record for the given id; every other field holds
    /// its zero value.
    #[must_use]
    pub fn new(report_id: ReportId) -> Self {
        Self {
            report_id,
            origin_time: None,
            arrival_time: None,
            magnitude: 0.0,
            depth_km: 0,
            depth_reported: false,
            latitude: 0.0,
            longitude: 0.0,
            max_intensity: String::new(),
            jp_location: String::new(),
            en_location: String::new(),
            jp_comment: String::new(),
            en_comment: String::new(),
            tsunami_risk: String::new(),
        }
    }
}

/// Filter applied by the list endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Maximum number of records; `None` returns everything.
    pub limit: Option<u32>,

    /// Minimum magnitude (inclusive).
    pub min_magnitude: Option<f64>,

    /// Calendar day (JST) the origin time must fall on.
    pub date: Option<NaiveDate>,
}

impl EventFilter {
    /// Returns `true` if `record` passes the magnitude and date filters.
    #[must_use]
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(min) = self.min_magnitude
            && record.magnitude < min
        {
            return false;
        }
        if let Some((start, end)) = self.date_bounds() {
            return record
                .origin_time
                .is_some_and(|t| t >= start && t < end);
        }
        true
    }

    /// UTC half-open interval covering the requested JST calendar day.
    #[must_use]
    pub fn date_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let date = self.date?;
        let offset = FixedOffset::east_opt(JST_OFFSET_SECS)?;
        let start = date
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(offset)
            .single()?
            .with_timezone(&Utc);
        Some((start, start + TimeDelta::days(1)))
    }
}

/// Aggregate figures over the stored records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventStats {
    /// Number of stored records.
    pub total: i64,

    /// Records whose origin time falls inside the recent window.
    pub recent: i64,

    /// Largest magnitude on record.
    pub max_magnitude: Option<f64>,

    /// Mean magnitude across all records.
    pub average_magnitude: Option<f64>,

    /// Latest origin time on record.
    pub latest_origin_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record_at(id: &str, magnitude: f64, origin: Option<DateTime<Utc>>) -> EventRecord {
        let mut record = EventRecord::new(ReportId::new(id));
        record.magnitude = magnitude;
        record.origin_time = origin;
        record
    }

    #[test]
    fn new_record_is_empty() {
        let record = EventRecord::new(ReportId::new("1"));
        assert!(record.tsunami_risk.is_empty());
        assert!(record.origin_time.is_none());
        assert!(!record.depth_reported);
    }

    #[test]
    fn magnitude_filter_is_inclusive() {
        let filter = EventFilter {
            min_magnitude: Some(4.0),
            ..EventFilter::default()
        };
        assert!(filter.matches(&record_at("a", 4.0, None)));
        assert!(!filter.matches(&record_at("b", 3.9, None)));
    }

    #[test]
    fn date_filter_uses_jst_calendar_day() {
        let Some(date) = NaiveDate::from_ymd_opt(2025, 8, 12) else {
            panic!("valid date");
        };
        let filter = EventFilter {
            date: Some(date),
            ..EventFilter::default()
        };
        // 2025-08-12 00:30 JST is still 2025-08-11 in UTC.
        let early = Utc.with_ymd_and_hms(2025, 8, 11, 15, 30, 0).single();
        let previous_day = Utc.with_ymd_and_hms(2025, 8, 11, 14, 59, 0).single();
        assert!(filter.matches(&record_at("a", 1.0, early)));
        assert!(!filter.matches(&record_at("b", 1.0, previous_day)));
        assert!(!filter.matches(&record_at("c", 1.0, None)));
    }
}
