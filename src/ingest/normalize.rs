//! Detail normalizer: raw detail document → [`EventRecord`].

use chrono::{DateTime, Utc};

use super::coordinate::parse_coordinate;
use crate::domain::{EventRecord, ReportId};
use crate::error::NormalizeError;
use crate::feed::models::DetailReport;

/// Decodes and normalizes one detail document.
///
/// # Errors
///
/// Returns [`NormalizeError::MalformedDetail`] if the bytes are not a
/// detail document, otherwise see [`normalize_report`].
pub fn normalize_detail(report_id: ReportId, bytes: &[u8]) -> Result<EventRecord, NormalizeError> {
    let report: DetailReport = serde_json::from_slice(bytes)?;
    normalize_report(report_id, report)
}

/// Converts a decoded detail document into an event record.
///
/// Empty timestamps stay `None`; an empty or unparsable magnitude becomes
/// `0.0`. Text fields are copied verbatim.
///
/// # Errors
///
/// Returns [`NormalizeError::InvalidTimestamp`] for a non-empty timestamp
/// that is not RFC 3339, and [`NormalizeError::MalformedCoordinate`] for a
/// non-empty coordinate the parser rejects.
pub fn normalize_report(
    report_id: ReportId,
    report: DetailReport,
) -> Result<EventRecord, NormalizeError> {
    let body = report.body;
    let quake = body.earthquake;
    let area = quake.hypocenter.area;

    let mut record = EventRecord::new(report_id);
    record.origin_time = parse_timestamp("OriginTime", &quake.origin_time)?;
    record.arrival_time = parse_timestamp("ArrivalTime", &quake.arrival_time)?;

    let coordinate = area.coordinate.trim();
    if !coordinate.is_empty() {
        let parsed = parse_coordinate(coordinate)?;
        record.latitude = parsed.latitude;
        record.longitude = parsed.longitude;
        record.depth_km = parsed.depth_km_truncated();
        record.depth_reported = parsed.depth_km.is_some();
        record.tsunami_risk = parsed.tsunami_risk;
    }

    record.magnitude = parse_magnitude(&quake.magnitude);
    record.max_intensity = body.intensity.observation.max_int;
    record.jp_location = area.name;
    record.en_location = area.en_name;
    record.jp_comment = body.comments.forecast_comment.text;
    record.en_comment = body.comments.forecast_comment.en_text;

    Ok(record)
}

/// RFC 3339 with an uppercase `T` separator and a numeric offset.
const RFC3339_STRICT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

fn parse_timestamp(
    field: &'static str,
    value: &str,
) -> Result<Option<DateTime<Utc>>, NormalizeError> {
    if value.is_empty() {
        return Ok(None);
    }
    let numeric_offset = value.strip_suffix('Z').map(|v| format!("{v}+00:00"));
    DateTime::parse_from_str(numeric_offset.as_deref().unwrap_or(value), RFC3339_STRICT)
        .map(|t| Some(t.with_timezone(&Utc)))
        .map_err(|source| NormalizeError::InvalidTimestamp {
            field,
            value: value.to_string(),
            source,
        })
}

/// Anything that is not a finite number (empty, "M不明") becomes zero.
fn parse_magnitude(value: &str) -> f64 {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|m| m.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn detail(origin: &str, arrival: &str, magnitude: &str, coordinate: &str) -> Vec<u8> {
        json!({
            "Control": {},
            "Head": {},
            "Body": {
                "Earthquake": {
                    "OriginTime": origin,
                    "ArrivalTime": arrival,
                    "Magnitude": magnitude,
                    "Hypocenter": {"Area": {
                        "Name": "石川県能登地方",
                        "enName": "Noto, Ishikawa Prefecture",
                        "Coordinate": coordinate
                    }}
                },
                "Intensity": {"Observation": {"MaxInt": "5-"}},
                "Comments": {"ForecastComment": {
                    "Text": "この地震による津波の心配はありません。",
                    "enText": "This earthquake poses no tsunami risk."
                }}
            }
        })
        .to_string()
        .into_bytes()
    }

    fn normalize_ok(bytes: &[u8]) -> EventRecord {
        match normalize_detail(ReportId::new("20240101161010"), bytes) {
            Ok(record) => record,
            Err(e) => panic!("normalization failed: {e}"),
        }
    }

    #[test]
    fn full_document_populates_every_field() {
        let record = normalize_ok(&detail(
            "2024-01-01T16:10:00+09:00",
            "2024-01-01T16:12:00+09:00",
            "7.6",
            "+37.5+137.3-10000/",
        ));

        assert_eq!(record.report_id.as_str(), "20240101161010");
        assert_eq!(
            record.origin_time,
            Utc.with_ymd_and_hms(2024, 1, 1, 7, 10, 0).single()
        );
        assert_eq!(
            record.arrival_time,
            Utc.with_ymd_and_hms(2024, 1, 1, 7, 12, 0).single()
        );
        assert!((record.magnitude - 7.6).abs() < f64::EPSILON);
        assert_eq!(record.depth_km, -10);
        assert!(record.depth_reported);
        assert!((record.latitude - 37.5).abs() < f64::EPSILON);
        assert!((record.longitude - 137.3).abs() < f64::EPSILON);
        assert_eq!(record.max_intensity, "5-");
        assert_eq!(record.jp_location, "石川県能登地方");
        assert_eq!(record.en_location, "Noto, Ishikawa Prefecture");
        assert_eq!(record.jp_comment, "この地震による津波の心配はありません。");
        assert_eq!(record.en_comment, "This earthquake poses no tsunami risk.");
        assert_eq!(record.tsunami_risk, "");
    }

    #[test]
    fn empty_magnitude_is_zero() {
        let record = normalize_ok(&detail(
            "2024-01-01T16:10:00+09:00",
            "",
            "",
            "+37.5+137.3-10000/",
        ));
        assert!(record.magnitude.abs() < f64::EPSILON);
    }

    #[test]
    fn unparsable_magnitude_is_zero() {
        for magnitude in ["M不明", "Ｍ８を超える巨大地震", "NaN", "inf"] {
            let record = normalize_ok(&detail("", "", magnitude, ""));
            assert!(record.magnitude.abs() < f64::EPSILON, "{magnitude}");
        }
    }

    #[test]
    fn empty_times_are_absent_not_errors() {
        let record = normalize_ok(&detail("", "", "3.0", "+35.0+135.0-10000/"));
        assert_eq!(record.origin_time, None);
        assert_eq!(record.arrival_time, None);
    }

    #[test]
    fn times_are_parsed_independently() {
        let record = normalize_ok(&detail("", "2024-01-01T16:12:00+09:00", "3.0", ""));
        assert_eq!(record.origin_time, None);
        assert!(record.arrival_time.is_some());
    }

    #[test]
    fn malformed_origin_time_fails() {
        let result = normalize_detail(
            ReportId::new("1"),
            &detail("2024/01/01 16:10", "", "3.0", ""),
        );
        let Err(NormalizeError::InvalidTimestamp { field, value, .. }) = result else {
            panic!("expected invalid timestamp");
        };
        assert_eq!(field, "OriginTime");
        assert_eq!(value, "2024/01/01 16:10");
    }

    #[test]
    fn malformed_arrival_time_fails() {
        let result = normalize_detail(
            ReportId::new("1"),
            &detail("2024-01-01T16:10:00+09:00", "yesterday", "3.0", ""),
        );
        assert!(matches!(
            result,
            Err(NormalizeError::InvalidTimestamp {
                field: "ArrivalTime",
                ..
            })
        ));
    }

    #[test]
    fn malformed_coordinate_fails() {
        let result = normalize_detail(ReportId::new("1"), &detail("", "", "3.0", "+35.0"));
        assert!(matches!(
            result,
            Err(NormalizeError::MalformedCoordinate(_))
        ));
    }

    #[test]
    fn blank_coordinate_leaves_position_unset() {
        let record = normalize_ok(&detail("", "", "3.0", "   "));
        assert!(record.latitude.abs() < f64::EPSILON);
        assert_eq!(record.depth_km, 0);
        assert!(!record.depth_reported);
    }

    #[test]
    fn coordinate_is_trimmed_before_parsing() {
        let record = normalize_ok(&detail("", "", "3.0", " +35.6762+139.6503+10/0 "));
        assert_eq!(record.depth_km, 0);
        assert!(record.depth_reported);
        assert_eq!(record.tsunami_risk, "0");
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let record = normalize_ok(br#"{"Body":{}}"#);
        assert_eq!(record.max_intensity, "");
        assert_eq!(record.jp_comment, "");
        assert_eq!(record.origin_time, None);
    }

    #[test]
    fn zulu_and_fractional_times_parse() {
        let record = normalize_ok(&detail(
            "2024-01-01T07:10:00Z",
            "2024-01-01T16:12:00.5+09:00",
            "3.0",
            "",
        ));
        assert_eq!(
            record.origin_time,
            Utc.with_ymd_and_hms(2024, 1, 1, 7, 10, 0).single()
        );
        assert!(record.arrival_time.is_some());
    }

    #[test]
    fn space_separated_time_is_rejected() {
        let result = normalize_detail(
            ReportId::new("1"),
            &detail("2024-01-01 16:10:00+09:00", "", "3.0", ""),
        );
        assert!(matches!(
            result,
            Err(NormalizeError::InvalidTimestamp {
                field: "OriginTime",
                ..
            })
        ));
    }

    #[test]
    fn null_magnitude_is_zero() {
        let body = br#"{"Body":{"Earthquake":{
            "OriginTime": null,
            "Magnitude": null,
            "Hypocenter": {"Area": {"Coordinate": "+35.0+135.0-10000/", "enName": null}}
        }}}"#;
        let record = normalize_ok(body);
        assert!(record.magnitude.abs() < f64::EPSILON);
        assert_eq!(record.origin_time, None);
        assert_eq!(record.en_location, "");
        assert!(record.depth_reported);
    }

    #[test]
    fn null_sections_default_to_empty() {
        let body = br#"{"Body":{
            "Earthquake": {"Magnitude": "4.0", "Hypocenter": null},
            "Intensity": null,
            "Comments": null
        }}"#;
        let record = normalize_ok(body);
        assert!((record.magnitude - 4.0).abs() < f64::EPSILON);
        assert_eq!(record.max_intensity, "");
        assert_eq!(record.jp_comment, "");
        assert_eq!(record.en_comment, "");
        assert!(!record.depth_reported);
    }

    #[test]
    fn non_json_detail_is_malformed() {
        let result = normalize_detail(ReportId::new("1"), b"<html>503</html>");
        assert!(matches!(result, Err(NormalizeError::MalformedDetail(_))));
    }
}
