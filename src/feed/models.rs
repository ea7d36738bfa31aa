//! Wire shapes of the JMA quake feed.
//!
//! Only the fields the pipeline consumes are modelled; everything else in
//! the upstream documents is ignored. Missing or `null` fields decode to empty
//! strings, matching how the agency omits values for preliminary reports.

use serde::{Deserialize, Deserializer};

use crate::domain::ReportId;

/// One entry of the summary list (`list.json`).
///
/// Transient: produced on every sync, consumed immediately, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuakeSummary {
    /// Report identifier.
    #[serde(rename = "eid", default, deserialize_with = "null_as_default")]
    pub id: String,

    /// Path of the detail document relative to the detail base URL.
    #[serde(rename = "json", default, deserialize_with = "null_as_default")]
    pub detail_reference: String,
}

impl QuakeSummary {
    /// Returns the typed report id for this entry.
    #[must_use]
    pub fn report_id(&self) -> ReportId {
        ReportId::new(self.id.clone())
    }
}

/// Parses the summary list body.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if the body is not a JSON array of
/// objects.
pub fn parse_summary_list(bytes: &[u8]) -> Result<Vec<QuakeSummary>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Decodes `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A per-event detail document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailReport {
    /// Report body.
    #[serde(default, deserialize_with = "null_as_default")]
    pub body: DetailBody,
}

/// `Body` of a detail document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DetailBody {
    /// Origin, magnitude, and hypocenter.
    #[serde(default, deserialize_with = "null_as_default")]
    pub earthquake: EarthquakeSection,

    /// Observed intensity.
    #[serde(default, deserialize_with = "null_as_default")]
    pub intensity: IntensitySection,

    /// Forecast comments.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: CommentsSection,
}

/// `Body.Earthquake`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EarthquakeSection {
    /// RFC 3339 origin time, possibly empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub origin_time: String,

    /// RFC 3339 arrival time, possibly empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub arrival_time: String,

    /// Decimal magnitude, possibly empty or a non-numeric marker.
    #[serde(default, deserialize_with = "null_as_default")]
    pub magnitude: String,

    /// Hypocenter description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hypocenter: Hypocenter,
}

/// `Body.Earthquake.Hypocenter`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Hypocenter {
    /// Named area with the compound coordinate.
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: HypocenterArea,
}

/// `Body.Earthquake.Hypocenter.Area`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HypocenterArea {
    /// Compound coordinate string.
    #[serde(rename = "Coordinate", default, deserialize_with = "null_as_default")]
    pub coordinate: String,

    /// Japanese place name.
    #[serde(rename = "Name", default, deserialize_with = "null_as_default")]
    pub name: String,

    /// English place name.
    #[serde(rename = "enName", default, deserialize_with = "null_as_default")]
    pub en_name: String,
}

/// `Body.Intensity`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IntensitySection {
    /// Observation block.
    #[serde(default, deserialize_with = "null_as_default")]
    pub observation: IntensityObservation,
}

/// `Body.Intensity.Observation`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntensityObservation {
    /// Maximum observed intensity code.
    #[serde(rename = "MaxInt", default, deserialize_with = "null_as_default")]
    pub max_int: String,
}

/// `Body.Comments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CommentsSection {
    /// Forecast comment (tsunami advisory text).
    #[serde(default, deserialize_with = "null_as_default")]
    pub forecast_comment: Comment,
}

/// A bilingual comment block.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comment {
    /// Japanese text.
    #[serde(rename = "Text", default, deserialize_with = "null_as_default")]
    pub text: String,

    /// English text.
    #[serde(rename = "enText", default, deserialize_with = "null_as_default")]
    pub en_text: String,
}
