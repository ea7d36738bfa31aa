//! Type-safe report identifier.
//!
//! [`ReportId`] is a newtype wrapper around the identifier JMA assigns to
//! every earthquake report (the `eid` field of the summary list, e.g.
//! `"20250812113450"`). It is the sole deduplication key of the store.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upstream identifier of an earthquake report.
///
/// Assigned by the agency, never generated locally. Immutable once a
/// record is created and used as the primary key of the `earthquakes`
/// table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    /// Wraps an upstream identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the upstream sent an empty identifier.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReportId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<ReportId> for String {
    fn from(id: ReportId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_verbatim() {
        let id = ReportId::new("20250812113450");
        assert_eq!(format!("{id}"), "20250812113450");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = ReportId::new("20250812113450");
        let Ok(json) = serde_json::to_string(&id) else {
            panic!("serialization failed");
        };
        assert_eq!(json, "\"20250812113450\"");
    }

    #[test]
    fn blank_ids_are_empty() {
        assert!(ReportId::new("").is_empty());
        assert!(ReportId::new("  ").is_empty());
        assert!(!ReportId::new("1").is_empty());
    }

    #[test]
    fn orders_lexicographically() {
        let older = ReportId::new("20250812113450");
        let newer = ReportId::new("20250813000000");
        assert!(older < newer);
    }
}
