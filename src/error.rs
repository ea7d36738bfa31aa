//! Error types for ingestion, persistence, and the HTTP surface.
//!
//! Failures are split by blast radius. [`SyncError`] aborts a whole sync
//! run; [`FeedError`] on a detail fetch, [`NormalizeError`], and
//! [`StoreError`] only ever skip a single event. [`ApiError`] maps
//! everything that reaches a handler onto an HTTP status and a structured
//! JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "earthquake not found: 20250812113450",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see [`ApiError`] for ranges).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// The compound coordinate string could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateError {
    /// Fewer than two signed-decimal tokens were found.
    #[error("malformed coordinate {0:?}: expected latitude and longitude")]
    MissingComponents(String),

    /// A matched token failed numeric conversion.
    #[error("malformed coordinate {input:?}: invalid {component} {token:?}")]
    InvalidComponent {
        /// The full coordinate string.
        input: String,
        /// Which component failed (`latitude`, `longitude`, `depth`).
        component: &'static str,
        /// The offending token.
        token: String,
    },
}

/// A detail document could not be turned into an event record.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The detail payload is not the expected JSON shape.
    #[error("malformed detail document: {0}")]
    MalformedDetail(#[from] serde_json::Error),

    /// A non-empty timestamp field is not RFC 3339.
    #[error("invalid {field} timestamp {value:?}: {source}")]
    InvalidTimestamp {
        /// Upstream field name (`OriginTime` or `ArrivalTime`).
        field: &'static str,
        /// The raw value.
        value: String,
        /// Underlying chrono parse error.
        source: chrono::ParseError,
    },

    /// The hypocenter coordinate string is malformed.
    #[error(transparent)]
    MalformedCoordinate(#[from] CoordinateError),
}

/// An upstream feed request failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum FeedError {
    /// The request never produced a response, or its body could not be read.
    #[error("feed unavailable at {url}: {reason}")]
    Transport {
        /// Requested URL.
        url: String,
        /// Transport-level failure description.
        reason: String,
    },

    /// The upstream answered with a status of 400 or above.
    #[error("feed returned status {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },
}

impl FeedError {
    /// Returns the HTTP status code when the upstream produced one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }
}

/// Store gateway failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with the same report id is already stored.
    #[error("report {0} is already stored")]
    Duplicate(String),

    /// Any other database failure.
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// A failure that aborts an entire sync run.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The summary list could not be fetched.
    #[error("summary list unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),

    /// The summary list is not a JSON array of summaries.
    #[error("summary list is malformed: {0}")]
    FeedFormat(#[from] serde_json::Error),

    /// No store session could be opened for the run.
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// HTTP-facing error enum with status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status               |
/// |-----------|-----------------|---------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request           |
/// | 2000–2999 | Not Found       | 404 Not Found             |
/// | 3000–3999 | Server          | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No earthquake with the given report id.
    #[error("earthquake not found: {0}")]
    NotFound(String),

    /// Store failure while serving a read.
    #[error("persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// A sync run hit a fatal error.
    #[error("sync failed: {0}")]
    SyncFailed(#[from] SyncError),
}

impl ApiError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::NotFound(_) => 2001,
            Self::Persistence(_) => 3001,
            Self::SyncFailed(_) => 3002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) | Self::SyncFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_status_is_exposed() {
        let err = FeedError::Status {
            url: "https://example.test/list.json".to_string(),
            status: 503,
        };
        assert_eq!(err.status(), Some(503));

        let err = FeedError::Transport {
            url: "https://example.test/list.json".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn api_errors_map_to_status_codes() {
        assert_eq!(
            ApiError::InvalidRequest("bad date".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound("x".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        let sync = ApiError::from(SyncError::FeedUnavailable(FeedError::Status {
            url: "u".to_string(),
            status: 500,
        }));
        assert_eq!(sync.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(sync.error_code(), 3002);
    }

    #[test]
    fn not_found_renders_404() {
        let response = ApiError::NotFound("20250812113450".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
