//! Error types with HTTP status code mapping.
//!
//! [`BoardError`] is what handlers return. Loader failures use
//! [`FeedError`], which never leaves the loaders: they recover from it by
//! falling back to fixture data or to an unavailable weather snapshot.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "event not found: 42"
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
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Handler-facing error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category  | HTTP Status               |
/// |-----------|-----------|---------------------------|
/// | 2000–2999 | Not Found | 404 Not Found             |
/// | 3000–3999 | Server    | 503 Service Unavailable   |
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// No event with the given identifier in the current sequence.
    #[error("event not found: {0}")]
    EventNotFound(String),

    /// Every recovery path for the event list failed.
    #[error("event data unavailable: {0}")]
    DataUnavailable(String),
}

impl BoardError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::EventNotFound(_) => 2001,
            Self::DataUnavailable(_) => 3001,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::EventNotFound(_) => StatusCode::NOT_FOUND,
            Self::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
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

/// Failures while talking to an upstream feed. Always recovered locally.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// No URL or credentials configured for this feed.
    #[error("feed not configured: {0}")]
    NotConfigured(&'static str),

    /// Transport-level failure (connect, TLS, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered with a non-success status.
    #[error("upstream returned status {0}")]
    Status(u16),

    /// The body was not the expected JSON shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The response lacked the expected field or it was empty.
    #[error("response has no {0}")]
    Empty(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = BoardError::EventNotFound("42".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), 2001);
        assert_eq!(err.to_string(), "event not found: 42");
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = BoardError::DataUnavailable("feed down".to_string());
        assert_eq!(err.error_code(), 3001);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn feed_error_messages() {
        assert_eq!(FeedError::Status(502).to_string(), "upstream returned status 502");
        assert_eq!(FeedError::Empty("events").to_string(), "response has no events");
    }
}
