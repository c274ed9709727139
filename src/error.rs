//! Error taxonomy, from the upstream HTTP client up to the HTTP boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::response::ErrorResponse;

/// Failure of a single call to the marketplace.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The marketplace answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16, body: String },

    /// No response: connection refused, DNS, timeout.
    #[error("upstream request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            UpstreamError::Transport(_) | UpstreamError::Decode(_) => None,
        }
    }
}

/// Classified search failure.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Unauthorized: Invalid or missing Mercado Livre access token")]
    Unauthorized,

    #[error("Forbidden: Insufficient permissions for this request")]
    Forbidden,

    #[error("Not found: The requested resource does not exist")]
    NotFound,

    #[error("Mercado Livre API server error (HTTP {status})")]
    UpstreamServer { status: u16 },

    #[error("Unexpected Mercado Livre API error: {0}")]
    UnknownUpstream(#[source] UpstreamError),
}

impl From<UpstreamError> for SearchError {
    fn from(err: UpstreamError) -> Self {
        match err.status() {
            Some(401) => SearchError::Unauthorized,
            Some(403) => SearchError::Forbidden,
            Some(404) => SearchError::NotFound,
            Some(status) if status >= 500 => SearchError::UpstreamServer { status },
            _ => SearchError::UnknownUpstream(err),
        }
    }
}

/// Error surfaced by a request handler.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing search query parameter (q)")]
    MissingParameter,

    #[error(transparent)]
    Search(#[from] SearchError),

    /// The query string could not be decoded (e.g. `q` given twice).
    #[error("Invalid query string: {0}")]
    InvalidQuery(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingParameter | ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Search(SearchError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::Search(SearchError::Forbidden) => StatusCode::FORBIDDEN,
            ApiError::Search(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MissingParameter => "missing_parameter",
            ApiError::InvalidQuery(_) => "invalid_parameter",
            ApiError::Search(SearchError::Unauthorized) => "unauthorized",
            ApiError::Search(SearchError::Forbidden) => "forbidden",
            ApiError::Search(_) => "internal_error",
        }
    }

    /// Render the envelope. `details` is only attached for 500s and only
    /// when `expose_details` is set (non-production).
    pub fn into_response_with(self, expose_details: bool) -> Response {
        let status = self.status_code();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            let details = expose_details.then(|| serde_json::Value::String(self.to_string()));
            ErrorResponse::new(
                self.code(),
                "An error occurred while processing your request",
                details,
            )
        } else {
            ErrorResponse::new(self.code(), self.to_string(), None)
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: u16) -> UpstreamError {
        UpstreamError::Status {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn upstream_statuses_are_classified() {
        assert!(matches!(SearchError::from(status_error(401)), SearchError::Unauthorized));
        assert!(matches!(SearchError::from(status_error(403)), SearchError::Forbidden));
        assert!(matches!(SearchError::from(status_error(404)), SearchError::NotFound));
        assert!(matches!(
            SearchError::from(status_error(503)),
            SearchError::UpstreamServer { status: 503 }
        ));
        assert!(matches!(
            SearchError::from(status_error(429)),
            SearchError::UnknownUpstream(_)
        ));
    }

    #[test]
    fn boundary_mapping() {
        let cases = [
            (ApiError::MissingParameter, StatusCode::BAD_REQUEST, "missing_parameter"),
            (SearchError::Unauthorized.into(), StatusCode::UNAUTHORIZED, "unauthorized"),
            (SearchError::Forbidden.into(), StatusCode::FORBIDDEN, "forbidden"),
            (SearchError::NotFound.into(), StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
            (
                SearchError::UpstreamServer { status: 502 }.into(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
            ),
            (
                ApiError::InvalidQuery("duplicate field `q`".into()),
                StatusCode::BAD_REQUEST,
                "invalid_parameter",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.code(), code, "{err}");
        }
    }
}
