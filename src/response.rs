//! Uniform `{ success, data | error }` envelopes.

use serde::Serialize;

pub const SEARCH_SOURCE: &str = "Mercado Livre API";

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize, M: Serialize = ()> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            metadata: None,
        }
    }
}

impl<T: Serialize, M: Serialize> ApiResponse<T, M> {
    pub fn with_metadata(data: T, metadata: M) -> Self {
        Self {
            success: true,
            data,
            metadata: Some(metadata),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchMetadata {
    pub timestamp: String,
    pub source: &'static str,
}

impl SearchMetadata {
    pub fn now() -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            source: SEARCH_SOURCE,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                details,
            },
        }
    }
}
