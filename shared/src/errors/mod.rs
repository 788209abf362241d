//! Shared error types and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Standard error response structure used across all API endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for client identification
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error details (field errors, etc.)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Add a detail field to the error response
    pub fn add_detail(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        let details = self.details.get_or_insert_with(HashMap::new);
        if let Ok(json_value) = serde_json::to_value(value) {
            details.insert(key.into(), json_value);
        }
        self
    }
}

/// Error codes used across the application.
///
/// The three authentication codes are part of the client contract: `missing`
/// asks the client to supply a credential, `invalid_or_expired` to refresh or
/// retry with a fixed token, `refresh_expired` to re-authenticate.
pub mod error_codes {
    pub const MISSING_AUTH: &str = "missing";
    pub const INVALID_OR_EXPIRED: &str = "invalid_or_expired";
    pub const REFRESH_EXPIRED: &str = "refresh_expired";
    pub const NOT_FOUND: &str = "not_found";
    pub const VALIDATION_ERROR: &str = "validation_error";
    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Errors that render as the standard JSON error body
pub trait IntoErrorResponse {
    fn to_error_response(&self) -> ErrorResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_with_detail() {
        let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Bad input")
            .add_detail("field", "username");

        assert_eq!(response.error, "validation_error");
        assert_eq!(response.message, "Bad input");
        assert_eq!(response.details.unwrap()["field"], "username");
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("missing", "Missing auth")).unwrap();
        assert!(json.get("details").is_none());
        assert_eq!(json["error"], "missing");
    }
}
