//! Error types for the SmartCity admin tools.

use thiserror::Error;

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Message used when the backend gives no usable explanation.
pub const GENERIC_FAILURE: &str = "Có lỗi xảy ra";

/// Application error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    // === Client-side ===
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Backend ===
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build an [`AppError::Api`] from a status and an optional backend message.
    #[must_use]
    pub fn api(status: u16, message: Option<String>) -> Self {
        let message = message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        Self::Api { status, message }
    }

    /// Returns the error code for logs and exit reporting.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the backend HTTP status, if the backend answered at all.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether no request reached the backend.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Config(_)
        )
    }

    /// The single normalized message shown to an operator.
    ///
    /// Backend failures show the backend's own message; every other kind
    /// shows its payload, falling back to [`GENERIC_FAILURE`] when empty.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Api { message, .. } => message,
            Self::Validation(m)
            | Self::NotFound(m)
            | Self::Config(m)
            | Self::Network(m)
            | Self::Decode(m)
            | Self::Internal(m) => m,
        };
        if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message.clone()
        }
    }
}

// === From implementations ===

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_keeps_backend_message() {
        let err = AppError::api(400, Some("Water level is required".to_string()));
        assert_eq!(err.user_message(), "Water level is required");
        assert_eq!(err.http_status(), Some(400));
        assert_eq!(err.error_code(), "API_ERROR");
    }

    #[test]
    fn test_api_error_falls_back_when_message_blank() {
        let err = AppError::api(502, Some("   ".to_string()));
        assert_eq!(err.user_message(), "Request failed with status 502");

        let err = AppError::api(500, None);
        assert_eq!(err.user_message(), "Request failed with status 500");
    }

    #[test]
    fn test_empty_message_uses_generic_fallback() {
        let err = AppError::Network(String::new());
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn test_client_side_classification() {
        assert!(AppError::Validation("x".into()).is_client_side());
        assert!(AppError::NotFound("x".into()).is_client_side());
        assert!(!AppError::Network("x".into()).is_client_side());
        assert!(!AppError::api(404, None).is_client_side());
    }

    #[test]
    fn test_display_includes_status() {
        let err = AppError::api(409, Some("Conflict".to_string()));
        assert_eq!(err.to_string(), "Backend error (409): Conflict");
    }
}
