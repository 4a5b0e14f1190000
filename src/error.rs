//! Domain-specific error types for diagnosis-api

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Spellings accepted for a positive answer, as shown in error messages.
pub const TRUE_SPELLINGS: &str = "true, \"yes\", \"Yes\", \"YES\", \"true\", \"True\"";
/// Spellings accepted for a negative answer, as shown in error messages.
pub const FALSE_SPELLINGS: &str =
    "false, null, \"no\", \"No\", \"NO\", \"null\", \"false\", \"False\"";

/// Main error type for the diagnosis engines and their transport
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosisError {
    #[error("Missing fields: {}", .fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error(
        "Invalid value for field '{field}': expected one of {} or one of {}",
        TRUE_SPELLINGS,
        FALSE_SPELLINGS
    )]
    InvalidFieldValue { field: String },

    #[error("Malformed payload: {message}")]
    MalformedPayload { message: String },

    #[error("Unknown diagnosis engine '{name}' (expected 'ed' or 'pe')")]
    UnknownEngine { name: String },

    #[error("Configuration integrity fault in {engine} engine: {message}")]
    ConfigurationIntegrity { engine: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DiagnosisError {
    /// HTTP status the transport answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DiagnosisError::MissingFields { .. }
            | DiagnosisError::InvalidFieldValue { .. }
            | DiagnosisError::MalformedPayload { .. } => StatusCode::BAD_REQUEST,
            DiagnosisError::UnknownEngine { .. } => StatusCode::NOT_FOUND,
            DiagnosisError::ConfigurationIntegrity { .. }
            | DiagnosisError::Config { .. }
            | DiagnosisError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the caller sent something we refuse, as opposed to a fault on our side.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// The `{"status":"error", ...}` envelope sent back to clients.
    pub fn to_body(&self) -> serde_json::Value {
        json!({
            "status": "error",
            "code": self.status_code().as_u16(),
            "message": self.to_string(),
        })
    }
}

impl From<serde_json::Error> for DiagnosisError {
    fn from(err: serde_json::Error) -> Self {
        let message = if err.is_syntax() || err.is_eof() {
            "Invalid JSON format".to_string()
        } else {
            err.to_string()
        };
        DiagnosisError::MalformedPayload { message }
    }
}

impl From<toml::de::Error> for DiagnosisError {
    fn from(err: toml::de::Error) -> Self {
        DiagnosisError::Config {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for DiagnosisError {
    fn from(err: anyhow::Error) -> Self {
        DiagnosisError::Internal {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for DiagnosisError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }
        (status, Json(self.to_body())).into_response()
    }
}

/// Result type alias for diagnosis operations
pub type Result<T> = std::result::Result<T, DiagnosisError>;
