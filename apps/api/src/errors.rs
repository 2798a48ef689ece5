use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing credentials or identifiers, detected before any remote call.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Strict-mode profile validation failure on the first offending field.
    #[error("Validation failed for feature '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// On-disk record could not be decoded; the file was restored before this was raised.
    #[error("Stored data is corrupted: {0}")]
    Corruption(String),

    #[error("Oracle error: {0}")]
    Oracle(String),

    #[error("Oracle timed out: {0}")]
    Timeout(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Wraps a generation failure with the section it happened in.
    pub fn from_llm(section: &str, err: LlmError) -> Self {
        match err {
            LlmError::Timeout => AppError::Timeout(format!("rewriting section {section}")),
            other => AppError::Oracle(format!("rewriting section {section}: {other}")),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::InvalidInput(_) => "INVALID_INPUT",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Corruption(_) => "CORRUPTION_ERROR",
            AppError::Oracle(_) => "ORACLE_ERROR",
            AppError::Timeout(_) => "ORACLE_TIMEOUT",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Serialization(msg) | AppError::Corruption(msg) => {
                tracing::error!("Persistence error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Oracle(msg) => {
                tracing::error!("Oracle error: {msg}");
                StatusCode::BAD_GATEWAY
            }
            AppError::Timeout(msg) => {
                tracing::error!("Oracle timeout: {msg}");
                StatusCode::GATEWAY_TIMEOUT
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AppError::Storage(_) => "A storage error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_timeout_maps_to_timeout_kind() {
        let err = AppError::from_llm("SKILLS", LlmError::Timeout);
        assert_eq!(err.code(), "ORACLE_TIMEOUT");
        assert!(err.to_string().contains("SKILLS"));
    }

    #[test]
    fn test_llm_empty_content_maps_to_oracle_kind() {
        let err = AppError::from_llm("EDUCATION", LlmError::EmptyContent);
        assert_eq!(err.code(), "ORACLE_ERROR");
        assert!(err.to_string().contains("EDUCATION"));
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = AppError::Validation {
            field: "headline".to_string(),
            reason: "missing".to_string(),
        };
        assert!(err.to_string().contains("'headline'"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
