//! HTTP-facing error type shared by every resource handler.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

use crate::schemas::ValidationError;

/// Message returned for any store failure; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "An Internal Server Error occurred.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed schema validation
    #[error("The {resource} details failed validation: {source}")]
    Validation {
        resource: &'static str,
        #[source]
        source: ValidationError,
    },

    /// No row matches the lookup key
    #[error("{0}")]
    NotFound(String),

    /// The underlying store operation failed
    #[error("Database error: {0}")]
    Persistence(#[from] DbErr),
}

impl ApiError {
    pub fn validation(resource: &'static str, source: ValidationError) -> Self {
        ApiError::Validation { resource, source }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_FAILED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Persistence(_) => "DATABASE_ERROR",
        }
    }

    /// Text placed in the `message` field of the response body
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Persistence(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        match &self {
            ApiError::Persistence(err) => tracing::error!(code, "Database error: {}", err),
            ApiError::Validation { .. } => tracing::info!(code, "{}", self),
            ApiError::NotFound(_) => tracing::warn!(code, "{}", self),
        }

        let body = json!({ "message": self.public_message() });
        (self.status_code(), Json(body)).into_response()
    }
}
