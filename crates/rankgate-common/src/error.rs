//! Centralized error type for the rankgate HTTP surface.
//!
//! Uses `thiserror` for ergonomic error definitions. Every error renders as
//! `{"error":"<code>"}` with the HTTP status carrying the category (401 /
//! 400 / 500); the code disambiguates cause within the category.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// API-facing error type used by all route handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Caller failed the shared-secret check.
    #[error("unauthorized")]
    Unauthorized,

    /// Request failed local validation; the payload is the machine-readable
    /// code naming the missing or invalid field.
    #[error("validation failed: {0}")]
    Validation(&'static str),

    /// A remote operation failed. `code` names the operation; `detail` is
    /// the diagnostic, kept server-side.
    #[error("{code}: {detail}")]
    Operation { code: &'static str, detail: String },
}

impl ApiError {
    /// Remote-operation failure with the given code, capturing the diagnostic.
    pub fn operation(code: &'static str, detail: impl std::fmt::Display) -> Self {
        Self::Operation { code, detail: detail.to_string() }
    }

    /// Map error to HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Error code string for programmatic handling by clients.
    pub fn error_code(&self) -> &str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::Validation(code) => code,
            Self::Operation { code, .. } => code,
        }
    }
}

/// JSON error response body sent to clients.
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Full diagnostic detail stays in the server log, never in the body.
        if let ApiError::Operation { code, detail } = &self {
            tracing::error!(code, detail = %detail, "remote operation failed");
        }

        let body = ErrorResponse { error: self.error_code().to_owned() };
        (self.status_code(), axum::Json(body)).into_response()
    }
}

/// Malformed request bodies (bad JSON, wrong field types) are validation
/// failures, not framework-internal rejections.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "rejecting malformed request body");
        ApiError::Validation("invalid_body")
    }
}

/// Convenience type alias for Results using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
