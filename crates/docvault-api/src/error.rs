//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use docvault_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// An `AppError` on its way out of a handler.
///
/// Every kind in the not-found family answers 404 `NOT_FOUND`, so a caller
/// cannot tell a missing file from one it may not read.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and public error code for this error.
    pub fn status(&self) -> (StatusCode, &'static str) {
        match self.0.kind {
            kind if kind.is_not_found() => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ErrorKind::Conflict => (StatusCode::CONFLICT, "CONFLICT"),
            ErrorKind::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status();

        let message = if status.is_server_error() {
            tracing::error!(
                kind = %self.0.kind,
                error = %self.0.message,
                source = ?self.0.source,
                "Internal server error"
            );
            "Internal server error".to_string()
        } else {
            tracing::debug!(kind = %self.0.kind, error = %self.0.message, "Request failed");
            self.0.message
        };

        let body = ApiErrorResponse {
            error: error_code.to_string(),
            message,
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
