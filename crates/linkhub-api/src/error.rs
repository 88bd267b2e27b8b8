//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use linkhub_auth::LinkError;
use linkhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
}

/// Error type returned by JSON handlers.
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Message for a JSON body that did not deserialize.
pub const INVALID_BODY: &str = "Invalid request body";
/// Message for a query string that did not deserialize.
pub const INVALID_QUERY: &str = "Invalid query string";

impl ApiError {
    pub fn status(&self) -> StatusCode {
        status_for(self.0.kind)
    }

    /// Input that failed to deserialize. The parser detail is logged, never
    /// returned.
    pub fn unparsable(message: &'static str, detail: impl std::fmt::Display) -> Self {
        tracing::debug!(detail = %detail, "{}", message);
        Self(AppError::validation(message))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        Self(err.into())
    }
}

/// HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Gone => StatusCode::GONE,
        ErrorKind::RateLimit => StatusCode::TOO_MANY_REQUESTS,
        ErrorKind::Configuration | ErrorKind::Internal | ErrorKind::Serialization => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ErrorKind::ExternalService | ErrorKind::Storage => StatusCode::BAD_GATEWAY,
    }
}

fn error_code(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::Validation => "VALIDATION_ERROR",
        ErrorKind::Authentication => "UNAUTHORIZED",
        ErrorKind::NotFound => "NOT_FOUND",
        ErrorKind::Gone => "GONE",
        ErrorKind::RateLimit => "RATE_LIMITED",
        ErrorKind::Configuration => "CONFIGURATION_ERROR",
        ErrorKind::Internal | ErrorKind::Serialization => "INTERNAL_ERROR",
        ErrorKind::ExternalService | ErrorKind::Storage => "UPSTREAM_ERROR",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        match err.kind {
            ErrorKind::Configuration => {
                tracing::error!(error = %err.message, "Server misconfiguration");
            }
            ErrorKind::Internal | ErrorKind::Serialization => {
                tracing::error!(error = %err.message, "Internal server error");
            }
            ErrorKind::ExternalService | ErrorKind::Storage => {
                tracing::warn!(error = %err.message, "Upstream failure");
            }
            _ => {}
        }

        let message = match err.kind {
            ErrorKind::Internal | ErrorKind::Serialization => "Internal server error".to_string(),
            _ => err.message,
        };

        let body = ApiErrorResponse {
            error: error_code(err.kind).to_string(),
            message,
        };

        (status_for(err.kind), Json(body)).into_response()
    }
}
