//! API error type shared by all modules.
//!
//! Module crates convert their domain errors into [`ApiError`]; the kind
//! maps 1:1 onto a status code and the response body keeps the same
//! envelope shape as success, with `success: false`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Failure taxonomy surfaced over HTTP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Duplicate name/code or similar uniqueness violation.
    Conflict,
    /// No non-archived record matches the id.
    NotFound,
    /// Malformed input or a broken reference.
    InvalidInput,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Authenticated but not allowed (e.g. deleting another user's file).
    Forbidden,
    /// Unclassified storage or internal failure.
    Unexpected,
}

impl ApiErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Conflict => StatusCode::CONFLICT,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error ready to be rendered in the response envelope.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Conflict, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::InvalidInput, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Forbidden, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unexpected, message)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        if status.is_server_error() {
            tracing::error!(message = %self.message, "request failed");
        }
        let body = ErrorBody {
            success: false,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(ApiErrorKind::Conflict.status(), StatusCode::CONFLICT);
        assert_eq!(ApiErrorKind::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiErrorKind::InvalidInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiErrorKind::Unexpected.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn response_carries_status() {
        let resp = ApiError::not_found("city not found").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
