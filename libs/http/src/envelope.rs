//! The uniform response envelope.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::page::{Page, Pagination};

/// Envelope for single-object responses: `{success, data, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub message: String,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// Same envelope with a 201 status, for create endpoints.
    pub fn created(data: T, message: impl Into<String>) -> Response {
        (StatusCode::CREATED, Json(Self::ok(data, message))).into_response()
    }
}

impl ApiEnvelope<()> {
    /// Success with no payload (e.g. soft delete).
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiEnvelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Envelope for list responses: `{success, data, pagination, message}`.
#[derive(Debug, Clone, Serialize)]
pub struct ListEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: Pagination,
    pub message: String,
}

impl<T: Serialize> ListEnvelope<T> {
    pub fn ok(page: Page<T>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: page.records,
            pagination: page.pagination,
            message: message.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ListEnvelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::page::PageParams;

    #[test]
    fn single_envelope_shape() {
        let env = ApiEnvelope::ok(42, "fetched");
        let json = serde_json::to_value(&env).expect("serialize");
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], 42);
        assert_eq!(json["message"], "fetched");
    }

    #[test]
    fn empty_envelope_omits_data() {
        let env = ApiEnvelope::message("archived");
        let json = serde_json::to_value(&env).expect("serialize");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn list_envelope_shape() {
        let page = Page::new(vec!["a", "b"], PageParams::new(Some(1), Some(2)), 5);
        let env = ListEnvelope::ok(page, "listed");
        let json = serde_json::to_value(&env).expect("serialize");
        assert_eq!(json["data"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["pagination"]["totalPages"], 3);
    }
}
