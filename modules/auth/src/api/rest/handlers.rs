//! Login handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;

use propdesk_http::{ApiEnvelope, ApiError};

use super::dto::{LoginRequest, LoginResponse};
use crate::domain::error::AuthError;
use crate::domain::service::AuthService;

pub async fn login(
    State(auth): State<Arc<AuthService>>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiEnvelope<LoginResponse>, ApiError> {
    let issued = auth.login(&body.username, &body.password).map_err(|e| match e {
        AuthError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
        other => ApiError::unexpected(other.to_string()),
    })?;
    Ok(ApiEnvelope::ok(LoginResponse::from(issued), "login successful"))
}
