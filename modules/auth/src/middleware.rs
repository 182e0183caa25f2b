//! Bearer-token middleware.
//!
//! Validates `Authorization: Bearer <token>` on every request it wraps and
//! attaches the caller as an [`AuthUser`] extension. With auth disabled it
//! injects the system identity and lets everything through.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use http::header;

use propdesk_http::ApiError;

use crate::domain::model::AuthUser;
use crate::domain::service::AuthService;

pub async fn require_auth(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !auth.enabled() {
        req.extensions_mut().insert(AuthUser::system());
        return Ok(next.run(req).await);
    }

    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("missing bearer token"))?;

    let user = auth
        .verify(bearer)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}
