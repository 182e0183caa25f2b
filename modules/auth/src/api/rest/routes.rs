//! Auth router: `/auth/login` is the only public route in the system.

use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use super::handlers;
use crate::domain::service::AuthService;

pub fn auth_routes(auth: Arc<AuthService>) -> Router {
    Router::new()
        .route("/login", post(handlers::login))
        .with_state(auth)
}
