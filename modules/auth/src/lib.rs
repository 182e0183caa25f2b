//! Authentication module: static credentials from config, HS256 bearer
//! tokens, and an axum middleware that injects the caller identity.

pub mod api;
pub mod config;
pub mod domain;
pub mod middleware;

pub use config::{AuthConfig, StaticUser};
pub use domain::model::AuthUser;
pub use domain::service::AuthService;
pub use middleware::require_auth;
