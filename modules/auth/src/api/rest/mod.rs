//! REST surface: the login endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::auth_routes;
