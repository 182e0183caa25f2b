//! REST surface: one resource path per master kind under `/masters`.

pub mod dto;
mod error;
pub mod handlers;
pub mod routes;

pub use routes::{master_routes, MasterServices};
