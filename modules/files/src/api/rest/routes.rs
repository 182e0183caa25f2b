//! File router.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use crate::domain::repo::FileRepository;
use crate::domain::service::FileService;

pub fn file_routes<R: FileRepository + 'static>(svc: Arc<FileService<R>>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::upload_file::<R>).get(handlers::list_files::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_file::<R>).delete(handlers::delete_file::<R>),
        )
        .with_state(svc)
}
