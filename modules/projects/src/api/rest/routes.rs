//! Routers for builders, agents and projects.

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post};

use super::handlers;
use crate::domain::repo::{AgentRepository, BuilderRepository, ProjectRepository};
use crate::domain::service::{AgentService, BuilderService, ProjectService};

pub fn builder_routes<R: BuilderRepository + 'static>(svc: Arc<BuilderService<R>>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::create_builder::<R>).get(handlers::list_builders::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_builder::<R>)
                .patch(handlers::update_builder::<R>)
                .delete(handlers::delete_builder::<R>),
        )
        .with_state(svc)
}

pub fn agent_routes<R: AgentRepository + 'static>(svc: Arc<AgentService<R>>) -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::create_agent::<R>).get(handlers::list_agents::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_agent::<R>)
                .patch(handlers::update_agent::<R>)
                .delete(handlers::delete_agent::<R>),
        )
        .with_state(svc)
}

pub fn project_routes<P, B, A>(svc: Arc<ProjectService<P, B, A>>) -> Router
where
    P: ProjectRepository + 'static,
    B: BuilderRepository + 'static,
    A: AgentRepository + 'static,
{
    Router::new()
        .route(
            "/",
            post(handlers::create_project::<P, B, A>).get(handlers::list_projects::<P, B, A>),
        )
        .route("/statistics", get(handlers::project_statistics::<P, B, A>))
        .route(
            "/{id}",
            get(handlers::get_project::<P, B, A>)
                .patch(handlers::update_project::<P, B, A>)
                .delete(handlers::delete_project::<P, B, A>),
        )
        .route("/{id}/media", post(handlers::add_project_media::<P, B, A>))
        .route(
            "/{id}/media/{mediaId}",
            delete(handlers::remove_project_media::<P, B, A>),
        )
        .route(
            "/{id}/documents",
            post(handlers::add_project_document::<P, B, A>),
        )
        .route(
            "/{id}/documents/{docId}",
            delete(handlers::remove_project_document::<P, B, A>),
        )
        .with_state(svc)
}
