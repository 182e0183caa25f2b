//! Wiring: database, migrations, services, router.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::{Router, middleware};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use propdesk_auth::api::rest::auth_routes;
use propdesk_auth::{AuthService, require_auth};
use propdesk_files::api::rest::file_routes;
use propdesk_files::{FileService, FilesMigrator, FsObjectStore, SeaOrmFileRepository};
use propdesk_http::ApiEnvelope;
use propdesk_masters::api::rest::{MasterServices, master_routes};
use propdesk_masters::SeaOrmMasterRepository;
use propdesk_projects::api::rest::{agent_routes, builder_routes, project_routes};
use propdesk_projects::{
    AgentService, BuilderService, ProjectService, ProjectsMigrator, RepoMasterLookup,
    SeaOrmAgentRepository, SeaOrmBuilderRepository, SeaOrmProjectRepository,
};

use crate::config::AppConfig;

pub struct Services {
    pub auth: Arc<AuthService>,
    pub masters: MasterServices<SeaOrmMasterRepository>,
    pub files: Arc<FileService<SeaOrmFileRepository>>,
    pub builders: Arc<BuilderService<SeaOrmBuilderRepository>>,
    pub agents: Arc<AgentService<SeaOrmAgentRepository>>,
    pub projects: Arc<
        ProjectService<SeaOrmProjectRepository, SeaOrmBuilderRepository, SeaOrmAgentRepository>,
    >,
}

/// Connect to the configured database and bring every module's schema up.
pub async fn connect_and_migrate(config: &AppConfig) -> Result<DatabaseConnection> {
    std::fs::create_dir_all(&config.server.home_dir)
        .with_context(|| format!("cannot create home dir {:?}", config.server.home_dir))?;

    let dsn = config.database_dsn();
    tracing::info!(dsn = %dsn, "connecting to database");
    let db = Database::connect(&dsn)
        .await
        .with_context(|| format!("cannot connect to {dsn}"))?;

    propdesk_masters::Migrator::up(&db, None)
        .await
        .context("masters migrations failed")?;
    FilesMigrator::up(&db, None)
        .await
        .context("files migrations failed")?;
    ProjectsMigrator::up(&db, None)
        .await
        .context("projects migrations failed")?;
    Ok(db)
}

pub fn build_services(config: &AppConfig, db: DatabaseConnection) -> Result<Services> {
    let auth = Arc::new(
        AuthService::new(config.auth.clone()).map_err(|e| anyhow::anyhow!(e.to_string()))?,
    );

    let master_repo = Arc::new(SeaOrmMasterRepository::new(db.clone()));
    let masters = MasterServices::new(master_repo.clone());

    let files = Arc::new(FileService::new(
        Arc::new(SeaOrmFileRepository::new(db.clone())),
        Arc::new(FsObjectStore::new(
            config.uploads_dir(),
            config.uploads.public_base_url.clone(),
        )),
    ));

    let builder_repo = Arc::new(SeaOrmBuilderRepository::new(db.clone()));
    let agent_repo = Arc::new(SeaOrmAgentRepository::new(db.clone()));
    let builders = Arc::new(BuilderService::new(builder_repo.clone()));
    let agents = Arc::new(AgentService::new(agent_repo.clone()));
    let projects = Arc::new(ProjectService::new(
        Arc::new(SeaOrmProjectRepository::new(db)),
        builder_repo,
        agent_repo,
        Arc::new(RepoMasterLookup::new(master_repo)),
    ));

    Ok(Services {
        auth,
        masters,
        files,
        builders,
        agents,
        projects,
    })
}

async fn health() -> ApiEnvelope<serde_json::Value> {
    ApiEnvelope::ok(serde_json::json!({ "status": "ok" }), "healthy")
}

/// Assemble the application router. Everything under `/api/v1` except the
/// login route requires a bearer token.
pub fn build_router(config: &AppConfig, services: &Services) -> Router {
    let protected = Router::new()
        .nest("/masters", master_routes(&services.masters))
        .nest("/files", file_routes(services.files.clone()))
        .nest("/builders", builder_routes(services.builders.clone()))
        .nest("/agents", agent_routes(services.agents.clone()))
        .nest("/projects", project_routes(services.projects.clone()))
        .layer(middleware::from_fn_with_state(
            services.auth.clone(),
            require_auth,
        ));

    let max_body_bytes = usize::try_from(config.uploads.max_upload_mb)
        .unwrap_or(25)
        .saturating_mul(1024 * 1024);

    Router::new()
        .route("/healthz", get(health))
        .nest("/api/v1/auth", auth_routes(services.auth.clone()))
        .nest("/api/v1", protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
}
