//! REST handlers for builders, agents and projects.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::Response;
use uuid::Uuid;

use propdesk_http::{ApiEnvelope, ApiError, ListEnvelope};

use super::dto::{
    AddDocumentRequest, AddMediaRequest, AgentDto, BuilderDto, CreateAgentRequest,
    CreateBuilderRequest, CreateProjectRequest, ListProjectsQuery, PartyListQuery, ProjectDto,
    ProjectStatisticsDto, UpdateAgentRequest, UpdateBuilderRequest, UpdateProjectRequest,
};
use crate::domain::repo::{AgentRepository, BuilderRepository, ProjectRepository};
use crate::domain::service::{AgentService, BuilderService, ProjectService};

// === Builders ===

pub async fn create_builder<R: BuilderRepository>(
    State(svc): State<Arc<BuilderService<R>>>,
    Json(body): Json<CreateBuilderRequest>,
) -> Result<Response, ApiError> {
    let builder = svc.create(body.into()).await?;
    Ok(ApiEnvelope::created(BuilderDto::from(builder), "builder created"))
}

pub async fn list_builders<R: BuilderRepository>(
    State(svc): State<Arc<BuilderService<R>>>,
    Query(query): Query<PartyListQuery>,
) -> Result<ListEnvelope<BuilderDto>, ApiError> {
    let page = svc.list(query.into_query()?).await?;
    Ok(ListEnvelope::ok(page.map(BuilderDto::from), "builders fetched"))
}

pub async fn get_builder<R: BuilderRepository>(
    State(svc): State<Arc<BuilderService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<BuilderDto>, ApiError> {
    Ok(ApiEnvelope::ok(
        BuilderDto::from(svc.get(id).await?),
        "builder fetched",
    ))
}

pub async fn update_builder<R: BuilderRepository>(
    State(svc): State<Arc<BuilderService<R>>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBuilderRequest>,
) -> Result<ApiEnvelope<BuilderDto>, ApiError> {
    Ok(ApiEnvelope::ok(
        BuilderDto::from(svc.update(id, body.into()).await?),
        "builder updated",
    ))
}

pub async fn delete_builder<R: BuilderRepository>(
    State(svc): State<Arc<BuilderService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError> {
    svc.remove(id).await?;
    Ok(ApiEnvelope::message("builder archived"))
}

// === Agents ===

pub async fn create_agent<R: AgentRepository>(
    State(svc): State<Arc<AgentService<R>>>,
    Json(body): Json<CreateAgentRequest>,
) -> Result<Response, ApiError> {
    let agent = svc.create(body.into()).await?;
    Ok(ApiEnvelope::created(AgentDto::from(agent), "agent created"))
}

pub async fn list_agents<R: AgentRepository>(
    State(svc): State<Arc<AgentService<R>>>,
    Query(query): Query<PartyListQuery>,
) -> Result<ListEnvelope<AgentDto>, ApiError> {
    let page = svc.list(query.into_query()?).await?;
    Ok(ListEnvelope::ok(page.map(AgentDto::from), "agents fetched"))
}

pub async fn get_agent<R: AgentRepository>(
    State(svc): State<Arc<AgentService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<AgentDto>, ApiError> {
    Ok(ApiEnvelope::ok(
        AgentDto::from(svc.get(id).await?),
        "agent fetched",
    ))
}

pub async fn update_agent<R: AgentRepository>(
    State(svc): State<Arc<AgentService<R>>>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAgentRequest>,
) -> Result<ApiEnvelope<AgentDto>, ApiError> {
    Ok(ApiEnvelope::ok(
        AgentDto::from(svc.update(id, body.into()).await?),
        "agent updated",
    ))
}

pub async fn delete_agent<R: AgentRepository>(
    State(svc): State<Arc<AgentService<R>>>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError> {
    svc.remove(id).await?;
    Ok(ApiEnvelope::message("agent archived"))
}

// === Projects ===

type ProjectState<P, B, A> = State<Arc<ProjectService<P, B, A>>>;

pub async fn create_project<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<Response, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let project = svc.create(body.into()).await?;
    Ok(ApiEnvelope::created(ProjectDto::from(project), "project created"))
}

pub async fn list_projects<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Query(query): Query<ListProjectsQuery>,
) -> Result<ListEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let page = svc.list(query.into_query()?).await?;
    Ok(ListEnvelope::ok(page.map(ProjectDto::from), "projects fetched"))
}

pub async fn get_project<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    Ok(ApiEnvelope::ok(
        ProjectDto::from(svc.get(id).await?),
        "project fetched",
    ))
}

pub async fn update_project<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateProjectRequest>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    Ok(ApiEnvelope::ok(
        ProjectDto::from(svc.update(id, body.into()).await?),
        "project updated",
    ))
}

pub async fn delete_project<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path(id): Path<Uuid>,
) -> Result<ApiEnvelope<()>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    svc.remove(id).await?;
    Ok(ApiEnvelope::message("project archived"))
}

pub async fn project_statistics<P, B, A>(
    State(svc): ProjectState<P, B, A>,
) -> Result<ApiEnvelope<ProjectStatisticsDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    Ok(ApiEnvelope::ok(
        ProjectStatisticsDto::from(svc.statistics().await?),
        "project statistics fetched",
    ))
}

pub async fn add_project_media<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddMediaRequest>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let project = svc.add_media(id, body.url, body.kind, body.title).await?;
    Ok(ApiEnvelope::ok(ProjectDto::from(project), "media added"))
}

pub async fn remove_project_media<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path((id, media_id)): Path<(Uuid, Uuid)>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let project = svc.remove_media(id, media_id).await?;
    Ok(ApiEnvelope::ok(ProjectDto::from(project), "media removed"))
}

pub async fn add_project_document<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path(id): Path<Uuid>,
    Json(body): Json<AddDocumentRequest>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let project = svc
        .add_document(id, body.url, body.title, body.doc_type)
        .await?;
    Ok(ApiEnvelope::ok(ProjectDto::from(project), "document added"))
}

pub async fn remove_project_document<P, B, A>(
    State(svc): ProjectState<P, B, A>,
    Path((id, doc_id)): Path<(Uuid, Uuid)>,
) -> Result<ApiEnvelope<ProjectDto>, ApiError>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    let project = svc.remove_document(id, doc_id).await?;
    Ok(ApiEnvelope::ok(ProjectDto::from(project), "document removed"))
}
