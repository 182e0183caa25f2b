//! Repository seams for builders, agents and projects.

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::Page;
use propdesk_masters::RecordStatus;

use super::error::DomainError;
use super::model::{
    Agent, Builder, PartyQuery, Project, ProjectQuery, ProjectStatistics,
};

#[async_trait]
pub trait BuilderRepository: Send + Sync {
    async fn insert(&self, builder: Builder) -> Result<Builder, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Builder>, DomainError>;
    async fn list(&self, query: &PartyQuery) -> Result<Page<Builder>, DomainError>;
    async fn update(&self, builder: Builder) -> Result<Builder, DomainError>;
    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait AgentRepository: Send + Sync {
    async fn insert(&self, agent: Agent) -> Result<Agent, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Agent>, DomainError>;
    async fn list(&self, query: &PartyQuery) -> Result<Page<Agent>, DomainError>;
    async fn update(&self, agent: Agent) -> Result<Agent, DomainError>;
    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn insert(&self, project: Project) -> Result<Project, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Project>, DomainError>;
    async fn list(&self, query: &ProjectQuery) -> Result<Page<Project>, DomainError>;
    async fn update(&self, project: Project) -> Result<Project, DomainError>;
    async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool, DomainError>;
    async fn statistics(&self) -> Result<ProjectStatistics, DomainError>;
}
