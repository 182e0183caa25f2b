//! REST DTOs for builders, agents and projects.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propdesk_http::{ApiError, PageParams};
use propdesk_masters::RecordStatus;

use crate::domain::model::{
    Agent, AgentPatch, Builder, BuilderPatch, DocumentItem, MediaItem, MediaKind, NewAgent,
    NewBuilder, NewProject, PartyQuery, Project, ProjectPatch, ProjectQuery, ProjectStatistics,
    ProjectStatus, UnitConfiguration,
};

fn parse_record_status(raw: Option<&str>) -> Result<Option<RecordStatus>, ApiError> {
    raw.map(|s| {
        s.parse::<RecordStatus>()
            .map_err(|()| ApiError::invalid_input(format!("unknown status '{s}'")))
    })
    .transpose()
}

// === Builders ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub established_year: Option<i32>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Builder> for BuilderDto {
    fn from(b: Builder) -> Self {
        Self {
            id: b.id,
            name: b.name,
            description: b.description,
            contact_email: b.contact_email,
            contact_phone: b.contact_phone,
            website: b.website,
            established_year: b.established_year,
            status: b.status,
            created_at: b.created_at,
            updated_at: b.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBuilderRequest {
    pub name: String,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<i32>,
}

impl From<CreateBuilderRequest> for NewBuilder {
    fn from(req: CreateBuilderRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            website: req.website,
            established_year: req.established_year,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBuilderRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub website: Option<String>,
    pub established_year: Option<i32>,
    pub status: Option<RecordStatus>,
}

impl From<UpdateBuilderRequest> for BuilderPatch {
    fn from(req: UpdateBuilderRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            website: req.website,
            established_year: req.established_year,
            status: req.status,
        }
    }
}

// === Agents ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Agent> for AgentDto {
    fn from(a: Agent) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            phone: a.phone,
            license_number: a.license_number,
            agency: a.agency,
            status: a.status,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateAgentRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub agency: Option<String>,
}

impl From<CreateAgentRequest> for NewAgent {
    fn from(req: CreateAgentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            license_number: req.license_number,
            agency: req.agency,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateAgentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub agency: Option<String>,
    pub status: Option<RecordStatus>,
}

impl From<UpdateAgentRequest> for AgentPatch {
    fn from(req: UpdateAgentRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            license_number: req.license_number,
            agency: req.agency,
            status: req.status,
        }
    }
}

/// Shared list query for builders and agents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartyListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
}

impl PartyListQuery {
    pub fn into_query(self) -> Result<PartyQuery, ApiError> {
        Ok(PartyQuery {
            page: PageParams::new(self.page, self.limit),
            search: self.search,
            status: parse_record_status(self.status.as_deref())?,
        })
    }
}

// === Projects ===

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub builder_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<Uuid>,
    pub city_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type_id: Option<Uuid>,
    pub project_status: ProjectStatus,
    pub status: RecordStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Vec<Uuid>,
    pub unit_configurations: Vec<UnitConfiguration>,
    pub media: Vec<MediaItem>,
    pub documents: Vec<DocumentItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectDto {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            builder_id: p.builder_id,
            agent_id: p.agent_id,
            city_id: p.city_id,
            location_id: p.location_id,
            property_type_id: p.property_type_id,
            project_status: p.project_status,
            status: p.status,
            min_price: p.min_price,
            max_price: p.max_price,
            possession_date: p.possession_date,
            amenity_ids: p.amenity_ids,
            unit_configurations: p.unit_configurations,
            media: p.media,
            documents: p.documents,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
    pub builder_id: Option<Uuid>,
    pub agent_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub property_type_id: Option<Uuid>,
    pub project_status: Option<ProjectStatus>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Vec<Uuid>,
    pub unit_configurations: Vec<UnitConfiguration>,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            builder_id: req.builder_id,
            agent_id: req.agent_id,
            city_id: req.city_id,
            location_id: req.location_id,
            property_type_id: req.property_type_id,
            project_status: req.project_status,
            min_price: req.min_price,
            max_price: req.max_price,
            possession_date: req.possession_date,
            amenity_ids: req.amenity_ids,
            unit_configurations: req.unit_configurations,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub agent_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub property_type_id: Option<Uuid>,
    pub project_status: Option<ProjectStatus>,
    pub status: Option<RecordStatus>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub possession_date: Option<NaiveDate>,
    pub amenity_ids: Option<Vec<Uuid>>,
    pub unit_configurations: Option<Vec<UnitConfiguration>>,
}

impl From<UpdateProjectRequest> for ProjectPatch {
    fn from(req: UpdateProjectRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            agent_id: req.agent_id,
            location_id: req.location_id,
            property_type_id: req.property_type_id,
            project_status: req.project_status,
            status: req.status,
            min_price: req.min_price,
            max_price: req.max_price,
            possession_date: req.possession_date,
            amenity_ids: req.amenity_ids,
            unit_configurations: req.unit_configurations,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListProjectsQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub builder_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
}

impl ListProjectsQuery {
    pub fn into_query(self) -> Result<ProjectQuery, ApiError> {
        let project_status = self
            .status
            .as_deref()
            .map(|s| {
                s.parse::<ProjectStatus>()
                    .map_err(|()| ApiError::invalid_input(format!("unknown project status '{s}'")))
            })
            .transpose()?;
        Ok(ProjectQuery {
            page: PageParams::new(self.page, self.limit),
            search: self.search,
            project_status,
            builder_id: self.builder_id,
            city_id: self.city_id,
            min_price: self.min_price,
            max_price: self.max_price,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMediaRequest {
    pub url: String,
    #[serde(default = "default_media_kind")]
    pub kind: MediaKind,
    pub title: Option<String>,
}

fn default_media_kind() -> MediaKind {
    MediaKind::Image
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddDocumentRequest {
    pub url: String,
    pub title: String,
    pub doc_type: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatisticsDto {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_max_price: Option<f64>,
}

impl From<ProjectStatistics> for ProjectStatisticsDto {
    fn from(s: ProjectStatistics) -> Self {
        Self {
            total: s.total,
            by_status: s.by_status.into_iter().collect(),
            avg_min_price: s.avg_min_price,
            avg_max_price: s.avg_max_price,
        }
    }
}
