//! Builder, agent and project services.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use propdesk_http::Page;
use propdesk_masters::{MasterKind, RecordStatus};

use super::error::DomainError;
use super::model::{
    Agent, AgentPatch, Builder, BuilderPatch, DocumentItem, MediaItem, MediaKind, NewAgent,
    NewBuilder, NewProject, PartyQuery, Project, ProjectPatch, ProjectQuery, ProjectStatistics,
    ProjectStatus, UnitConfiguration,
};
use super::ports::MasterLookup;
use super::repo::{AgentRepository, BuilderRepository, ProjectRepository};

/// Most amenities a single project may reference.
const MAX_PROJECT_AMENITIES: usize = 50;

fn require_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if name.chars().count() > 150 {
        return Err(DomainError::validation("name", "must be at most 150 characters"));
    }
    Ok(name.to_owned())
}

fn reject_archive_via_update(status: Option<RecordStatus>) -> Result<(), DomainError> {
    if status == Some(RecordStatus::Archived) {
        return Err(DomainError::validation(
            "status",
            "archival goes through delete, not update",
        ));
    }
    Ok(())
}

// === Builders ===

pub struct BuilderService<R: BuilderRepository> {
    repo: Arc<R>,
}

impl<R: BuilderRepository> BuilderService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewBuilder) -> Result<Builder, DomainError> {
        let now = Utc::now();
        let builder = Builder {
            id: Uuid::now_v7(),
            name: require_name(&input.name)?,
            description: input.description,
            contact_email: input.contact_email,
            contact_phone: input.contact_phone,
            website: input.website,
            established_year: input.established_year,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repo.insert(builder).await?;
        info!(id = %created.id, "builder created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<Builder, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Builder", id))
    }

    pub async fn list(&self, query: PartyQuery) -> Result<Page<Builder>, DomainError> {
        self.repo.list(&query).await
    }

    pub async fn update(&self, id: Uuid, patch: BuilderPatch) -> Result<Builder, DomainError> {
        reject_archive_via_update(patch.status)?;
        let mut current = self.get(id).await?;
        if let Some(name) = patch.name {
            current.name = require_name(&name)?;
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(email) = patch.contact_email {
            current.contact_email = Some(email);
        }
        if let Some(phone) = patch.contact_phone {
            current.contact_phone = Some(phone);
        }
        if let Some(website) = patch.website {
            current.website = Some(website);
        }
        if let Some(year) = patch.established_year {
            current.established_year = Some(year);
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        let _ = self.get(id).await?;
        if !self.repo.set_status(id, RecordStatus::Archived).await? {
            return Err(DomainError::not_found("Builder", id));
        }
        info!(id = %id, "builder archived");
        Ok(())
    }
}

// === Agents ===

pub struct AgentService<R: AgentRepository> {
    repo: Arc<R>,
}

impl<R: AgentRepository> AgentService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewAgent) -> Result<Agent, DomainError> {
        let now = Utc::now();
        let agent = Agent {
            id: Uuid::now_v7(),
            name: require_name(&input.name)?,
            email: input.email,
            phone: input.phone,
            license_number: input.license_number,
            agency: input.agency,
            status: RecordStatus::Active,
            created_at: now,
            updated_at: now,
        };
        let created = self.repo.insert(agent).await?;
        info!(id = %created.id, "agent created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<Agent, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Agent", id))
    }

    pub async fn list(&self, query: PartyQuery) -> Result<Page<Agent>, DomainError> {
        self.repo.list(&query).await
    }

    pub async fn update(&self, id: Uuid, patch: AgentPatch) -> Result<Agent, DomainError> {
        reject_archive_via_update(patch.status)?;
        let mut current = self.get(id).await?;
        if let Some(name) = patch.name {
            current.name = require_name(&name)?;
        }
        if let Some(email) = patch.email {
            current.email = Some(email);
        }
        if let Some(phone) = patch.phone {
            current.phone = Some(phone);
        }
        if let Some(license) = patch.license_number {
            current.license_number = Some(license);
        }
        if let Some(agency) = patch.agency {
            current.agency = Some(agency);
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        let _ = self.get(id).await?;
        if !self.repo.set_status(id, RecordStatus::Archived).await? {
            return Err(DomainError::not_found("Agent", id));
        }
        info!(id = %id, "agent archived");
        Ok(())
    }
}

// === Projects ===

pub struct ProjectService<P, B, A>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    repo: Arc<P>,
    builders: Arc<B>,
    agents: Arc<A>,
    masters: Arc<dyn MasterLookup>,
}

impl<P, B, A> ProjectService<P, B, A>
where
    P: ProjectRepository,
    B: BuilderRepository,
    A: AgentRepository,
{
    pub fn new(repo: Arc<P>, builders: Arc<B>, agents: Arc<A>, masters: Arc<dyn MasterLookup>) -> Self {
        Self {
            repo,
            builders,
            agents,
            masters,
        }
    }

    async fn require_master(&self, kind: MasterKind, id: Uuid, field: &str) -> Result<(), DomainError> {
        if self.masters.exists(kind, id).await? {
            Ok(())
        } else {
            Err(DomainError::validation(
                field,
                format!("{} {id} does not exist or is archived", kind.label()),
            ))
        }
    }

    async fn require_builder(&self, id: Uuid) -> Result<(), DomainError> {
        if self.builders.find_by_id(id).await?.is_none() {
            return Err(DomainError::validation(
                "builderId",
                format!("builder {id} does not exist or is archived"),
            ));
        }
        Ok(())
    }

    async fn require_agent(&self, id: Uuid) -> Result<(), DomainError> {
        if self.agents.find_by_id(id).await?.is_none() {
            return Err(DomainError::validation(
                "agentId",
                format!("agent {id} does not exist or is archived"),
            ));
        }
        Ok(())
    }

    fn check_prices(min: Option<i64>, max: Option<i64>) -> Result<(), DomainError> {
        if let (Some(min), Some(max)) = (min, max) {
            if min > max {
                return Err(DomainError::validation("minPrice", "must not exceed maxPrice"));
            }
        }
        Ok(())
    }

    fn check_units(units: &[UnitConfiguration]) -> Result<(), DomainError> {
        for unit in units {
            if unit.label.trim().is_empty() {
                return Err(DomainError::validation(
                    "unitConfigurations",
                    "every unit needs a label",
                ));
            }
            if unit.bedrooms < 0 || unit.bathrooms < 0 {
                return Err(DomainError::validation(
                    "unitConfigurations",
                    "bedroom and bathroom counts cannot be negative",
                ));
            }
        }
        Ok(())
    }

    async fn check_amenities(&self, amenity_ids: &[Uuid]) -> Result<(), DomainError> {
        if amenity_ids.len() > MAX_PROJECT_AMENITIES {
            return Err(DomainError::validation(
                "amenityIds",
                format!("at most {MAX_PROJECT_AMENITIES} amenities per project"),
            ));
        }
        for id in amenity_ids {
            self.require_master(MasterKind::Amenity, *id, "amenityIds")
                .await?;
        }
        Ok(())
    }

    /// Validate every reference, then write the project row.
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewProject) -> Result<Project, DomainError> {
        let name = require_name(&input.name)?;
        let builder_id = input
            .builder_id
            .ok_or_else(|| DomainError::validation("builderId", "is required"))?;
        let city_id = input
            .city_id
            .ok_or_else(|| DomainError::validation("cityId", "is required"))?;

        self.require_builder(builder_id).await?;
        self.require_master(MasterKind::City, city_id, "cityId").await?;
        if let Some(agent_id) = input.agent_id {
            self.require_agent(agent_id).await?;
        }
        if let Some(location_id) = input.location_id {
            self.require_master(MasterKind::Location, location_id, "locationId")
                .await?;
        }
        if let Some(property_type_id) = input.property_type_id {
            self.require_master(MasterKind::PropertyType, property_type_id, "propertyTypeId")
                .await?;
        }
        Self::check_prices(input.min_price, input.max_price)?;
        Self::check_units(&input.unit_configurations)?;
        self.check_amenities(&input.amenity_ids).await?;

        let now = Utc::now();
        let project = Project {
            id: Uuid::now_v7(),
            name,
            description: input.description,
            builder_id,
            agent_id: input.agent_id,
            city_id,
            location_id: input.location_id,
            property_type_id: input.property_type_id,
            project_status: input.project_status.unwrap_or(ProjectStatus::Planning),
            status: RecordStatus::Active,
            min_price: input.min_price,
            max_price: input.max_price,
            possession_date: input.possession_date,
            amenity_ids: input.amenity_ids,
            unit_configurations: input.unit_configurations,
            media: Vec::new(),
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let created = self.repo.insert(project).await?;
        info!(id = %created.id, "project created");
        Ok(created)
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", id))
    }

    pub async fn list(&self, query: ProjectQuery) -> Result<Page<Project>, DomainError> {
        self.repo.list(&query).await
    }

    #[instrument(skip(self, patch), fields(project_id = %id))]
    pub async fn update(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, DomainError> {
        reject_archive_via_update(patch.status)?;
        let mut current = self.get(id).await?;

        if let Some(agent_id) = patch.agent_id {
            self.require_agent(agent_id).await?;
            current.agent_id = Some(agent_id);
        }
        if let Some(location_id) = patch.location_id {
            self.require_master(MasterKind::Location, location_id, "locationId")
                .await?;
            current.location_id = Some(location_id);
        }
        if let Some(property_type_id) = patch.property_type_id {
            self.require_master(MasterKind::PropertyType, property_type_id, "propertyTypeId")
                .await?;
            current.property_type_id = Some(property_type_id);
        }
        if let Some(amenity_ids) = patch.amenity_ids {
            self.check_amenities(&amenity_ids).await?;
            current.amenity_ids = amenity_ids;
        }
        if let Some(units) = patch.unit_configurations {
            Self::check_units(&units)?;
            current.unit_configurations = units;
        }
        if let Some(name) = patch.name {
            current.name = require_name(&name)?;
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(project_status) = patch.project_status {
            current.project_status = project_status;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        let min_price = patch.min_price.or(current.min_price);
        let max_price = patch.max_price.or(current.max_price);
        Self::check_prices(min_price, max_price)?;
        current.min_price = min_price;
        current.max_price = max_price;
        if let Some(date) = patch.possession_date {
            current.possession_date = Some(date);
        }
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        let _ = self.get(id).await?;
        if !self.repo.set_status(id, RecordStatus::Archived).await? {
            return Err(DomainError::not_found("Project", id));
        }
        info!(id = %id, "project archived");
        Ok(())
    }

    pub async fn statistics(&self) -> Result<ProjectStatistics, DomainError> {
        self.repo.statistics().await
    }

    /// Append a media entry. Each append is its own write; a sequence of
    /// them is not atomic.
    pub async fn add_media(
        &self,
        id: Uuid,
        url: String,
        kind: MediaKind,
        title: Option<String>,
    ) -> Result<Project, DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::validation("url", "must not be empty"));
        }
        let mut current = self.get(id).await?;
        current.media.push(MediaItem {
            id: Uuid::now_v7(),
            url,
            kind,
            title,
        });
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn remove_media(&self, id: Uuid, media_id: Uuid) -> Result<Project, DomainError> {
        let mut current = self.get(id).await?;
        let before = current.media.len();
        current.media.retain(|m| m.id != media_id);
        if current.media.len() == before {
            return Err(DomainError::not_found("Media entry", media_id));
        }
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn add_document(
        &self,
        id: Uuid,
        url: String,
        title: String,
        doc_type: Option<String>,
    ) -> Result<Project, DomainError> {
        if url.trim().is_empty() {
            return Err(DomainError::validation("url", "must not be empty"));
        }
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "must not be empty"));
        }
        let mut current = self.get(id).await?;
        current.documents.push(DocumentItem {
            id: Uuid::now_v7(),
            url,
            title,
            doc_type,
        });
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }

    pub async fn remove_document(&self, id: Uuid, doc_id: Uuid) -> Result<Project, DomainError> {
        let mut current = self.get(id).await?;
        let before = current.documents.len();
        current.documents.retain(|d| d.id != doc_id);
        if current.documents.len() == before {
            return Err(DomainError::not_found("Document entry", doc_id));
        }
        current.updated_at = Utc::now();
        self.repo.update(current).await
    }
}
