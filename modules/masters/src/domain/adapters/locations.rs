//! Location adapter: every location hangs off a non-archived city.
//!
//! The parent check is the one cross-kind invariant enforced outside the
//! generic engine, and it runs before any write.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::{Page, PageParams};

use super::MasterCrud;
use crate::domain::error::DomainError;
use crate::domain::model::{
    MasterKind, MasterPatch, MasterQuery, MasterRecord, MasterStatistics, NewMasterRecord,
    ParentLink, TypeDetails,
};
use crate::domain::repo::MasterRepository;
use crate::domain::service::{MasterService, RemovalPolicy};

pub struct LocationService<R: MasterRepository> {
    engine: MasterService<R>,
}

impl<R: MasterRepository> LocationService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            engine: MasterService::new(MasterKind::Location, repo),
        }
    }

    /// Resolve `parent_id` to an existing non-archived city, or refuse.
    async fn resolve_parent(&self, parent_id: Uuid) -> Result<ParentLink, DomainError> {
        let parent = self
            .engine
            .repo()
            .find_by_id(MasterKind::City, parent_id)
            .await?;
        if parent.is_none() {
            return Err(DomainError::validation(
                "parentId",
                format!("city {parent_id} does not exist or is archived"),
            ));
        }
        Ok(ParentLink {
            parent_id,
            parent_kind: MasterKind::City,
        })
    }

    pub async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        let parent_id = input
            .details
            .parent_id
            .ok_or_else(|| DomainError::validation("parentId", "is required for locations"))?;
        let link = self.resolve_parent(parent_id).await?;
        self.engine.create(input, TypeDetails::Parent(link)).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: MasterPatch,
    ) -> Result<MasterRecord, DomainError> {
        let current = self.engine.get(id).await?;
        let link = match patch.details.parent_id {
            // Re-parenting revalidates the reference.
            Some(parent_id) => self.resolve_parent(parent_id).await?,
            None => current
                .details
                .as_parent()
                .cloned()
                .ok_or_else(|| DomainError::database("location row without parent payload"))?,
        };
        self.engine
            .apply_update(current, patch, TypeDetails::Parent(link))
            .await
    }

    /// Locations under one city.
    pub async fn find_by_city(
        &self,
        city_id: Uuid,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        let query = MasterQuery {
            page,
            parent_id: Some(city_id),
            ..MasterQuery::default()
        };
        self.engine.list(query).await
    }
}

#[async_trait]
impl<R: MasterRepository> RemovalPolicy for LocationService<R> {
    async fn check_usage(&self, _record: &MasterRecord) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl<R: MasterRepository> MasterCrud for LocationService<R> {
    fn kind(&self) -> MasterKind {
        MasterKind::Location
    }

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        LocationService::create(self, input).await
    }

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.engine.get(id).await
    }

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.engine.list(query).await
    }

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError> {
        LocationService::update(self, id, patch).await
    }

    async fn remove(&self, id: Uuid) -> Result<(), DomainError> {
        self.engine.remove(self, id).await
    }

    async fn statistics(&self) -> Result<MasterStatistics, DomainError> {
        self.engine.statistics().await
    }

    async fn popular(&self) -> Result<Vec<MasterRecord>, DomainError> {
        self.engine.popular().await
    }
}
