//! Amenity adapter: categorized payload with icon/color.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::{Page, PageParams};

use super::support;
use super::{CategoryQueries, MasterCrud};
use crate::domain::error::DomainError;
use crate::domain::model::{
    MasterKind, MasterPatch, MasterQuery, MasterRecord, MasterStatistics, NewMasterRecord,
    TypeDetails,
};
use crate::domain::repo::MasterRepository;
use crate::domain::service::{MasterService, RemovalPolicy};

pub struct AmenityService<R: MasterRepository> {
    engine: MasterService<R>,
}

impl<R: MasterRepository> AmenityService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            engine: MasterService::new(MasterKind::Amenity, repo),
        }
    }

    pub async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        let details = TypeDetails::Category(support::build_category(&input.details)?);
        self.engine.create(input, details).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: MasterPatch,
    ) -> Result<MasterRecord, DomainError> {
        let current = self.engine.get(id).await?;
        let category = current
            .details
            .as_category()
            .ok_or_else(|| DomainError::database("amenity row without category payload"))?;
        let merged = support::merge_category(category, &patch.details)?;
        self.engine
            .apply_update(current, patch, TypeDetails::Category(merged))
            .await
    }

    pub async fn find_by_category(
        &self,
        category: &str,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        let query = MasterQuery {
            page,
            category: Some(category.to_owned()),
            ..MasterQuery::default()
        };
        self.engine.list(query).await
    }
}

#[async_trait]
impl<R: MasterRepository> RemovalPolicy for AmenityService<R> {
    async fn check_usage(&self, _record: &MasterRecord) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl<R: MasterRepository> MasterCrud for AmenityService<R> {
    fn kind(&self) -> MasterKind {
        MasterKind::Amenity
    }

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        AmenityService::create(self, input).await
    }

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.engine.get(id).await
    }

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.engine.list(query).await
    }

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError> {
        AmenityService::update(self, id, patch).await
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

#[async_trait]
impl<R: MasterRepository> CategoryQueries for AmenityService<R> {
    async fn find_by_category(
        &self,
        category: &str,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        AmenityService::find_by_category(self, category, page).await
    }
}
