//! Washroom adapter: numeric payload (bathroom count).

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::{Page, PageParams};

use super::support;
use super::{MasterCrud, RangeQueries};
use crate::domain::error::DomainError;
use crate::domain::model::{
    MasterKind, MasterPatch, MasterQuery, MasterRecord, MasterStatistics, NewMasterRecord,
    TypeDetails,
};
use crate::domain::repo::MasterRepository;
use crate::domain::service::{MasterService, RemovalPolicy};

pub struct WashroomService<R: MasterRepository> {
    engine: MasterService<R>,
}

impl<R: MasterRepository> WashroomService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            engine: MasterService::new(MasterKind::Washroom, repo),
        }
    }

    pub async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        let numeric = support::build_numeric(&input.details)?;
        self.engine
            .create(input, TypeDetails::Numeric(numeric))
            .await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: MasterPatch,
    ) -> Result<MasterRecord, DomainError> {
        let current = self.engine.get(id).await?;
        let numeric = current
            .details
            .as_numeric()
            .ok_or_else(|| DomainError::database("washroom row without numeric payload"))?;
        let merged = support::merge_numeric(numeric, &patch.details)?;
        self.engine
            .apply_update(current, patch, TypeDetails::Numeric(merged))
            .await
    }

    pub async fn find_by_range(
        &self,
        min: Option<i32>,
        max: Option<i32>,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        support::validate_range(min, max)?;
        let query = MasterQuery {
            page,
            min_value: min,
            max_value: max,
            ..MasterQuery::default()
        };
        self.engine.list(query).await
    }
}

#[async_trait]
impl<R: MasterRepository> RemovalPolicy for WashroomService<R> {
    async fn check_usage(&self, _record: &MasterRecord) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl<R: MasterRepository> MasterCrud for WashroomService<R> {
    fn kind(&self) -> MasterKind {
        MasterKind::Washroom
    }

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        WashroomService::create(self, input).await
    }

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.engine.get(id).await
    }

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.engine.list(query).await
    }

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError> {
        WashroomService::update(self, id, patch).await
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
impl<R: MasterRepository> RangeQueries for WashroomService<R> {
    async fn find_by_range(
        &self,
        min: Option<i32>,
        max: Option<i32>,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        WashroomService::find_by_range(self, min, max, page).await
    }
}
