//! Floor adapter: numeric payload with a derived display name.
//!
//! When no display name is supplied, one is derived from the floor number:
//! 0 → "Ground Floor", -2 → "Basement 2", 3 → "3rd Floor".

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

pub struct FloorService<R: MasterRepository> {
    engine: MasterService<R>,
}

impl<R: MasterRepository> FloorService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            engine: MasterService::new(MasterKind::Floor, repo),
        }
    }

    pub async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        let mut numeric = support::build_numeric(&input.details)?;
        if numeric.display_name.is_none() {
            numeric.display_name = Some(floor_display_name(numeric.value));
        }
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
            .ok_or_else(|| DomainError::database("floor row without numeric payload"))?;
        let mut merged = support::merge_numeric(numeric, &patch.details)?;
        // A changed floor number re-derives the display name unless the
        // same patch sets one explicitly.
        if patch.details.value.is_some() && patch.details.display_name.is_none() {
            merged.display_name = Some(floor_display_name(merged.value));
        }
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

/// "Ground Floor" / "Basement {n}" / ordinal "{n} Floor".
pub fn floor_display_name(value: i32) -> String {
    match value {
        0 => "Ground Floor".to_owned(),
        n if n < 0 => format!("Basement {}", -i64::from(n)),
        n => format!("{} Floor", ordinal(n)),
    }
}

fn ordinal(n: i32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[async_trait]
impl<R: MasterRepository> RemovalPolicy for FloorService<R> {
    async fn check_usage(&self, _record: &MasterRecord) -> Result<(), DomainError> {
        Ok(())
    }
}

#[async_trait]
impl<R: MasterRepository> MasterCrud for FloorService<R> {
    fn kind(&self) -> MasterKind {
        MasterKind::Floor
    }

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        FloorService::create(self, input).await
    }

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.engine.get(id).await
    }

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.engine.list(query).await
    }

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError> {
        FloorService::update(self, id, patch).await
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
impl<R: MasterRepository> RangeQueries for FloorService<R> {
    async fn find_by_range(
        &self,
        min: Option<i32>,
        max: Option<i32>,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        FloorService::find_by_range(self, min, max, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_and_basements() {
        assert_eq!(floor_display_name(0), "Ground Floor");
        assert_eq!(floor_display_name(-1), "Basement 1");
        assert_eq!(floor_display_name(-2), "Basement 2");
    }

    #[test]
    fn ordinal_floors() {
        assert_eq!(floor_display_name(1), "1st Floor");
        assert_eq!(floor_display_name(2), "2nd Floor");
        assert_eq!(floor_display_name(3), "3rd Floor");
        assert_eq!(floor_display_name(4), "4th Floor");
        assert_eq!(floor_display_name(11), "11th Floor");
        assert_eq!(floor_display_name(12), "12th Floor");
        assert_eq!(floor_display_name(13), "13th Floor");
        assert_eq!(floor_display_name(21), "21st Floor");
        assert_eq!(floor_display_name(103), "103rd Floor");
    }
}
