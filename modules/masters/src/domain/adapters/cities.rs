//! City adapter: geography payload, proximity and by-state queries,
//! statistics with per-state/per-country breakdowns.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;
use uuid::Uuid;

use propdesk_http::{Page, PageParams};

use super::support;
use super::MasterCrud;
use crate::domain::error::DomainError;
use crate::domain::geo::{haversine_km, BoundingBox};
use crate::domain::model::{
    CityStatistics, GeoPoint, MasterKind, MasterPatch, MasterQuery, MasterRecord,
    MasterStatistics, NearbyRecord, NewMasterRecord, TypeDetails,
};
use crate::domain::repo::{GroupField, MasterRepository};
use crate::domain::service::{MasterService, RemovalPolicy};

/// Widest accepted proximity radius.
const MAX_RADIUS_KM: f64 = 1000.0;

pub struct CityService<R: MasterRepository> {
    engine: MasterService<R>,
}

impl<R: MasterRepository> CityService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            engine: MasterService::new(MasterKind::City, repo),
        }
    }

    pub async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        let details = TypeDetails::Geo(support::build_geo(&input.details)?);
        self.engine.create(input, details).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: MasterPatch,
    ) -> Result<MasterRecord, DomainError> {
        let current = self.engine.get(id).await?;
        let geo = current
            .details
            .as_geo()
            .ok_or_else(|| DomainError::database("city row carries a non-geo payload"))?;
        let merged = support::merge_geo(geo, &patch.details)?;
        self.engine
            .apply_update(current, patch, TypeDetails::Geo(merged))
            .await
    }

    /// Cities within `radius_km` of the given point, nearest first.
    /// Great-circle distance over a bounding-box prefilter.
    #[instrument(skip(self))]
    pub async fn find_near(
        &self,
        center: GeoPoint,
        radius_km: f64,
    ) -> Result<Vec<NearbyRecord>, DomainError> {
        support::validate_point(center)?;
        if !(radius_km > 0.0 && radius_km <= MAX_RADIUS_KM) {
            return Err(DomainError::validation(
                "radiusKm",
                format!("must be within (0, {MAX_RADIUS_KM}]"),
            ));
        }

        let bbox = BoundingBox::around(center, radius_km);
        let candidates = self.engine.repo().find_in_bbox(MasterKind::City, bbox).await?;

        let mut nearby: Vec<NearbyRecord> = candidates
            .into_iter()
            .filter_map(|record| {
                let point = record.details.as_geo().and_then(|g| g.coordinates)?;
                let distance_km = haversine_km(center, point);
                (distance_km <= radius_km).then_some(NearbyRecord {
                    record,
                    distance_km,
                })
            })
            .collect();
        nearby.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(nearby)
    }

    pub async fn find_by_state(
        &self,
        state: &str,
        page: PageParams,
    ) -> Result<Page<MasterRecord>, DomainError> {
        let query = MasterQuery {
            page,
            state: Some(state.to_owned()),
            ..MasterQuery::default()
        };
        self.engine.list(query).await
    }

    /// Generic statistics plus per-state and per-country counts.
    pub async fn city_statistics(&self) -> Result<CityStatistics, DomainError> {
        let base = self.engine.statistics().await?;
        let by_state = self
            .engine
            .repo()
            .group_counts(MasterKind::City, GroupField::State)
            .await?;
        let by_country = self
            .engine
            .repo()
            .group_counts(MasterKind::City, GroupField::Country)
            .await?;
        Ok(CityStatistics {
            base,
            by_state,
            by_country,
        })
    }
}

#[async_trait]
impl<R: MasterRepository> RemovalPolicy for CityService<R> {
    async fn check_usage(&self, _record: &MasterRecord) -> Result<(), DomainError> {
        // Archiving a city neither blocks on nor cascades to its locations;
        // existing locations stay independently retrievable.
        Ok(())
    }
}

#[async_trait]
impl<R: MasterRepository> MasterCrud for CityService<R> {
    fn kind(&self) -> MasterKind {
        MasterKind::City
    }

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError> {
        CityService::create(self, input).await
    }

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.engine.get(id).await
    }

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.engine.list(query).await
    }

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError> {
        CityService::update(self, id, patch).await
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
