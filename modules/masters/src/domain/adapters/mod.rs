//! Per-kind adapters over the generic engine.
//!
//! Each adapter fixes the discriminator, validates the kind-specific
//! payload, implements the removal policy, and adds its named queries.

mod support;

pub mod amenities;
pub mod cities;
pub mod floors;
pub mod locations;
pub mod property_types;
pub mod rooms;
pub mod towers;
pub mod washrooms;

pub use amenities::AmenityService;
pub use cities::CityService;
pub use floors::FloorService;
pub use locations::LocationService;
pub use property_types::PropertyTypeService;
pub use rooms::RoomService;
pub use towers::TowerService;
pub use washrooms::WashroomService;

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::Page;

use super::error::DomainError;
use super::model::{
    MasterKind, MasterPatch, MasterQuery, MasterRecord, MasterStatistics, NewMasterRecord,
};

/// The generic operations every adapter exposes, as an object-safe seam
/// for the REST layer (one set of handlers serves all eight resources).
#[async_trait]
pub trait MasterCrud: Send + Sync {
    fn kind(&self) -> MasterKind;

    async fn create(&self, input: NewMasterRecord) -> Result<MasterRecord, DomainError>;

    async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError>;

    async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError>;

    async fn update(&self, id: Uuid, patch: MasterPatch) -> Result<MasterRecord, DomainError>;

    async fn remove(&self, id: Uuid) -> Result<(), DomainError>;

    async fn statistics(&self) -> Result<MasterStatistics, DomainError>;

    async fn popular(&self) -> Result<Vec<MasterRecord>, DomainError>;
}

/// Named query for the categorized kinds (amenities, property types).
#[async_trait]
pub trait CategoryQueries: MasterCrud {
    async fn find_by_category(
        &self,
        category: &str,
        page: propdesk_http::PageParams,
    ) -> Result<Page<MasterRecord>, DomainError>;
}

/// Named query for the numeric kinds (floors, towers, rooms, washrooms).
#[async_trait]
pub trait RangeQueries: MasterCrud {
    async fn find_by_range(
        &self,
        min: Option<i32>,
        max: Option<i32>,
        page: propdesk_http::PageParams,
    ) -> Result<Page<MasterRecord>, DomainError>;
}
