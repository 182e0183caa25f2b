//! Repository seam for master record persistence.

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::Page;

use super::error::DomainError;
use super::geo::BoundingBox;
use super::model::{
    CountBucket, MasterKind, MasterQuery, MasterRecord, MasterStatistics, RecordStatus,
};

/// Fields the statistics queries can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    State,
    Country,
}

/// Persistence operations over the shared master record store.
///
/// Every read is scoped to non-archived records of one kind unless the
/// query explicitly asks for archived ones. Uniqueness is decided by the
/// database: `insert`/`update` surface unique-index violations as
/// [`DomainError::Conflict`], so callers never pre-check.
#[async_trait]
pub trait MasterRepository: Send + Sync {
    /// Persist a new record. Duplicate `(kind, name)` or `(kind, code)`
    /// among non-archived rows fails with Conflict.
    async fn insert(&self, record: MasterRecord) -> Result<MasterRecord, DomainError>;

    /// Find a non-archived record of the kind by id.
    async fn find_by_id(
        &self,
        kind: MasterKind,
        id: Uuid,
    ) -> Result<Option<MasterRecord>, DomainError>;

    /// Filtered, offset-paginated listing with a stable sort order.
    async fn list(
        &self,
        kind: MasterKind,
        query: &MasterQuery,
    ) -> Result<Page<MasterRecord>, DomainError>;

    /// Write back a full record (merged by the service). Uniqueness
    /// collisions with *other* rows fail with Conflict.
    async fn update(&self, record: MasterRecord) -> Result<MasterRecord, DomainError>;

    /// Flip the status of a non-archived record. Returns false when no
    /// such record exists.
    async fn set_status(
        &self,
        kind: MasterKind,
        id: Uuid,
        status: RecordStatus,
    ) -> Result<bool, DomainError>;

    /// Generic statistics for one kind (counts, status/category breakdowns,
    /// numeric bounds where applicable).
    async fn statistics(&self, kind: MasterKind) -> Result<MasterStatistics, DomainError>;

    /// Counts of non-archived records grouped by a geographic field.
    async fn group_counts(
        &self,
        kind: MasterKind,
        field: GroupField,
    ) -> Result<Vec<CountBucket>, DomainError>;

    /// Non-archived coordinate-bearing records inside a bounding box
    /// (prefilter for the proximity query; exact distances are computed in
    /// the domain).
    async fn find_in_bbox(
        &self,
        kind: MasterKind,
        bbox: BoundingBox,
    ) -> Result<Vec<MasterRecord>, DomainError>;
}
