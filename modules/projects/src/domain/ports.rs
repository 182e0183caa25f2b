//! Ports consumed by the projects domain.

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_masters::MasterKind;

use super::error::DomainError;

/// Lookup into the master store, used to validate city / location /
/// property-type / amenity references before a project write.
#[async_trait]
pub trait MasterLookup: Send + Sync {
    /// True when a non-archived master record of the kind exists.
    async fn exists(&self, kind: MasterKind, id: Uuid) -> Result<bool, DomainError>;
}
