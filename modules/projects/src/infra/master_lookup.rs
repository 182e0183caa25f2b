//! Master-store adapter for the [`MasterLookup`] port.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_masters::{MasterKind, MasterRepository};

use crate::domain::error::DomainError;
use crate::domain::ports::MasterLookup;

/// Answers existence checks straight from the master repository.
pub struct RepoMasterLookup<R: MasterRepository> {
    repo: Arc<R>,
}

impl<R: MasterRepository> RepoMasterLookup<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R: MasterRepository> MasterLookup for RepoMasterLookup<R> {
    async fn exists(&self, kind: MasterKind, id: Uuid) -> Result<bool, DomainError> {
        let found = self
            .repo
            .find_by_id(kind, id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        Ok(found.is_some())
    }
}
