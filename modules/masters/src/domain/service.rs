//! The generic master record engine.
//!
//! One [`MasterService`] instance is bound to a single [`MasterKind`] at
//! construction; the per-kind adapters own the kind-specific validation and
//! wrap the engine for everything else.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use propdesk_http::{Page, PageParams};

use super::error::DomainError;
use super::model::{
    MasterKind, MasterPatch, MasterQuery, MasterRecord, MasterStatistics, NewMasterRecord,
    RecordStatus, TypeDetails, MAX_NAME_LEN, MAX_SORT_ORDER,
};
use super::repo::MasterRepository;

/// Pre-removal hook. Every adapter must implement it; the engine cannot
/// archive a record without one. A policy may veto removal while the
/// record is still referenced elsewhere.
#[async_trait]
pub trait RemovalPolicy: Send + Sync {
    async fn check_usage(&self, record: &MasterRecord) -> Result<(), DomainError>;
}

/// Generic create/read/update/soft-delete/list/statistics engine over the
/// master record store, fixed to one kind.
#[derive(Clone)]
pub struct MasterService<R: MasterRepository> {
    kind: MasterKind,
    repo: Arc<R>,
}

impl<R: MasterRepository> MasterService<R> {
    pub fn new(kind: MasterKind, repo: Arc<R>) -> Self {
        Self { kind, repo }
    }

    pub fn kind(&self) -> MasterKind {
        self.kind
    }

    /// Repository handle for adapter-level named queries.
    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    /// Persist a new record. `details` must already be validated by the
    /// adapter for this kind; duplicate name/code surface as Conflict from
    /// the unique index, not from a pre-check.
    #[instrument(skip(self, input, details), fields(kind = %self.kind))]
    pub async fn create(
        &self,
        input: NewMasterRecord,
        details: TypeDetails,
    ) -> Result<MasterRecord, DomainError> {
        debug!("creating master record");

        let name = normalize_name(&input.name)?;
        let code = normalize_code(input.code)?;
        let sort_order = validate_sort_order(input.sort_order.unwrap_or(0))?;
        let status = match input.status {
            Some(RecordStatus::Archived) => {
                return Err(DomainError::validation(
                    "status",
                    "records cannot be created archived",
                ));
            }
            Some(s) => s,
            None => RecordStatus::Active,
        };
        if !details.matches(self.kind) {
            return Err(DomainError::validation(
                "details",
                format!("payload does not fit kind '{}'", self.kind),
            ));
        }

        let now = Utc::now();
        let record = MasterRecord {
            id: Uuid::now_v7(),
            kind: self.kind,
            name,
            description: input.description,
            code,
            status,
            sort_order,
            is_default: input.is_default.unwrap_or(false),
            is_popular: input.is_popular.unwrap_or(false),
            metadata: input.metadata.unwrap_or_default(),
            details,
            created_at: now,
            updated_at: now,
        };

        let created = self.repo.insert(record).await?;
        info!(id = %created.id, "master record created");
        Ok(created)
    }

    #[instrument(skip(self), fields(kind = %self.kind, id = %id))]
    pub async fn get(&self, id: Uuid) -> Result<MasterRecord, DomainError> {
        self.repo
            .find_by_id(self.kind, id)
            .await?
            .ok_or_else(|| DomainError::not_found(self.kind, id))
    }

    #[instrument(skip(self, query), fields(kind = %self.kind))]
    pub async fn list(&self, query: MasterQuery) -> Result<Page<MasterRecord>, DomainError> {
        self.repo.list(self.kind, &query).await
    }

    /// Merge a patch into a freshly loaded record and write it back.
    /// `details` is the adapter-merged payload for this kind.
    #[instrument(skip(self, current, patch, details), fields(kind = %self.kind, id = %current.id))]
    pub async fn apply_update(
        &self,
        mut current: MasterRecord,
        patch: MasterPatch,
        details: TypeDetails,
    ) -> Result<MasterRecord, DomainError> {
        if let Some(name) = patch.name {
            current.name = normalize_name(&name)?;
        }
        if let Some(description) = patch.description {
            current.description = Some(description);
        }
        if let Some(code) = patch.code {
            current.code = normalize_code(Some(code))?;
        }
        match patch.status {
            Some(RecordStatus::Archived) => {
                return Err(DomainError::validation(
                    "status",
                    "archival goes through delete, not update",
                ));
            }
            Some(s) => current.status = s,
            None => {}
        }
        if let Some(sort_order) = patch.sort_order {
            current.sort_order = validate_sort_order(sort_order)?;
        }
        if let Some(is_default) = patch.is_default {
            current.is_default = is_default;
        }
        if let Some(is_popular) = patch.is_popular {
            current.is_popular = is_popular;
        }
        if let Some(metadata) = patch.metadata {
            current.metadata = metadata;
        }
        if !details.matches(self.kind) {
            return Err(DomainError::validation(
                "details",
                format!("payload does not fit kind '{}'", self.kind),
            ));
        }
        current.details = details;
        current.updated_at = Utc::now();

        let updated = self.repo.update(current).await?;
        info!(id = %updated.id, "master record updated");
        Ok(updated)
    }

    /// Soft delete: look the record up, run the adapter's removal policy,
    /// then archive. Archived records disappear from all default reads, so
    /// a second remove reports NotFound.
    #[instrument(skip(self, policy), fields(kind = %self.kind, id = %id))]
    pub async fn remove<P: RemovalPolicy + ?Sized>(
        &self,
        policy: &P,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let record = self.get(id).await?;
        policy.check_usage(&record).await?;

        let archived = self
            .repo
            .set_status(self.kind, id, RecordStatus::Archived)
            .await?;
        if !archived {
            // The record vanished between lookup and archive.
            return Err(DomainError::not_found(self.kind, id));
        }
        info!(id = %id, "master record archived");
        Ok(())
    }

    #[instrument(skip(self), fields(kind = %self.kind))]
    pub async fn statistics(&self) -> Result<MasterStatistics, DomainError> {
        self.repo.statistics(self.kind).await
    }

    /// The popular subset, in display order.
    pub async fn popular(&self) -> Result<Vec<MasterRecord>, DomainError> {
        let query = MasterQuery {
            page: PageParams::new(Some(1), Some(100)),
            is_popular: Some(true),
            ..MasterQuery::default()
        };
        Ok(self.repo.list(self.kind, &query).await?.records)
    }
}

fn normalize_name(name: &str) -> Result<String, DomainError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::validation("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::validation(
            "name",
            format!("must be at most {MAX_NAME_LEN} characters"),
        ));
    }
    Ok(name.to_owned())
}

fn normalize_code(code: Option<String>) -> Result<Option<String>, DomainError> {
    match code {
        None => Ok(None),
        Some(code) => {
            let code = code.trim();
            if code.is_empty() {
                return Err(DomainError::validation("code", "must not be empty when set"));
            }
            Ok(Some(code.to_owned()))
        }
    }
}

fn validate_sort_order(sort_order: i32) -> Result<i32, DomainError> {
    if !(0..=MAX_SORT_ORDER).contains(&sort_order) {
        return Err(DomainError::validation(
            "sortOrder",
            format!("must be between 0 and {MAX_SORT_ORDER}"),
        ));
    }
    Ok(sort_order)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(normalize_name("  Pune  ").expect("valid"), "Pune");
        assert!(normalize_name("   ").is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
        assert!(normalize_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    }

    #[test]
    fn code_rejects_blank_but_allows_absent() {
        assert_eq!(normalize_code(None).expect("valid"), None);
        assert_eq!(
            normalize_code(Some(" PNQ ".to_owned())).expect("valid"),
            Some("PNQ".to_owned())
        );
        assert!(normalize_code(Some("  ".to_owned())).is_err());
    }

    #[test]
    fn sort_order_bounds() {
        assert!(validate_sort_order(0).is_ok());
        assert!(validate_sort_order(MAX_SORT_ORDER).is_ok());
        assert!(validate_sort_order(-1).is_err());
        assert!(validate_sort_order(MAX_SORT_ORDER + 1).is_err());
    }
}
