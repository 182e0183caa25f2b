//! Domain errors for the master record store.

use thiserror::Error;
use uuid::Uuid;

use super::model::MasterKind;

/// Domain-level failure taxonomy: every public operation classifies its
/// own failures before returning. No retries anywhere.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Duplicate name or code among non-archived records of the kind.
    #[error("{0}")]
    Conflict(String),

    /// No non-archived record of the kind matches the id.
    #[error("{} not found: {id}", kind.label())]
    NotFound { kind: MasterKind, id: Uuid },

    /// Malformed input or a reference that does not resolve.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Unclassified storage failure. Always reported, never swallowed.
    #[error("database error: {0}")]
    Database(String),
}

impl DomainError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn duplicate_name(kind: MasterKind, name: &str) -> Self {
        Self::Conflict(format!(
            "{} with name '{name}' already exists",
            kind.label()
        ))
    }

    pub fn duplicate_code(kind: MasterKind, code: &str) -> Self {
        Self::Conflict(format!(
            "{} with code '{code}' already exists",
            kind.label()
        ))
    }

    pub fn not_found(kind: MasterKind, id: Uuid) -> Self {
        Self::NotFound { kind, id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }
}
