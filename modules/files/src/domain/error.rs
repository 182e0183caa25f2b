//! File domain errors.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(Uuid),

    /// Only the uploader may delete a file.
    #[error("{0}")]
    Forbidden(String),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// Object store failure (write or delete).
    #[error("storage error: {0}")]
    Storage(String),

    #[error("database error: {0}")]
    Database(String),
}

impl FileError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
