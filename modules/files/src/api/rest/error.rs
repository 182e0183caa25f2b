//! File error → API error mapping.

use propdesk_http::ApiError;

use crate::domain::error::FileError;

impl From<FileError> for ApiError {
    fn from(e: FileError) -> Self {
        match e {
            FileError::NotFound(_) => ApiError::not_found(e.to_string()),
            FileError::Forbidden(message) => ApiError::forbidden(message),
            FileError::Validation { .. } => ApiError::invalid_input(e.to_string()),
            FileError::Storage(message) | FileError::Database(message) => {
                ApiError::unexpected(message)
            }
        }
    }
}
