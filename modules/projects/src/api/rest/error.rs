//! Domain → API error mapping.

use propdesk_http::ApiError;

use crate::domain::error::DomainError;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Conflict(message) => ApiError::conflict(message),
            DomainError::NotFound { .. } => ApiError::not_found(e.to_string()),
            DomainError::Validation { .. } => ApiError::invalid_input(e.to_string()),
            DomainError::Database(message) => ApiError::unexpected(message),
        }
    }
}
