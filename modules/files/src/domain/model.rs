//! File metadata records.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use propdesk_http::PageParams;

/// Metadata for one stored object. The bytes live behind the object-store
/// port; this row only records where they went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecord {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub storage_key: String,
    pub url: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

/// Listing filters for files.
#[derive(Debug, Clone, Default)]
pub struct FileQuery {
    pub page: PageParams,
    pub uploaded_by: Option<String>,
    /// Case-insensitive match on the original file name.
    pub search: Option<String>,
}
