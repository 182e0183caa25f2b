//! File DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use propdesk_http::PageParams;

use crate::domain::model::{FileQuery, FileRecord};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecordDto {
    pub id: Uuid,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub url: String,
    pub uploaded_by: String,
    pub created_at: DateTime<Utc>,
}

impl From<FileRecord> for FileRecordDto {
    fn from(r: FileRecord) -> Self {
        Self {
            id: r.id,
            file_name: r.file_name,
            content_type: r.content_type,
            size_bytes: r.size_bytes,
            url: r.url,
            uploaded_by: r.uploaded_by,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListFilesQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub uploaded_by: Option<String>,
    pub search: Option<String>,
}

impl ListFilesQuery {
    pub fn into_query(self) -> FileQuery {
        FileQuery {
            page: PageParams::new(self.page, self.limit),
            uploaded_by: self.uploaded_by,
            search: self.search,
        }
    }
}
