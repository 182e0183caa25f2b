//! Repository seam for file metadata.

use async_trait::async_trait;
use uuid::Uuid;

use propdesk_http::Page;

use super::error::FileError;
use super::model::{FileQuery, FileRecord};

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, record: FileRecord) -> Result<FileRecord, FileError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<FileRecord>, FileError>;

    async fn list(&self, query: &FileQuery) -> Result<Page<FileRecord>, FileError>;

    async fn delete(&self, id: Uuid) -> Result<bool, FileError>;
}
