//! File service: upload, list, get, owner-only delete.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use propdesk_auth::AuthUser;
use propdesk_http::Page;

use super::error::FileError;
use super::model::{FileQuery, FileRecord};
use super::ports::ObjectStore;
use super::repo::FileRepository;

pub struct FileService<R: FileRepository> {
    repo: Arc<R>,
    store: Arc<dyn ObjectStore>,
}

impl<R: FileRepository> FileService<R> {
    pub fn new(repo: Arc<R>, store: Arc<dyn ObjectStore>) -> Self {
        Self { repo, store }
    }

    /// Store the bytes, then record the metadata. The two writes are
    /// independent; a crash in between leaves an orphan object, never a
    /// dangling row.
    #[instrument(skip(self, user, bytes), fields(uploader = %user.subject, size = bytes.len()))]
    pub async fn upload(
        &self,
        user: &AuthUser,
        file_name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<FileRecord, FileError> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(FileError::validation("fileName", "must not be empty"));
        }
        if bytes.is_empty() {
            return Err(FileError::validation("file", "must not be empty"));
        }

        let id = Uuid::now_v7();
        let key = format!("{id}/{}", sanitize_file_name(file_name));
        let size = i64::try_from(bytes.len())
            .map_err(|_| FileError::validation("file", "file too large"))?;
        let stored = self.store.put(&key, content_type, bytes).await?;

        let record = FileRecord {
            id,
            file_name: file_name.to_owned(),
            content_type: content_type.to_owned(),
            size_bytes: size,
            storage_key: stored.key,
            url: stored.url,
            uploaded_by: user.subject.clone(),
            created_at: Utc::now(),
        };
        let record = self.repo.insert(record).await?;
        info!(id = %record.id, "file uploaded");
        Ok(record)
    }

    pub async fn get(&self, id: Uuid) -> Result<FileRecord, FileError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(FileError::NotFound(id))
    }

    pub async fn list(&self, query: FileQuery) -> Result<Page<FileRecord>, FileError> {
        self.repo.list(&query).await
    }

    /// Remove the stored object, then the metadata row. Only the uploader
    /// may delete; this is the single ownership rule in the system.
    #[instrument(skip(self, user), fields(caller = %user.subject, id = %id))]
    pub async fn delete(&self, user: &AuthUser, id: Uuid) -> Result<(), FileError> {
        let record = self.get(id).await?;
        if record.uploaded_by != user.subject {
            return Err(FileError::Forbidden(
                "only the uploader may delete this file".to_owned(),
            ));
        }

        self.store.delete(&record.storage_key).await?;
        let removed = self.repo.delete(id).await?;
        if !removed {
            return Err(FileError::NotFound(id));
        }
        info!(id = %id, "file deleted");
        Ok(())
    }
}

/// Keep the stored key flat and predictable: path separators and control
/// characters collapse to underscores.
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_are_sanitized_for_keys() {
        assert_eq!(sanitize_file_name("brochure.pdf"), "brochure.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("site plan (v2).png"), "site_plan__v2_.png");
    }
}
