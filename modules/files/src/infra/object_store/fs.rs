//! Filesystem object store: objects live under a root directory and URLs
//! are minted from a configured public base.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::domain::error::FileError;
use crate::domain::ports::{ObjectStore, StoredObject};

pub struct FsObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_owned(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl ObjectStore for FsObjectStore {
    async fn put(
        &self,
        key: &str,
        _content_type: &str,
        bytes: Bytes,
    ) -> Result<StoredObject, FileError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| FileError::Storage(e.to_string()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| FileError::Storage(e.to_string()))?;
        debug!(key, "object written");

        Ok(StoredObject {
            key: key.to_owned(),
            url: format!("{}/{key}", self.public_base_url),
        })
    }

    async fn delete(&self, key: &str) -> Result<(), FileError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FileError::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    #[tokio::test]
    async fn put_then_delete_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FsObjectStore::new(dir.path(), "http://localhost:8080/files/");

        let stored = store
            .put("abc/brochure.pdf", "application/pdf", Bytes::from_static(b"pdf"))
            .await
            .expect("put");
        assert_eq!(stored.url, "http://localhost:8080/files/abc/brochure.pdf");
        assert!(dir.path().join("abc/brochure.pdf").exists());

        store.delete("abc/brochure.pdf").await.expect("delete");
        assert!(!dir.path().join("abc/brochure.pdf").exists());

        // Deleting again is a no-op, not an error.
        store.delete("abc/brochure.pdf").await.expect("idempotent");
    }
}
