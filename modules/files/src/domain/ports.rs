//! Object-store port: where the bytes actually go.

use async_trait::async_trait;
use bytes::Bytes;

use super::error::FileError;

/// Where a stored object ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// Upload collaborator. The domain hands bytes over and gets back a
/// storage key and a URL; it never reads them again.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<StoredObject, FileError>;

    /// Deleting a key that is already gone is not an error.
    async fn delete(&self, key: &str) -> Result<(), FileError>;
}
