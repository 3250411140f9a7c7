use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::domain::ObjectKey;

/// Minimal key-value blob store. Buckets are addressed by name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` under `bucket/key` and returns a URL for the object.
    async fn put(
        &self,
        bucket: &str,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, BlobStoreError>;

    async fn list(&self, bucket: &str) -> Result<Vec<BlobObject>, BlobStoreError>;

    async fn delete(&self, bucket: &str, key: &ObjectKey) -> Result<(), BlobStoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobObject {
    pub key: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("unknown bucket: {0}")]
    UnknownBucket(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("list failed: {0}")]
    ListFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("store configuration invalid: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
