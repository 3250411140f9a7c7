use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{Attribute, ObjectMeta, ObjectStore, PutOptions, PutPayload};

use crate::application::ports::{BlobObject, BlobStore, BlobStoreError};
use crate::domain::ObjectKey;

/// Connection parameters for an S3-compatible server such as MinIO.
#[derive(Debug, Clone)]
pub struct S3Connection {
    /// `host:port`, without scheme.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub use_ssl: bool,
    pub region: String,
}

/// [`BlobStore`] over `object_store`, one backend instance per bucket.
pub struct ObjectBlobStore {
    buckets: HashMap<String, Arc<dyn ObjectStore>>,
    url_base: String,
    content_type_attributes: bool,
}

impl ObjectBlobStore {
    pub fn s3(connection: &S3Connection, bucket_names: &[String]) -> Result<Self, BlobStoreError> {
        let scheme = if connection.use_ssl { "https" } else { "http" };
        let url_base = format!(
            "{}://{}",
            scheme,
            connection.endpoint.trim_end_matches('/')
        );

        let mut buckets: HashMap<String, Arc<dyn ObjectStore>> = HashMap::new();
        for name in bucket_names {
            let store = AmazonS3Builder::new()
                .with_endpoint(&url_base)
                .with_allow_http(!connection.use_ssl)
                .with_access_key_id(&connection.access_key)
                .with_secret_access_key(&connection.secret_key)
                .with_region(&connection.region)
                .with_bucket_name(name)
                .with_virtual_hosted_style_request(false)
                .build()
                .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
            buckets.insert(name.clone(), Arc::new(store));
        }

        Ok(Self {
            buckets,
            url_base,
            content_type_attributes: true,
        })
    }

    /// One directory per bucket under `base_path`.
    pub fn local(base_path: PathBuf, bucket_names: &[String]) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path)?;
        let base_path = base_path.canonicalize()?;

        let mut buckets: HashMap<String, Arc<dyn ObjectStore>> = HashMap::new();
        for name in bucket_names {
            let dir = base_path.join(name);
            std::fs::create_dir_all(&dir)?;
            let fs = LocalFileSystem::new_with_prefix(&dir)
                .map_err(|e| BlobStoreError::Configuration(e.to_string()))?;
            buckets.insert(name.clone(), Arc::new(fs));
        }

        Ok(Self {
            buckets,
            url_base: format!("file://{}", base_path.display()),
            // LocalFileSystem rejects put attributes
            content_type_attributes: false,
        })
    }

    pub fn in_memory(bucket_names: &[String]) -> Self {
        let buckets = bucket_names
            .iter()
            .map(|name| (name.clone(), Arc::new(InMemory::new()) as Arc<dyn ObjectStore>))
            .collect();

        Self {
            buckets,
            url_base: "memory://".to_string(),
            content_type_attributes: true,
        }
    }

    pub fn object_url(&self, bucket: &str, key: &ObjectKey) -> String {
        format!("{}/{}/{}", self.url_base, bucket, key)
    }

    fn bucket(&self, name: &str) -> Result<&Arc<dyn ObjectStore>, BlobStoreError> {
        self.buckets
            .get(name)
            .ok_or_else(|| BlobStoreError::UnknownBucket(name.to_string()))
    }
}

#[async_trait::async_trait]
impl BlobStore for ObjectBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, BlobStoreError> {
        let store = self.bucket(bucket)?;
        let path = StorePath::from(key.as_str());
        let size = data.len();

        let mut opts = PutOptions::default();
        if self.content_type_attributes {
            opts.attributes
                .insert(Attribute::ContentType, content_type.to_string().into());
        }

        store
            .put_opts(&path, PutPayload::from(data), opts)
            .await
            .map_err(|e| BlobStoreError::UploadFailed(e.to_string()))?;

        let url = self.object_url(bucket, key);
        tracing::info!(bucket = %bucket, key = %key, size = size, url = %url, "Object uploaded");
        Ok(url)
    }

    async fn list(&self, bucket: &str) -> Result<Vec<BlobObject>, BlobStoreError> {
        let store = self.bucket(bucket)?;

        let metas: Vec<ObjectMeta> = store
            .list(None)
            .try_collect()
            .await
            .map_err(|e| BlobStoreError::ListFailed(e.to_string()))?;

        tracing::debug!(bucket = %bucket, count = metas.len(), "Objects listed");

        Ok(metas
            .into_iter()
            .map(|meta| BlobObject {
                key: meta.location.to_string(),
                size: meta.size as u64,
                last_modified: meta.last_modified,
            })
            .collect())
    }

    async fn delete(&self, bucket: &str, key: &ObjectKey) -> Result<(), BlobStoreError> {
        let store = self.bucket(bucket)?;
        store
            .delete(&StorePath::from(key.as_str()))
            .await
            .map_err(|e| BlobStoreError::DeleteFailed(e.to_string()))
    }
}
