use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_blob_store::{ObjectBlobStore, S3Connection};

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        let buckets = settings.bucket_names();

        match settings.provider {
            StorageProviderSetting::Minio => {
                if settings.endpoint.is_empty() {
                    return Err(BlobStoreError::Configuration(
                        "storage.endpoint required for minio".into(),
                    ));
                }
                let connection = S3Connection {
                    endpoint: settings.endpoint.clone(),
                    access_key: settings.access_key.clone(),
                    secret_key: settings.secret_key.clone(),
                    use_ssl: settings.use_ssl,
                    region: settings.region.clone(),
                };
                let store = ObjectBlobStore::s3(&connection, &buckets)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Local => {
                let store = ObjectBlobStore::local(PathBuf::from(&settings.local_path), &buckets)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::Memory => Ok(Arc::new(ObjectBlobStore::in_memory(&buckets))),
        }
    }
}
