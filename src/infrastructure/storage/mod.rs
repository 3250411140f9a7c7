mod object_blob_store;
mod store_factory;

pub use object_blob_store::{ObjectBlobStore, S3Connection};
pub use store_factory::BlobStoreFactory;
