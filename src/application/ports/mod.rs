mod blob_store;
mod crawler_client;
mod transcription_engine;

pub use blob_store::{BlobObject, BlobStore, BlobStoreError};
pub use crawler_client::{CrawlerClient, CrawlerError, EpisodeInfo};
pub use transcription_engine::{AsrError, AsrErrorKind, TranscriptionEngine};
