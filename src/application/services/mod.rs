mod retention_worker;
mod transcript_archiver;
mod transcription_service;

pub use retention_worker::{
    CleanupReport, DEFAULT_CLEANUP_INTERVAL, DEFAULT_RETENTION, ExpiredObject, RetentionWorker,
};
pub use transcript_archiver::{ArchiveBuckets, ArchiveKeys, TranscriptArchiver, audio_extension};
pub use transcription_service::{
    DEFAULT_AUDIO_CONTENT_TYPE, EngineDescriptor, TranscriptionService,
};
