use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::application::ports::{AsrError, BlobStore};
use crate::domain::{ObjectKey, TranscriptResult};

/// Bucket names used for archival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveBuckets {
    pub audio: String,
    pub transcripts: String,
}

impl ArchiveBuckets {
    pub fn all(&self) -> Vec<String> {
        vec![self.audio.clone(), self.transcripts.clone()]
    }
}

/// Keys for one archived transcription.
///
/// Both keys share a stem of the second-resolution UTC timestamp plus eight
/// hex characters of a random UUID, so two requests finishing within the
/// same second still get distinct keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveKeys {
    pub audio: ObjectKey,
    pub transcript: ObjectKey,
}

impl ArchiveKeys {
    pub fn generate(now: DateTime<Utc>, audio_content_type: &str) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let stem = format!("{}-{}", now.format("%Y%m%d-%H%M%S"), &suffix[..8]);

        Self {
            audio: ObjectKey::from_raw(format!(
                "episode-{}.{}",
                stem,
                audio_extension(audio_content_type)
            )),
            transcript: ObjectKey::from_raw(format!("transcript-{}.json", stem)),
        }
    }
}

pub fn audio_extension(content_type: &str) -> &'static str {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    match essence.as_str() {
        "audio/mpeg" | "audio/mp3" => "mp3",
        "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => "m4a",
        "audio/aac" => "aac",
        "audio/ogg" => "ogg",
        "audio/flac" | "audio/x-flac" => "flac",
        "audio/webm" => "webm",
        _ => "bin",
    }
}

/// Best-effort persistence of the source audio and the transcript record.
pub struct TranscriptArchiver {
    store: Arc<dyn BlobStore>,
    buckets: ArchiveBuckets,
}

impl TranscriptArchiver {
    pub fn new(store: Arc<dyn BlobStore>, buckets: ArchiveBuckets) -> Self {
        Self { store, buckets }
    }

    /// Uploads audio, then the serialized transcript, attaching each URL to
    /// `result` as its upload succeeds. Never fails: storage problems are
    /// logged and the transcript is returned to the caller regardless.
    pub async fn archive(
        &self,
        audio_data: &[u8],
        content_type: &str,
        result: &mut TranscriptResult,
    ) {
        let keys = ArchiveKeys::generate(Utc::now(), content_type);

        match self
            .store
            .put(
                &self.buckets.audio,
                &keys.audio,
                Bytes::copy_from_slice(audio_data),
                content_type,
            )
            .await
        {
            Ok(url) => result.audio_url = Some(url),
            Err(e) => {
                let err = AsrError::storage("Failed to upload audio", e.to_string());
                tracing::warn!(
                    code = %err.code(),
                    bucket = %self.buckets.audio,
                    key = %keys.audio,
                    error = %err,
                    "Audio archival failed, continuing"
                );
            }
        }

        match serde_json::to_vec(&*result) {
            Ok(json) => match self
                .store
                .put(
                    &self.buckets.transcripts,
                    &keys.transcript,
                    Bytes::from(json),
                    "application/json",
                )
                .await
            {
                Ok(url) => result.transcript_url = Some(url),
                Err(e) => {
                    let err = AsrError::storage("Failed to upload transcript", e.to_string());
                    tracing::warn!(
                        code = %err.code(),
                        bucket = %self.buckets.transcripts,
                        key = %keys.transcript,
                        error = %err,
                        "Transcript archival failed, continuing"
                    );
                }
            },
            Err(e) => {
                let err = AsrError::storage("Failed to serialize transcript", e.to_string());
                tracing::warn!(code = %err.code(), error = %err, "Transcript archival failed");
            }
        }

        tracing::info!(
            engine = %result.engine,
            audio_url = result.audio_url.as_deref().unwrap_or(""),
            transcript_url = result.transcript_url.as_deref().unwrap_or(""),
            "Transcription archived"
        );
    }
}
