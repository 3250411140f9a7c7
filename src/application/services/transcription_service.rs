use std::sync::Arc;

use crate::application::ports::{AsrError, TranscriptionEngine};
use crate::domain::{EngineSelection, EngineType, TranscriptResult};

use super::transcript_archiver::TranscriptArchiver;

/// Content type assumed when the caller does not supply one.
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineDescriptor {
    pub name: &'static str,
    pub engine_type: EngineType,
    pub is_primary: bool,
}

/// Runs a transcription against the primary engine and falls back to the
/// backup engine only after the primary has definitively failed.
pub struct TranscriptionService {
    primary: Arc<dyn TranscriptionEngine>,
    backup: Arc<dyn TranscriptionEngine>,
    archiver: Option<TranscriptArchiver>,
}

impl TranscriptionService {
    pub fn new(
        primary: Arc<dyn TranscriptionEngine>,
        backup: Arc<dyn TranscriptionEngine>,
        archiver: Option<TranscriptArchiver>,
    ) -> Self {
        Self {
            primary,
            backup,
            archiver,
        }
    }

    pub fn archival_enabled(&self) -> bool {
        self.archiver.is_some()
    }

    pub fn engines(&self) -> Vec<EngineDescriptor> {
        vec![
            EngineDescriptor {
                name: self.primary.engine_name(),
                engine_type: self.primary.engine_type(),
                is_primary: true,
            },
            EngineDescriptor {
                name: self.backup.engine_name(),
                engine_type: self.backup.engine_type(),
                is_primary: false,
            },
        ]
    }

    pub async fn transcribe_with_fallback(
        &self,
        audio_data: &[u8],
    ) -> Result<TranscriptResult, AsrError> {
        self.transcribe(audio_data, DEFAULT_AUDIO_CONTENT_TYPE, EngineSelection::Auto)
            .await
    }

    pub async fn transcribe(
        &self,
        audio_data: &[u8],
        content_type: &str,
        selection: EngineSelection,
    ) -> Result<TranscriptResult, AsrError> {
        if let EngineSelection::Named(requested) = selection {
            // TODO: route to the requested engine directly once single-engine
            // billing rules are settled; until then it takes the fallback path.
            tracing::warn!(
                requested_engine = %requested,
                "Specific engine selection not implemented yet, using fallback"
            );
        }

        tracing::info!(
            primary_engine = self.primary.engine_name(),
            backup_engine = self.backup.engine_name(),
            audio_size = audio_data.len(),
            selection = %selection,
            "Starting transcription with fallback"
        );

        let mut result = self.transcribe_with_engines(audio_data).await?;

        if let Some(archiver) = &self.archiver {
            archiver.archive(audio_data, content_type, &mut result).await;
        }

        Ok(result)
    }

    async fn transcribe_with_engines(
        &self,
        audio_data: &[u8],
    ) -> Result<TranscriptResult, AsrError> {
        let primary_err = match self.primary.transcribe(audio_data).await {
            Ok(result) => {
                tracing::info!(engine = %result.engine, "Primary engine succeeded");
                return Ok(result);
            }
            Err(e) => e,
        };

        tracing::warn!(
            primary_engine = self.primary.engine_name(),
            code = %primary_err.code(),
            error = %primary_err,
            "Primary engine failed, switching to backup"
        );

        match self.backup.transcribe(audio_data).await {
            Ok(result) => {
                tracing::info!(engine = %result.engine, "Backup engine succeeded");
                Ok(result)
            }
            Err(backup_err) => {
                tracing::error!(
                    backup_engine = self.backup.engine_name(),
                    code = %backup_err.code(),
                    error = %backup_err,
                    "Backup engine also failed"
                );
                Err(AsrError::all_engines_failed(&primary_err, &backup_err))
            }
        }
    }
}
