use std::fmt;

use async_trait::async_trait;

use crate::domain::{EngineType, TranscriptResult};

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<TranscriptResult, AsrError>;

    fn engine_name(&self) -> &'static str;

    fn engine_type(&self) -> EngineType;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsrErrorKind {
    /// The provider could not be reached or its response could not be read.
    RequestFailed,
    /// The provider answered with a non-success status or business code.
    ApiError,
    /// Primary and backup engines both failed.
    AllEnginesFailed,
    /// Archival to blob storage failed. Logged only.
    StorageError,
}

impl AsrErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AsrErrorKind::RequestFailed => "REQUEST_FAILED",
            AsrErrorKind::ApiError => "API_ERROR",
            AsrErrorKind::AllEnginesFailed => "ALL_ENGINES_FAILED",
            AsrErrorKind::StorageError => "STORAGE_ERROR",
        }
    }
}

impl fmt::Display for AsrErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", render_message(.message, .detail))]
pub struct AsrError {
    pub kind: AsrErrorKind,
    pub engine: Option<EngineType>,
    pub message: String,
    pub detail: Option<String>,
}

impl AsrError {
    pub fn request_failed(
        engine: EngineType,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: AsrErrorKind::RequestFailed,
            engine: Some(engine),
            message: message.into(),
            detail: non_empty(detail.into()),
        }
    }

    pub fn api_error(
        engine: EngineType,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind: AsrErrorKind::ApiError,
            engine: Some(engine),
            message: message.into(),
            detail: non_empty(detail.into()),
        }
    }

    /// Aggregates the primary and backup failures into one error.
    pub fn all_engines_failed(primary: &AsrError, backup: &AsrError) -> Self {
        Self {
            kind: AsrErrorKind::AllEnginesFailed,
            engine: None,
            message: "All ASR engines failed".to_string(),
            detail: Some(format!(
                "primary {}; backup {}",
                primary.describe(),
                backup.describe()
            )),
        }
    }

    pub fn storage(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: AsrErrorKind::StorageError,
            engine: None,
            message: message.into(),
            detail: non_empty(detail.into()),
        }
    }

    /// Tagged code, e.g. `DOUBAO_REQUEST_FAILED` or `ALL_ENGINES_FAILED`.
    pub fn code(&self) -> String {
        match self.engine {
            Some(engine) => format!("{}_{}", engine.code_prefix(), self.kind.as_str()),
            None => self.kind.as_str().to_string(),
        }
    }

    fn describe(&self) -> String {
        let engine = self.engine.map(|e| e.as_str()).unwrap_or("unknown");
        format!("{} [{}]: {}", engine, self.code(), self)
    }
}

fn render_message(message: &str, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{}: {}", message, detail),
        None => message.to_string(),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
