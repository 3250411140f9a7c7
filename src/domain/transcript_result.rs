use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EngineType, TranscriptWord};

/// Normalized transcription produced by any provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptResult {
    pub text: String,
    pub duration_s: u64,
    pub engine: EngineType,
    pub words: Vec<TranscriptWord>,
    pub word_count: usize,
    pub request_trace_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transcript_url: Option<String>,
}

impl TranscriptResult {
    /// Assembles a result from normalized words. `word_count` and
    /// `duration_s` are always derived here, never taken from a provider.
    pub fn new(
        text: String,
        engine: EngineType,
        words: Vec<TranscriptWord>,
        request_trace_id: String,
    ) -> Self {
        let duration_s = words.last().map(|w| w.end_ms / 1000).unwrap_or(0);
        let word_count = words.len();

        Self {
            text,
            duration_s,
            engine,
            words,
            word_count,
            request_trace_id,
            timestamp: Utc::now(),
            audio_url: None,
            transcript_url: None,
        }
    }
}
