use serde::{Deserialize, Serialize};

/// A single recognized word with its timing, in milliseconds from the start
/// of the audio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptWord {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl TranscriptWord {
    /// Builds a word from raw provider timings.
    ///
    /// Negative timings clamp to zero and an end before the start clamps to
    /// the start, so `start_ms <= end_ms` always holds. Empty speaker labels
    /// are dropped.
    pub fn from_provider(
        text: impl Into<String>,
        start_time: i64,
        end_time: i64,
        speaker: Option<&str>,
    ) -> Self {
        let start_ms = start_time.max(0) as u64;
        let end_ms = (end_time.max(0) as u64).max(start_ms);
        let speaker = speaker
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        Self {
            text: text.into(),
            start_ms,
            end_ms,
            speaker,
        }
    }
}
