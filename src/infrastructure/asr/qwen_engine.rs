use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AsrError, TranscriptionEngine};
use crate::domain::{EngineType, TranscriptResult, TranscriptWord};
use crate::infrastructure::http_retry::{RetryPolicy, send_with_retry};

use super::EngineFactoryError;
use super::client_config::AsrClientConfig;

pub const QWEN_DEFAULT_ENDPOINT: &str = "https://bailian.cn-beijing.aliyuncs.com/v2/api/asr/invoke";

#[derive(Debug, Clone, Default)]
pub struct QwenConfig {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub client: AsrClientConfig,
}

/// Qwen ASR on Alibaba Bailian. Sentences with nested word lists, business
/// status in the body `code`.
pub struct QwenEngine {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl QwenEngine {
    pub fn new(config: QwenConfig) -> Result<Self, EngineFactoryError> {
        Ok(Self {
            client: config.client.build_http_client()?,
            endpoint: config
                .endpoint
                .unwrap_or_else(|| QWEN_DEFAULT_ENDPOINT.to_string()),
            api_key: config.api_key,
            retry: config.client.retry,
        })
    }
}

#[async_trait]
impl TranscriptionEngine for QwenEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<TranscriptResult, AsrError> {
        let body = QwenRequest {
            audio_type: "mp3",
            audio_data: BASE64.encode(audio_data),
            sample_rate: 16_000,
            format: "mp3",
        };

        tracing::info!(audio_size = audio_data.len(), "Sending request to Qwen ASR");

        let response = send_with_retry(self.retry, self.engine_name(), || {
            self.client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .header(reqwest::header::ACCEPT, "application/json")
                .json(&body)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Qwen ASR request failed");
            AsrError::request_failed(EngineType::Qwen, "Request to Qwen ASR failed", e.to_string())
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(status_code = status.as_u16(), response = %body, "Qwen ASR returned error");
            return Err(AsrError::api_error(
                EngineType::Qwen,
                format!("Qwen ASR returned status {}", status.as_u16()),
                body,
            ));
        }

        let payload: QwenResponse = response.json().await.map_err(|e| {
            AsrError::request_failed(
                EngineType::Qwen,
                "Failed to decode Qwen ASR response",
                e.to_string(),
            )
        })?;

        if payload.code != "200" && payload.code != "Success" {
            tracing::error!(code = %payload.code, message = %payload.message, "Qwen ASR transcription failed");
            return Err(AsrError::api_error(
                EngineType::Qwen,
                payload.message,
                payload.code,
            ));
        }

        let result = normalize(payload);

        tracing::info!(
            request_id = %result.request_trace_id,
            word_count = result.word_count,
            "Qwen ASR transcription completed"
        );

        Ok(result)
    }

    fn engine_name(&self) -> &'static str {
        "Qwen"
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Qwen
    }
}

fn normalize(response: QwenResponse) -> TranscriptResult {
    let data = response.data.unwrap_or_default();
    let sentences = data.sentences.unwrap_or_default();

    let text = if sentences.is_empty() {
        data.text
    } else {
        sentences.iter().map(|s| s.text.as_str()).collect::<String>()
    };

    let words = sentences
        .into_iter()
        .flat_map(|s| s.words.unwrap_or_default())
        .map(|w| TranscriptWord::from_provider(w.text, w.start_time, w.end_time, None))
        .collect();

    TranscriptResult::new(text, EngineType::Qwen, words, response.request_id)
}

#[derive(Serialize)]
struct QwenRequest {
    audio_type: &'static str,
    audio_data: String,
    sample_rate: u32,
    format: &'static str,
}

#[derive(Deserialize)]
struct QwenResponse {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
    #[serde(default)]
    data: Option<QwenData>,
}

#[derive(Default, Deserialize)]
struct QwenData {
    #[serde(default)]
    text: String,
    #[serde(default)]
    sentences: Option<Vec<QwenSentence>>,
}

#[derive(Deserialize)]
struct QwenSentence {
    #[serde(default)]
    text: String,
    #[serde(default)]
    words: Option<Vec<QwenWord>>,
}

#[derive(Deserialize)]
struct QwenWord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    start_time: i64,
    #[serde(default)]
    end_time: i64,
}
