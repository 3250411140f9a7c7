use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::application::ports::{AsrError, TranscriptionEngine};
use crate::domain::{EngineType, TranscriptResult, TranscriptWord};
use crate::infrastructure::http_retry::{RetryPolicy, send_with_retry};

use super::EngineFactoryError;
use super::client_config::AsrClientConfig;

pub const DOUBAO_DEFAULT_ENDPOINT: &str =
    "https://openspeech.bytedance.com/api/v3/auc/bigmodel/recognize/flash";
pub const DOUBAO_DEFAULT_RESOURCE_ID: &str = "volc.bigasr.auc_turbo";
const DOUBAO_SUCCESS_STATUS: &str = "20000000";

const STATUS_CODE_HEADER: &str = "X-Api-Status-Code";
const MESSAGE_HEADER: &str = "X-Api-Message";
const LOG_ID_HEADER: &str = "X-Tt-Logid";

#[derive(Debug, Clone, Default)]
pub struct DoubaoConfig {
    pub app_id: String,
    pub access_token: String,
    pub endpoint: Option<String>,
    pub resource_id: Option<String>,
    pub hotwords: Vec<String>,
    pub client: AsrClientConfig,
}

/// Doubao big-model flash recognition.
///
/// Business status travels in response headers rather than the HTTP status;
/// the body carries utterances, each with its own word list.
pub struct DoubaoEngine {
    client: reqwest::Client,
    endpoint: String,
    app_id: String,
    access_token: String,
    resource_id: String,
    hotwords: Vec<String>,
    retry: RetryPolicy,
}

impl DoubaoEngine {
    pub fn new(config: DoubaoConfig) -> Result<Self, EngineFactoryError> {
        Ok(Self {
            client: config.client.build_http_client()?,
            endpoint: config
                .endpoint
                .unwrap_or_else(|| DOUBAO_DEFAULT_ENDPOINT.to_string()),
            app_id: config.app_id,
            access_token: config.access_token,
            resource_id: config
                .resource_id
                .unwrap_or_else(|| DOUBAO_DEFAULT_RESOURCE_ID.to_string()),
            hotwords: config.hotwords,
            retry: config.client.retry,
        })
    }

    fn build_request_body(&self, audio_data: &[u8]) -> DoubaoRequest<'_> {
        let corpus = if self.hotwords.is_empty() {
            None
        } else {
            let hotwords: Vec<_> = self
                .hotwords
                .iter()
                .map(|word| serde_json::json!({ "word": word }))
                .collect();
            Some(DoubaoCorpus {
                context: serde_json::json!({ "hotwords": hotwords }).to_string(),
            })
        };

        DoubaoRequest {
            user: DoubaoUser { uid: &self.app_id },
            audio: DoubaoAudio {
                data: BASE64.encode(audio_data),
            },
            request: DoubaoRequestOptions {
                model_name: "bigmodel",
                corpus,
            },
        }
    }
}

#[async_trait]
impl TranscriptionEngine for DoubaoEngine {
    async fn transcribe(&self, audio_data: &[u8]) -> Result<TranscriptResult, AsrError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let body = self.build_request_body(audio_data);

        tracing::info!(
            request_id = %request_id,
            audio_size = audio_data.len(),
            "Sending request to Doubao ASR"
        );

        let response = send_with_retry(self.retry, self.engine_name(), || {
            self.client
                .post(&self.endpoint)
                .header("X-Api-App-Key", &self.app_id)
                .header("X-Api-Access-Key", &self.access_token)
                .header("X-Api-Resource-Id", &self.resource_id)
                .header("X-Api-Request-Id", &request_id)
                .header("X-Api-Sequence", "-1")
                .json(&body)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Doubao ASR request failed");
            AsrError::request_failed(
                EngineType::Doubao,
                "Request to Doubao ASR failed",
                e.to_string(),
            )
        })?;

        let status_code = header_value(response.headers(), STATUS_CODE_HEADER);
        let api_message = header_value(response.headers(), MESSAGE_HEADER);
        let log_id = header_value(response.headers(), LOG_ID_HEADER);

        if status_code != DOUBAO_SUCCESS_STATUS {
            tracing::error!(
                status_code = %status_code,
                message = %api_message,
                log_id = %log_id,
                http_status = response.status().as_u16(),
                "Doubao ASR returned error"
            );
            let message = if api_message.is_empty() {
                "Doubao ASR error: missing status message".to_string()
            } else {
                format!("Doubao ASR error: {}", api_message)
            };
            return Err(AsrError::api_error(EngineType::Doubao, message, status_code));
        }

        let payload: DoubaoResponse = response.json().await.map_err(|e| {
            AsrError::request_failed(
                EngineType::Doubao,
                "Failed to decode Doubao ASR response",
                e.to_string(),
            )
        })?;

        let result = normalize(payload, log_id);

        tracing::info!(
            log_id = %result.request_trace_id,
            word_count = result.word_count,
            "Doubao ASR transcription completed"
        );

        Ok(result)
    }

    fn engine_name(&self) -> &'static str {
        "Doubao"
    }

    fn engine_type(&self) -> EngineType {
        EngineType::Doubao
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

fn normalize(response: DoubaoResponse, log_id: String) -> TranscriptResult {
    let utterances = response
        .result
        .and_then(|r| r.utterances)
        .unwrap_or_default();

    let mut text = String::new();
    let mut words = Vec::new();
    for utterance in utterances {
        text.push_str(&utterance.text);
        let speaker = utterance.speaker.as_deref();
        words.extend(utterance.words.unwrap_or_default().into_iter().map(|w| {
            TranscriptWord::from_provider(w.text, w.start_time, w.end_time, speaker)
        }));
    }

    TranscriptResult::new(text, EngineType::Doubao, words, log_id)
}

#[derive(Serialize)]
struct DoubaoRequest<'a> {
    user: DoubaoUser<'a>,
    audio: DoubaoAudio,
    request: DoubaoRequestOptions,
}

#[derive(Serialize)]
struct DoubaoUser<'a> {
    uid: &'a str,
}

#[derive(Serialize)]
struct DoubaoAudio {
    data: String,
}

#[derive(Serialize)]
struct DoubaoRequestOptions {
    model_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    corpus: Option<DoubaoCorpus>,
}

#[derive(Serialize)]
struct DoubaoCorpus {
    context: String,
}

#[derive(Deserialize)]
struct DoubaoResponse {
    #[serde(default)]
    result: Option<DoubaoResult>,
}

#[derive(Deserialize)]
struct DoubaoResult {
    #[serde(default)]
    utterances: Option<Vec<DoubaoUtterance>>,
}

#[derive(Deserialize)]
struct DoubaoUtterance {
    #[serde(default)]
    text: String,
    #[serde(default)]
    speaker: Option<String>,
    #[serde(default)]
    words: Option<Vec<DoubaoWord>>,
}

#[derive(Deserialize)]
struct DoubaoWord {
    #[serde(default)]
    text: String,
    #[serde(default)]
    start_time: i64,
    #[serde(default)]
    end_time: i64,
}
