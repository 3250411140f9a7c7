use std::sync::atomic::Ordering;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use podrelay::application::ports::{AsrErrorKind, TranscriptionEngine};
use podrelay::domain::EngineType;
use podrelay::infrastructure::asr::{AsrClientConfig, QwenConfig, QwenEngine};
use podrelay::infrastructure::http_retry::RetryPolicy;

use super::mock_server::{start_flaky_provider, start_mock_provider, unreachable_url};

const PATH: &str = "/v2/api/asr/invoke";

fn engine(endpoint: String) -> QwenEngine {
    QwenEngine::new(QwenConfig {
        api_key: "sk-test".to_string(),
        endpoint: Some(endpoint),
        client: AsrClientConfig {
            timeout: Duration::from_secs(5),
            retry: RetryPolicy {
                max_retries: 1,
                wait: Duration::from_millis(10),
            },
        },
    })
    .unwrap()
}

#[tokio::test]
async fn given_sentences_when_transcribing_then_flattens_words() {
    let body = r#"{
        "code": "200",
        "message": "ok",
        "request_id": "req-42",
        "data": {
            "text": "ignored when sentences exist",
            "sentences": [
                {"text": "Hello ", "words": [
                    {"text": "Hello", "start_time": 0, "end_time": 450}
                ]},
                {"text": "there", "words": [
                    {"text": "there", "start_time": 500, "end_time": 4100}
                ]}
            ]
        }
    }"#;
    let server = start_mock_provider(PATH, 200, vec![], body).await;

    let result = engine(server.url.clone()).transcribe(b"audio").await.unwrap();

    assert_eq!(result.engine, EngineType::Qwen);
    assert_eq!(result.text, "Hello there");
    assert_eq!(result.word_count, 2);
    assert_eq!(result.duration_s, 4);
    assert_eq!(result.request_trace_id, "req-42");
    assert!(result.words.iter().all(|w| w.speaker.is_none()));
}

#[tokio::test]
async fn given_text_without_sentences_when_transcribing_then_uses_text_field() {
    let body = r#"{"code": "Success", "request_id": "r", "data": {"text": "plain"}}"#;
    let server = start_mock_provider(PATH, 200, vec![], body).await;

    let result = engine(server.url.clone()).transcribe(b"audio").await.unwrap();

    assert_eq!(result.text, "plain");
    assert_eq!(result.word_count, 0);
}

#[tokio::test]
async fn given_request_when_sent_then_uses_bearer_auth_and_base64_audio() {
    let body = r#"{"code": "200", "data": {"text": ""}}"#;
    let server = start_mock_provider(PATH, 200, vec![], body).await;

    engine(server.url.clone()).transcribe(b"abc").await.unwrap();

    let request = server.last_request();
    assert_eq!(request.headers["authorization"], "Bearer sk-test");
    assert_eq!(request.body["audio_data"], BASE64.encode(b"abc"));
    assert_eq!(request.body["audio_type"], "mp3");
    assert_eq!(request.body["sample_rate"], 16000);
}

#[tokio::test]
async fn given_business_error_code_when_transcribing_then_returns_api_error() {
    let body = r#"{"code": "InvalidParameter", "message": "audio too short"}"#;
    let server = start_mock_provider(PATH, 200, vec![], body).await;

    let err = engine(server.url.clone()).transcribe(b"a").await.unwrap_err();

    assert_eq!(err.code(), "QWEN_API_ERROR");
    assert_eq!(err.message, "audio too short");
    assert_eq!(err.detail.as_deref(), Some("InvalidParameter"));
}

#[tokio::test]
async fn given_non_200_status_when_transcribing_then_body_becomes_detail() {
    let server = start_mock_provider(PATH, 401, vec![], "invalid api key").await;

    let err = engine(server.url.clone()).transcribe(b"a").await.unwrap_err();

    assert_eq!(err.kind, AsrErrorKind::ApiError);
    assert_eq!(err.message, "Qwen ASR returned status 401");
    assert_eq!(err.detail.as_deref(), Some("invalid api key"));
    assert_eq!(server.hits(), 1);
}

#[tokio::test]
async fn given_malformed_body_when_transcribing_then_returns_request_failed() {
    let server = start_mock_provider(PATH, 200, vec![], "not json").await;

    let err = engine(server.url.clone()).transcribe(b"a").await.unwrap_err();

    assert_eq!(err.kind, AsrErrorKind::RequestFailed);
}

#[tokio::test]
async fn given_unreachable_endpoint_when_transcribing_then_returns_request_failed() {
    let err = engine(unreachable_url().await).transcribe(b"a").await.unwrap_err();

    assert_eq!(err.code(), "QWEN_REQUEST_FAILED");
}

#[tokio::test]
async fn given_connections_always_dropped_when_transcribing_then_retries_once() {
    let (server, dropped) = start_flaky_provider(PATH, 10, 200, vec![], "{}").await;

    let err = engine(server.url.clone()).transcribe(b"a").await.unwrap_err();

    assert_eq!(err.code(), "QWEN_REQUEST_FAILED");
    assert_eq!(dropped.load(Ordering::SeqCst), 2);
}
