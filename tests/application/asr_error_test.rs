use podrelay::application::ports::{AsrError, AsrErrorKind};
use podrelay::domain::EngineType;

#[test]
fn given_engine_error_when_rendering_code_then_prefixes_engine() {
    let err = AsrError::request_failed(EngineType::Doubao, "Request to Doubao ASR failed", "timeout");

    assert_eq!(err.code(), "DOUBAO_REQUEST_FAILED");
    assert_eq!(err.to_string(), "Request to Doubao ASR failed: timeout");
}

#[test]
fn given_empty_detail_when_creating_error_then_detail_is_absent() {
    let err = AsrError::api_error(EngineType::Qwen, "Qwen ASR returned status 500", "");

    assert_eq!(err.detail, None);
    assert_eq!(err.to_string(), "Qwen ASR returned status 500");
    assert_eq!(err.code(), "QWEN_API_ERROR");
}

#[test]
fn given_two_failures_when_aggregating_then_detail_names_both_engines() {
    let primary = AsrError::api_error(EngineType::Doubao, "Doubao ASR error: quota", "45000001");
    let backup = AsrError::request_failed(EngineType::Qwen, "Request to Qwen ASR failed", "refused");

    let err = AsrError::all_engines_failed(&primary, &backup);

    assert_eq!(err.kind, AsrErrorKind::AllEnginesFailed);
    assert_eq!(err.code(), "ALL_ENGINES_FAILED");
    let detail = err.detail.unwrap();
    assert!(detail.contains("DOUBAO_API_ERROR"));
    assert!(detail.contains("quota"));
    assert!(detail.contains("QWEN_REQUEST_FAILED"));
    assert!(detail.contains("refused"));
}

#[test]
fn given_storage_error_when_rendering_code_then_has_no_engine_prefix() {
    let err = AsrError::storage("Failed to upload audio", "bucket missing");

    assert_eq!(err.code(), "STORAGE_ERROR");
}
