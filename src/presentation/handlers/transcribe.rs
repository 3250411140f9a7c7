use std::str::FromStr;
use std::time::Instant;

use axum::Extension;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use bytes::Bytes;

use crate::application::services::DEFAULT_AUDIO_CONTENT_TYPE;
use crate::domain::EngineSelection;
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

use super::response::{failure, success};

struct UploadedAudio {
    filename: String,
    content_type: String,
    data: Bytes,
}

#[tracing::instrument(skip(state, request_id, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    mut multipart: Multipart,
) -> Response {
    let started = Instant::now();
    let request_id = request_id.map(|Extension(id)| id.0).unwrap_or_default();

    let mut audio: Option<UploadedAudio> = None;
    let mut engine_field: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return upload_too_large(&state, &e).unwrap_or_else(|| {
                    failure(
                        StatusCode::BAD_REQUEST,
                        "INVALID_PARAMS",
                        format!("Invalid request parameters: {}", e),
                        None,
                    )
                });
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("unknown").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_AUDIO_CONTENT_TYPE)
                    .to_string();
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file bytes");
                        return upload_too_large(&state, &e).unwrap_or_else(|| {
                            failure(
                                StatusCode::BAD_REQUEST,
                                "INVALID_FILE",
                                "No file uploaded or invalid file",
                                Some(e.to_string()),
                            )
                        });
                    }
                };
                audio = Some(UploadedAudio {
                    filename,
                    content_type,
                    data,
                });
            }
            Some("engine") => match field.text().await {
                Ok(text) => engine_field = Some(text),
                Err(e) => {
                    return upload_too_large(&state, &e).unwrap_or_else(|| {
                        failure(
                            StatusCode::BAD_REQUEST,
                            "INVALID_PARAMS",
                            format!("Invalid request parameters: {}", e),
                            None,
                        )
                    });
                }
            },
            _ => {}
        }
    }

    let selection = match EngineSelection::from_str(engine_field.as_deref().unwrap_or_default()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid engine parameter");
            return failure(
                StatusCode::BAD_REQUEST,
                "INVALID_PARAMS",
                format!("Invalid request parameters: {}", e),
                None,
            );
        }
    };

    let audio = match audio {
        Some(a) if !a.data.is_empty() => a,
        _ => {
            tracing::warn!("Transcribe request with no file");
            return failure(
                StatusCode::BAD_REQUEST,
                "INVALID_FILE",
                "No file uploaded or invalid file",
                None,
            );
        }
    };

    tracing::info!(
        request_id = %request_id,
        filename = %audio.filename,
        file_size = audio.data.len(),
        engine = %selection,
        "Received ASR transcription request"
    );

    match state
        .transcription_service
        .transcribe(&audio.data, &audio.content_type, selection)
        .await
    {
        Ok(result) => {
            tracing::info!(
                engine = %result.engine,
                word_count = result.word_count,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "ASR transcription completed"
            );
            success(result)
        }
        Err(e) => {
            tracing::error!(
                code = %e.code(),
                error = %e,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "ASR transcription failed"
            );
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "ASR_ERROR",
                "Transcription failed",
                Some(e.to_string()),
            )
        }
    }
}

/// The body limit surfaces as a multipart read error carrying 413.
fn upload_too_large(state: &AppState, e: &MultipartError) -> Option<Response> {
    (e.status() == StatusCode::PAYLOAD_TOO_LARGE).then(|| {
        failure(
            StatusCode::PAYLOAD_TOO_LARGE,
            "FILE_TOO_LARGE",
            format!(
                "Upload exceeds the {} MB limit",
                state.settings.server.max_upload_mb
            ),
            None,
        )
    })
}
