use axum::extract::State;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::EngineType;
use crate::presentation::state::AppState;

use super::response::success;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceStatus,
}

#[derive(Serialize)]
pub struct ServiceStatus {
    pub asr_doubao: &'static str,
    pub asr_qwen: &'static str,
    pub storage: &'static str,
    pub crawler: &'static str,
}

fn enabled(flag: bool) -> &'static str {
    if flag { "enabled" } else { "disabled" }
}

pub async fn health_handler(State(state): State<AppState>) -> Response {
    let engines = state.transcription_service.engines();
    let engine_status = |engine_type: EngineType| {
        if engines.iter().any(|e| e.engine_type == engine_type) {
            "available"
        } else {
            "unconfigured"
        }
    };

    success(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        services: ServiceStatus {
            asr_doubao: engine_status(EngineType::Doubao),
            asr_qwen: engine_status(EngineType::Qwen),
            storage: enabled(state.storage_enabled()),
            crawler: enabled(state.crawler_enabled()),
        },
    })
}
