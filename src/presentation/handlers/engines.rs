use axum::extract::State;
use axum::response::Response;
use serde::Serialize;

use crate::domain::EngineType;
use crate::presentation::state::AppState;

use super::response::success;

#[derive(Serialize)]
pub struct EngineInfo {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub engine_type: EngineType,
    pub status: &'static str,
    pub is_primary: bool,
}

#[derive(Serialize)]
pub struct EnginesResponse {
    pub engines: Vec<EngineInfo>,
    pub count: usize,
}

pub async fn engines_handler(State(state): State<AppState>) -> Response {
    let engines: Vec<EngineInfo> = state
        .transcription_service
        .engines()
        .into_iter()
        .map(|e| EngineInfo {
            name: e.name,
            engine_type: e.engine_type,
            status: "available",
            is_primary: e.is_primary,
        })
        .collect();

    let count = engines.len();
    success(EnginesResponse { engines, count })
}
