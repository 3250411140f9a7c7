use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};

use crate::application::ports::EpisodeInfo;
use crate::presentation::state::AppState;

use super::response::{failure, success};

#[derive(Debug, Deserialize)]
pub struct ParseEpisodeRequest {
    pub url: String,
    #[serde(default)]
    pub wait_time: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ParseEpisodeResponse {
    pub episode_id: String,
    pub episode_title: String,
    pub podcast_name: Option<String>,
    pub audio_url: String,
    pub duration: u64,
    pub cover_image: Option<String>,
    pub show_notes: Option<String>,
}

impl From<EpisodeInfo> for ParseEpisodeResponse {
    fn from(info: EpisodeInfo) -> Self {
        Self {
            episode_id: info.episode_id,
            episode_title: info.title,
            podcast_name: info.podcast_name,
            audio_url: info.audio_url,
            duration: info.duration,
            cover_image: info.cover_image,
            show_notes: info.show_notes,
        }
    }
}

#[tracing::instrument(skip(state, payload))]
pub async fn parse_episode_handler(
    State(state): State<AppState>,
    payload: Result<Json<ParseEpisodeRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(r)) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Invalid episode parse request");
            return failure(
                StatusCode::BAD_REQUEST,
                "INVALID_REQUEST",
                format!("Invalid request parameters: {}", e.body_text()),
                None,
            );
        }
    };

    let url = request.url.trim();
    if url.is_empty() {
        return failure(
            StatusCode::BAD_REQUEST,
            "INVALID_REQUEST",
            "Invalid request parameters: url is required",
            None,
        );
    }

    let Some(crawler) = state.crawler.as_ref() else {
        return failure(
            StatusCode::SERVICE_UNAVAILABLE,
            "CRAWLER_DISABLED",
            "Episode parsing is disabled",
            None,
        );
    };

    tracing::info!(url = %url, wait_time = ?request.wait_time, "Received episode parse request");

    match crawler.parse_episode(url, request.wait_time).await {
        Ok(info) => success(ParseEpisodeResponse::from(info)),
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Failed to parse episode");
            failure(
                StatusCode::BAD_GATEWAY,
                "PARSE_FAILED",
                "Failed to parse episode",
                Some(e.to_string()),
            )
        }
    }
}
