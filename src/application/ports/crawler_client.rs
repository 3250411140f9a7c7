use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Resolves a podcast episode page into its metadata and audio location.
#[async_trait]
pub trait CrawlerClient: Send + Sync {
    async fn parse_episode(
        &self,
        url: &str,
        wait_time: Option<u32>,
    ) -> Result<EpisodeInfo, CrawlerError>;

    async fn health_check(&self) -> Result<(), CrawlerError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    #[serde(default)]
    pub episode_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub podcast_name: Option<String>,
    #[serde(default)]
    pub audio_url: String,
    #[serde(default)]
    pub duration: u64,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub show_notes: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CrawlerError {
    #[error("crawler request failed: {0}")]
    RequestFailed(String),
    #[error("crawler service error: status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("parse failed: {0}")]
    ParseFailed(String),
}
