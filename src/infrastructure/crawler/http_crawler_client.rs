use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::ports::{CrawlerClient, CrawlerError, EpisodeInfo};
use crate::infrastructure::http_retry::{RetryPolicy, send_with_retry};

/// Relays episode-page parsing to the standalone crawler service.
pub struct HttpCrawlerClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpCrawlerClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CrawlerError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CrawlerError::RequestFailed(format!("client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Serialize)]
struct ParseRequest<'a> {
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    wait_time: Option<u32>,
}

#[derive(Deserialize)]
struct ParseResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<EpisodeInfo>,
    #[serde(default)]
    error: Option<String>,
}

#[async_trait]
impl CrawlerClient for HttpCrawlerClient {
    async fn parse_episode(
        &self,
        url: &str,
        wait_time: Option<u32>,
    ) -> Result<EpisodeInfo, CrawlerError> {
        let endpoint = format!("{}/api/crawler/parse", self.base_url);
        let body = ParseRequest { url, wait_time };

        tracing::info!(url = %url, wait_time = ?wait_time, "Parsing episode via crawler service");

        let response = send_with_retry(self.retry, "crawler", || {
            self.client.post(&endpoint).json(&body)
        })
        .await
        .map_err(|e| {
            tracing::error!(url = %url, error = %e, "Failed to call crawler service");
            CrawlerError::RequestFailed(e.to_string())
        })?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            tracing::error!(status_code = status.as_u16(), response = %body, "Crawler service returned error");
            return Err(CrawlerError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ParseResponse = response
            .json()
            .await
            .map_err(|e| CrawlerError::ParseFailed(format!("response body: {}", e)))?;

        match (parsed.success, parsed.data) {
            (true, Some(episode)) => {
                tracing::info!(
                    title = %episode.title,
                    episode_id = %episode.episode_id,
                    "Episode parsed"
                );
                Ok(episode)
            }
            (true, None) => Err(CrawlerError::ParseFailed(
                "crawler returned success without data".to_string(),
            )),
            (false, _) => {
                let reason = parsed.error.unwrap_or_else(|| "unknown error".to_string());
                tracing::error!(error = %reason, "Episode parse failed");
                Err(CrawlerError::ParseFailed(reason))
            }
        }
    }

    async fn health_check(&self) -> Result<(), CrawlerError> {
        let response = self
            .client
            .get(format!("{}/api/crawler/health", self.base_url))
            .send()
            .await
            .map_err(|e| CrawlerError::RequestFailed(format!("health check: {}", e)))?;

        if !response.status().is_success() {
            return Err(CrawlerError::Status {
                status: response.status().as_u16(),
                body: String::new(),
            });
        }

        Ok(())
    }
}
