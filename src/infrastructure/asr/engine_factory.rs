use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::TranscriptionEngine;
use crate::domain::EngineType;
use crate::infrastructure::http_retry::RetryPolicy;
use crate::presentation::config::AsrSettings;

use super::client_config::AsrClientConfig;
use super::doubao_engine::{DoubaoConfig, DoubaoEngine};
use super::qwen_engine::{QwenConfig, QwenEngine};

#[derive(Debug, thiserror::Error)]
pub enum EngineFactoryError {
    #[error("http client construction failed: {0}")]
    HttpClient(String),
    #[error("primary and backup engines must differ, both are {0}")]
    SameEngine(EngineType),
}

pub struct AsrEngineFactory;

impl AsrEngineFactory {
    pub fn create(
        engine: EngineType,
        settings: &AsrSettings,
    ) -> Result<Arc<dyn TranscriptionEngine>, EngineFactoryError> {
        let client = Self::client_config(settings);

        match engine {
            EngineType::Doubao => {
                let doubao = &settings.doubao;
                if doubao.app_id.is_empty() || doubao.access_token.is_empty() {
                    tracing::warn!("Doubao credentials are not configured, requests will fail");
                }
                let engine = DoubaoEngine::new(DoubaoConfig {
                    app_id: doubao.app_id.clone(),
                    access_token: doubao.access_token.clone(),
                    endpoint: doubao.endpoint.clone(),
                    resource_id: doubao.resource_id.clone(),
                    hotwords: doubao.hotwords.clone(),
                    client,
                })?;
                Ok(Arc::new(engine))
            }
            EngineType::Qwen => {
                let qwen = &settings.qwen;
                if qwen.api_key.is_empty() {
                    tracing::warn!("Qwen API key is not configured, requests will fail");
                }
                let engine = QwenEngine::new(QwenConfig {
                    api_key: qwen.api_key.clone(),
                    endpoint: qwen.endpoint.clone(),
                    client,
                })?;
                Ok(Arc::new(engine))
            }
        }
    }

    /// Builds the `(primary, backup)` pair named in the settings.
    pub fn create_pair(
        settings: &AsrSettings,
    ) -> Result<(Arc<dyn TranscriptionEngine>, Arc<dyn TranscriptionEngine>), EngineFactoryError>
    {
        if settings.primary == settings.backup {
            return Err(EngineFactoryError::SameEngine(settings.primary));
        }
        let primary = Self::create(settings.primary, settings)?;
        let backup = Self::create(settings.backup, settings)?;
        Ok((primary, backup))
    }

    pub fn client_config(settings: &AsrSettings) -> AsrClientConfig {
        AsrClientConfig {
            timeout: Duration::from_secs(settings.timeout_secs),
            retry: RetryPolicy {
                max_retries: settings.retry_count,
                wait: Duration::from_millis(settings.retry_wait_ms),
            },
        }
    }
}
