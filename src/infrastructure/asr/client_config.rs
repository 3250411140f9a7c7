use std::time::Duration;

use crate::infrastructure::http_retry::RetryPolicy;

use super::EngineFactoryError;

/// Transport settings shared by the provider clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AsrClientConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for AsrClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl AsrClientConfig {
    pub(crate) fn build_http_client(&self) -> Result<reqwest::Client, EngineFactoryError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| EngineFactoryError::HttpClient(e.to_string()))
    }
}
