use std::time::Duration;

/// Fixed-wait retry of transport failures. HTTP error statuses are returned
/// to the caller untouched and never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            wait: Duration::from_millis(500),
        }
    }
}

pub(crate) async fn send_with_retry<F>(
    policy: RetryPolicy,
    service: &str,
    build: F,
) -> Result<reqwest::Response, reqwest::Error>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut attempt = 0;
    loop {
        match build().send().await {
            Ok(response) => return Ok(response),
            Err(e) if attempt < policy.max_retries => {
                attempt += 1;
                tracing::warn!(
                    service = service,
                    attempt = attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    "Transport error, retrying"
                );
                tokio::time::sleep(policy.wait).await;
            }
            Err(e) => return Err(e),
        }
    }
}
