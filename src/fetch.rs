//! HTTP GET with bounded retry.
//!
//! [`fetch_with_retry`] performs one request through a [`Transport`] and
//! retries on any failure, waiting a fixed interval between attempts:
//! - non-success HTTP status → retry
//! - network or decode error → retry
//! - after `max_attempts` failures → [`ViewError::FetchFailed`] carrying the
//!   last failure
//!
//! There is no caching, no deduplication of identical in-flight requests,
//! no exponential backoff and no jitter.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::time::Duration;

use kalam_core::error::ViewError;

use crate::config::{ApiConfig, FetchConfig};

/// A single JSON GET. Implementations report non-success statuses as errors.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

/// Attempt count and fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(1000),
        }
    }
}

impl From<&FetchConfig> for RetryPolicy {
    fn from(config: &FetchConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            delay: config.retry_delay(),
        }
    }
}

/// GET `url` as JSON, retrying per `policy`.
pub async fn fetch_with_retry(
    transport: &dyn Transport,
    url: &str,
    policy: RetryPolicy,
) -> Result<serde_json::Value, ViewError> {
    let attempts = policy.max_attempts.max(1);
    let mut last_err = None;

    for attempt in 1..=attempts {
        if attempt > 1 {
            tokio::time::sleep(policy.delay).await;
        }
        match transport.get_json(url).await {
            Ok(body) => return Ok(body),
            Err(e) => {
                log::warn!("attempt {}/{} failed for {}: {:#}", attempt, attempts, url, e);
                last_err = Some(e);
            }
        }
    }

    Err(ViewError::FetchFailed {
        target: url.to_string(),
        attempts,
        reason: last_err
            .map(|e| format!("{:#}", e))
            .unwrap_or_else(|| "no attempt was made".to_string()),
    })
}

/// [`Transport`] over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("kalam/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            bail!("HTTP error {} for {}", status, url);
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Fails the first `failures` calls, then answers with the attempt number.
    struct Flaky {
        failures: u32,
        calls: AtomicU32,
    }

    impl Flaky {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl Transport for Flaky {
        async fn get_json(&self, _url: &str) -> Result<serde_json::Value> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= self.failures {
                bail!("HTTP error 503 Service Unavailable");
            }
            Ok(json!({ "attempt": n }))
        }
    }

    fn quick(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            delay: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn always_failing_target_uses_every_attempt() {
        let t = Flaky::new(u32::MAX);
        let err = fetch_with_retry(&t, "https://example.test/surah/1", quick(3))
            .await
            .unwrap_err();
        assert_eq!(t.calls.load(Ordering::SeqCst), 3);
        match err {
            ViewError::FetchFailed {
                attempts, reason, ..
            } => {
                assert_eq!(attempts, 3);
                assert!(reason.contains("503"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn succeeds_with_third_attempt_data() {
        let t = Flaky::new(2);
        let body = fetch_with_retry(&t, "https://example.test/juz/1", quick(3))
            .await
            .unwrap();
        assert_eq!(body["attempt"], 3);
        assert_eq!(t.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn success_needs_no_retry() {
        let t = Flaky::new(0);
        fetch_with_retry(&t, "u", quick(3)).await.unwrap();
        assert_eq!(t.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn policy_from_config() {
        let policy = RetryPolicy::from(&FetchConfig {
            max_attempts: 0,
            retry_delay_ms: 250,
        });
        assert_eq!(policy.max_attempts, 1);
        assert_eq!(policy.delay, Duration::from_millis(250));
        assert_eq!(RetryPolicy::default().max_attempts, 3);
    }
}
