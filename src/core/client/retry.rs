use std::time::Duration;

use crate::core::YsError;

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug)]
pub enum Backoff {
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `base * (factor ^ attempt)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
        /// Whether to apply random jitter (+/- 50%) to the delay.
        jitter: bool,
    },
}

impl Backoff {
    pub(crate) fn delay(&self, attempt: u32) -> Duration {
        match self {
            Self::Fixed(d) => *d,
            Self::Exponential {
                base,
                factor,
                max,
                jitter,
            } => {
                let mut millis = base.as_millis() as f64 * factor.powi(attempt as i32);
                millis = millis.min(max.as_millis() as f64);
                if *jitter {
                    // Cheap jitter source; statistical quality is irrelevant here.
                    let nanos = std::time::SystemTime::now()
                        .duration_since(std::time::UNIX_EPOCH)
                        .map_or(0, |d| d.subsec_nanos());
                    let unit = f64::from(nanos % 1000) / 1000.0;
                    millis *= 0.5 + unit;
                }
                Duration::from_millis(millis as u64)
            }
        }
    }
}

/// Configuration for the automatic retry mechanism.
///
/// Retries are bounded and explicit: a request is attempted at most
/// `max_retries + 1` times, and only for the failure kinds enabled below.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// A list of HTTP status codes that should trigger a retry.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts. Off by default so that a timeout
    /// surfaces promptly as [`YsError::Timeout`].
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            backoff: Backoff::Exponential {
                base: Duration::from_millis(100),
                factor: 2.0,
                max: Duration::from_secs(2),
                jitter: true,
            },
            retry_on_status: vec![429, 500, 502, 503, 504],
            retry_on_timeout: false,
            retry_on_connect: true,
        }
    }
}

impl RetryConfig {
    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self {
            enabled: false,
            max_retries: 0,
            ..Self::default()
        }
    }
}

impl super::YsClient {
    /// Send a request, retrying per the effective [`RetryConfig`].
    pub(crate) async fn send_with_retry(
        &self,
        req: reqwest::RequestBuilder,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, YsError> {
        let cfg = retry_override.unwrap_or(self.retry());
        let budget = if cfg.enabled { cfg.max_retries } else { 0 };

        let mut attempt: u32 = 0;
        loop {
            let this_try = req
                .try_clone()
                .ok_or_else(|| YsError::InvalidRequest("request body cannot be retried".into()))?;

            match this_try.send().await {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return Ok(resp);
                    }
                    let code = status.as_u16();
                    if attempt >= budget || !cfg.retry_on_status.contains(&code) {
                        return Err(YsError::Status {
                            status: code,
                            url: resp.url().to_string(),
                        });
                    }
                }
                Err(e) => {
                    let retryable = (e.is_timeout() && cfg.retry_on_timeout)
                        || (e.is_connect() && cfg.retry_on_connect);
                    if attempt >= budget || !retryable {
                        return Err(if e.is_timeout() {
                            YsError::Timeout(e.to_string())
                        } else {
                            YsError::Http(e)
                        });
                    }
                }
            }

            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}
