//! Public client surface + builder.
//! Retry policy lives in `retry`; UA and endpoint defaults in `constants`.

mod constants;
mod retry;

use std::time::Duration;

use constants::{DEFAULT_BASE_CHART, DEFAULT_BASE_SUMMARY, DEFAULT_TIMEOUT_SECS, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::core::YsError;

pub use retry::{Backoff, RetryConfig};

pub(crate) use constants::MAINTENANCE_MARKER;

/// Shared HTTP context for all readers.
///
/// Cloning is cheap: the inner [`reqwest::Client`] is reference-counted, so a
/// clone reuses the same connection pool. Workers in a multi-symbol fetch all
/// share one client.
#[derive(Debug, Clone)]
pub struct YsClient {
    http: Client,
    base_summary: Url,
    base_chart: Url,
    retry: RetryConfig,
    concurrency: usize,
}

impl Default for YsClient {
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl YsClient {
    /// Create a new builder.
    pub fn builder() -> YsClientBuilder {
        YsClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
    pub(crate) fn base_summary(&self) -> &Url {
        &self.base_summary
    }
    pub(crate) fn base_chart(&self) -> &Url {
        &self.base_chart
    }
    pub(crate) fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// The worker limit used for multi-symbol fetches.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct YsClientBuilder {
    user_agent: Option<String>,
    base_summary: Option<Url>,
    base_chart: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
    concurrency: Option<usize>,
}

impl YsClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the quoteSummary API base (e.g., `https://query1.finance.yahoo.com/v10/finance/quoteSummary/`).
    #[must_use]
    pub fn base_summary(mut self, url: Url) -> Self {
        self.base_summary = Some(url);
        self
    }

    /// Override the chart API base (e.g., `https://query1.finance.yahoo.com/v8/finance/chart/`).
    #[must_use]
    pub fn base_chart(mut self, url: Url) -> Self {
        self.base_chart = Some(url);
        self
    }

    /// Set the per-request timeout. Default: 30 seconds.
    ///
    /// Expiry surfaces as [`YsError::Timeout`] and bounds only the call it
    /// interrupted; sibling symbols in a batch are unaffected.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Set the default retry policy for all requests.
    #[must_use]
    pub fn retry_policy(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set the worker limit for multi-symbol fetches.
    /// Default: the host's available parallelism.
    #[must_use]
    pub const fn concurrency(mut self, workers: usize) -> Self {
        self.concurrency = Some(workers);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a base URL is invalid or the underlying HTTP
    /// client cannot be constructed.
    pub fn build(self) -> Result<YsClient, YsError> {
        let base_summary = self
            .base_summary
            .map_or_else(|| Url::parse(DEFAULT_BASE_SUMMARY), Ok)?;
        let base_chart = self
            .base_chart
            .map_or_else(|| Url::parse(DEFAULT_BASE_CHART), Ok)?;

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .cookie_store(true)
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            );

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        let concurrency = self.concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        });

        Ok(YsClient {
            http,
            base_summary,
            base_chart,
            retry: self.retry.unwrap_or_default(),
            concurrency: concurrency.max(1),
        })
    }
}
