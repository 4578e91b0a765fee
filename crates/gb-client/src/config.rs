//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::retry::BackoffPolicy;
use crate::security::redact_api_key;

/// Default GrowthBook cloud API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.growthbook.io/api/v1";

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Configuration for a GrowthBook client.
///
/// Immutable once built; every client clone reads the same values.
#[derive(Clone)]
pub struct ClientConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Secret API key sent as a bearer token.
    pub api_key: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Skip TLS certificate verification.
    pub insecure_skip_verify: bool,
    /// Items requested per page on list endpoints.
    pub page_limit: u32,
    /// Retry and backoff behavior.
    pub backoff: BackoffPolicy,
    /// User-Agent header value.
    pub user_agent: String,
    /// Whether to emit request/response tracing events.
    pub enable_tracing: bool,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redact_api_key(&self.api_key))
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("page_limit", &self.page_limit)
            .field("backoff", &self.backoff)
            .field("user_agent", &self.user_agent)
            .field("enable_tracing", &self.enable_tracing)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Check all invariants.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "missing GrowthBook API key".to_string(),
            )));
        }
        if self.page_limit == 0 {
            return Err(Error::new(ErrorKind::Config(
                "page limit must be positive".to_string(),
            )));
        }
        let parsed = url::Url::parse(&self.base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::InvalidUrl(format!(
                "base URL cannot carry paths: {}",
                self.base_url
            ))));
        }
        self.backoff.validate()
    }
}

/// Builder for ClientConfig.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            config: ClientConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: String::new(),
                timeout: Duration::from_secs(60),
                connect_timeout: Duration::from_secs(10),
                insecure_skip_verify: false,
                page_limit: DEFAULT_PAGE_LIMIT,
                backoff: BackoffPolicy::default(),
                user_agent: crate::USER_AGENT.to_string(),
                enable_tracing: true,
            },
        }
    }
}

impl ClientConfigBuilder {
    /// Set the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.api_key = api_key.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Disable TLS certificate verification (not for production).
    pub fn with_insecure_skip_verify(mut self, insecure: bool) -> Self {
        self.config.insecure_skip_verify = insecure;
        self
    }

    /// Set the page size for list endpoints.
    pub fn with_page_limit(mut self, limit: u32) -> Self {
        self.config.page_limit = limit;
        self
    }

    /// Set the backoff policy.
    pub fn with_backoff(mut self, backoff: BackoffPolicy) -> Self {
        self.config.backoff = backoff;
        self
    }

    /// Disable retries.
    pub fn without_retry(mut self) -> Self {
        self.config.backoff = BackoffPolicy::no_retry();
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Validate and build the client configuration.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
