//! High-level GrowthBook client.
//!
//! `GrowthBookClient` owns the configuration and the HTTP client, builds
//! URLs against the base URL, hands out typed [`Fetcher`]s and performs
//! deletes. Resource-specific crates build on top of it.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output
//! - Request bodies and keys are skipped in tracing spans

use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::cancel::Cancellation;
use crate::client::GbHttpClient;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::fetcher::Fetcher;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::security::redact_api_key;
use crate::status::{Outcome, StatusTable, STANDARD_STATUSES};

/// GrowthBook API client.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// # Example
///
/// ```rust,ignore
/// use growthbook_client::{ClientConfig, GrowthBookClient, RequestMethod};
///
/// let client = GrowthBookClient::new("secret_abc123")?;
/// let projects: Vec<Project> = client
///     .fetcher(RequestMethod::Get, "/projects")
///     .all("projects")
///     .await?;
/// client.delete("/projects/prj_123").await?;
/// ```
#[derive(Clone)]
pub struct GrowthBookClient {
    http: GbHttpClient,
    statuses: &'static StatusTable,
    cancel: Cancellation,
}

impl std::fmt::Debug for GrowthBookClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let config = self.http.config();
        f.debug_struct("GrowthBookClient")
            .field("base_url", &config.base_url)
            .field("api_key", &redact_api_key(&config.api_key))
            .field("page_limit", &config.page_limit)
            .finish_non_exhaustive()
    }
}

impl GrowthBookClient {
    /// Create a client for the default GrowthBook cloud endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::builder().with_api_key(api_key).build()?)
    }

    /// Create a client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: GbHttpClient::new(config)?,
            statuses: &STANDARD_STATUSES,
            cancel: Cancellation::none(),
        })
    }

    /// Abort in-flight requests, retry sleeps and pagination when `token`
    /// is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = self.cancel.with_token(token);
        self
    }

    /// Abort once `deadline` passes.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.cancel = self.cancel.with_deadline(deadline);
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        self.http.config()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.config().base_url
    }

    /// Items requested per page on list endpoints.
    pub fn page_limit(&self) -> u32 {
        self.config().page_limit
    }

    /// The cancellation signal attached to this client.
    pub fn cancellation(&self) -> &Cancellation {
        &self.cancel
    }

    /// Build a full URL from a path relative to the base URL.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url(), path)
        } else {
            format!("{}/{}", self.base_url(), path)
        }
    }

    /// Create a request builder for `path`.
    pub fn request(&self, method: RequestMethod, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, self.url(path))
    }

    /// Execute a request through the retry engine.
    ///
    /// The returned response may carry any status; use
    /// [`Self::ensure_status`] to classify it.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(&request, &self.cancel).await
    }

    /// Fail if `method` has no entry in the status table, before anything
    /// is sent.
    pub fn check_method(&self, method: RequestMethod) -> Result<()> {
        self.statuses.accepted(method).map(|_| ())
    }

    /// Map a final response status to success or a typed error.
    pub fn ensure_status(&self, response: &Response) -> Result<()> {
        match self.statuses.classify(response.method(), response.status())? {
            Outcome::Success => Ok(()),
            Outcome::NotFound => Err(Error::new(ErrorKind::NotFound(response.url().to_string()))),
            Outcome::Retryable => Err(Error::new(ErrorKind::RetriesExhausted {
                attempts: response.attempts(),
                last: with_excerpt(
                    format!("status {}", response.status()),
                    &response.excerpt(),
                ),
            })),
            Outcome::Fatal { status, reason } => Err(Error::new(ErrorKind::UnexpectedStatus {
                status,
                message: with_excerpt(reason, &response.excerpt()),
            })),
        }
    }

    /// Typed fetcher for `method` and `path`.
    pub fn fetcher<T: DeserializeOwned>(&self, method: RequestMethod, path: impl Into<String>) -> Fetcher<'_, T> {
        Fetcher::new(self, method, path)
    }

    /// Delete the resource at `path`. 200 and 204 count as success.
    #[instrument(skip(self))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.check_method(RequestMethod::Delete)?;
        let response = self
            .execute(self.request(RequestMethod::Delete, path))
            .await?;
        self.ensure_status(&response)?;
        debug!(path, status = response.status(), "Deleted resource");
        Ok(())
    }
}

fn with_excerpt(prefix: String, excerpt: &str) -> String {
    if excerpt.is_empty() {
        prefix
    } else {
        format!("{prefix}: {excerpt}")
    }
}
