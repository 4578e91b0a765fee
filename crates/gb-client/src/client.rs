//! Core HTTP client: request execution and the retry loop.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use tracing::{debug, error, instrument, warn};

use crate::cancel::Cancellation;
use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestBuilder;
use crate::response::Response;
use crate::retry::{RetryDecision, RetryState};
use crate::security::redact_api_key;

/// HTTP client for the GrowthBook API with bearer auth, body buffering and
/// retry handling.
#[derive(Debug, Clone)]
pub struct GbHttpClient {
    inner: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl GbHttpClient {
    /// Create a new HTTP client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            config: Arc::new(config),
        })
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute a request with automatic retry handling.
    ///
    /// Returns either the last response received (whatever its status) or
    /// the error that prevented getting one, never both.
    #[instrument(skip(self, request, cancel), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: &RequestBuilder, cancel: &Cancellation) -> Result<Response> {
        let mut state = RetryState::new(&self.config.backoff);

        loop {
            let result = cancel.run(self.execute_once(request)).await?;
            let attempts = state.attempts_made();

            let wait = match result {
                Ok(response) if response.is_rate_limited() => {
                    let retry_after = response.retry_after();
                    match state.on_rate_limited(retry_after) {
                        RetryDecision::Backoff(wait) => {
                            warn!(
                                attempt = attempts,
                                retry_after = response.header("retry-after").unwrap_or_default(),
                                wait_ms = wait.as_millis() as u64,
                                "Received 429 Too Many Requests, backing off"
                            );
                            wait
                        }
                        RetryDecision::Exhausted => return Ok(response.with_attempts(attempts)),
                    }
                }
                Ok(response) if response.is_server_error() => match state.on_server_failure() {
                    RetryDecision::Backoff(wait) => {
                        warn!(
                            attempt = state.attempt(),
                            interval_ms = wait.as_millis() as u64,
                            status = response.status(),
                            "Transient error, retrying request"
                        );
                        wait
                    }
                    RetryDecision::Exhausted => return Ok(response.with_attempts(attempts)),
                },
                Ok(response) => return Ok(response.with_attempts(attempts)),
                Err(err) if err.is_retryable() => match state.on_server_failure() {
                    RetryDecision::Backoff(wait) => {
                        warn!(
                            attempt = state.attempt(),
                            interval_ms = wait.as_millis() as u64,
                            error = %err,
                            "Transient error, retrying request"
                        );
                        wait
                    }
                    RetryDecision::Exhausted if attempts > 1 => {
                        let last = err.to_string();
                        return Err(Error::with_source(
                            ErrorKind::RetriesExhausted { attempts, last },
                            err,
                        ));
                    }
                    RetryDecision::Exhausted => return Err(err),
                },
                Err(err) => return Err(err),
            };

            cancel.sleep(wait).await?;
        }
    }

    /// Execute a single request without retry logic.
    ///
    /// The body is fully buffered before returning; a failure while reading
    /// it counts as a transport error.
    pub async fn execute_once(&self, request: &RequestBuilder) -> Result<Response> {
        let url = request.resolved_url()?;
        let method = request.method;

        let mut req = self
            .inner
            .request(method.to_reqwest(), url.clone())
            .bearer_auth(&self.config.api_key);

        let mut body_log = String::new();
        if let Some(ref body) = request.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| Error::with_source(ErrorKind::Serialization(e.to_string()), e))?;
            if self.config.enable_tracing {
                body_log = String::from_utf8_lossy(&bytes).into_owned();
            }
            req = req.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        if self.config.enable_tracing {
            debug!(
                method = %method,
                url = %url,
                authorization = %format!("Bearer {}", redact_api_key(&self.config.api_key)),
                body = %body_log,
                "HTTP request"
            );
        }

        let response = match req.send().await {
            Ok(response) => response,
            Err(err) => {
                if self.config.enable_tracing {
                    error!(method = %method, url = %url, error = %err, "HTTP transport error");
                }
                return Err(err.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                if self.config.enable_tracing {
                    error!(method = %method, url = %url, status, error = %err, "HTTP transport error");
                }
                return Err(err.into());
            }
        };

        let response = Response::new(method, url.as_str(), status, headers, body);

        if self.config.enable_tracing {
            debug!(
                method = %method,
                url = %url,
                status,
                body = %response.trimmed_text(),
                "HTTP response"
            );
        }

        Ok(response)
    }
}
