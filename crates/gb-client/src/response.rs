//! Buffered HTTP response.
//!
//! The executor drains the network body into memory before returning, so a
//! `Response` can be logged, classified and decoded any number of times.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestMethod;
use crate::retry::parse_retry_after;
use crate::security::sanitize_error_message;

/// A fully buffered response plus the request context that produced it.
#[derive(Debug, Clone)]
pub struct Response {
    method: RequestMethod,
    url: String,
    status: u16,
    headers: HeaderMap,
    body: Bytes,
    attempts: u32,
}

impl Response {
    pub(crate) fn new(
        method: RequestMethod,
        url: impl Into<String>,
        status: u16,
        headers: HeaderMap,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            url: url.into(),
            status,
            headers,
            body,
            attempts: 1,
        }
    }

    pub(crate) fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Method of the request that produced this response.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Final request URL, including query parameters.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Requests sent to obtain this response, retries included.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for 429 Too Many Requests.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Returns true for any 5xx status.
    pub fn is_server_error(&self) -> bool {
        self.status >= 500
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration (seconds or HTTP date).
    pub fn retry_after(&self) -> Option<Duration> {
        parse_retry_after(self.header("retry-after")?, Utc::now())
    }

    /// Raw body bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, lossily decoded.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body as trimmed text, for logging.
    pub fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Sanitized, truncated body for error messages.
    pub fn excerpt(&self) -> String {
        sanitize_error_message(&self.text())
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::with_source(
                ErrorKind::Json(format!("{} {}: {}", self.method, self.url, e)),
                e,
            )
        })
    }

    /// Deserialize the body as a JSON object (envelope).
    pub fn json_object(&self) -> Result<serde_json::Map<String, serde_json::Value>> {
        match self.json::<serde_json::Value>()? {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(Error::new(ErrorKind::Json(format!(
                "expected JSON object from {} {}, got {}",
                self.method,
                self.url,
                json_type_name(&other)
            )))),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
