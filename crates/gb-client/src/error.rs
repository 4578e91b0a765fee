//! Error types for growthbook-client.

/// Result type alias for growthbook-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for growthbook-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if the remote resource does not exist (HTTP 404).
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// Returns true if this error is transient and worth another attempt.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if the operation was aborted by its cancellation signal.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.kind, ErrorKind::Cancelled)
    }

    /// Returns the HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::NotFound(_) => Some(404),
            ErrorKind::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Resource not found (HTTP 404).
    #[error("resource not found: {0}")]
    NotFound(String),

    /// Non-retryable status outside the method's accepted set.
    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection error (refused, reset, DNS).
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other transport-level failure, including body read errors.
    #[error("transport error: {0}")]
    Transport(String),

    /// Retry budget spent while the server kept failing.
    #[error("all {attempts} attempts failed, last: {last}")]
    RetriesExhausted { attempts: u32, last: String },

    /// Malformed JSON or shape mismatch.
    #[error("JSON error: {0}")]
    Json(String),

    /// Response envelope lacks the expected key.
    #[error("response missing '{0}' key")]
    MissingKey(String),

    /// Request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP method with no entry in the status table.
    #[error("unsupported method {0}")]
    UnsupportedMethod(String),

    /// Cancellation signal fired or deadline passed.
    #[error("operation cancelled")]
    Cancelled,
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorKind::Timeout | ErrorKind::Connection(_) | ErrorKind::Transport(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if err.is_builder() {
            ErrorKind::Config(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
