//! Error types for growthbook-rest.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    pub kind: ErrorKind,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Returns true if the requested resource does not exist, whether the
    /// server answered 404 or a lookup found no match.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::NotFound(_))
    }

    /// The underlying client error, if this error came from the HTTP layer.
    pub fn client_error(&self) -> Option<&growthbook_client::Error> {
        self.source.as_ref()?.downcast_ref()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("Client error: {0}")]
    Client(String),
}

impl From<growthbook_client::Error> for Error {
    fn from(err: growthbook_client::Error) -> Self {
        let kind = match err.kind {
            growthbook_client::ErrorKind::NotFound(ref url) => ErrorKind::NotFound(url.clone()),
            _ => ErrorKind::Client(err.to_string()),
        };
        Error {
            kind,
            source: Some(Box::new(err)),
        }
    }
}
