//! Status classification for GrowthBook API responses.
//!
//! Every HTTP method has a fixed set of accepted status codes. The table is
//! built once and shared by reference; callers never pass their own lists.

use crate::error::{Error, ErrorKind, Result};
use crate::request::RequestMethod;

const READ_STATUSES: &[u16] = &[200];
const CREATE_STATUSES: &[u16] = &[200, 201];
const UPDATE_STATUSES: &[u16] = &[200];
const DELETE_STATUSES: &[u16] = &[200, 204];

/// Result of classifying a final response status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Status is in the method's accepted set.
    Success,
    /// HTTP 404. Never retried.
    NotFound,
    /// 429 or 5xx that survived the retry engine.
    Retryable,
    /// Anything else; not retried.
    Fatal { status: u16, reason: String },
}

/// Method → accepted status codes.
#[derive(Debug, Clone, Copy)]
pub struct StatusTable {
    read: &'static [u16],
    create: &'static [u16],
    update: &'static [u16],
    delete: &'static [u16],
}

/// The table shared by every client.
pub static STANDARD_STATUSES: StatusTable = StatusTable::standard();

impl StatusTable {
    /// GET/PUT/PATCH accept 200, POST also 201, DELETE also 204.
    pub const fn standard() -> Self {
        Self {
            read: READ_STATUSES,
            create: CREATE_STATUSES,
            update: UPDATE_STATUSES,
            delete: DELETE_STATUSES,
        }
    }

    /// Accepted status codes for a method.
    pub fn accepted(&self, method: RequestMethod) -> Result<&'static [u16]> {
        match method {
            RequestMethod::Get => Ok(self.read),
            RequestMethod::Post => Ok(self.create),
            RequestMethod::Put | RequestMethod::Patch => Ok(self.update),
            RequestMethod::Delete => Ok(self.delete),
            other => Err(Error::new(ErrorKind::UnsupportedMethod(
                other.as_str().to_string(),
            ))),
        }
    }

    /// Classify a final status for the given method.
    pub fn classify(&self, method: RequestMethod, status: u16) -> Result<Outcome> {
        let accepted = self.accepted(method)?;

        if status == 404 {
            return Ok(Outcome::NotFound);
        }
        if accepted.contains(&status) {
            return Ok(Outcome::Success);
        }
        if status == 429 || status >= 500 {
            return Ok(Outcome::Retryable);
        }

        Ok(Outcome::Fatal {
            status,
            reason: reason_phrase(status).to_string(),
        })
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Canonical reason phrase for a status code.
pub fn reason_phrase(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown Status")
}
