//! # growthbook-client
//!
//! Core HTTP client infrastructure for the GrowthBook REST API.
//!
//! This crate provides:
//! - Bearer authentication with redacted request logging
//! - Bounded exponential backoff for transport errors and 5xx responses
//! - `Retry-After` handling for 429 responses
//! - A fixed per-method status table
//! - Envelope decoding (`{"project": {...}}`) into typed values
//! - Offset/limit pagination over `hasMore`/`nextOffset`
//! - Cancellation by token or deadline
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (growthbook-rest resource clients)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   GrowthBookClient                          │
//! │  - URL building, typed fetchers, deletes                    │
//! │  - Status classification and envelope decoding              │
//! │  - Pagination                                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     GbHttpClient                            │
//! │  - Raw HTTP with auth, retry and body buffering             │
//! │  - Cancellation-aware sleeps                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use growthbook_client::{ClientConfig, GrowthBookClient, RequestMethod};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), growthbook_client::Error> {
//!     let config = ClientConfig::builder()
//!         .with_api_key(std::env::var("GROWTHBOOK_API_KEY").unwrap_or_default())
//!         .build()?;
//!     let client = GrowthBookClient::with_config(config)?;
//!
//!     let projects: Vec<serde_json::Value> = client
//!         .fetcher(RequestMethod::Get, "/projects")
//!         .all("projects")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod cancel;
mod client;
mod config;
mod decode;
mod error;
mod fetcher;
mod growthbook_client;
mod request;
mod response;
mod retry;
pub mod security;
mod status;

pub use cancel::Cancellation;
pub use client::GbHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_PAGE_LIMIT};
pub use decode::{decode_result_key, has_more, next_offset, HAS_MORE_KEY, NEXT_OFFSET_KEY};
pub use error::{Error, ErrorKind, Result};
pub use fetcher::{Fetcher, Page};
pub use growthbook_client::GrowthBookClient;
pub use request::{RequestBuilder, RequestMethod};
pub use response::Response;
pub use retry::{parse_retry_after, BackoffPolicy, RetryDecision, RetryState};
pub use status::{reason_phrase, Outcome, StatusTable, STANDARD_STATUSES};

pub use tokio_util::sync::CancellationToken;

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("growthbook-api/", env!("CARGO_PKG_VERSION"));
