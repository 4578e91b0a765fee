//! # growthbook-api
//!
//! A GrowthBook REST API client library for Rust.
//!
//! This library provides typed access to the GrowthBook feature-management
//! API with retry, pagination and envelope decoding built in.
//!
//! ## Security
//!
//! - The API key is redacted in Debug output and request logs
//! - Tracing spans skip request bodies
//! - Response excerpts in errors are scrubbed of bearer tokens
//!
//! ## Crates
//!
//! - **growthbook-client** - Core HTTP client: auth, retry/backoff, status classification, pagination
//! - **growthbook-rest** - Projects, features, environments and SDK connections
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use growthbook_api::{ClientConfig, GrowthBookRestClient, Project};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .with_base_url("https://gb.example.com/api/v1")
//!         .with_api_key(std::env::var("GROWTHBOOK_API_KEY")?)
//!         .build()?;
//!
//!     let client = GrowthBookRestClient::with_config(config)?;
//!
//!     for project in client.list_projects().await? {
//!         println!("{}", project.name);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use growthbook_client as client;
#[cfg(feature = "rest")]
pub use growthbook_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use growthbook_client::{BackoffPolicy, CancellationToken, ClientConfig, GrowthBookClient};
#[cfg(feature = "rest")]
pub use growthbook_rest::{
    Environment, Feature, GrowthBookRestClient, Project, SdkConnection,
};
