//! # growthbook-rest
//!
//! Typed GrowthBook REST API resources.
//!
//! ## Features
//!
//! - **Projects** - Create, read, update, delete; find by name
//! - **Features** - Create, read, update, delete; find by id
//! - **Environments** - Create, update, delete; list and find by id
//! - **SDK Connections** - Create, read, update, delete; find by id or name
//!
//! List and find operations follow pagination transparently. Every request
//! goes through the retry engine of `growthbook-client`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use growthbook_rest::{Feature, GrowthBookRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), growthbook_rest::Error> {
//!     let client = GrowthBookRestClient::new("secret_abc123")?;
//!
//!     let feature = client
//!         .create_feature(&Feature {
//!             id: Some("dark-mode".into()),
//!             value_type: Some("boolean".into()),
//!             default_value: Some("false".into()),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     let env = client.find_environment_by_id("production").await?;
//!     client.delete_feature("dark-mode").await?;
//!
//!     Ok(())
//! }
//! ```

mod client;
mod environment;
mod error;
mod feature;
mod project;
mod sdk_connection;
mod serde_helpers;

pub use client::GrowthBookRestClient;
pub use environment::Environment;
pub use error::{Error, ErrorKind, Result};
pub use feature::{
    Feature, FeatureEnvironmentConfig, FeaturePrerequisite, FeatureRule,
    FeatureSavedGroupTargeting,
};
pub use project::{Project, ProjectSettings};
pub use sdk_connection::SdkConnection;
