//! GrowthBook REST API client.
//!
//! This client wraps `GrowthBookClient` from `growthbook-client` and provides
//! typed CRUD and lookup methods per resource kind.

use growthbook_client::{ClientConfig, GrowthBookClient};

use crate::error::Result;

mod environment;
mod feature;
mod project;
mod sdk_connection;

/// GrowthBook REST API client.
///
/// Provides typed methods for:
/// - Projects
/// - Features
/// - Environments
/// - SDK connections
///
/// # Example
///
/// ```rust,ignore
/// use growthbook_rest::{GrowthBookRestClient, Project};
///
/// let client = GrowthBookRestClient::new("secret_abc123")?;
///
/// let created = client.create_project(&Project::new("checkout")).await?;
/// let found = client.find_project_by_name("checkout").await?;
/// client.delete_project(found.id.as_deref().unwrap_or_default()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct GrowthBookRestClient {
    client: GrowthBookClient,
}

impl GrowthBookRestClient {
    /// Create a new REST client for the default cloud endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = GrowthBookClient::new(api_key)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom configuration.
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = GrowthBookClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing GrowthBookClient.
    pub fn from_client(client: GrowthBookClient) -> Self {
        Self { client }
    }

    /// Get the underlying GrowthBookClient.
    pub fn inner(&self) -> &GrowthBookClient {
        &self.client
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}
