use tracing::{debug, instrument};

use growthbook_client::security::encode_path_segment;
use growthbook_client::RequestMethod;

use crate::environment::Environment;
use crate::error::{Error, ErrorKind, Result};

const ENVIRONMENTS_PATH: &str = "/environments";

fn environment_path(id: &str) -> String {
    format!("{ENVIRONMENTS_PATH}/{}", encode_path_segment(id))
}

impl super::GrowthBookRestClient {
    /// Create an environment.
    #[instrument(skip(self, environment), fields(id = %environment.id))]
    pub async fn create_environment(&self, environment: &Environment) -> Result<Environment> {
        self.client
            .fetcher(RequestMethod::Post, ENVIRONMENTS_PATH)
            .body(environment)?
            .one("environment")
            .await
            .map_err(Into::into)
    }

    /// Update an environment by id.
    #[instrument(skip(self, environment))]
    pub async fn update_environment(&self, id: &str, environment: &Environment) -> Result<Environment> {
        self.client
            .fetcher(RequestMethod::Put, environment_path(id))
            .body(environment)?
            .one("environment")
            .await
            .map_err(Into::into)
    }

    /// Delete an environment by id.
    #[instrument(skip(self))]
    pub async fn delete_environment(&self, id: &str) -> Result<()> {
        self.client.delete(&environment_path(id)).await.map_err(Into::into)
    }

    /// List all environments. The endpoint is not paginated.
    #[instrument(skip(self))]
    pub async fn list_environments(&self) -> Result<Vec<Environment>> {
        self.client
            .fetcher(RequestMethod::Get, ENVIRONMENTS_PATH)
            .one("environments")
            .await
            .map_err(Into::into)
    }

    /// Locate an environment by id. There is no single-environment GET.
    #[instrument(skip(self))]
    pub async fn find_environment_by_id(&self, id: &str) -> Result<Environment> {
        debug!(id, "Searching for environment by id");
        self.list_environments()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("environment '{id}'"))))
    }
}
