use tracing::{debug, instrument};

use growthbook_client::security::encode_path_segment;
use growthbook_client::RequestMethod;

use crate::error::{Error, ErrorKind, Result};
use crate::project::Project;

const PROJECTS_PATH: &str = "/projects";

fn project_path(id: &str) -> String {
    format!("{PROJECTS_PATH}/{}", encode_path_segment(id))
}

impl super::GrowthBookRestClient {
    /// Create a project.
    #[instrument(skip(self, project), fields(name = %project.name))]
    pub async fn create_project(&self, project: &Project) -> Result<Project> {
        self.client
            .fetcher(RequestMethod::Post, PROJECTS_PATH)
            .body(project)?
            .one("project")
            .await
            .map_err(Into::into)
    }

    /// Fetch a project by id.
    #[instrument(skip(self))]
    pub async fn get_project(&self, id: &str) -> Result<Project> {
        self.client
            .fetcher(RequestMethod::Get, project_path(id))
            .one("project")
            .await
            .map_err(Into::into)
    }

    /// Replace a project's name, description and settings.
    #[instrument(skip(self, project))]
    pub async fn update_project(&self, id: &str, project: &Project) -> Result<Project> {
        self.client
            .fetcher(RequestMethod::Put, project_path(id))
            .body(project)?
            .one("project")
            .await
            .map_err(Into::into)
    }

    /// Delete a project by id.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.client.delete(&project_path(id)).await.map_err(Into::into)
    }

    /// List every project, following pagination.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        self.client
            .fetcher(RequestMethod::Get, PROJECTS_PATH)
            .all("projects")
            .await
            .map_err(Into::into)
    }

    /// First project whose name matches exactly.
    #[instrument(skip(self))]
    pub async fn find_project_by_name(&self, name: &str) -> Result<Project> {
        debug!(name, "Searching for project by name");
        self.list_projects()
            .await?
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("project named '{name}'"))))
    }
}
