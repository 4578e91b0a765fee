use tracing::{debug, instrument};

use growthbook_client::security::encode_path_segment;
use growthbook_client::RequestMethod;

use crate::error::{Error, ErrorKind, Result};
use crate::sdk_connection::SdkConnection;

const SDK_CONNECTIONS_PATH: &str = "/sdk-connections";

fn sdk_connection_path(id: &str) -> String {
    format!("{SDK_CONNECTIONS_PATH}/{}", encode_path_segment(id))
}

impl super::GrowthBookRestClient {
    /// Create an SDK connection.
    #[instrument(skip(self, connection), fields(name = %connection.name))]
    pub async fn create_sdk_connection(&self, connection: &SdkConnection) -> Result<SdkConnection> {
        let created: SdkConnection = self
            .client
            .fetcher(RequestMethod::Post, SDK_CONNECTIONS_PATH)
            .body(connection)?
            .one("sdkConnection")
            .await?;
        Ok(created.normalized())
    }

    /// Fetch an SDK connection by id.
    #[instrument(skip(self))]
    pub async fn get_sdk_connection(&self, id: &str) -> Result<SdkConnection> {
        let connection: SdkConnection = self
            .client
            .fetcher(RequestMethod::Get, sdk_connection_path(id))
            .one("sdkConnection")
            .await?;
        Ok(connection.normalized())
    }

    /// Update an SDK connection by id.
    #[instrument(skip(self, connection))]
    pub async fn update_sdk_connection(
        &self,
        id: &str,
        connection: &SdkConnection,
    ) -> Result<SdkConnection> {
        let updated: SdkConnection = self
            .client
            .fetcher(RequestMethod::Put, sdk_connection_path(id))
            .body(connection)?
            .one("sdkConnection")
            .await?;
        Ok(updated.normalized())
    }

    /// Delete an SDK connection by id.
    #[instrument(skip(self))]
    pub async fn delete_sdk_connection(&self, id: &str) -> Result<()> {
        self.client
            .delete(&sdk_connection_path(id))
            .await
            .map_err(Into::into)
    }

    /// List every SDK connection, following pagination.
    #[instrument(skip(self))]
    pub async fn list_sdk_connections(&self) -> Result<Vec<SdkConnection>> {
        let connections: Vec<SdkConnection> = self
            .client
            .fetcher(RequestMethod::Get, SDK_CONNECTIONS_PATH)
            .all("connections")
            .await?;
        Ok(connections.into_iter().map(SdkConnection::normalized).collect())
    }

    /// Same as [`Self::get_sdk_connection`].
    pub async fn find_sdk_connection_by_id(&self, id: &str) -> Result<SdkConnection> {
        self.get_sdk_connection(id).await
    }

    /// First SDK connection whose name matches exactly.
    #[instrument(skip(self))]
    pub async fn find_sdk_connection_by_name(&self, name: &str) -> Result<SdkConnection> {
        debug!(name, "Searching for SDK connection by name");
        self.list_sdk_connections()
            .await?
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(|| {
                Error::new(ErrorKind::NotFound(format!("SDK connection named '{name}'")))
            })
    }
}
