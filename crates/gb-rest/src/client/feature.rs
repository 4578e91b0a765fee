use tracing::{debug, instrument};

use growthbook_client::security::encode_path_segment;
use growthbook_client::RequestMethod;

use crate::error::{Error, ErrorKind, Result};
use crate::feature::Feature;

const FEATURES_PATH: &str = "/features";

fn feature_path(id: &str) -> String {
    format!("{FEATURES_PATH}/{}", encode_path_segment(id))
}

impl super::GrowthBookRestClient {
    /// Create a feature flag.
    #[instrument(skip(self, feature), fields(id = ?feature.id))]
    pub async fn create_feature(&self, feature: &Feature) -> Result<Feature> {
        self.client
            .fetcher(RequestMethod::Post, FEATURES_PATH)
            .body(feature)?
            .one("feature")
            .await
            .map_err(Into::into)
    }

    /// Fetch a feature by id.
    #[instrument(skip(self))]
    pub async fn get_feature(&self, id: &str) -> Result<Feature> {
        self.client
            .fetcher(RequestMethod::Get, feature_path(id))
            .one("feature")
            .await
            .map_err(Into::into)
    }

    /// Update a feature. GrowthBook takes feature updates as POST.
    #[instrument(skip(self, feature))]
    pub async fn update_feature(&self, id: &str, feature: &Feature) -> Result<Feature> {
        self.client
            .fetcher(RequestMethod::Post, feature_path(id))
            .body(feature)?
            .one("feature")
            .await
            .map_err(Into::into)
    }

    /// Delete a feature by id.
    #[instrument(skip(self))]
    pub async fn delete_feature(&self, id: &str) -> Result<()> {
        self.client.delete(&feature_path(id)).await.map_err(Into::into)
    }

    /// List every feature, following pagination.
    #[instrument(skip(self))]
    pub async fn list_features(&self) -> Result<Vec<Feature>> {
        self.client
            .fetcher(RequestMethod::Get, FEATURES_PATH)
            .all("features")
            .await
            .map_err(Into::into)
    }

    /// Locate a feature by scanning the paginated list.
    #[instrument(skip(self))]
    pub async fn find_feature_by_id(&self, id: &str) -> Result<Feature> {
        debug!(id, "Searching for feature by id");
        self.list_features()
            .await?
            .into_iter()
            .find(|f| f.id.as_deref() == Some(id))
            .ok_or_else(|| Error::new(ErrorKind::NotFound(format!("feature '{id}'"))))
    }
}
