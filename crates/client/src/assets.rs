//! Assets endpoint.

use metafold_core::asset::Asset;
use metafold_core::params::construct_params;
use serde::Deserialize;
use serde_json::json;

use crate::client::MetafoldClient;
use crate::error::{ClientError, ClientResult};
use crate::jobs::ListParams;
use crate::transport::{ApiRequest, Method, Transport};

/// Body of a download-link response.
#[derive(Debug, Deserialize)]
struct DownloadLink {
    link: Option<String>,
}

/// Assets endpoint, borrowed from a [`MetafoldClient`].
///
/// Supported sort fields are `id`, `filename`, `size`, `created` and
/// `modified`; searchable fields are `id` and `filename`.
pub struct Assets<'a, T> {
    client: &'a MetafoldClient<T>,
}

impl<'a, T: Transport> Assets<'a, T> {
    pub(crate) fn new(client: &'a MetafoldClient<T>) -> Self {
        Self { client }
    }

    fn path(&self) -> String {
        self.client.project_path("assets")
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path())
    }

    pub async fn list(&self, params: &ListParams) -> ClientResult<Vec<Asset>> {
        let response = self.client.get(&self.path(), params.to_query()).await?;
        response.json()
    }

    pub async fn get(&self, id: &str) -> ClientResult<Asset> {
        let response = self.client.get(&self.item_path(id), Default::default()).await?;
        response.json()
    }

    /// Retrieve a pre-signed download URL for an asset.
    ///
    /// The URL is only valid for one hour after it is generated.
    pub async fn download_url(&self, id: &str, filename: Option<&str>) -> ClientResult<String> {
        let query = construct_params([("download", json!(true)), ("filename", json!(filename))]);
        let response = self.client.get(&self.item_path(id), query).await?;
        let link: DownloadLink = response.json()?;
        link.link.ok_or(ClientError::MissingLink)
    }

    /// Download an asset's contents.
    ///
    /// Fetches the pre-signed link without the API bearer token.
    pub async fn download(&self, id: &str) -> ClientResult<Vec<u8>> {
        let url = self.download_url(id, None).await?;
        let response = self
            .client
            .execute(ApiRequest::get(url).unauthenticated())
            .await?;

        tracing::debug!(asset_id = id, bytes = response.body.len(), "Asset downloaded");
        Ok(response.body)
    }

    /// Upload a new asset.
    pub async fn create(&self, data: Vec<u8>, filename: Option<&str>) -> ClientResult<Asset> {
        let request = ApiRequest::post(self.path()).file(data, filename.map(str::to_string));
        let asset: Asset = self.client.execute(request).await?.json()?;

        tracing::info!(asset_id = %asset.id, filename = %asset.filename, "Asset created");
        Ok(asset)
    }

    /// Replace an asset's contents.
    pub async fn update(
        &self,
        id: &str,
        data: Vec<u8>,
        filename: Option<&str>,
    ) -> ClientResult<Asset> {
        let request =
            ApiRequest::new(Method::Patch, self.item_path(id)).file(data, filename.map(str::to_string));
        self.client.execute(request).await?.json()
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.client.delete(&self.item_path(id)).await?;
        Ok(())
    }
}
