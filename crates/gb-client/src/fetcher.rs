//! Typed fetchers for single resources and paginated collections.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::decode::{decode_result_key, has_more, next_offset};
use crate::error::Result;
use crate::growthbook_client::GrowthBookClient;
use crate::request::{RequestBuilder, RequestMethod};

/// One page of a collection endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in this page, in server order.
    pub items: Vec<T>,
    /// Whether the server reported more pages.
    pub has_more: bool,
    /// Offset to request next; only meaningful when `has_more`.
    pub next_offset: u64,
}

/// Request template bound to a method and a path, decoding into `T`.
///
/// Created with [`GrowthBookClient::fetcher`].
///
/// # Example
///
/// ```rust,ignore
/// let project: Project = client
///     .fetcher(RequestMethod::Post, "/projects")
///     .body(&new_project)?
///     .one("project")
///     .await?;
///
/// let all: Vec<Project> = client
///     .fetcher(RequestMethod::Get, "/projects")
///     .all("projects")
///     .await?;
/// ```
#[derive(Debug)]
pub struct Fetcher<'c, T> {
    client: &'c GrowthBookClient,
    method: RequestMethod,
    path: String,
    body: Option<serde_json::Value>,
    _marker: PhantomData<fn() -> T>,
}

impl<'c, T: DeserializeOwned> Fetcher<'c, T> {
    pub(crate) fn new(client: &'c GrowthBookClient, method: RequestMethod, path: impl Into<String>) -> Self {
        Self {
            client,
            method,
            path: path.into(),
            body: None,
            _marker: PhantomData,
        }
    }

    /// Attach a JSON body, sent with every request this fetcher makes.
    pub fn body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| {
            crate::Error::with_source(crate::ErrorKind::Serialization(e.to_string()), e)
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// HTTP method of this fetcher.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// Path relative to the base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn request(&self) -> RequestBuilder {
        let request = self.client.request(self.method, &self.path);
        match self.body {
            Some(ref body) => request.json_value(body.clone()),
            None => request,
        }
    }

    /// Fetch one resource and decode the value under `result_key`.
    pub async fn one(&self, result_key: &str) -> Result<T> {
        debug!(method = %self.method, path = %self.path, result_key, "Fetching resource");
        self.client.check_method(self.method)?;

        let response = self
            .client
            .execute(self.request())
            .await
            .inspect_err(|e| error!(method = %self.method, path = %self.path, error = %e, "Request failed"))?;

        self.client
            .ensure_status(&response)
            .inspect_err(|e| error!(method = %self.method, path = %self.path, error = %e, "Unexpected response status"))?;

        let envelope = response
            .json_object()
            .inspect_err(|e| error!(method = %self.method, path = %self.path, error = %e, "Failed to parse response"))?;

        decode_result_key(&envelope, result_key)
            .inspect_err(|e| error!(method = %self.method, path = %self.path, error = %e, "Failed to decode result"))
    }

    /// Fetch a single page starting at `offset`.
    pub async fn page(&self, offset: u64, result_key: &str) -> Result<Page<T>> {
        self.client.check_method(self.method)?;
        let mut request = self.request().query("limit", self.client.page_limit());
        if offset > 0 {
            request = request.query("offset", offset);
        }

        let response = self.client.execute(request).await?;
        self.client.ensure_status(&response)?;

        let envelope = response.json_object()?;
        let items: Vec<T> = decode_result_key(&envelope, result_key)?;

        Ok(Page {
            items,
            has_more: has_more(&envelope),
            next_offset: next_offset(&envelope),
        })
    }

    /// Fetch every page and concatenate the items in server order.
    pub async fn all(&self, result_key: &str) -> Result<Vec<T>> {
        debug!(method = %self.method, path = %self.path, result_key, "Fetching collection");

        let mut all_items = Vec::new();
        let mut offset = 0;

        loop {
            self.client.cancellation().check()?;

            let page = self
                .page(offset, result_key)
                .await
                .inspect_err(|e| error!(path = %self.path, offset, error = %e, "Failed to fetch page"))?;

            let fetched = page.items.len();
            all_items.extend(page.items);

            debug!(
                path = %self.path,
                fetched,
                total = all_items.len(),
                has_more = page.has_more,
                next_offset = page.next_offset,
                "Fetched page"
            );

            if !page.has_more {
                break;
            }
            offset = page.next_offset;
        }

        Ok(all_items)
    }
}
