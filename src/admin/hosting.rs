// admin/hosting.rs

use bytes::Bytes;
use serde::Serialize;
use serde_json::json;

use super::StitchAdminClient;
use crate::constants::*;
use crate::error::StitchError;
use crate::request::QueryParams;
use crate::response_ext::Payload;

type Result<T> = std::result::Result<T, StitchError>;

/// `.../hosting`
#[derive(Debug, Clone)]
pub struct Hosting<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Hosting<'a> {
    pub(crate) fn new(api: &'a StitchAdminClient, url: String) -> Self {
        Self { api, url }
    }

    pub fn path(&self) -> &str {
        &self.url
    }

    pub fn config(&self) -> HostingConfig<'a> {
        HostingConfig { api: self.api, url: format!("{}/config", self.url) }
    }

    pub fn cache(&self) -> HostingCache<'a> {
        HostingCache { api: self.api, url: format!("{}/cache", self.url) }
    }

    pub fn assets(&self) -> Assets<'a> {
        Assets { api: self.api, url: format!("{}/assets", self.url) }
    }
}

/// `.../hosting/config`
#[derive(Debug, Clone)]
pub struct HostingConfig<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl HostingConfig<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn patch<T: Serialize + ?Sized>(&self, config: &T) -> Result<Payload> {
        self.api.patch(&self.url, Some(config), None).await
    }
}

/// `.../hosting/cache`
#[derive(Debug, Clone)]
pub struct HostingCache<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl HostingCache<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    /// Invalidate the CDN cache for `path`
    pub async fn invalidate(&self, path: &str) -> Result<Payload> {
        self.api.put(&self.url, Some(&json!({ "invalidate": true, "path": path }))).await
    }
}

/// `.../hosting/assets`
#[derive(Debug, Clone)]
pub struct Assets<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Assets<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    fn asset_url(&self) -> String {
        format!("{}/asset", self.url)
    }

    /// Directories are assets whose path ends with `/`
    pub async fn create_directory(&self, name: &str) -> Result<Payload> {
        self.api.put(&self.asset_url(), Some(&json!({ "path": format!("{}/", name) }))).await
    }

    pub async fn list(&self, params: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, params, None).await
    }

    /// Upload a file; `meta` is the asset description as a JSON string
    pub async fn upload(&self, meta: impl Into<String>, file: impl Into<Bytes>) -> Result<Payload> {
        self.api.put_multipart(&self.asset_url(), meta.into(), file.into()).await
    }

    /// Copy or move assets
    pub async fn post<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn asset(&self) -> Asset<'a> {
        Asset { api: self.api, url: self.asset_url() }
    }
}

/// `.../hosting/assets/asset`; the asset is selected by the `path` query
#[derive(Debug, Clone)]
pub struct Asset<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Asset<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    /// Replace the attributes of the asset at `path`
    pub async fn patch<T: Serialize + ?Sized>(&self, path: &str, attributes: &T) -> Result<Payload> {
        let query = QueryParams::new().with(HTTP_QUERY_KEY_PATH, path);
        self.api.patch(&self.url, Some(&json!({ "attributes": attributes })), Some(query)).await
    }

    pub async fn get(&self, params: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, params, None).await
    }

    pub async fn delete(&self, params: Option<QueryParams>) -> Result<Payload> {
        self.api.delete(&self.url, params).await
    }
}
