// admin/users.rs

use serde::Serialize;

use super::{StitchAdminClient, NO_BODY};
use crate::error::StitchError;
use crate::request::QueryParams;
use crate::response_ext::Payload;

type Result<T> = std::result::Result<T, StitchError>;

/// `.../users`
#[derive(Debug, Clone)]
pub struct Users<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Users<'a> {
    pub(crate) fn new(api: &'a StitchAdminClient, url: String) -> Self {
        Self { api, url }
    }

    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self, filter: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, filter, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn user(&self, user_id: &str) -> User<'a> {
        User { api: self.api, url: format!("{}/{}", self.url, user_id) }
    }
}

/// `.../users/{userId}`
#[derive(Debug, Clone)]
pub struct User<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> User<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }

    /// Revoke all sessions of the user
    pub async fn logout(&self) -> Result<Payload> {
        self.api.put(&format!("{}/logout", self.url), NO_BODY).await
    }

    pub async fn enable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/enable", self.url), NO_BODY).await
    }

    pub async fn disable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/disable", self.url), NO_BODY).await
    }

    pub fn devices(&self) -> Devices<'a> {
        Devices { api: self.api, url: format!("{}/devices", self.url) }
    }
}

/// `.../users/{userId}/devices`
#[derive(Debug, Clone)]
pub struct Devices<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Devices<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }
}

/// `.../auth_providers`
#[derive(Debug, Clone)]
pub struct AuthProviders<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> AuthProviders<'a> {
    pub(crate) fn new(api: &'a StitchAdminClient, url: String) -> Self {
        Self { api, url }
    }

    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn auth_provider(&self, provider_id: &str) -> AuthProvider<'a> {
        AuthProvider { api: self.api, url: format!("{}/{}", self.url, provider_id) }
    }
}

/// `.../auth_providers/{providerId}`
#[derive(Debug, Clone)]
pub struct AuthProvider<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl AuthProvider<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.patch(&self.url, Some(data), None).await
    }

    pub async fn enable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/enable", self.url), NO_BODY).await
    }

    pub async fn disable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/disable", self.url), NO_BODY).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }
}

/// `.../api_keys`
#[derive(Debug, Clone)]
pub struct ApiKeys<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> ApiKeys<'a> {
    pub(crate) fn new(api: &'a StitchAdminClient, url: String) -> Self {
        Self { api, url }
    }

    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn api_key(&self, key_id: &str) -> ApiKey<'a> {
        ApiKey { api: self.api, url: format!("{}/{}", self.url, key_id) }
    }
}

/// `.../api_keys/{keyId}`
#[derive(Debug, Clone)]
pub struct ApiKey<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl ApiKey<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }

    pub async fn enable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/enable", self.url), NO_BODY).await
    }

    pub async fn disable(&self) -> Result<Payload> {
        self.api.put(&format!("{}/disable", self.url), NO_BODY).await
    }
}
