// admin/services.rs

use serde::Serialize;

use super::StitchAdminClient;
use crate::error::StitchError;
use crate::request::QueryParams;
use crate::response_ext::Payload;

type Result<T> = std::result::Result<T, StitchError>;

/// `.../services`
#[derive(Debug, Clone)]
pub struct Services<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Services<'a> {
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

    pub fn service(&self, service_id: &str) -> Service<'a> {
        Service { api: self.api, url: format!("{}/{}", self.url, service_id) }
    }
}

/// `.../services/{serviceId}`
#[derive(Debug, Clone)]
pub struct Service<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Service<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.patch(&self.url, Some(data), None).await
    }

    /// Run a service command, e.g. `listBuckets` on an S3 service
    pub async fn run_command<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<Payload> {
        self.api.post(&format!("{}/commands/{}", self.url, name), Some(data), None).await
    }

    pub fn config(&self) -> ServiceConfig<'a> {
        ServiceConfig { api: self.api, url: format!("{}/config", self.url) }
    }

    pub fn rules(&self) -> Rules<'a> {
        Rules { api: self.api, url: format!("{}/rules", self.url) }
    }

    pub fn incoming_webhooks(&self) -> IncomingWebhooks<'a> {
        IncomingWebhooks { api: self.api, url: format!("{}/incoming_webhooks", self.url) }
    }
}

/// `.../services/{serviceId}/config`
#[derive(Debug, Clone)]
pub struct ServiceConfig<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl ServiceConfig<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self, params: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, params, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.patch(&self.url, Some(data), None).await
    }
}

/// `.../services/{serviceId}/rules`
#[derive(Debug, Clone)]
pub struct Rules<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Rules<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn rule(&self, rule_id: &str) -> Rule<'a> {
        Rule { api: self.api, url: format!("{}/{}", self.url, rule_id) }
    }
}

#[derive(Debug, Clone)]
pub struct Rule<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Rule<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.put(&self.url, Some(data)).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }
}

/// `.../services/{serviceId}/incoming_webhooks`
#[derive(Debug, Clone)]
pub struct IncomingWebhooks<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> IncomingWebhooks<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn incoming_webhook(&self, webhook_id: &str) -> IncomingWebhook<'a> {
        IncomingWebhook { api: self.api, url: format!("{}/{}", self.url, webhook_id) }
    }
}

#[derive(Debug, Clone)]
pub struct IncomingWebhook<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl IncomingWebhook<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.put(&self.url, Some(data)).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }
}
