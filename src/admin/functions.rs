// admin/functions.rs

use serde::Serialize;

use super::{StitchAdminClient, NO_BODY};
use crate::error::StitchError;
use crate::request::QueryParams;
use crate::response_ext::Payload;

type Result<T> = std::result::Result<T, StitchError>;

/// `.../functions`
#[derive(Debug, Clone)]
pub struct Functions<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Functions<'a> {
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

    pub fn function(&self, function_id: &str) -> Function<'a> {
        Function { api: self.api, url: format!("{}/{}", self.url, function_id) }
    }
}

/// `.../functions/{functionId}`
#[derive(Debug, Clone)]
pub struct Function<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Function<'_> {
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

/// `.../event_subscriptions` (triggers)
#[derive(Debug, Clone)]
pub struct EventSubscriptions<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> EventSubscriptions<'a> {
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

    pub fn event_subscription(&self, subscription_id: &str) -> EventSubscription<'a> {
        EventSubscription { api: self.api, url: format!("{}/{}", self.url, subscription_id) }
    }
}

#[derive(Debug, Clone)]
pub struct EventSubscription<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl EventSubscription<'_> {
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

    /// Restart a suspended subscription
    pub async fn resume<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.put(&format!("{}/resume", self.url), Some(data)).await
    }
}

/// `.../push/notifications`
#[derive(Debug, Clone)]
pub struct PushNotifications<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> PushNotifications<'a> {
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

    pub fn push_notification(&self, message_id: &str) -> PushNotification<'a> {
        PushNotification { api: self.api, url: format!("{}/{}", self.url, message_id) }
    }
}

#[derive(Debug, Clone)]
pub struct PushNotification<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl PushNotification<'_> {
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

    pub async fn send(&self) -> Result<Payload> {
        self.api.post(&format!("{}/send", self.url), NO_BODY, None).await
    }
}
