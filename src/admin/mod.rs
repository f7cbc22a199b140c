// admin/mod.rs
//! Admin API facade.
//!
//! Examples of how to reach the admin API with this client:
//!
//! ```no_run
//! # async fn demo(admin: &stitch_admin::StitchAdminClient) -> Result<(), stitch_admin::StitchError> {
//! // List all apps of a group
//! admin.apps("580e6d055b199c221fcb821c").list(None).await?;
//!
//! // Fetch the app with id 'planner'
//! admin.apps("580e6d055b199c221fcb821c").app("planner").get().await?;
//!
//! // List services of the app 'planner'
//! admin.apps("580e6d055b199c221fcb821c").app("planner").services().list().await?;
//!
//! // Delete a rule by id
//! admin
//!     .apps("580e6d055b199c221fcb821c")
//!     .app("planner")
//!     .services()
//!     .service("mdb1")
//!     .rules()
//!     .rule("580e6d055b199c221fcb821d")
//!     .remove()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod apps;
mod functions;
mod hosting;
mod services;
mod users;

pub use apps::*;
pub use functions::*;
pub use hosting::*;
pub use services::*;
pub use users::*;

use bytes::Bytes;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::client::StitchClient;
use crate::client_builder::AdminClientBuilder;
use crate::constants::*;
use crate::error::StitchError;
use crate::models::{Credentials, Session};
use crate::request::{Body, QueryParams, RequestDescriptor};
use crate::response_ext::{Payload, ResponseExt};

type Result<T> = std::result::Result<T, StitchError>;

/// Entry point for admin clients.
pub struct StitchAdminClientFactory;

impl StitchAdminClientFactory {
    /// Create an admin client for `base_url` with the admin credential codec.
    pub fn create(base_url: impl Into<String>) -> Result<Arc<StitchAdminClient>> {
        AdminClientBuilder::new().url(base_url).build()
    }
}

/// Admin API client. Obtain one from [`StitchAdminClientFactory::create`] or
/// [`AdminClientBuilder`].
#[derive(Debug)]
pub struct StitchAdminClient {
    core: StitchClient,
}

impl StitchAdminClient {
    pub(crate) fn from_core(core: StitchClient) -> Self {
        Self { core }
    }

    /// The authenticated core this facade runs on
    pub fn core(&self) -> &StitchClient {
        &self.core
    }

    pub fn session(&self) -> Option<Session> {
        self.core.session()
    }

    pub fn is_authenticated(&self) -> bool {
        self.core.is_authenticated()
    }

    //
    // Authentication Management
    //

    /// Log in (for admins usually with an API key); returns the user id.
    pub async fn authenticate(&self, credentials: Credentials) -> Result<String> {
        self.core.authenticate(&credentials).await
    }

    /// Ends the session for the current user. Local state is always cleared.
    pub async fn logout(&self) -> Result<()> {
        self.core.logout().await
    }

    /// Profile information for the currently logged in user
    pub async fn user_profile(&self) -> Result<Payload> {
        self.get(PATH_AUTH_PROFILE, None, None).await
    }

    /// Auth providers available to admins. Does not require a session.
    pub async fn get_auth_providers(&self) -> Result<Value> {
        let request = RequestDescriptor::get(PATH_AUTH_PROVIDERS).api_version(self.core.auth_api_version()).no_auth();
        let resp = self.core.execute(&request).await?;
        resp.json()
    }

    /// Exchange the refresh token for a new access token and return the raw answer
    pub async fn do_session_post(&self) -> Result<Value> {
        let request = RequestDescriptor::post(PATH_AUTH_SESSION)
            .api_version(self.core.auth_api_version())
            .refresh_on_failure(false)
            .use_refresh_token();
        let resp = self.core.execute(&request).await?;
        resp.json()
    }

    /// Resource tree rooted at the apps of a group
    pub fn apps(&self, group_id: &str) -> Apps<'_> {
        Apps::new(self, group_id)
    }

    //
    // v3 helpers: execute and decode (JSON when the content type says so, raw otherwise)
    //

    async fn call(&self, request: RequestDescriptor) -> Result<Payload> {
        let resp = self.core.execute(&request.api_version(DEFAULT_API_VERSION)).await?;
        Payload::from_response(resp)
    }

    pub async fn get(
        &self,
        path: &str,
        query: Option<QueryParams>,
        headers: Option<Vec<(String, String)>>,
    ) -> Result<Payload> {
        let request = RequestDescriptor::get(path).query(query.unwrap_or_default()).headers(headers.unwrap_or_default());
        self.call(request).await
    }

    pub async fn post<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
        query: Option<QueryParams>,
    ) -> Result<Payload> {
        let mut request = RequestDescriptor::post(path).query(query.unwrap_or_default());
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.call(request).await
    }

    pub async fn put<T: Serialize + ?Sized>(&self, path: &str, body: Option<&T>) -> Result<Payload> {
        let mut request = RequestDescriptor::put(path);
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.call(request).await
    }

    pub async fn patch<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&T>,
        query: Option<QueryParams>,
    ) -> Result<Payload> {
        let mut request = RequestDescriptor::patch(path).query(query.unwrap_or_default());
        if let Some(body) = body {
            request = request.json(body)?;
        }
        self.call(request).await
    }

    pub async fn delete(&self, path: &str, query: Option<QueryParams>) -> Result<Payload> {
        let request = RequestDescriptor::delete(path).query(query.unwrap_or_default());
        self.call(request).await
    }

    /// Multipart PUT with a `meta` JSON string and a binary `file`
    pub async fn put_multipart(&self, path: &str, meta: String, file: Bytes) -> Result<Payload> {
        let request = RequestDescriptor::put(path).body(Body::Multipart { meta, file, file_name: None });
        self.call(request).await
    }
}

/// No body; used where an operation sends an empty request.
pub(crate) const NO_BODY: Option<&Value> = None;


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    #[test]
    fn test_factory_requires_valid_url() {
        assert!(matches!(StitchAdminClientFactory::create(""), Err(StitchError::ConfigurationError(_))));
        assert!(StitchAdminClientFactory::create("https://x").is_ok());
    }

    #[tokio::test]
    async fn test_user_profile_and_session_post() {
        let (admin, log) = recording_admin();

        admin.user_profile().await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/auth/profile");

        admin.do_session_post().await.unwrap();
        let (method, path, _) = last(&log);
        assert_eq!((method.as_str(), path.as_str()), ("POST", "/api/v3/auth/session"));
        assert_eq!(log.lock().unwrap().last().unwrap().header("Authorization"), Some("Bearer refresh"));
    }

    #[tokio::test]
    async fn test_auth_providers_are_fetched_without_credentials() {
        let (admin, log) = recording_admin();
        admin.get_auth_providers().await.unwrap();
        let sent = log.lock().unwrap();
        assert_eq!(sent[0].url.path(), "/api/v3/auth/providers");
        assert!(sent[0].header("Authorization").is_none());
    }

    #[tokio::test]
    async fn test_auth_endpoints_follow_auth_api_version() {
        let log = Arc::new(std::sync::Mutex::new(Vec::new()));
        let core = crate::client_builder::ClientBuilder::new()
            .url("https://x")
            .codec(crate::codec::ADMIN_CLIENT_CODEC)
            .api_version(4)
            .requester(Box::new(Recorder { log: log.clone() }))
            .build_client()
            .unwrap();
        core.set_session(Some(Session::new("token", Some("refresh".into()))));
        let admin = StitchAdminClient::from_core(core);

        admin.get_auth_providers().await.unwrap();
        assert_eq!(last(&log).1, "/api/v4/auth/providers");
        admin.do_session_post().await.unwrap();
        assert_eq!(last(&log).1, "/api/v4/auth/session");

        // resource calls stay on v3
        admin.apps("g").list(None).await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps");
    }

    #[tokio::test]
    async fn test_post_without_body_sends_nothing() {
        let (admin, log) = recording_admin();
        admin.post("/groups/g/apps/a/push/notifications/m/send", NO_BODY, None).await.unwrap();
        assert_eq!(last(&log).2, Body::Empty);
    }
}
