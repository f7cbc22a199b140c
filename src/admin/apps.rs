// admin/apps.rs

use serde::Serialize;
use serde_json::Value;

use super::{StitchAdminClient, NO_BODY};
use crate::constants::*;
use crate::error::StitchError;
use crate::models::{ExecuteFunctionBody, ExecuteFunctionSourceBody, FunctionSource};
use crate::request::QueryParams;
use crate::response_ext::Payload;

use super::functions::{EventSubscriptions, Functions, PushNotifications};
use super::hosting::Hosting;
use super::services::Services;
use super::users::{ApiKeys, AuthProviders, Users};

type Result<T> = std::result::Result<T, StitchError>;

/// `/groups/{groupId}/apps`
#[derive(Debug, Clone)]
pub struct Apps<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Apps<'a> {
    pub(crate) fn new(api: &'a StitchAdminClient, group_id: &str) -> Self {
        Self { api, url: format!("/groups/{}/apps", group_id) }
    }

    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self, filter: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, filter, None).await
    }

    /// Create an app, optionally for a specific product (`?product=`)
    pub async fn create<T: Serialize + ?Sized>(&self, data: &T, product: Option<&str>) -> Result<Payload> {
        let query = product.map(|p| QueryParams::new().with(HTTP_QUERY_KEY_PRODUCT, p));
        self.api.post(&self.url, Some(data), query).await
    }

    pub fn app(&self, app_id: &str) -> App<'a> {
        App { api: self.api, url: format!("{}/{}", self.url, app_id) }
    }
}

/// `/groups/{groupId}/apps/{appId}`
#[derive(Debug, Clone)]
pub struct App<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> App<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    fn child(&self, segment: &str) -> String {
        format!("{}{}", self.url, segment)
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }

    /// Export the app as a zip archive; the payload is the raw response
    pub async fn export(&self) -> Result<Payload> {
        let headers = vec![(HTTP_HEADER_ACCEPT.to_string(), MEDIA_TYPE_ZIP.to_string())];
        self.api.get(&self.child("/export"), None, Some(headers)).await
    }

    pub async fn measurements(&self, filter: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.child("/measurements"), filter, None).await
    }

    pub fn commands(&self) -> Commands<'a> {
        Commands { api: self.api, url: self.child("/commands") }
    }

    pub fn values(&self) -> Values<'a> {
        Values { api: self.api, url: self.child("/values") }
    }

    pub fn secrets(&self) -> Secrets<'a> {
        Secrets { api: self.api, url: self.child("/secrets") }
    }

    pub fn hosting(&self) -> Hosting<'a> {
        Hosting::new(self.api, self.child("/hosting"))
    }

    pub fn deploy(&self) -> Deploy<'a> {
        Deploy { api: self.api, app_url: self.url.clone() }
    }

    pub fn services(&self) -> Services<'a> {
        Services::new(self.api, self.child("/services"))
    }

    pub fn push_notifications(&self) -> PushNotifications<'a> {
        PushNotifications::new(self.api, self.child("/push/notifications"))
    }

    pub fn users(&self) -> Users<'a> {
        Users::new(self.api, self.child("/users"))
    }

    pub fn user_registrations(&self) -> UserRegistrations<'a> {
        UserRegistrations { api: self.api, url: self.child("/user_registrations") }
    }

    pub fn debug(&self) -> DebugConsole<'a> {
        DebugConsole { api: self.api, url: self.child("/debug") }
    }

    pub fn auth_providers(&self) -> AuthProviders<'a> {
        AuthProviders::new(self.api, self.child("/auth_providers"))
    }

    pub fn security(&self) -> Security<'a> {
        Security { api: self.api, url: self.child("/security") }
    }

    pub fn logs(&self) -> Logs<'a> {
        Logs { api: self.api, url: self.child("/logs") }
    }

    pub fn api_keys(&self) -> ApiKeys<'a> {
        ApiKeys::new(self.api, self.child("/api_keys"))
    }

    pub fn functions(&self) -> Functions<'a> {
        Functions::new(self.api, self.child("/functions"))
    }

    pub fn event_subscriptions(&self) -> EventSubscriptions<'a> {
        EventSubscriptions::new(self.api, self.child("/event_subscriptions"))
    }
}

/// `.../commands`
#[derive(Debug, Clone)]
pub struct Commands<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Commands<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn run<T: Serialize + ?Sized>(&self, command: &str, data: &T) -> Result<Payload> {
        self.api.post(&format!("{}/{}", self.url, command), Some(data), None).await
    }
}

/// `.../values`
#[derive(Debug, Clone)]
pub struct Values<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Values<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn value(&self, value_id: &str) -> AppValue<'a> {
        AppValue { api: self.api, url: format!("{}/{}", self.url, value_id) }
    }
}

/// `.../values/{valueId}`
#[derive(Debug, Clone)]
pub struct AppValue<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl AppValue<'_> {
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
        self.api.put(&self.url, Some(data)).await
    }
}

/// `.../secrets`
#[derive(Debug, Clone)]
pub struct Secrets<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Secrets<'a> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }

    pub fn secret(&self, secret_id: &str) -> Secret<'a> {
        Secret { api: self.api, url: format!("{}/{}", self.url, secret_id) }
    }
}

/// `.../secrets/{secretId}`; secrets cannot be read back
#[derive(Debug, Clone)]
pub struct Secret<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Secret<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn remove(&self) -> Result<Payload> {
        self.api.delete(&self.url, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.put(&self.url, Some(data)).await
    }
}

/// Deployment history; deployments live directly under the app
#[derive(Debug, Clone)]
pub struct Deploy<'a> {
    api: &'a StitchAdminClient,
    app_url: String,
}

impl<'a> Deploy<'a> {
    pub fn deployments(&self) -> Deployments<'a> {
        Deployments { api: self.api, url: format!("{}/deployments", self.app_url) }
    }
}

/// `.../deployments`
#[derive(Debug, Clone)]
pub struct Deployments<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Deployments<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self, filter: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, filter, None).await
    }

    pub async fn get(&self, commit: &str) -> Result<Payload> {
        self.api.get(&format!("{}/{}", self.url, commit), None, None).await
    }
}

/// `.../user_registrations`
#[derive(Debug, Clone)]
pub struct UserRegistrations<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl UserRegistrations<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn send_confirmation_email(&self, email: &str) -> Result<Payload> {
        self.api.post(&format!("{}/by_email/{}/send_confirm", self.url, email), NO_BODY, None).await
    }
}

/// `.../debug`
#[derive(Debug, Clone)]
pub struct DebugConsole<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl DebugConsole<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    /// Run a function by name as the given user
    pub async fn execute_function(&self, user_id: &str, name: &str, args: &[Value]) -> Result<Payload> {
        let body = ExecuteFunctionBody { name, arguments: args };
        let query = QueryParams::new().with(HTTP_QUERY_KEY_USER_ID, user_id);
        self.api.post(&format!("{}/execute_function", self.url), Some(&body), Some(query)).await
    }

    /// Evaluate function source as the given user (or as system)
    pub async fn execute_function_source(&self, params: &FunctionSource) -> Result<Payload> {
        let body = ExecuteFunctionSourceBody { source: &params.source, eval_source: &params.eval_source };
        let mut query = QueryParams::new().with(HTTP_QUERY_KEY_USER_ID, params.user_id.as_str());
        if let Some(run_as_system) = params.run_as_system {
            query.insert(HTTP_QUERY_KEY_RUN_AS_SYSTEM, run_as_system);
        }
        self.api.post(&format!("{}/execute_function_source", self.url), Some(&body), Some(query)).await
    }
}

/// `.../security`
#[derive(Debug, Clone)]
pub struct Security<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl<'a> Security<'a> {
    pub fn allowed_request_origins(&self) -> AllowedRequestOrigins<'a> {
        AllowedRequestOrigins { api: self.api, url: format!("{}/allowed_request_origins", self.url) }
    }
}

/// `.../security/allowed_request_origins`
#[derive(Debug, Clone)]
pub struct AllowedRequestOrigins<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl AllowedRequestOrigins<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn get(&self) -> Result<Payload> {
        self.api.get(&self.url, None, None).await
    }

    pub async fn update<T: Serialize + ?Sized>(&self, data: &T) -> Result<Payload> {
        self.api.post(&self.url, Some(data), None).await
    }
}

/// `.../logs`
#[derive(Debug, Clone)]
pub struct Logs<'a> {
    api: &'a StitchAdminClient,
    url: String,
}

impl Logs<'_> {
    pub fn path(&self) -> &str {
        &self.url
    }

    pub async fn list(&self, filter: Option<QueryParams>) -> Result<Payload> {
        self.api.get(&self.url, filter, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_are_plain_concatenation() {
        let (admin, _) = recording_admin();
        let app = admin.apps("g1").app("a1");
        assert_eq!(admin.apps("g1").path(), "/groups/g1/apps");
        assert_eq!(app.path(), "/groups/g1/apps/a1");
        assert_eq!(app.values().value("v1").path(), "/groups/g1/apps/a1/values/v1");
        assert_eq!(app.secrets().secret("s1").path(), "/groups/g1/apps/a1/secrets/s1");
        assert_eq!(app.deploy().deployments().path(), "/groups/g1/apps/a1/deployments");
        assert_eq!(app.user_registrations().path(), "/groups/g1/apps/a1/user_registrations");
        assert_eq!(app.debug().path(), "/groups/g1/apps/a1/debug");
        assert_eq!(
            app.security().allowed_request_origins().path(),
            "/groups/g1/apps/a1/security/allowed_request_origins"
        );
        assert_eq!(app.logs().path(), "/groups/g1/apps/a1/logs");
        assert_eq!(app.commands().path(), "/groups/g1/apps/a1/commands");

        // same chain twice: equal paths, independent values
        let again = admin.apps("g1").app("a1");
        assert_eq!(again.path(), app.path());
    }

    #[tokio::test]
    async fn test_create_app_posts_json_with_optional_product() {
        let (admin, log) = recording_admin();

        admin.apps("g1").create(&json!({"name": "app1"}), None).await.unwrap();
        let (method, path, body) = last(&log);
        assert_eq!(method, "POST");
        assert_eq!(path, "/api/v3/groups/g1/apps");
        assert_eq!(json_body(&body), json!({"name": "app1"}));

        admin.apps("g1").create(&json!({"name": "app2"}), Some("atlas")).await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g1/apps?product=atlas");
    }

    #[tokio::test]
    async fn test_app_item_verbs() {
        let (admin, log) = recording_admin();
        let app = admin.apps("g").app("a");

        app.get().await.unwrap();
        assert_eq!(last(&log).0, "GET");
        app.remove().await.unwrap();
        assert_eq!(last(&log).0, "DELETE");

        app.export().await.unwrap();
        assert_eq!(log.lock().unwrap().last().unwrap().header("Accept"), Some("application/zip"));
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps/a/export");

        app.measurements(Some(QueryParams::new().with("granularity", "P31D"))).await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps/a/measurements?granularity=P31D");

        app.commands().run("sync", &json!({"x": 1})).await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps/a/commands/sync");
    }

    #[tokio::test]
    async fn test_values_and_secrets_use_put_for_update() {
        let (admin, log) = recording_admin();
        let app = admin.apps("g").app("a");

        app.values().value("v").update(&json!({"value": 1})).await.unwrap();
        assert_eq!(last(&log).0, "PUT");
        app.secrets().secret("s").update(&json!({"value": "x"})).await.unwrap();
        let (method, path, body) = last(&log);
        assert_eq!((method.as_str(), path.as_str()), ("PUT", "/api/v3/groups/g/apps/a/secrets/s"));
        assert_eq!(json_body(&body)["value"], "x");
    }

    #[tokio::test]
    async fn test_deployments_and_logs() {
        let (admin, log) = recording_admin();
        let app = admin.apps("g").app("a");

        app.deploy().deployments().get("c0ffee").await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps/a/deployments/c0ffee");

        app.logs().list(Some(QueryParams::new().with("type", vec!["auth", "function"]))).await.unwrap();
        assert_eq!(last(&log).1, "/api/v3/groups/g/apps/a/logs?type=auth&type=function");
    }

    #[tokio::test]
    async fn test_user_registrations_and_security() {
        let (admin, log) = recording_admin();
        let app = admin.apps("g").app("a");

        app.user_registrations().send_confirmation_email("bob@example.com").await.unwrap();
        let (method, path, _) = last(&log);
        assert_eq!(method, "POST");
        assert_eq!(path, "/api/v3/groups/g/apps/a/user_registrations/by_email/bob@example.com/send_confirm");

        app.security().allowed_request_origins().update(&json!(["https://a.example"])).await.unwrap();
        assert_eq!(last(&log).0, "POST");
    }

    #[tokio::test]
    async fn test_debug_execute_function() {
        let (admin, log) = recording_admin();
        let debug = admin.apps("g").app("a").debug();

        debug.execute_function("u1", "sum", &[json!(1), json!(2)]).await.unwrap();
        let (_, path, body) = last(&log);
        assert_eq!(path, "/api/v3/groups/g/apps/a/debug/execute_function?user_id=u1");
        assert_eq!(json_body(&body), json!({"name": "sum", "arguments": [1, 2]}));

        let params = FunctionSource {
            user_id: "u1".into(),
            source: "exports = () => 1".into(),
            eval_source: "exports()".into(),
            run_as_system: Some(true),
        };
        debug.execute_function_source(&params).await.unwrap();
        let (_, path, body) = last(&log);
        assert_eq!(path, "/api/v3/groups/g/apps/a/debug/execute_function_source?run_as_system=true&user_id=u1");
        assert_eq!(json_body(&body), json!({"source": "exports = () => 1", "eval_source": "exports()"}));
    }
}
