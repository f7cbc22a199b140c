// models.rs
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::constants::*;

/// Authenticated credential state held by one client instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self { access_token: access_token.into(), refresh_token, user_id: None, device_id: None }
    }
}

/// Login material for `/auth/providers/{provider}/login`.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Exchange an admin API key for a session
    ApiKey(String),
    /// Username/password login
    UserPass { username: String, password: String },
    /// Any other provider, with a caller-built request body
    Custom { provider: String, body: Value },
}

impl Credentials {
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey(key.into())
    }

    pub fn user_pass(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::UserPass { username: username.into(), password: password.into() }
    }

    pub fn provider(&self) -> &str {
        match self {
            Self::ApiKey(_) => PROVIDER_API_KEY,
            Self::UserPass { .. } => PROVIDER_USERPASS,
            Self::Custom { provider, .. } => provider,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Self::ApiKey(key) => json!({ "key": key }),
            Self::UserPass { username, password } => json!({ "username": username, "password": password }),
            Self::Custom { body, .. } => body.clone(),
        }
    }
}

/// Parameters for evaluating function source in the debug console.
#[derive(Debug, Clone, Default)]
pub struct FunctionSource {
    pub user_id: String,
    pub source: String,
    pub eval_source: String,
    pub run_as_system: Option<bool>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExecuteFunctionBody<'a> {
    pub name: &'a str,
    pub arguments: &'a [Value],
}

#[derive(Debug, Serialize)]
pub(crate) struct ExecuteFunctionSourceBody<'a> {
    pub source: &'a str,
    pub eval_source: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_bodies() {
        let c = Credentials::api_key("k-123");
        assert_eq!(c.provider(), "api-key");
        assert_eq!(c.body(), json!({"key": "k-123"}));

        let c = Credentials::user_pass("alice", "secret");
        assert_eq!(c.provider(), "local-userpass");
        assert_eq!(c.body()["username"], "alice");

        let c = Credentials::Custom { provider: "custom-token".into(), body: json!({"token": "jwt"}) };
        assert_eq!(c.provider(), "custom-token");
        assert_eq!(c.body()["token"], "jwt");
    }

    #[test]
    fn test_session_serde_skips_missing_fields() {
        let session = Session::new("a", None);
        let text = serde_json::to_string(&session).unwrap();
        assert_eq!(text, r#"{"access_token":"a"}"#);
        let back: Session = serde_json::from_str(&text).unwrap();
        assert_eq!(back, session);
    }
}
