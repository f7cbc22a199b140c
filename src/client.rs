// client.rs
//! Authenticated request core: credential attachment, response classification
//! and the single refresh-and-retry on authentication failure.

use bytes::Bytes;
use log::{debug, error, warn};
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::{Arc, Mutex, PoisonError};
use url::Url;

use crate::codec::{CredentialCodec, TokenKind};
use crate::constants::*;
use crate::error::StitchError;
use crate::models::{Credentials, Session};
use crate::persistent_session::PersistentSession;
use crate::request::{Body, RequestDescriptor};
use crate::requester::{Requester, TransportRequest};
use crate::response_ext::{http_error, ResponseExt};

type Result<T> = std::result::Result<T, StitchError>;

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Authenticated client shared by the admin facade. Built through
/// [`ClientBuilder`](crate::ClientBuilder) only.
pub struct StitchClient {
    requester: Box<dyn Requester>,
    base_url: String,
    codec: Arc<dyn CredentialCodec>,
    auth_api_version: u32,
    session: Mutex<Option<Session>>,
    refresh_lock: tokio::sync::Mutex<()>,
    store: Option<PersistentSession>,
}

impl std::fmt::Debug for StitchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StitchClient")
            .field("base_url", &self.base_url)
            .field("codec", &self.codec)
            .field("authenticated", &self.is_authenticated())
            .field("requester", &"<dyn Requester>")
            .finish()
    }
}

impl StitchClient {
    pub(crate) fn new(
        requester: Box<dyn Requester>,
        base_url: String,
        codec: Arc<dyn CredentialCodec>,
        auth_api_version: u32,
        store: Option<PersistentSession>,
        session: Option<Session>,
    ) -> Self {
        Self {
            requester,
            base_url: base_url.trim_end_matches('/').to_string(),
            codec,
            auth_api_version,
            session: Mutex::new(session),
            refresh_lock: tokio::sync::Mutex::new(()),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version of the auth endpoints (login, session, providers)
    pub fn auth_api_version(&self) -> u32 {
        self.auth_api_version
    }

    //
    // Session state
    //

    /// Snapshot of the current session
    pub fn session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|s| s.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    pub fn user_id(&self) -> Option<String> {
        self.session().and_then(|s| s.user_id)
    }

    /// Replace the session wholesale (and persist it when a session file is configured)
    pub fn set_session(&self, session: Option<Session>) {
        self.swap_session(None, session);
    }

    pub fn clear_session(&self) {
        self.set_session(None);
    }

    /// Install `next` if the current session still equals `expected` (always
    /// when `expected` is `None`). The file is written under the session lock
    /// so memory and file change in the same order.
    fn swap_session(&self, expected: Option<&Session>, next: Option<Session>) -> bool {
        let mut current = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(expected) = expected {
            if current.as_ref() != Some(expected) {
                return false;
            }
        }
        self.persist(next.as_ref());
        *current = next;
        true
    }

    fn persist(&self, session: Option<&Session>) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(session) {
                error!("Failed to save session to {}: {}", store.path().display(), e);
            }
        }
    }

    //
    // Request execution
    //

    fn resolve_url(&self, request: &RequestDescriptor) -> Result<Url> {
        let mut url =
            Url::parse(&format!("{}{}{}{}", self.base_url, API_PATH_PREFIX, request.version(), request.path()))?;
        let pairs = request.query_params().pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// Builds the transport request; returns it with the access token current
    /// at send time so a failed call can tell whether someone else refreshed.
    fn prepare(&self, request: &RequestDescriptor) -> Result<(TransportRequest, Option<String>)> {
        let url = self.resolve_url(request)?;
        let flags = request.flags();
        let session = self.session();
        let sent_access = session.as_ref().map(|s| s.access_token.clone());

        let mut headers: Vec<(String, String)> = Vec::new();
        if !flags.no_auth {
            let kind = if flags.use_refresh_token { TokenKind::Refresh } else { TokenKind::Access };
            if let Some(header) = session.as_ref().and_then(|s| self.codec.authorization(s, kind)) {
                headers.push(header);
            }
        }

        let body = request.body_ref().clone();
        if matches!(body, Body::Json(_) | Body::Text(_)) && !request.has_header(HTTP_HEADER_CONTENT_TYPE) {
            headers.push((HTTP_HEADER_CONTENT_TYPE.to_string(), MEDIA_TYPE_JSON.to_string()));
        }
        headers.extend(request.header_list().iter().cloned());

        Ok((TransportRequest { method: request.method().clone(), url, headers, body }, sent_access))
    }

    async fn send_once(&self, request: &RequestDescriptor) -> Result<(http::Response<Bytes>, Option<String>)> {
        let (transport_request, sent_access) = self.prepare(request)?;
        let resp = self.requester.send(transport_request).await?;
        debug!("{} {} -> {}", request.method(), request.path(), resp.status());
        Ok((resp, sent_access))
    }

    /// Execute a request, refreshing the session and retrying once on 401/403
    /// when the request allows it. Non-2xx responses become errors.
    pub async fn execute(&self, request: &RequestDescriptor) -> Result<http::Response<Bytes>> {
        let (resp, sent_access) = self.send_once(request).await?;
        if resp.status().is_success() {
            return Ok(resp);
        }

        let flags = request.flags();
        if !is_auth_failure(resp.status()) || !flags.refresh_on_failure || flags.no_auth {
            let err = http_error(resp);
            error!("{} {} failed: {}", request.method(), request.path(), err);
            return Err(err);
        }

        debug!("{} {} returned {}, refreshing session", request.method(), request.path(), resp.status());
        self.refresh_session(sent_access.as_deref()).await?;

        let (resp, _) = self.send_once(request).await?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        if is_auth_failure(resp.status()) {
            let text = resp.text().unwrap_or_default();
            return Err(StitchError::AuthError(format!(
                "{} {} rejected after session refresh: {}",
                request.method(),
                request.path(),
                text
            )));
        }
        let err = http_error(resp);
        error!("{} {} failed: {}", request.method(), request.path(), err);
        Err(err)
    }

    /// Exchange the refresh token for a new access token. Serialized: a caller
    /// that waited on another refresh reuses its result instead of refreshing again.
    async fn refresh_session(&self, stale_access: Option<&str>) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;

        let session = self
            .session()
            .ok_or_else(|| StitchError::AuthError("not authenticated, no session to refresh".to_string()))?;
        if stale_access != Some(session.access_token.as_str()) {
            debug!("session already refreshed by a concurrent request");
            return Ok(());
        }
        if session.refresh_token.is_none() {
            self.swap_session(Some(&session), None);
            return Err(StitchError::AuthError("session has no refresh token".to_string()));
        }

        let request = RequestDescriptor::post(PATH_AUTH_SESSION)
            .api_version(self.auth_api_version)
            .refresh_on_failure(false)
            .use_refresh_token();

        // transport failures leave the session alone
        let (resp, _) = self.send_once(&request).await?;
        if !resp.status().is_success() {
            let err = http_error(resp);
            warn!("Session refresh rejected, clearing session: {}", err);
            self.swap_session(Some(&session), None);
            return Err(StitchError::AuthError(format!("session refresh failed: {}", err)));
        }

        let access_token = match resp.json::<Value>().and_then(|body| self.codec.decode_access_token(&body)) {
            Ok(token) => token,
            Err(e) => {
                self.swap_session(Some(&session), None);
                return Err(StitchError::AuthError(format!("invalid session refresh response: {}", e)));
            }
        };

        // a logout or login while the refresh was in flight wins
        let refreshed = Session { access_token, ..session.clone() };
        if !self.swap_session(Some(&session), Some(refreshed)) {
            warn!("Session changed during refresh, discarding refreshed token");
            return Err(StitchError::AuthError("session changed during refresh".to_string()));
        }
        debug!("session refreshed");
        Ok(())
    }

    //
    // Authentication Management
    //

    /// Log in through an auth provider and replace the session.
    /// Returns the authenticated user id (empty if the server sent none).
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<String> {
        let request = RequestDescriptor::post(format!("{}/{}/login", PATH_AUTH_PROVIDERS, credentials.provider()))
            .api_version(self.auth_api_version)
            .no_auth()
            .refresh_on_failure(false)
            .json(&credentials.body())?;

        let (resp, _) = self.send_once(&request).await?;
        if is_auth_failure(resp.status()) {
            let text = resp.text().unwrap_or_default();
            return Err(StitchError::AuthError(text));
        }
        if !resp.status().is_success() {
            return Err(http_error(resp));
        }

        let body: Value = resp.json()?;
        let session = self.codec.decode_session(&body)?;
        let user_id = session.user_id.clone().unwrap_or_default();
        self.set_session(Some(session));
        debug!("authenticated via {} as '{}'", credentials.provider(), user_id);
        Ok(user_id)
    }

    /// End the session. The local session is cleared whatever the server says;
    /// a non-2xx answer only means the server did not acknowledge the delete.
    pub async fn logout(&self) -> Result<()> {
        let request = RequestDescriptor::delete(PATH_AUTH_SESSION)
            .api_version(self.auth_api_version)
            .refresh_on_failure(false)
            .use_refresh_token();

        let result = self.send_once(&request).await;
        self.clear_session();

        let (resp, _) = result?;
        if !resp.status().is_success() {
            warn!("Logout not acknowledged by server (status {}), local session cleared", resp.status());
        }
        Ok(())
    }
}
