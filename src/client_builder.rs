// client_builder.rs
//! Builders are the only way to construct clients: they check that every
//! client has a usable base URL and a credential codec before any request.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::admin::StitchAdminClient;
use crate::client::StitchClient;
use crate::codec::{CredentialCodec, ADMIN_CLIENT_CODEC};
use crate::constants::*;
use crate::error::StitchError;
use crate::persistent_session::PersistentSession;
use crate::requester::Requester;
use crate::requester_http::RequesterHttp;

type Result<T> = std::result::Result<T, StitchError>;

/// Builder for the authenticated core client
///
/// # Examples
///
/// ```no_run
/// use stitch_admin::{ClientBuilder, APP_CLIENT_CODEC};
///
/// let client = ClientBuilder::new()
///     .url("https://stitch.example.com")
///     .codec(APP_CLIENT_CODEC)
///     .timeout_secs(30)
///     .build()?;
/// # Ok::<(), stitch_admin::StitchError>(())
/// ```
#[derive(Default)]
pub struct ClientBuilder {
    url: Option<String>,
    codec: Option<Arc<dyn CredentialCodec>>,
    api_version: Option<u32>,
    ssl_ca_cert: Option<String>,
    timeout: Option<Duration>,
    session_file: Option<PathBuf>,
    requester: Option<Box<dyn Requester>>,
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the server base URL (required)
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the credential codec (required)
    pub fn codec(mut self, codec: impl CredentialCodec + 'static) -> Self {
        self.codec = Some(Arc::new(codec));
        self
    }

    /// Set the API version of the auth endpoints: login, session refresh,
    /// logout, `/auth/providers` and the admin session post
    ///
    /// Default: 3
    pub fn api_version(mut self, version: u32) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Trust an additional CA certificate (PEM file)
    pub fn ssl_ca_cert(mut self, path: impl Into<String>) -> Self {
        self.ssl_ca_cert = Some(path.into());
        self
    }

    /// Set request timeout in seconds
    ///
    /// Default: none, requests wait as long as the transport allows
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Some(Duration::from_secs(secs));
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Persist the session to a JSON file
    ///
    /// The file is written synchronously on every session change (login,
    /// refresh, logout) while the session lock is held, so it briefly blocks
    /// the calling task. Memory and file always change in the same order.
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Use a custom transport instead of the reqwest one
    pub fn requester(mut self, requester: Box<dyn Requester>) -> Self {
        self.requester = Some(requester);
        self
    }

    /// Validate the configuration before building
    fn validate(&self) -> Result<()> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| StitchError::ConfigurationError("A base URL is required".to_string()))?;

        let parsed = url::Url::parse(url)
            .map_err(|e| StitchError::ConfigurationError(format!("Invalid URL '{}': {}", url, e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(StitchError::ConfigurationError(format!(
                "Unsupported URL scheme '{}' in '{}'",
                parsed.scheme(),
                url
            )));
        }

        if self.codec.is_none() {
            return Err(StitchError::ConfigurationError("A credential codec is required".to_string()));
        }

        if self.api_version == Some(0) {
            return Err(StitchError::ConfigurationError("API version must be positive".to_string()));
        }

        Ok(())
    }

    pub(crate) fn build_client(self) -> Result<StitchClient> {
        self.validate()?;

        let (url, codec) = match (self.url, self.codec) {
            (Some(url), Some(codec)) => (url, codec),
            _ => return Err(StitchError::ConfigurationError("A base URL and codec are required".to_string())),
        };

        let requester = match self.requester {
            Some(requester) => requester,
            None => Box::new(RequesterHttp::new(self.ssl_ca_cert, self.timeout)?),
        };

        let (store, session) = match self.session_file {
            Some(path) => {
                let store = PersistentSession::new(path)?;
                let session = store.load()?;
                (Some(store), session)
            }
            None => (None, None),
        };

        Ok(StitchClient::new(
            requester,
            url,
            codec,
            self.api_version.unwrap_or(DEFAULT_API_VERSION),
            store,
            session,
        ))
    }

    /// Build the client
    pub fn build(self) -> Result<Arc<StitchClient>> {
        Ok(Arc::new(self.build_client()?))
    }
}

/// Builder for the admin client: the core builder with the admin codec and
/// API version 3 wired in.
///
/// # Examples
///
/// ```no_run
/// use stitch_admin::AdminClientBuilder;
///
/// let admin = AdminClientBuilder::new()
///     .url("https://stitch.example.com")
///     .session_file("/tmp/stitch-admin-session.json")
///     .build()?;
/// # Ok::<(), stitch_admin::StitchError>(())
/// ```
pub struct AdminClientBuilder {
    inner: ClientBuilder,
}

impl Default for AdminClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminClientBuilder {
    pub fn new() -> Self {
        Self { inner: ClientBuilder::new().codec(ADMIN_CLIENT_CODEC).api_version(DEFAULT_API_VERSION) }
    }

    /// Set the server base URL (required)
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.inner = self.inner.url(url);
        self
    }

    /// Trust an additional CA certificate (PEM file)
    pub fn ssl_ca_cert(mut self, path: impl Into<String>) -> Self {
        self.inner = self.inner.ssl_ca_cert(path);
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.inner = self.inner.timeout_secs(secs);
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.inner = self.inner.timeout(duration);
        self
    }

    /// Persist the admin session to a JSON file; see [`ClientBuilder::session_file`]
    pub fn session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.session_file(path);
        self
    }

    /// Use a custom transport instead of the reqwest one
    pub fn requester(mut self, requester: Box<dyn Requester>) -> Self {
        self.inner = self.inner.requester(requester);
        self
    }

    /// Build the admin client
    pub fn build(self) -> Result<Arc<StitchAdminClient>> {
        Ok(Arc::new(StitchAdminClient::from_core(self.inner.build_client()?)))
    }
}
