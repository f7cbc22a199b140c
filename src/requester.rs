// requester.rs

use crate::error::StitchError;
use crate::request::Body;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use url::Url;

type Result<T> = std::result::Result<T, StitchError>;

/// Fully resolved request handed to a transport: absolute URL with the
/// encoded query, final headers (credentials included) and body.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl TransportRequest {
    /// First value of a header, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }
}

/// Trait for transport implementations (reqwest by default, in-memory for tests)
#[async_trait]
pub trait Requester: Send + Sync {
    /// Execute one request. Any response status is returned as `Ok`;
    /// only transport-level failures are errors.
    async fn send(&self, request: TransportRequest) -> Result<http::Response<Bytes>>;
}
