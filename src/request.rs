// request.rs
//! Request descriptors: everything the core needs to issue one call.

use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::constants::*;
use crate::error::StitchError;

type Result<T> = std::result::Result<T, StitchError>;

/// A single query value; arrays repeat the key when flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::One(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::One(v)
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        Self::One(v.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(v: Vec<String>) -> Self {
        Self::Many(v)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(v: Vec<&str>) -> Self {
        Self::Many(v.into_iter().map(String::from).collect())
    }
}

/// Ordered query parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(BTreeMap<String, QueryValue>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Flatten into key/value pairs, repeating the key for array values.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, value) in &self.0 {
            match value {
                QueryValue::One(v) => out.push((key.clone(), v.clone())),
                QueryValue::Many(values) => out.extend(values.iter().map(|v| (key.clone(), v.clone()))),
            }
        }
        out
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// Request body. Cheap to clone so a request can be resent after a refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Body {
    #[default]
    Empty,
    /// Serialized JSON document
    Json(Bytes),
    Text(String),
    Bytes(Bytes),
    /// Asset upload: `meta` JSON string plus binary `file`
    Multipart { meta: String, file: Bytes, file_name: Option<String> },
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Json(Bytes::from(serde_json::to_vec(value)?)))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart { .. })
    }
}

/// Per-request auth behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestFlags {
    /// Never attach credentials
    pub no_auth: bool,
    /// Refresh the access token once and retry on 401/403
    pub refresh_on_failure: bool,
    /// Present the refresh token instead of the access token
    pub use_refresh_token: bool,
}

impl Default for RequestFlags {
    fn default() -> Self {
        Self { no_auth: false, refresh_on_failure: true, use_refresh_token: false }
    }
}

/// Describes one API call. Built with consuming setters, then only read.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    method: Method,
    path: String,
    query: QueryParams,
    headers: Vec<(String, String)>,
    body: Body,
    api_version: u32,
    flags: RequestFlags,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryParams::new(),
            headers: Vec::new(),
            body: Body::Empty,
            api_version: DEFAULT_API_VERSION,
            flags: RequestFlags::default(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(key, value);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    pub fn json<T: Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.body(Body::json(value)?))
    }

    pub fn api_version(mut self, version: u32) -> Self {
        self.api_version = version;
        self
    }

    pub fn no_auth(mut self) -> Self {
        self.flags.no_auth = true;
        self
    }

    pub fn refresh_on_failure(mut self, enabled: bool) -> Self {
        self.flags.refresh_on_failure = enabled;
        self
    }

    pub fn use_refresh_token(mut self) -> Self {
        self.flags.use_refresh_token = true;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query
    }

    pub fn header_list(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body_ref(&self) -> &Body {
        &self.body
    }

    pub fn version(&self) -> u32 {
        self.api_version
    }

    pub fn flags(&self) -> RequestFlags {
        self.flags
    }

    pub(crate) fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}
