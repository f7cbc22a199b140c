// requester_http.rs

use async_trait::async_trait;
use bytes::Bytes;
use log::debug;
use reqwest::multipart::{Form, Part};
use reqwest::Client as ReqwestClient;
use std::time::Duration;

use crate::constants::*;
use crate::error::StitchError;
use crate::request::Body;
use crate::requester::{Requester, TransportRequest};

type Result<T> = std::result::Result<T, StitchError>;

/// HTTP-based requester implementation
pub struct RequesterHttp {
    client: ReqwestClient,
}

impl RequesterHttp {
    pub fn new(ssl_ca_cert: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut client_builder = ReqwestClient::builder();

        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        // SSL setup
        if let Some(ca_path) = ssl_ca_cert {
            let cert_bytes = std::fs::read(&ca_path).map_err(|e| {
                StitchError::ConfigurationError(format!("Failed to read CA certificate '{}': {}", ca_path, e))
            })?;
            let cert = reqwest::Certificate::from_pem(&cert_bytes)
                .map_err(|e| StitchError::ConfigurationError(e.to_string()))?;
            client_builder = client_builder.add_root_certificate(cert);
        }

        Ok(Self { client: client_builder.build()? })
    }

    async fn to_http_response(resp: reqwest::Response) -> Result<http::Response<Bytes>> {
        let (status, headers, body) = (resp.status(), resp.headers().clone(), resp.bytes().await?);

        let mut builder = http::Response::builder().status(status);
        if let Some(h) = builder.headers_mut() {
            *h = headers;
        }

        builder.body(body).map_err(|e| StitchError::SerializationError(e.to_string()))
    }

    fn multipart_form(meta: String, file: Bytes, file_name: Option<String>) -> Form {
        let mut part = Part::bytes(file.to_vec());
        if let Some(name) = file_name {
            part = part.file_name(name);
        }
        Form::new().text(MULTIPART_FIELD_META, meta).part(MULTIPART_FIELD_FILE, part)
    }
}

#[async_trait]
impl Requester for RequesterHttp {
    async fn send(&self, request: TransportRequest) -> Result<http::Response<Bytes>> {
        debug!("{} {}", request.method, request.url);

        let mut req = self.client.request(request.method, request.url);
        req = req.header(HTTP_HEADER_KEY_USER_AGENT, HTTP_USER_AGENT);
        for (k, v) in request.headers {
            req = req.header(k, v);
        }

        req = match request.body {
            Body::Empty => req,
            Body::Json(bytes) | Body::Bytes(bytes) => req.body(bytes),
            Body::Text(text) => req.body(text),
            Body::Multipart { meta, file, file_name } => req.multipart(Self::multipart_form(meta, file, file_name)),
        };

        let resp = req.send().await?;
        Self::to_http_response(resp).await
    }
}
