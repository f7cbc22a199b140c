// response_ext.rs

use crate::constants::*;
use crate::error::StitchError;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extension trait for working with `http::Response<Bytes>`.
pub trait ResponseExt {
    /// Extracts the response body as `Bytes`.
    fn bytes(self) -> Bytes;

    /// Reads the response body as UTF-8 text, lossy on invalid sequences.
    fn text(self) -> Result<String, StitchError>;

    /// Deserializes the response body as JSON.
    fn json<T: DeserializeOwned>(self) -> Result<T, StitchError>;

    /// True when a comma-separated entry of `Content-Type` has the media type
    /// `application/json` (parameters such as charset are ignored).
    fn is_json(&self) -> bool;
}

impl ResponseExt for http::Response<Bytes> {
    fn bytes(self) -> Bytes {
        self.into_body()
    }

    fn text(self) -> Result<String, StitchError> {
        let body = self.into_body();
        String::from_utf8(body.to_vec()).or_else(|_| Ok(String::from_utf8_lossy(&body).into_owned()))
    }

    fn json<T: DeserializeOwned>(self) -> Result<T, StitchError> {
        let body = self.into_body();

        if body.is_empty() {
            return Err(StitchError::SerializationError("Empty response body".to_string()));
        }

        serde_json::from_slice::<T>(&body).map_err(|e| {
            let preview_len = body.len().min(100);
            let preview = String::from_utf8_lossy(&body[..preview_len]);
            StitchError::SerializationError(format!("Failed to deserialize JSON: {}. Body preview: {}", e, preview))
        })
    }

    fn is_json(&self) -> bool {
        self.headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(is_json_content_type)
            .unwrap_or(false)
    }
}

pub(crate) fn is_json_content_type(content_type: &str) -> bool {
    content_type
        .split(',')
        .filter_map(|entry| entry.split(';').next())
        .any(|media_type| media_type.trim().eq_ignore_ascii_case(MEDIA_TYPE_JSON))
}

/// Decoded result of an admin API call.
#[derive(Debug)]
pub enum Payload {
    /// JSON response body (`null` for an empty JSON response)
    Json(Value),
    /// Any non-JSON response, untouched
    Raw(http::Response<Bytes>),
}

impl Payload {
    /// Decode a response: JSON when the content type says so, raw otherwise.
    pub fn from_response(resp: http::Response<Bytes>) -> Result<Self, StitchError> {
        if !resp.is_json() {
            return Ok(Self::Raw(resp));
        }
        if resp.body().is_empty() {
            return Ok(Self::Json(Value::Null));
        }
        Ok(Self::Json(resp.json()?))
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json(_))
    }

    /// The JSON value, or a `SerializationError` for raw payloads.
    pub fn into_json(self) -> Result<Value, StitchError> {
        match self {
            Self::Json(v) => Ok(v),
            Self::Raw(resp) => Err(StitchError::SerializationError(format!(
                "Expected a JSON response, got content type '{}'",
                content_type(&resp)
            ))),
        }
    }

    /// Deserialize the JSON value into `T`.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, StitchError> {
        Ok(serde_json::from_value(self.into_json()?)?)
    }

    pub fn into_raw(self) -> Option<http::Response<Bytes>> {
        match self {
            Self::Raw(resp) => Some(resp),
            Self::Json(_) => None,
        }
    }
}

fn content_type(resp: &http::Response<Bytes>) -> String {
    resp.headers()
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Build an `HttpError` from a non-2xx response, pulling `error_code`/`code`
/// and `error`/`message` out of a JSON body when present.
pub(crate) fn http_error(resp: http::Response<Bytes>) -> StitchError {
    let status = resp.status();
    let body = resp.into_body();
    let text = String::from_utf8_lossy(&body).into_owned();

    let (code, message) = match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(map)) => {
            let field = |a: &str, b: &str| {
                map.get(a).or_else(|| map.get(b)).and_then(|v| v.as_str()).map(String::from)
            };
            let code = field(JSON_KEY_ERROR_CODE, JSON_KEY_CODE);
            let message = field(JSON_KEY_ERROR, JSON_KEY_MESSAGE).unwrap_or_else(|| text.clone());
            (code, message)
        }
        _ => (None, text),
    };

    StitchError::HttpError { status, code, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(content_type: Option<&str>, body: &'static str) -> http::Response<Bytes> {
        let mut builder = http::Response::builder().status(200);
        if let Some(ct) = content_type {
            builder = builder.header(http::header::CONTENT_TYPE, ct);
        }
        builder.body(Bytes::from_static(body.as_bytes())).unwrap()
    }

    #[test]
    fn test_response_ext_text_invalid_utf8() {
        let body = Bytes::from(vec![0xFF, 0xFE, 0xFD]);
        let response = http::Response::builder().status(200).body(body).unwrap();
        assert!(response.text().unwrap().contains('\u{FFFD}'));
    }

    #[test]
    fn test_response_ext_json_empty() {
        let parsed: Result<Value, _> = response(None, "").json();
        if let Err(StitchError::SerializationError(msg)) = parsed {
            assert!(msg.contains("Empty response body"));
        } else {
            panic!("Expected SerializationError for empty body");
        }
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("text/plain, application/json"));
        assert!(!is_json_content_type("application/zip"));
        assert!(!is_json_content_type("application/jsonp"));
        assert!(!is_json_content_type(""));
    }

    #[test]
    fn test_payload_decodes_json() {
        let payload = Payload::from_response(response(Some("application/json"), r#"{"name":"app1"}"#)).unwrap();
        assert_eq!(payload.into_json().unwrap(), json!({"name": "app1"}));

        let payload = Payload::from_response(response(Some("application/json; charset=utf-8"), "[1,2]")).unwrap();
        let values: Vec<u32> = payload.json().unwrap();
        assert_eq!(values, vec![1, 2]);

        let payload = Payload::from_response(response(Some("application/json"), "")).unwrap();
        assert_eq!(payload.into_json().unwrap(), Value::Null);
    }

    #[test]
    fn test_payload_keeps_raw_for_zip() {
        let payload = Payload::from_response(response(Some("application/zip"), "PK\u{3}\u{4}")).unwrap();
        assert!(!payload.is_json());
        let raw = payload.into_raw().unwrap();
        assert_eq!(raw.status(), 200);
        assert_eq!(raw.into_body(), Bytes::from_static(b"PK\x03\x04"));
    }

    #[test]
    fn test_http_error_parses_body() {
        let resp = http::Response::builder()
            .status(404)
            .body(Bytes::from_static(br#"{"error":"app not found","error_code":"AppNotFound"}"#))
            .unwrap();
        match http_error(resp) {
            StitchError::HttpError { status, code, message } => {
                assert_eq!(status, 404);
                assert_eq!(code.as_deref(), Some("AppNotFound"));
                assert_eq!(message, "app not found");
            }
            other => panic!("unexpected {:?}", other),
        }

        let resp = http::Response::builder().status(502).body(Bytes::from_static(b"bad gateway")).unwrap();
        match http_error(resp) {
            StitchError::HttpError { code, message, .. } => {
                assert!(code.is_none());
                assert_eq!(message, "bad gateway");
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
