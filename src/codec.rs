// codec.rs
//! Credential codecs decide how session material is read from auth responses
//! and presented on outgoing requests.

use serde_json::Value;
use std::fmt;

use crate::constants::*;
use crate::error::StitchError;
use crate::models::Session;

type Result<T> = std::result::Result<T, StitchError>;

/// Which token of the session a request presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Pluggable strategy for attaching and decoding credentials.
pub trait CredentialCodec: Send + Sync + fmt::Debug {
    /// Decode a login / API-key exchange response into a session
    fn decode_session(&self, body: &Value) -> Result<Session>;

    /// Decode the new access token from a session refresh response
    fn decode_access_token(&self, body: &Value) -> Result<String>;

    /// Header `(name, value)` carrying the chosen token, or `None` when the
    /// session has no such token.
    fn authorization(&self, session: &Session, kind: TokenKind) -> Option<(String, String)>;
}

/// Codec driven by the JSON field names of the auth responses, presenting
/// tokens as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCodec {
    pub access_token: &'static str,
    pub refresh_token: &'static str,
    pub user_id: &'static str,
    pub device_id: &'static str,
}

/// Field names used by the admin API
pub const ADMIN_CLIENT_CODEC: FieldCodec =
    FieldCodec { access_token: "access_token", refresh_token: "refresh_token", user_id: "user_id", device_id: "device_id" };

/// Field names used by the app client API
pub const APP_CLIENT_CODEC: FieldCodec =
    FieldCodec { access_token: "accessToken", refresh_token: "refreshToken", user_id: "userId", device_id: "deviceId" };

fn string_field(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(|v| v.as_str()).filter(|s| !s.is_empty()).map(String::from)
}

impl CredentialCodec for FieldCodec {
    fn decode_session(&self, body: &Value) -> Result<Session> {
        let access_token = self.decode_access_token(body)?;
        Ok(Session {
            access_token,
            refresh_token: string_field(body, self.refresh_token),
            user_id: string_field(body, self.user_id),
            device_id: string_field(body, self.device_id),
        })
    }

    fn decode_access_token(&self, body: &Value) -> Result<String> {
        string_field(body, self.access_token).ok_or_else(|| {
            StitchError::SerializationError(format!("Auth response is missing '{}'", self.access_token))
        })
    }

    fn authorization(&self, session: &Session, kind: TokenKind) -> Option<(String, String)> {
        let token = match kind {
            TokenKind::Access => Some(session.access_token.as_str()).filter(|t| !t.is_empty()),
            TokenKind::Refresh => session.refresh_token.as_deref(),
        }?;
        Some((HTTP_HEADER_AUTHORIZATION.to_string(), format!("{}{}", HTTP_HEADER_AUTH_BEARER, token)))
    }
}
