// lib.rs
//! Stitch admin SDK for Rust

mod admin;
mod client;
mod client_builder;
mod codec;
mod constants;
mod error;
mod models;
mod persistent_session;
mod request;
mod requester;
mod requester_http;
mod response_ext;

pub use admin::*;
pub use client::StitchClient;
pub use client_builder::*;
pub use codec::{CredentialCodec, FieldCodec, TokenKind, ADMIN_CLIENT_CODEC, APP_CLIENT_CODEC};
pub use error::StitchError;
pub use models::{Credentials, FunctionSource, Session};
pub use persistent_session::PersistentSession;
pub use request::{Body, QueryParams, QueryValue, RequestDescriptor, RequestFlags};
pub use requester::{Requester, TransportRequest};
pub use requester_http::RequesterHttp;
pub use response_ext::{Payload, ResponseExt};
