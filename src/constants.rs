// constants.rs

// API
pub const API_PATH_PREFIX: &str = "/api/v";
pub const DEFAULT_API_VERSION: u32 = 3;

// Auth endpoints (relative to the versioned prefix)
pub const PATH_AUTH_SESSION: &str = "/auth/session";
pub const PATH_AUTH_PROFILE: &str = "/auth/profile";
pub const PATH_AUTH_PROVIDERS: &str = "/auth/providers";

// Auth provider names
pub const PROVIDER_API_KEY: &str = "api-key";
pub const PROVIDER_USERPASS: &str = "local-userpass";

// HTTP headers
pub const HTTP_HEADER_AUTHORIZATION: &str = "Authorization";
pub const HTTP_HEADER_AUTH_BEARER: &str = "Bearer ";
pub const HTTP_HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HTTP_HEADER_ACCEPT: &str = "Accept";
pub const HTTP_HEADER_KEY_USER_AGENT: &str = "User-Agent";
pub const HTTP_USER_AGENT: &str = "stitch-admin/rust";

// Media types
pub const MEDIA_TYPE_JSON: &str = "application/json";
pub const MEDIA_TYPE_ZIP: &str = "application/zip";

// Multipart field names
pub const MULTIPART_FIELD_META: &str = "meta";
pub const MULTIPART_FIELD_FILE: &str = "file";

// Error body keys
pub const JSON_KEY_ERROR: &str = "error";
pub const JSON_KEY_ERROR_CODE: &str = "error_code";
pub const JSON_KEY_MESSAGE: &str = "message";
pub const JSON_KEY_CODE: &str = "code";

// Query parameters
pub const HTTP_QUERY_KEY_PRODUCT: &str = "product";
pub const HTTP_QUERY_KEY_USER_ID: &str = "user_id";
pub const HTTP_QUERY_KEY_RUN_AS_SYSTEM: &str = "run_as_system";
pub const HTTP_QUERY_KEY_PATH: &str = "path";
