// error.rs

use reqwest::StatusCode;
use std::fmt;

/// Main error type for Stitch admin SDK operations
#[derive(Debug)]
pub enum StitchError {
    /// Client was built with missing or inconsistent configuration
    ConfigurationError(String),
    /// Parse URL failed
    InvalidUrl(String),
    /// Transport failure (DNS, connect, timeout, reset). Never retried by the SDK.
    NetworkError(String),
    /// Authentication is not recoverable: refresh failed or was rejected
    AuthError(String),
    /// Server answered with a non-2xx status
    HttpError { status: StatusCode, code: Option<String>, message: String },
    /// JSON or data serialization/deserialization error
    SerializationError(String),
    /// Session file IO error
    IoError(String),
}

impl StitchError {
    /// True only for transport failures, where repeating the call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for StitchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            Self::NetworkError(msg) => write!(f, "Network error: {}", msg),
            Self::AuthError(msg) => write!(f, "Authentication failed: {}", msg),
            Self::HttpError { status, code: Some(code), message } => {
                write!(f, "HTTP request failed with status {} ({}): {}", status, code, message)
            }
            Self::HttpError { status, code: None, message } => {
                write!(f, "HTTP request failed with status {}: {}", status, message)
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            Self::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for StitchError {}

// Conversion implementations
impl From<url::ParseError> for StitchError {
    fn from(e: url::ParseError) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

impl From<reqwest::Error> for StitchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::ConfigurationError(err.to_string())
        } else if err.is_decode() {
            Self::SerializationError(err.to_string())
        } else if let Some(status) = err.status() {
            Self::HttpError { status, code: None, message: err.to_string() }
        } else {
            // connect, timeout, request and body errors are all transport level here
            Self::NetworkError(err.to_string())
        }
    }
}

impl From<std::io::Error> for StitchError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::ConnectionRefused
            | std::io::ErrorKind::ConnectionReset
            | std::io::ErrorKind::TimedOut => Self::NetworkError(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StitchError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(StitchError::NetworkError("reset".into()).is_retryable());
        assert!(!StitchError::AuthError("expired".into()).is_retryable());
        let http = StitchError::HttpError { status: StatusCode::CONFLICT, code: None, message: "dup".into() };
        assert!(!http.is_retryable());
        assert_eq!(http.status(), Some(StatusCode::CONFLICT));
    }

    #[test]
    fn test_http_error_display_includes_code() {
        let err = StitchError::HttpError {
            status: StatusCode::BAD_REQUEST,
            code: Some("InvalidParameter".into()),
            message: "name is required".into(),
        };
        let text = err.to_string();
        assert!(text.contains("400"));
        assert!(text.contains("InvalidParameter"));
        assert!(text.contains("name is required"));
    }

    #[test]
    fn test_io_error_mapping() {
        let err: StitchError = std::io::Error::new(std::io::ErrorKind::TimedOut, "slow").into();
        assert!(matches!(err, StitchError::NetworkError(_)));
        let err: StitchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, StitchError::IoError(_)));
    }
}
