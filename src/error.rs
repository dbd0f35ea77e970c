//! Request Error Types
//!
//! Unified failure taxonomy for the request pipeline. Every failed call yields
//! exactly one of `Transport`, `HttpStatus`, `Business` or `Decode`; the
//! remaining variants cover configuration and request construction before
//! anything is dispatched.

use thiserror::Error;

/// Message used when a transport failure mentions a timeout
pub const MSG_TIMEOUT: &str = "request timed out";

/// Message used for every other transport failure
pub const MSG_NETWORK: &str = "network connection failed";

/// Message used when an upload transport call fails
pub const MSG_UPLOAD_FAILED: &str = "upload failed";

/// Message used when a response body is not a valid envelope
pub const MSG_DECODE: &str = "response could not be decoded";

/// Fallback for business failures without a server message
pub const MSG_REQUEST_FAILED: &str = "request failed";

/// Fallback for business 403 without a server message
pub const MSG_INSUFFICIENT_PERMISSION: &str = "insufficient permission";

/// Main error type for request pipeline operations
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network unreachable, timeout, or upload transfer failure
    #[error("{message}")]
    Transport { timed_out: bool, message: String },

    /// Transport succeeded but the HTTP status was not 200
    #[error("{message}")]
    HttpStatus { status: u16, message: String },

    /// HTTP 200 with an envelope whose code is not 200
    #[error("{message}")]
    Business { code: i64, message: String },

    /// Response body was not a `{code, message?, data}` envelope
    #[error("response could not be decoded")]
    Decode { detail: String },

    /// Configuration errors (invalid JSON, unreadable file, bad env value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request could not be assembled (bad header name/value, bad body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RequestError {
    /// Build the HTTP status error with the user-facing message for `status`
    pub fn from_status(status: u16) -> Self {
        RequestError::HttpStatus {
            status,
            message: http_status_message(status),
        }
    }

    /// Build a business error, falling back to `fallback` when the server sent no message
    pub fn business(code: i64, message: Option<&str>, fallback: &str) -> Self {
        let message = match message {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => fallback.to_string(),
        };
        RequestError::Business { code, message }
    }

    /// Whether this failure should invalidate the stored credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            RequestError::HttpStatus { status: 401, .. } | RequestError::Business { code: 401, .. }
        )
    }

    /// HTTP status, when the failure came from the status check
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Envelope code, when the failure came from the business check
    pub fn business_code(&self) -> Option<i64> {
        match self {
            RequestError::Business { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// User-facing message for a non-200 HTTP status
pub fn http_status_message(status: u16) -> String {
    match status {
        401 => "unauthorized, please log in again".to_string(),
        403 => "access denied".to_string(),
        404 => "resource not found".to_string(),
        500 => "internal server error".to_string(),
        502 => "gateway error".to_string(),
        503 => "service unavailable".to_string(),
        504 => "gateway timeout".to_string(),
        other => format!("connection error {}", other),
    }
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode {
            detail: err.to_string(),
        }
    }
}

impl From<std::io::Error> for RequestError {
    fn from(err: std::io::Error) -> Self {
        RequestError::Config(format!("IO error: {}", err))
    }
}

/// Result type alias for request pipeline operations
pub type Result<T> = std::result::Result<T, RequestError>;
