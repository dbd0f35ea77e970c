//! Transport Port
//!
//! The HTTP capability the request client dispatches through.

use crate::api::Method;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// A fully composed HTTP exchange, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// Absolute URL (`base_url + path`)
    pub url: String,
    pub method: Method,
    /// Query parameters for GET, JSON body otherwise
    pub body: Map<String, Value>,
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
}

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed JSON when the body was JSON, otherwise the raw text as a string
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }
}

/// A multipart file transfer
#[derive(Debug, Clone, PartialEq)]
pub struct UploadRequest {
    pub url: String,
    pub file_path: String,
    pub field_name: String,
    pub extra_fields: BTreeMap<String, String>,
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
}

/// The exchange never completed (unreachable host, timeout, unreadable file)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    /// Free-form error signal from the transport
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Whether the signal reports a timeout
    pub fn is_timeout(&self) -> bool {
        self.message.contains("timeout")
    }
}

/// Host HTTP capability
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a JSON request
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure>;

    /// Transfer a file; returns the raw, unparsed response body
    async fn upload(&self, request: UploadRequest) -> std::result::Result<String, TransportFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_detection() {
        assert!(TransportFailure::new("request:fail timeout").is_timeout());
        assert!(!TransportFailure::new("request:fail connection refused").is_timeout());
        assert_eq!(TransportFailure::new("boom").to_string(), "boom");
    }
}
