//! Request and Envelope Types
//!
//! Per-call request descriptions and the server's response wrapper.

use crate::error::{RequestError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// HTTP verb of a JSON request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One logical API call. Built per call and not modified once sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Path relative to the client's base URL
    pub url: String,

    pub method: Method,

    /// Query parameters for GET, JSON body otherwise
    #[serde(default)]
    pub body: Map<String, Value>,

    /// Per-call headers, merged over the client defaults
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    /// Overrides the client's default timeout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Set to `false` to skip the loading overlay
    #[serde(default = "default_true")]
    pub show_loading_indicator: bool,

    /// Overrides the client's loading text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<String>,
}

fn default_true() -> bool {
    true
}

impl RequestConfig {
    /// Create a request with an empty body and default options
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method,
            body: Map::new(),
            headers: BTreeMap::new(),
            timeout_ms: None,
            show_loading_indicator: true,
            loading_text: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    /// Set the body (or query) from a JSON object
    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// Set a single body (or query) field
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Do not show the loading overlay for this call
    pub fn without_loading(mut self) -> Self {
        self.show_loading_indicator = false;
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }
}

/// Convert any serializable value into a request body.
///
/// `null` (including `()` and `None`) becomes an empty body; anything that is
/// not a JSON object is rejected.
pub fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<Map<String, Value>> {
    let value = serde_json::to_value(value)
        .map_err(|e| RequestError::InvalidRequest(format!("body is not serializable: {}", e)))?;
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(RequestError::InvalidRequest(format!(
            "body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Server response wrapper: `{code, message?, data}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Business code; 200 is success
    pub code: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub data: Value,
}

/// Business code signalling success
pub const SUCCESS_CODE: i64 = 200;

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Decode an already-parsed response body
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decode a raw response body
    pub fn from_text(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Multipart upload of one local file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTarget {
    /// API route relative to the base URL
    pub path: String,

    /// Local file to send
    pub file_path: String,

    /// Multipart field carrying the file
    pub field_name: String,

    /// Additional text fields
    #[serde(default)]
    pub extra_fields: BTreeMap<String, String>,

    /// Per-call headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default = "default_true")]
    pub show_loading_indicator: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading_text: Option<String>,
}

/// Multipart field used when none is given
pub const DEFAULT_UPLOAD_FIELD: &str = "file";

impl UploadTarget {
    pub fn new(path: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            file_path: file_path.into(),
            field_name: DEFAULT_UPLOAD_FIELD.to_string(),
            extra_fields: BTreeMap::new(),
            headers: BTreeMap::new(),
            show_loading_indicator: true,
            loading_text: None,
        }
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_fields.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn without_loading(mut self) -> Self {
        self.show_loading_indicator = false;
        self
    }

    pub fn with_loading_text(mut self, text: impl Into<String>) -> Self {
        self.loading_text = Some(text.into());
        self
    }
}
