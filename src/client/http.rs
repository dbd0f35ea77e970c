//! HTTP Transport
//!
//! `reqwest`-backed implementation of the transport port.

use crate::api::Method;
use crate::client::transport::{
    Transport, TransportFailure, TransportRequest, TransportResponse, UploadRequest,
};
use crate::error::{RequestError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Transport over a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    /// Inner reqwest client
    client: Client,
}

impl ReqwestTransport {
    /// Create a new transport
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| RequestError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

fn header_map(
    headers: &BTreeMap<String, String>,
) -> std::result::Result<HeaderMap, TransportFailure> {
    let mut map = HeaderMap::new();
    for (key, value) in headers {
        let name = HeaderName::try_from(key.as_str())
            .map_err(|e| TransportFailure::new(format!("request:fail invalid header {}: {}", key, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| TransportFailure::new(format!("request:fail invalid header {}: {}", key, e)))?;
        map.insert(name, value);
    }
    Ok(map)
}

/// Check that `url` parses and every header is legal on the wire.
///
/// Run before dispatch so a malformed request is reported as such instead of
/// surfacing as a network failure.
pub fn validate_request(url: &str, headers: &BTreeMap<String, String>) -> Result<()> {
    reqwest::Url::parse(url)
        .map_err(|e| RequestError::InvalidRequest(format!("invalid url {}: {}", url, e)))?;

    for (key, value) in headers {
        HeaderName::try_from(key.as_str()).map_err(|e| {
            RequestError::InvalidRequest(format!("invalid header name {:?}: {}", key, e))
        })?;
        HeaderValue::from_str(value).map_err(|e| {
            RequestError::InvalidRequest(format!("invalid value for header {}: {}", key, e))
        })?;
    }
    Ok(())
}

/// Flatten a body into query pairs; `null` entries are dropped
fn query_pairs(body: &Map<String, Value>) -> Vec<(String, String)> {
    body.iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key.clone(), s.clone())),
            other => Some((key.clone(), other.to_string())),
        })
        .collect()
}

fn failure(prefix: &str, err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::new(format!("{}:fail timeout ({})", prefix, err))
    } else {
        TransportFailure::new(format!("{}:fail {}", prefix, err))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: TransportRequest,
    ) -> std::result::Result<TransportResponse, TransportFailure> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, &request.url)
            .headers(header_map(&request.headers)?)
            .timeout(request.timeout);

        builder = match request.method {
            Method::Get => builder.query(&query_pairs(&request.body)),
            _ => builder.json(&request.body),
        };

        let response = builder.send().await.map_err(|e| failure("request", e))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| failure("request", e))?;

        // Non-JSON bodies are passed through as strings and rejected by envelope decoding
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(TransportResponse { status, body })
    }

    async fn upload(&self, request: UploadRequest) -> std::result::Result<String, TransportFailure> {
        let bytes = tokio::fs::read(&request.file_path).await.map_err(|e| {
            TransportFailure::new(format!("uploadFile:fail {}: {}", request.file_path, e))
        })?;

        let file_name = Path::new(&request.file_path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        let mut form = Form::new().part(
            request.field_name.clone(),
            Part::bytes(bytes).file_name(file_name),
        );
        for (name, value) in &request.extra_fields {
            form = form.text(name.clone(), value.clone());
        }

        let response = self
            .client
            .post(&request.url)
            .headers(header_map(&request.headers)?)
            .timeout(request.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| failure("uploadFile", e))?;

        response.text().await.map_err(|e| failure("uploadFile", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;
    use std::io::Write;

    fn json_request(url: String, method: Method, body: Value) -> TransportRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Authorization".to_string(), "Bearer tok".to_string());
        TransportRequest {
            url,
            method,
            body: body.as_object().cloned().unwrap_or_default(),
            headers,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_client_creation() {
        assert!(ReqwestTransport::new().is_ok());
    }

    #[test]
    fn test_query_pairs() {
        let body = json!({"page": 2, "keyword": "rust", "missing": null, "flag": true});
        let pairs = query_pairs(body.as_object().unwrap());
        assert_eq!(
            pairs,
            vec![
                ("flag".to_string(), "true".to_string()),
                ("keyword".to_string(), "rust".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_sends_query_and_headers() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/posts")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("size".into(), "5".into()),
            ]))
            .match_header("authorization", "Bearer tok")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"code":200,"data":[1,2]}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(json_request(
                format!("{}/api/posts", server.url()),
                Method::Get,
                json!({"page": 2, "size": 5}),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({"code": 200, "data": [1, 2]}));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/posts")
            .match_body(Matcher::Json(json!({"content": "hi"})))
            .with_status(200)
            .with_body(r#"{"code":200,"data":{"id":9}}"#)
            .create_async()
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(json_request(
                format!("{}/api/posts", server.url()),
                Method::Post,
                json!({"content": "hi"}),
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.body["data"]["id"], 9);
    }

    #[tokio::test]
    async fn test_non_json_body_is_passed_as_string() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/api/posts/1")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let transport = ReqwestTransport::new().unwrap();
        let response = transport
            .send(json_request(
                format!("{}/api/posts/1", server.url()),
                Method::Delete,
                json!({}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status, 502);
        assert_eq!(response.body, Value::String("Bad Gateway".into()));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .send(json_request(
                "http://127.0.0.1:1/api/posts".to_string(),
                Method::Get,
                json!({}),
            ))
            .await
            .unwrap_err();

        assert!(err.message.starts_with("request:fail"));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"fake image bytes").unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/upload/image")
            .match_header("authorization", "Bearer tok")
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="image""#.into()),
                Matcher::Regex(r#"name="album""#.into()),
                Matcher::Regex("fake image bytes".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"code":200,"data":{"url":"https://cdn/x.png"}}"#)
            .create_async()
            .await;

        let mut headers = BTreeMap::new();
        headers.insert("Authorization".to_string(), "Bearer tok".to_string());
        let mut extra_fields = BTreeMap::new();
        extra_fields.insert("album".to_string(), "travel".to_string());

        let transport = ReqwestTransport::new().unwrap();
        let raw = transport
            .upload(UploadRequest {
                url: format!("{}/api/upload/image", server.url()),
                file_path: file.path().to_string_lossy().into_owned(),
                field_name: "image".to_string(),
                extra_fields,
                headers,
                timeout: Duration::from_secs(5),
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(raw.contains("cdn/x.png"));
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_failure() {
        let transport = ReqwestTransport::new().unwrap();
        let err = transport
            .upload(UploadRequest {
                url: "http://127.0.0.1:1/upload".to_string(),
                file_path: "/no/such/file.png".to_string(),
                field_name: "file".to_string(),
                extra_fields: BTreeMap::new(),
                headers: BTreeMap::new(),
                timeout: Duration::from_secs(1),
            })
            .await
            .unwrap_err();

        assert!(err.message.starts_with("uploadFile:fail"));
        assert!(!err.is_timeout());
    }

    #[test]
    fn test_validate_request() {
        let mut headers = BTreeMap::new();
        headers.insert("x-trace".to_string(), "t1".to_string());
        assert!(validate_request("https://api.test/posts", &headers).is_ok());

        let err = validate_request("not a url/posts", &headers).unwrap_err();
        assert!(matches!(err, RequestError::InvalidRequest(_)));

        headers.insert("bad header".to_string(), "v".to_string());
        let err = validate_request("https://api.test/posts", &headers).unwrap_err();
        assert!(err.to_string().contains("bad header"));

        let mut headers = BTreeMap::new();
        headers.insert("authorization".to_string(), "Bearer tok\nx".to_string());
        let err = validate_request("https://api.test/posts", &headers).unwrap_err();
        assert!(matches!(err, RequestError::InvalidRequest(_)));
    }
}
