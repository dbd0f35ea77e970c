//! miniapp-client - Social Mini-App REST Client
//!
//! Request pipeline for the social mini-app backend: bearer-token injection,
//! a shared loading overlay, HTTP status and business-code classification,
//! forced re-authentication on 401, and multipart uploads.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod platform;

#[cfg(test)]
mod testing;

use api::{to_body, Envelope, Method, RequestConfig, UploadTarget};
use auth::CredentialStore;
use client::{
    validate_request, ClientContext, LoadingIndicator, ReqwestTransport, Transport, TransportFailure,
    TransportRequest, TransportResponse, UploadRequest,
};
use config::{ClientSettings, ConfigLoader};
use error::{
    RequestError, Result, MSG_DECODE, MSG_INSUFFICIENT_PERMISSION, MSG_NETWORK,
    MSG_REQUEST_FAILED, MSG_TIMEOUT, MSG_UPLOAD_FAILED,
};
use platform::{FileStore, Navigator, Notifier, TracingNavigator, TracingNotifier};

/// HTTP status the pipeline accepts as a completed exchange
const HTTP_OK: u16 = 200;

/// The request client
pub struct RequestClient {
    /// Settings and credential accessor
    context: ClientContext,

    /// HTTP capability
    transport: Arc<dyn Transport>,

    /// Used for forced re-authentication
    navigator: Arc<dyn Navigator>,

    /// Toasts for failures
    notifier: Arc<dyn Notifier>,

    /// Shared loading overlay
    loading: LoadingIndicator,
}

impl RequestClient {
    /// Create a client from its context and host capabilities
    pub fn new(
        context: ClientContext,
        transport: Arc<dyn Transport>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let loading = LoadingIndicator::new(Arc::clone(&notifier));
        Self {
            context,
            transport,
            navigator,
            notifier,
            loading,
        }
    }

    /// Headless client: reqwest transport, in-memory storage, log-only UI ports
    pub fn headless(settings: ClientSettings) -> Result<Self> {
        Ok(Self::new(
            ClientContext::in_memory(settings),
            Arc::new(ReqwestTransport::new()?),
            Arc::new(TracingNavigator),
            Arc::new(TracingNotifier),
        ))
    }

    /// Headless client with settings from the default config sources and
    /// credentials persisted in the platform data directory
    pub fn from_env() -> Result<Self> {
        let settings = ConfigLoader::new()?.into_settings();
        let store = FileStore::open_default()?;
        Ok(Self::new(
            ClientContext::new(settings, Arc::new(store)),
            Arc::new(ReqwestTransport::new()?),
            Arc::new(TracingNavigator),
            Arc::new(TracingNotifier),
        ))
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    pub fn settings(&self) -> &ClientSettings {
        self.context.settings()
    }

    pub fn credentials(&self) -> &CredentialStore {
        self.context.credentials()
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// GET `path` with `query` as query parameters
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<Value> {
        self.send(self.build(Method::Get, path, query)?).await
    }

    /// POST `body` as JSON to `path`
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(self.build(Method::Post, path, body)?).await
    }

    /// PUT `body` as JSON to `path`
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(self.build(Method::Put, path, body)?).await
    }

    /// DELETE `path`, with `body` as JSON
    pub async fn delete<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(self.build(Method::Delete, path, body)?).await
    }

    /// Send a request and deserialize the envelope payload into `R`
    pub async fn send_as<R: DeserializeOwned>(&self, config: RequestConfig) -> Result<R> {
        let data = self.send(config).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Send a request and resolve with the envelope payload
    pub async fn send(&self, config: RequestConfig) -> Result<Value> {
        let request = self.compose(&config);
        validate_request(&request.url, &request.headers).inspect_err(|e| {
            tracing::warn!(error = %e, "request rejected before dispatch");
        })?;
        let (method, url) = (request.method, request.url.clone());

        let loading = config.show_loading_indicator.then(|| {
            let text = config
                .loading_text
                .as_deref()
                .unwrap_or(&self.settings().loading_text);
            self.loading.acquire(text)
        });

        tracing::debug!(%method, %url, "dispatching request");
        let outcome = self.transport.send(request).await;
        drop(loading);

        match outcome {
            Ok(response) => self.handle_response(response),
            Err(failure) => Err(self.handle_transport_failure(&failure)),
        }
    }

    /// Build the transport request for `config`: URL, merged headers, token, timeout
    fn compose(&self, config: &RequestConfig) -> TransportRequest {
        let settings = self.settings();

        let mut headers = merge_headers([&settings.default_headers, &config.headers]);
        self.authorize(&mut headers);

        TransportRequest {
            url: settings.url_for(&config.url),
            method: config.method,
            body: config.body.clone(),
            headers,
            timeout: config
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or_else(|| settings.timeout()),
        }
    }

    fn authorize(&self, headers: &mut BTreeMap<String, String>) {
        if let Some(token) = self.credentials().token() {
            headers.insert("authorization".to_string(), format!("Bearer {}", token));
        }
    }

    fn handle_response(&self, response: TransportResponse) -> Result<Value> {
        if response.status != HTTP_OK {
            let err = RequestError::from_status(response.status);
            tracing::warn!(status = response.status, "request failed with HTTP status");
            if response.status == 401 {
                self.handle_unauthorized();
            }
            self.notifier.toast(&err.to_string());
            return Err(err);
        }

        let envelope = Envelope::from_value(response.body).inspect_err(|e| {
            tracing::warn!(error = ?e, "{}", MSG_DECODE);
        })?;
        self.unwrap_envelope(envelope, MSG_REQUEST_FAILED)
    }

    /// Resolve a decoded envelope, classifying non-200 business codes
    fn unwrap_envelope(&self, envelope: Envelope, fallback: &str) -> Result<Value> {
        if envelope.is_success() {
            return Ok(envelope.data);
        }

        let message = envelope.message.as_deref();
        tracing::warn!(
            code = envelope.code,
            server_message = message,
            "request failed with business code"
        );

        match envelope.code {
            401 => {
                self.handle_unauthorized();
                Err(RequestError::business(401, message, fallback))
            }
            403 => {
                let err = RequestError::business(403, message, MSG_INSUFFICIENT_PERMISSION);
                self.notifier.toast(&err.to_string());
                Err(err)
            }
            code => {
                let err = RequestError::business(code, message, fallback);
                self.notifier.toast(&err.to_string());
                Err(err)
            }
        }
    }

    fn handle_transport_failure(&self, failure: &TransportFailure) -> RequestError {
        let timed_out = failure.is_timeout();
        let message = if timed_out { MSG_TIMEOUT } else { MSG_NETWORK };
        tracing::warn!(signal = %failure, "transport failure");

        self.notifier.toast(message);
        RequestError::Transport {
            timed_out,
            message: message.to_string(),
        }
    }

    /// Drop the credential and relaunch into the login route
    fn handle_unauthorized(&self) {
        if let Err(e) = self.credentials().clear() {
            tracing::warn!(error = %e, "failed to clear credential");
        }
        let route = &self.settings().login_route;
        tracing::info!(route = %route, "credential invalidated, relaunching to login");
        self.navigator.relaunch(route);
    }

    /// Upload a local file as multipart and resolve with the envelope payload
    pub async fn upload(&self, target: UploadTarget) -> Result<Value> {
        let settings = self.settings();

        let mut headers = merge_headers([&target.headers]);
        self.authorize(&mut headers);

        let url = settings.url_for(&target.path);
        validate_request(&url, &headers).inspect_err(|e| {
            tracing::warn!(error = %e, "upload rejected before dispatch");
        })?;

        let request = UploadRequest {
            url,
            file_path: target.file_path.clone(),
            field_name: target.field_name.clone(),
            extra_fields: target.extra_fields.clone(),
            headers,
            timeout: settings.timeout(),
        };

        let loading = target.show_loading_indicator.then(|| {
            let text = target
                .loading_text
                .as_deref()
                .unwrap_or(&settings.upload_loading_text);
            self.loading.acquire(text)
        });

        tracing::debug!(url = %request.url, field = %request.field_name, "uploading file");
        let outcome = self.transport.upload(request).await;
        drop(loading);

        let raw = match outcome {
            Ok(raw) => raw,
            Err(failure) => {
                tracing::warn!(signal = %failure, "upload transport failure");
                self.notifier.toast(MSG_UPLOAD_FAILED);
                return Err(RequestError::Transport {
                    timed_out: failure.is_timeout(),
                    message: MSG_UPLOAD_FAILED.to_string(),
                });
            }
        };

        let envelope = Envelope::from_text(&raw).inspect_err(|e| {
            tracing::warn!(error = ?e, "{}", MSG_DECODE);
        })?;
        self.unwrap_envelope(envelope, MSG_UPLOAD_FAILED)
    }

    /// Build a request config exactly as `get`/`post`/`put`/`delete` would
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestConfig> {
        Ok(RequestConfig::new(method, path).with_body(to_body(body)?))
    }
}

/// Merge header layers into one map keyed by lowercase name; later layers win
fn merge_headers<'a>(
    layers: impl IntoIterator<Item = &'a BTreeMap<String, String>>,
) -> BTreeMap<String, String> {
    layers
        .into_iter()
        .flatten()
        .map(|(name, value)| (name.to_ascii_lowercase(), value.clone()))
        .collect()
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("base_url", &self.settings().base_url)
            .field("loading", &self.loading)
            .finish()
    }
}
