//! In-memory fakes for the capability ports, shared by the unit tests.

use crate::client::{
    ClientContext, Transport, TransportFailure, TransportRequest, TransportResponse, UploadRequest,
};
use crate::config::ClientSettings;
use crate::platform::{Navigator, Notifier};
use crate::RequestClient;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Transport that replays scripted outcomes and records what it was asked to send
#[derive(Default)]
pub struct FakeTransport {
    pub responses: Mutex<VecDeque<Result<TransportResponse, TransportFailure>>>,
    pub uploads: Mutex<VecDeque<Result<String, TransportFailure>>>,
    pub sent: Mutex<Vec<TransportRequest>>,
    pub uploaded: Mutex<Vec<UploadRequest>>,
    /// Delay applied before answering, to let concurrent calls overlap
    pub delay: Option<Duration>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: Value) {
        self.responses
            .lock()
            .push_back(Ok(TransportResponse::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .lock()
            .push_back(Err(TransportFailure::new(message)));
    }

    pub fn respond_upload(&self, raw: &str) {
        self.uploads.lock().push_back(Ok(raw.to_string()));
    }

    pub fn fail_upload(&self, message: &str) {
        self.uploads
            .lock()
            .push_back(Err(TransportFailure::new(message)));
    }

    pub fn last_sent(&self) -> TransportRequest {
        self.sent.lock().last().cloned().expect("nothing was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        self.sent.lock().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().pop_front();
        next.unwrap_or_else(|| Ok(TransportResponse::new(200, serde_json::json!({"code": 200, "data": null}))))
    }

    async fn upload(&self, request: UploadRequest) -> Result<String, TransportFailure> {
        self.uploaded.lock().push(request);
        let next = self.uploads.lock().pop_front();
        next.unwrap_or_else(|| Ok(r#"{"code":200,"data":null}"#.to_string()))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn relaunch(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<String>>,
    /// `show:<text>` / `hide` in call order
    pub loading: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn shows(&self) -> usize {
        self.loading
            .lock()
            .iter()
            .filter(|e| e.starts_with("show:"))
            .count()
    }

    pub fn hides(&self) -> usize {
        self.loading.lock().iter().filter(|e| *e == "hide").count()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn toast(&self, message: &str) {
        self.toasts.lock().push(message.to_string());
    }

    fn show_loading(&self, text: &str) {
        self.loading.lock().push(format!("show:{}", text));
    }

    fn hide_loading(&self) {
        self.loading.lock().push("hide".to_string());
    }

    async fn modal(&self, _title: &str, _content: &str) -> bool {
        true
    }
}

/// A client wired to fakes, with handles to every fake
pub struct Harness {
    pub client: RequestClient,
    pub transport: Arc<FakeTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(FakeTransport::default())
    }

    pub fn with_transport(transport: FakeTransport) -> Self {
        Self::build(transport, ClientSettings::with_base_url("https://api.test"))
    }

    pub fn with_settings(settings: ClientSettings) -> Self {
        Self::build(FakeTransport::default(), settings)
    }

    fn build(transport: FakeTransport, settings: ClientSettings) -> Self {
        let transport = Arc::new(transport);
        let navigator = Arc::new(RecordingNavigator::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let context = ClientContext::in_memory(settings);

        let client = RequestClient::new(
            context,
            transport.clone(),
            navigator.clone(),
            notifier.clone(),
        );

        Self {
            client,
            transport,
            navigator,
            notifier,
        }
    }
}
