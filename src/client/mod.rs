//! Client Module
//!
//! Transport port, the reqwest transport, the shared loading indicator and the
//! client context.

pub mod context;
pub mod http;
pub mod loading;
pub mod transport;

pub use context::ClientContext;
pub use http::{validate_request, ReqwestTransport};
pub use loading::{LoadingGuard, LoadingIndicator};
pub use transport::{Transport, TransportFailure, TransportRequest, TransportResponse, UploadRequest};
