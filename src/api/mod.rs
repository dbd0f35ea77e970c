//! API Module
//!
//! Request/envelope wire types and the REST endpoint catalog.

pub mod endpoints;
pub mod request;

pub use endpoints::{
    AuthApi, CommentApi, DiscoverApi, MessageApi, Page, PostApi, SystemApi, TopicApi, UploadApi,
    UserApi,
};
pub use request::{
    to_body, Envelope, Method, RequestConfig, UploadTarget, DEFAULT_UPLOAD_FIELD, SUCCESS_CODE,
};
