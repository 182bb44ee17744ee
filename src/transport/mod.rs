//! Outbound transport for hits.
//!
//! One call, one request. Nothing here retries, queues or times out on its own.

pub mod http;

pub use http::HttpTransport;

use crate::error::Result;
use std::sync::Arc;

/// What came back from the collection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// Numeric status code
    pub status: u16,
    /// e.g. `HTTP/1.1 200 OK`
    pub status_line: String,
    /// Raw body
    pub body: String,
}

impl TransportResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// POSTs a form-encoded body.
///
/// Connection-level failures are reported as [`GaError::Transport`](crate::GaError::Transport)
/// with the failure description in place of a status line. Non-200 statuses
/// are returned as a normal response; the tracker decides what counts as success.
pub trait Transport {
    fn post_form(&self, uri: &str, body: &str) -> Result<TransportResponse>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn post_form(&self, uri: &str, body: &str) -> Result<TransportResponse> {
        (**self).post_form(uri, body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post_form(&self, uri: &str, body: &str) -> Result<TransportResponse> {
        (**self).post_form(uri, body)
    }
}
