//! Network transport for endpoint submissions
//!
//! Provides the seam between the submission pipeline and the wire, so the
//! same pipeline can run against a real HTTP client or a test double.

mod http;
mod options;

pub use http::HttpTransport;
pub use options::TransportOptions;

use crate::error::Result;
use crate::submit::EncodedPart;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::time::Duration;

/// A fully prepared endpoint request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: String,
    /// Target URL
    pub url: url::Url,
    /// Encoded multipart body
    pub parts: Vec<EncodedPart>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
    /// Extra query pairs
    pub query: Vec<(String, String)>,
    /// Per-request timeout, if any
    pub timeout: Option<Duration>,
}

/// Response reported by a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Whether the status is in the 2xx range
    pub ok: bool,
    /// Response headers (lowercased names)
    pub headers: BTreeMap<String, String>,
    /// Response body as text
    pub body: String,
}

impl TransportResponse {
    /// Build a response from a status code and body
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            ok: (200..300).contains(&status),
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }
}

/// Transport trait for issuing endpoint requests
///
/// A non-2xx response is a normal `Ok` value; only failures to complete
/// the exchange at all are errors.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the response
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse>;
}
