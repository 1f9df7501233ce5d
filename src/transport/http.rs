//! HTTP transport using reqwest

use crate::error::{Error, Result};
use crate::submit::into_multipart;
use crate::transport::{Transport, TransportRequest, TransportResponse};
use async_trait::async_trait;
use reqwest::{Client, Method, Request};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Headers owned by the multipart body
const FRAMING_HEADERS: [&str; 2] = ["content-type", "content-length"];

/// HTTP transport backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default timeout
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    /// Build the reqwest request for `request`
    ///
    /// Caller headers never override the multipart framing: `content-type`
    /// and `content-length` from the options are dropped.
    fn build_request(&self, request: TransportRequest) -> Result<Request> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| Error::Config(format!("invalid HTTP method: {}", request.method)))?;

        debug!(
            "{} {} with {} part(s)",
            method,
            request.url,
            request.parts.len()
        );

        let mut builder = self.client.request(method, request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            if is_framing_header(name) {
                warn!("Ignoring caller header '{name}': the multipart body sets it");
                continue;
            }
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(builder.multipart(into_multipart(request.parts)?).build()?)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

fn is_framing_header(name: &str) -> bool {
    FRAMING_HEADERS
        .iter()
        .any(|framing| name.trim().eq_ignore_ascii_case(framing))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        let request = self.build_request(request)?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.text().await?;

        debug!("Endpoint responded {status}");

        Ok(TransportResponse {
            status: status.as_u16(),
            ok: status.is_success(),
            headers,
            body,
        })
    }
}
