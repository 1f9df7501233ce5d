//! Mock transport for testing
//!
//! Records every request and replies with a canned response or error.

#![allow(dead_code)]

use async_trait::async_trait;
use diffpost::error::{Error, Result};
use diffpost::submit::EncodedPart;
use diffpost::transport::{Transport, TransportRequest, TransportResponse};
use std::sync::Mutex;

/// Transport double with call tracking and error injection
pub struct MockTransport {
    response: Mutex<TransportResponse>,
    error: Mutex<Option<String>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    /// Reply with the given status and body
    pub fn replying(status: u16, body: &str) -> Self {
        Self {
            response: Mutex::new(TransportResponse::new(status, body)),
            error: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Make `send` fail as if the network were down
    pub fn fail_with(&self, msg: &str) {
        *self.error.lock().unwrap() = Some(msg.to_string());
    }

    /// Stop injecting errors
    pub fn recover(&self) {
        *self.error.lock().unwrap() = None;
    }

    /// All requests sent so far
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Field names of the only request sent
    pub fn sent_field_names(&self) -> Vec<String> {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests[0]
            .parts
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Text value of a part in the only request
    pub fn sent_text(&self, name: &str) -> Option<String> {
        self.requests()
            .first()?
            .parts
            .iter()
            .find_map(|p| match p {
                EncodedPart::Text { name: n, value } if n == name => Some(value.clone()),
                _ => None,
            })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(msg) = self.error.lock().unwrap().as_ref() {
            return Err(Error::Config(msg.clone()));
        }

        Ok(self.response.lock().unwrap().clone())
    }
}
