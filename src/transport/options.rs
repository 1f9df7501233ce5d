//! Caller-supplied transport options

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Extra options merged into every endpoint request
///
/// Caller values win over constructed ones, except that an empty method
/// override is ignored. The multipart body is always the encoded payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportOptions {
    /// Method override
    pub method: Option<String>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
    /// Extra query string pairs
    pub query: Vec<(String, String)>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl TransportOptions {
    /// Pick the method to send: the override if non-empty, else `constructed`
    pub fn resolve_method(&self, constructed: &str) -> String {
        self.method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(constructed)
            .to_ascii_uppercase()
    }

    /// Request timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}
