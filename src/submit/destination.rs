//! Submission destinations: an HTTP endpoint or an arbitrary action

use crate::error::{Error, Result};
use crate::submit::EncodedPart;
use crate::transport::{TransportOptions, TransportRequest};
use crate::types::FormData;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Method used when none is configured
pub const DEFAULT_METHOD: &str = "POST";

/// An async side-effecting submission target
///
/// Receives the diffed data and reports whether the submission succeeded.
/// Returning `Err` is treated as an exception, not as a failure.
#[async_trait]
pub trait SubmitAction: Send + Sync {
    /// Run the action
    async fn run(&self, data: &FormData) -> Result<bool>;
}

#[async_trait]
impl<F> SubmitAction for F
where
    F: Fn(&FormData) -> Result<bool> + Send + Sync,
{
    async fn run(&self, data: &FormData) -> Result<bool> {
        self(data)
    }
}

/// A network endpoint plus how to call it
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: url::Url,
    method: String,
    options: TransportOptions,
}

impl Endpoint {
    /// Create an endpoint, validating the URL
    pub fn new(url: &str) -> Result<Self> {
        let parsed = url::Url::parse(url).map_err(|e| Error::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            url: parsed,
            method: DEFAULT_METHOD.to_string(),
            options: TransportOptions::default(),
        })
    }

    /// Set the HTTP method
    #[must_use]
    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    /// Set the caller-supplied transport options
    #[must_use]
    pub fn options(mut self, options: TransportOptions) -> Self {
        self.options = options;
        self
    }

    /// Endpoint URL
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Method that will actually be sent, after options are applied
    pub fn effective_method(&self) -> String {
        self.options.resolve_method(&self.method)
    }

    /// Build the request for an encoded payload
    pub fn request(&self, parts: Vec<EncodedPart>) -> TransportRequest {
        TransportRequest {
            method: self.effective_method(),
            url: self.url.clone(),
            parts,
            headers: self.options.headers.clone(),
            query: self.options.query.clone(),
            timeout: self.options.timeout(),
        }
    }
}

/// Where a submission goes
#[derive(Clone)]
pub enum Destination {
    /// Encode and send to an HTTP endpoint
    Endpoint(Endpoint),
    /// Hand the diffed data to an action
    Action(Arc<dyn SubmitAction>),
}

impl Destination {
    /// Endpoint destination from a URL, with default method and options
    pub fn endpoint(url: &str) -> Result<Self> {
        Endpoint::new(url).map(Self::Endpoint)
    }

    /// Action destination
    pub fn action(action: impl SubmitAction + 'static) -> Self {
        Self::Action(Arc::new(action))
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Endpoint(endpoint) => f.debug_tuple("Endpoint").field(endpoint).finish(),
            Self::Action(_) => f.write_str("Action(..)"),
        }
    }
}
