//! Submission profiles
//!
//! A profile is a JSON file describing a reusable submission target:
//!
//! ```json
//! {
//!   "url": "https://example.com/users/1",
//!   "method": "PATCH",
//!   "confirmation": "Save changes?",
//!   "baseline": { "name": "Nir", "age": 30 },
//!   "headers": { "authorization": "Bearer ..." },
//!   "timeout_secs": 10,
//!   "refresh_baseline": false
//! }
//! ```

use crate::error::{Error, Result};
use crate::submit::{Destination, Endpoint, SubmitConfig, SubmitConfigBuilder};
use crate::transport::TransportOptions;
use crate::types::{FormData, form_data_from_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A reusable submission target
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Endpoint URL
    pub url: Option<String>,
    /// HTTP method (defaults to POST)
    pub method: Option<String>,
    /// Confirmation message
    pub confirmation: Option<String>,
    /// Baseline values as a JSON object
    pub baseline: Option<serde_json::Value>,
    /// Extra request headers
    pub headers: BTreeMap<String, String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Hand the merged baseline to `mutate` after success
    pub refresh_baseline: bool,
}

impl Profile {
    /// Load a profile from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading profile from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("invalid profile {}: {e}", path.display())))
    }

    /// Baseline values as form data
    pub fn baseline_data(&self) -> Result<Option<FormData>> {
        self.baseline
            .clone()
            .map(|value| {
                form_data_from_json(value)
                    .ok_or_else(|| Error::Config("profile baseline must be an object".to_string()))
            })
            .transpose()
    }

    /// Transport options described by this profile
    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            method: None,
            headers: self.headers.clone(),
            query: Vec::new(),
            timeout_secs: self.timeout_secs,
        }
    }

    /// Turn this profile into a pipeline configuration builder
    pub fn into_builder(self) -> Result<SubmitConfigBuilder> {
        let url = self
            .url
            .as_deref()
            .ok_or_else(|| Error::Config("profile has no url".to_string()))?;

        let mut endpoint = Endpoint::new(url)?.options(self.transport_options());
        if let Some(method) = &self.method {
            endpoint = endpoint.method(method);
        }

        let mut builder =
            SubmitConfig::builder(Destination::Endpoint(endpoint)).refresh_baseline(self.refresh_baseline);
        if let Some(baseline) = self.baseline_data()? {
            builder = builder.baseline(baseline);
        }
        if let Some(message) = self.confirmation {
            builder = builder.confirmation(message);
        }

        Ok(builder)
    }
}

/// Load a baseline from a JSON file containing an object
pub fn load_baseline(path: &Path) -> Result<FormData> {
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;
    form_data_from_json(value).ok_or_else(|| {
        Error::Config(format!("baseline {} must be a JSON object", path.display()))
    })
}
