//! The submission pipeline
//!
//! Runs one submission through four sequential stages:
//! 1. Transform - optional mapping of raw input to submission data
//! 2. Confirm - optional user approval; declining aborts silently
//! 3. Diff & encode - drop unchanged fields, encode for endpoints
//! 4. Dispatch & route - send, then fire exactly one outcome hook
//!
//! [`Submitter::evaluate`] is side-effect free apart from the dispatch
//! itself and returns an [`Outcome`]. [`Submitter::submit`] turns that outcome
//! into flag updates and hook calls.

use crate::error::{Error, Result};
use crate::submit::{
    Confirmer, Destination, DialoguerConfirmer, NoopHooks, SubmitEvent, SubmitHooks, Transform,
    diff_against_baseline, encode_parts, merge_into_baseline,
};
use crate::transport::{HttpTransport, Transport, TransportResponse};
use crate::types::FormData;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

/// Validated pipeline configuration
///
/// Fixed for the lifetime of a [`Submitter`].
#[derive(Clone)]
pub struct SubmitConfig {
    destination: Destination,
    baseline: Option<FormData>,
    transform: Option<Arc<dyn Transform>>,
    confirmation: Option<String>,
    refresh_baseline: bool,
}

impl SubmitConfig {
    /// Start building a configuration for `destination`
    pub fn builder(destination: Destination) -> SubmitConfigBuilder {
        SubmitConfigBuilder {
            destination,
            baseline: None,
            transform: None,
            confirmation: None,
            refresh_baseline: false,
        }
    }

    /// Configured destination
    pub const fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Configured baseline values
    pub const fn baseline(&self) -> Option<&FormData> {
        self.baseline.as_ref()
    }

    /// Confirmation message, if the gate is enabled
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    /// Whether `mutate` receives the refreshed baseline
    pub const fn refresh_baseline(&self) -> bool {
        self.refresh_baseline
    }
}

impl fmt::Debug for SubmitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitConfig")
            .field("destination", &self.destination)
            .field("baseline", &self.baseline)
            .field("transform", &self.transform.is_some())
            .field("confirmation", &self.confirmation)
            .field("refresh_baseline", &self.refresh_baseline)
            .finish()
    }
}

/// Builder for [`SubmitConfig`]
pub struct SubmitConfigBuilder {
    destination: Destination,
    baseline: Option<FormData>,
    transform: Option<Arc<dyn Transform>>,
    confirmation: Option<String>,
    refresh_baseline: bool,
}

impl fmt::Debug for SubmitConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitConfigBuilder")
            .field("destination", &self.destination)
            .field("baseline", &self.baseline)
            .field("transform", &self.transform.is_some())
            .field("confirmation", &self.confirmation)
            .field("refresh_baseline", &self.refresh_baseline)
            .finish()
    }
}

impl SubmitConfigBuilder {
    /// Baseline values to diff against
    #[must_use]
    pub fn baseline(mut self, baseline: FormData) -> Self {
        self.baseline = Some(baseline);
        self
    }

    /// Transform applied to raw input before anything else
    #[must_use]
    pub fn transform(mut self, transform: impl Transform + 'static) -> Self {
        self.transform = Some(Arc::new(transform));
        self
    }

    /// Message the user must approve before dispatch
    #[must_use]
    pub fn confirmation(mut self, message: impl Into<String>) -> Self {
        self.confirmation = Some(message.into());
        self
    }

    /// Pass the merged baseline to `mutate` instead of the submitted data
    #[must_use]
    pub const fn refresh_baseline(mut self, enabled: bool) -> Self {
        self.refresh_baseline = enabled;
        self
    }

    /// Validate and finish the configuration
    pub fn build(self) -> Result<SubmitConfig> {
        if let Destination::Endpoint(endpoint) = &self.destination {
            let method = endpoint.effective_method();
            reqwest::Method::from_bytes(method.as_bytes())
                .map_err(|_| Error::Config(format!("invalid HTTP method: {method}")))?;
        }

        if self.refresh_baseline && self.baseline.is_none() {
            return Err(Error::Config(
                "baseline refresh requires baseline values".to_string(),
            ));
        }

        // An empty message disables the gate
        let confirmation = self.confirmation.filter(|m| !m.trim().is_empty());

        Ok(SubmitConfig {
            destination: self.destination,
            baseline: self.baseline,
            transform: self.transform,
            confirmation,
            refresh_baseline: self.refresh_baseline,
        })
    }
}

/// Result of evaluating one submission
#[derive(Debug)]
pub enum Outcome {
    /// Destination reported success
    Success {
        /// Transformed submission data
        data: FormData,
        /// Endpoint response; `None` for actions
        response: Option<TransportResponse>,
    },
    /// Destination reported non-success
    Failure {
        /// Transformed submission data
        data: FormData,
        /// Endpoint response; `None` for actions
        response: Option<TransportResponse>,
    },
    /// User declined confirmation
    Aborted,
    /// A stage raised an error
    Errored(Error),
}

impl Outcome {
    /// Data-free summary of this outcome
    pub const fn kind(&self) -> OutcomeKind {
        match self {
            Self::Success { .. } => OutcomeKind::Success,
            Self::Failure { .. } => OutcomeKind::Failure,
            Self::Aborted => OutcomeKind::Aborted,
            Self::Errored(_) => OutcomeKind::Errored,
        }
    }
}

/// Summary of how a submission ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    /// Destination reported success
    Success,
    /// Destination reported non-success
    Failure,
    /// User declined confirmation
    Aborted,
    /// A stage raised an error
    Errored,
}

/// A configured submission pipeline
///
/// The only state carried across calls is the "last submission failed" flag.
/// Overlapping submissions are not serialized; whichever completes last
/// writes the flag.
pub struct Submitter {
    config: SubmitConfig,
    transport: Arc<dyn Transport>,
    confirmer: Arc<dyn Confirmer>,
    hooks: Arc<dyn SubmitHooks>,
    failed: AtomicBool,
}

impl Submitter {
    /// Create a submitter with an HTTP transport, a terminal prompt and no hooks
    pub fn new(config: SubmitConfig) -> Self {
        Self {
            config,
            transport: Arc::new(HttpTransport::new()),
            confirmer: Arc::new(DialoguerConfirmer),
            hooks: Arc::new(NoopHooks),
            failed: AtomicBool::new(false),
        }
    }

    /// Replace the transport
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// Replace the confirmation prompt
    #[must_use]
    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    /// Set the outcome hooks
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn SubmitHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Pipeline configuration
    pub const fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// Whether the most recently completed submission failed or errored
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    /// Submit `raw` and route the outcome to the hooks
    ///
    /// Never returns an error: everything ends in a hook or a silent abort.
    /// Flag updates: success clears it, failure and error set it, an abort
    /// leaves it untouched.
    pub async fn submit(
        &self,
        raw: FormData,
        event: Option<&mut (dyn SubmitEvent + Send)>,
    ) -> OutcomeKind {
        if let Some(event) = event {
            event.prevent_default();
        }

        let outcome = self.evaluate(raw.clone()).await;
        let kind = outcome.kind();

        match outcome {
            Outcome::Success { data, response } => {
                self.failed.store(false, Ordering::SeqCst);
                if self.hooks.wants_mutate() {
                    let mutation = self.mutation_for(&data);
                    self.hooks.mutate(&mutation).await;
                }
                self.hooks.on_success(&data, response.as_ref()).await;
                self.hooks.reset(None).await;
            }
            Outcome::Failure { data, response } => {
                self.failed.store(true, Ordering::SeqCst);
                self.hooks.on_failure(&data, response.as_ref()).await;
                self.hooks.reset(Some(&raw)).await;
            }
            Outcome::Aborted => {}
            Outcome::Errored(error) => {
                self.failed.store(true, Ordering::SeqCst);
                warn!("Submission errored: {error}");
                self.hooks.on_error(&error).await;
            }
        }

        kind
    }

    /// Run the pipeline without touching the flag or the hooks
    pub async fn evaluate(&self, raw: FormData) -> Outcome {
        let data = match self.apply_transform(raw).await {
            Ok(data) => data,
            Err(e) => return Outcome::Errored(e),
        };

        if let Some(message) = self.config.confirmation() {
            match self.confirmer.confirm(message) {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Submission declined at confirmation");
                    return Outcome::Aborted;
                }
                Err(e) => return Outcome::Errored(e),
            }
        }

        match self.dispatch(&data).await {
            Ok((true, response)) => Outcome::Success { data, response },
            Ok((false, response)) => Outcome::Failure { data, response },
            Err(e) => Outcome::Errored(e),
        }
    }

    /// Fields of `data` that would be sent, after diffing against the baseline
    pub fn prepare(&self, data: &FormData) -> FormData {
        diff_against_baseline(data, self.config.baseline())
    }

    /// Value handed to `mutate` after a successful submission of `data`
    pub fn mutation_for(&self, data: &FormData) -> FormData {
        match self.config.baseline() {
            Some(baseline) if self.config.refresh_baseline => merge_into_baseline(baseline, data),
            _ => data.clone(),
        }
    }

    async fn apply_transform(&self, raw: FormData) -> Result<FormData> {
        match &self.config.transform {
            Some(transform) => transform.apply(raw).await,
            None => Ok(raw),
        }
    }

    async fn dispatch(&self, data: &FormData) -> Result<(bool, Option<TransportResponse>)> {
        let diff = self.prepare(data);

        match &self.config.destination {
            Destination::Endpoint(endpoint) => {
                let parts = encode_parts(&diff)?;
                let request = endpoint.request(parts);
                debug!("Dispatching {} field(s) to {}", diff.len(), endpoint.url());
                let response = self.transport.send(request).await?;
                Ok((response.ok, Some(response)))
            }
            Destination::Action(action) => {
                debug!("Dispatching {} field(s) to action", diff.len());
                let ok = action.run(&diff).await?;
                Ok((ok, None))
            }
        }
    }
}

impl fmt::Debug for Submitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submitter")
            .field("config", &self.config)
            .field("failed", &self.failed())
            .finish_non_exhaustive()
    }
}
