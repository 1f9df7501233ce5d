//! Outcome hooks for interface-agnostic reporting
//!
//! Callers implement [`SubmitHooks`] to react to a submission's outcome.
//! Every method has a no-op default, so implementors only override what they
//! care about.

use crate::error::Error;
use crate::transport::TransportResponse;
use crate::types::FormData;
use async_trait::async_trait;

/// Submission outcome hooks
///
/// Exactly one of `on_success`, `on_failure` or `on_error` fires per
/// completed submission. None fire when the user declines confirmation.
#[async_trait]
pub trait SubmitHooks: Send + Sync {
    /// Called after an explicit success
    ///
    /// `response` is `None` for action destinations.
    async fn on_success(&self, _data: &FormData, _response: Option<&TransportResponse>) {}

    /// Called after an explicit non-success (e.g. a 4xx/5xx response)
    async fn on_failure(&self, _data: &FormData, _response: Option<&TransportResponse>) {}

    /// Called when any pipeline stage raised an error
    async fn on_error(&self, _error: &Error) {}

    /// Called after success, before `on_success`, when [`Self::wants_mutate`]
    ///
    /// Receives either the submitted data or, with baseline refresh enabled,
    /// the baseline merged with the submitted values.
    async fn mutate(&self, _data: &FormData) {}

    /// Reset host form state: `None` after success, the raw input after failure
    async fn reset(&self, _raw: Option<&FormData>) {}

    /// Whether `mutate` should be invoked at all
    fn wants_mutate(&self) -> bool {
        false
    }
}

/// No-op hooks for testing or fire-and-forget submissions
pub struct NoopHooks;

#[async_trait]
impl SubmitHooks for NoopHooks {}
