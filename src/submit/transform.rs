//! Pre-diff transform stage and the triggering event

use crate::error::Result;
use crate::types::FormData;
use async_trait::async_trait;

/// Maps raw form input to submission-shaped data
///
/// Called exactly once per submission, before confirmation. Errors are
/// routed to the error hook.
#[async_trait]
pub trait Transform: Send + Sync {
    /// Apply the transform
    async fn apply(&self, raw: FormData) -> Result<FormData>;
}

#[async_trait]
impl<F> Transform for F
where
    F: Fn(FormData) -> Result<FormData> + Send + Sync,
{
    async fn apply(&self, raw: FormData) -> Result<FormData> {
        self(raw)
    }
}

/// The host event that triggered a submission
pub trait SubmitEvent {
    /// Suppress the event's default action
    fn prevent_default(&mut self);
}
