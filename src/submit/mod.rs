//! Change-aware submission pipeline
//!
//! Handles the lifecycle of a single form submission:
//! 1. Transform - map raw input to submission data
//! 2. Confirm - optionally ask the user before going further
//! 3. Diff & encode - keep only fields that changed against the baseline
//! 4. Dispatch - send to an endpoint or action and route the outcome

mod confirm;
mod destination;
mod diff;
mod encode;
mod hooks;
mod pipeline;
mod transform;

pub use confirm::{AutoConfirm, Confirmer, DialoguerConfirmer, blocking};
pub use destination::{DEFAULT_METHOD, Destination, Endpoint, SubmitAction};
pub use diff::{diff_against_baseline, files_equal, merge_into_baseline, values_equal};
pub use encode::{EncodedPart, encode_parts, into_multipart};
pub use hooks::{NoopHooks, SubmitHooks};
pub use pipeline::{Outcome, OutcomeKind, SubmitConfig, SubmitConfigBuilder, Submitter};
pub use transform::{SubmitEvent, Transform};
