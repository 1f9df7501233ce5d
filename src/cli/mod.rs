//! CLI commands
//!
//! Command implementations for the `diffpost` binary.

mod diff;
mod fields;
mod hooks;
mod style;
mod submit;

pub use diff::run_diff;
pub use fields::FieldArgs;
pub use submit::{SubmitOptions, run_submit};
