//! diffpost - change-aware form submission
//!
//! Wraps a form submission in a small pipeline: an optional transform, an
//! optional confirmation gate, a diff against known baseline values, and a
//! dispatch to either an HTTP endpoint (multipart encoded) or an arbitrary
//! async action. The outcome is routed to caller-supplied hooks.

pub mod config;
pub mod error;
pub mod submit;
pub mod transport;
pub mod types;
