//! Confirmation gate

use crate::error::{Error, Result};
use tokio::runtime::{Handle, RuntimeFlavor};

/// Synchronous user-approval prompt
///
/// Called from inside the async pipeline. Implementations that block on
/// user input should go through [`blocking`] so they do not stall the
/// runtime's other tasks.
pub trait Confirmer: Send + Sync {
    /// Ask the user to approve `message`; `Ok(false)` means declined
    fn confirm(&self, message: &str) -> Result<bool>;
}

/// Run blocking work from synchronous code that may sit on a runtime worker
///
/// On a multi-threaded runtime the worker hands its other tasks off first.
/// Current-thread runtimes and plain threads just run `f`.
pub fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

/// Interactive terminal prompt
pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, message: &str) -> Result<bool> {
        blocking(|| {
            dialoguer::Confirm::new()
                .with_prompt(message)
                .default(false)
                .interact()
                .map_err(|e| Error::Prompt(e.to_string()))
        })
    }
}

/// Fixed answer, for non-interactive runs (`--yes`) and tests
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, _message: &str) -> Result<bool> {
        Ok(self.0)
    }
}
