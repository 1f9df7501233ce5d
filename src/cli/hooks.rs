//! Terminal outcome hooks

use crate::cli::style::{Stylize, check, cross};
use anstream::{eprintln, println};
use async_trait::async_trait;
use diffpost::error::Error;
use diffpost::submit::SubmitHooks;
use diffpost::transport::TransportResponse;
use diffpost::types::{FormData, form_data_to_json};
use std::path::PathBuf;

/// Longest response body echoed back to the terminal
const MAX_BODY_CHARS: usize = 400;

/// Hooks that report the outcome on stdout/stderr
///
/// With baseline refresh enabled, the refreshed baseline is written back to
/// the baseline file, or printed when the baseline came from a profile.
#[derive(Debug, Default)]
pub struct CliHooks {
    refresh_baseline: bool,
    baseline_file: Option<PathBuf>,
}

impl CliHooks {
    /// Hooks for one submission; `baseline_file` is the `--baseline` path
    pub const fn new(refresh_baseline: bool, baseline_file: Option<PathBuf>) -> Self {
        Self {
            refresh_baseline,
            baseline_file,
        }
    }

    async fn write_baseline(&self, baseline: &FormData) -> diffpost::error::Result<()> {
        let json = serde_json::to_string_pretty(&form_data_to_json(baseline))?;
        match &self.baseline_file {
            Some(path) => {
                tokio::fs::write(path, format!("{json}\n")).await?;
                println!(
                    "{} Baseline refreshed in {}",
                    check(),
                    path.display().accent()
                );
            }
            None => {
                println!("{} Refreshed baseline:", check());
                println!("{}", json.muted());
            }
        }
        Ok(())
    }
}

fn print_body(response: Option<&TransportResponse>) {
    let Some(response) = response else {
        return;
    };
    let body = response.body.trim();
    if body.is_empty() {
        return;
    }

    let shown = if body.chars().count() > MAX_BODY_CHARS {
        format!("{}...", body.chars().take(MAX_BODY_CHARS).collect::<String>())
    } else {
        body.to_string()
    };
    println!("  {}", shown.muted());
}

#[async_trait]
impl SubmitHooks for CliHooks {
    fn wants_mutate(&self) -> bool {
        self.refresh_baseline
    }

    async fn mutate(&self, data: &FormData) {
        if let Err(e) = self.write_baseline(data).await {
            eprintln!("{}: could not refresh baseline: {e}", "warning".warn());
        }
    }

    async fn on_success(&self, _data: &FormData, response: Option<&TransportResponse>) {
        match response {
            Some(r) => println!("{} {} ({})", check(), "Submitted".success(), r.status.accent()),
            None => println!("{} {}", check(), "Submitted".success()),
        }
        print_body(response);
    }

    async fn on_failure(&self, _data: &FormData, response: Option<&TransportResponse>) {
        match response {
            Some(r) => eprintln!(
                "{} Submission rejected with status {}",
                cross(),
                r.status.error()
            ),
            None => eprintln!("{} Submission rejected", cross()),
        }
        print_body(response);
    }

    async fn on_error(&self, error: &Error) {
        eprintln!("{}: {}", "error".error(), error);
    }
}
