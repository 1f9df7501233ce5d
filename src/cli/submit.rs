//! Submit command - diff fields against a baseline and post the changes

use crate::cli::FieldArgs;
use crate::cli::diff::print_field_diff;
use crate::cli::fields::split_header;
use crate::cli::hooks::CliHooks;
use crate::cli::style::Stylize;
use anstream::{eprintln, println};
use diffpost::config::Profile;
use diffpost::error::Result;
use diffpost::submit::{
    AutoConfirm, Confirmer, Destination, DialoguerConfirmer, OutcomeKind, SubmitConfig, Submitter,
    diff_against_baseline,
};
use diffpost::types::FormData;
use std::path::PathBuf;
use std::sync::Arc;

/// Flags of the submit command, on top of the field arguments
#[derive(Debug, Default)]
pub struct SubmitOptions {
    /// Endpoint URL, overriding the profile
    pub url: Option<String>,
    /// Profile file
    pub profile: Option<PathBuf>,
    /// HTTP method, overriding the profile
    pub method: Option<String>,
    /// Extra `NAME:VALUE` headers
    pub headers: Vec<String>,
    /// Confirmation message, overriding the profile
    pub confirmation: Option<String>,
    /// Skip the confirmation prompt
    pub yes: bool,
    /// Refresh the baseline after a successful submission
    pub refresh_baseline: bool,
    /// Show what would be sent without sending it
    pub dry_run: bool,
}

/// Merge command-line overrides into the profile
fn resolve_profile(options: SubmitOptions) -> Result<Profile> {
    let mut profile = match &options.profile {
        Some(path) => Profile::load(path)?,
        None => Profile::default(),
    };

    if let Some(url) = options.url {
        profile.url = Some(url);
    }
    if let Some(method) = options.method {
        profile.method = Some(method);
    }
    if let Some(message) = options.confirmation {
        profile.confirmation = Some(message);
    }
    if options.refresh_baseline {
        profile.refresh_baseline = true;
    }
    for header in &options.headers {
        let (name, value) = split_header(header)?;
        profile.headers.insert(name, value);
    }

    Ok(profile)
}

/// Report what would be sent in a dry run
fn report_dry_run(config: &SubmitConfig, data: &FormData) {
    if let Destination::Endpoint(endpoint) = config.destination() {
        println!(
            "Would {} to {}:",
            endpoint.effective_method().emphasis(),
            endpoint.url().accent()
        );
    }

    let diff = diff_against_baseline(data, config.baseline());
    print_field_diff(data, &diff);
}

/// Run the submit command
///
/// Returns `false` when the submission failed or errored.
pub async fn run_submit(fields: &FieldArgs, options: SubmitOptions) -> Result<bool> {
    let yes = options.yes;
    let dry_run = options.dry_run;

    let mut builder = resolve_profile(options)?.into_builder()?;
    if let Some(baseline) = fields.baseline()? {
        builder = builder.baseline(baseline);
    }
    let config = builder.build()?;
    let data = fields.form_data().await?;

    if dry_run {
        println!("{}", "Dry run - nothing will be sent".muted());
        report_dry_run(&config, &data);
        return Ok(true);
    }

    let confirmer: Arc<dyn Confirmer> = if yes {
        Arc::new(AutoConfirm(true))
    } else {
        Arc::new(DialoguerConfirmer)
    };

    let submitter = Submitter::new(config).with_confirmer(confirmer);
    let hooks = CliHooks::new(
        submitter.config().refresh_baseline(),
        fields.baseline.clone(),
    );
    let submitter = submitter.with_hooks(Arc::new(hooks));

    if submitter.submit(data, None).await == OutcomeKind::Aborted {
        eprintln!("{}", "Submission cancelled".warn());
    }

    Ok(!submitter.failed())
}
