//! diffpost - change-aware form submission
//!
//! CLI binary that diffs form fields against a baseline and submits only
//! what changed.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

mod cli;

#[derive(Parser)]
#[command(name = "diffpost")]
#[command(about = "Submit only the form fields that changed")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff fields against a baseline and submit the changes
    Submit {
        /// Endpoint URL (overrides the profile)
        url: Option<String>,

        #[command(flatten)]
        fields: cli::FieldArgs,

        /// Profile file describing the endpoint
        #[arg(long, env = "DIFFPOST_PROFILE")]
        profile: Option<PathBuf>,

        /// HTTP method (default POST)
        #[arg(short = 'X', long)]
        method: Option<String>,

        /// Extra request header as NAME:VALUE (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Ask for confirmation with this message before sending
        #[arg(long = "confirm")]
        confirmation: Option<String>,

        /// Answer yes to the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be sent without sending it
        #[arg(long)]
        dry_run: bool,

        /// After a successful submission, merge the sent values into the baseline
        #[arg(long)]
        refresh_baseline: bool,
    },

    /// Show which fields differ from a baseline
    Diff {
        #[command(flatten)]
        fields: cli::FieldArgs,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let succeeded = match cli.command {
        Commands::Submit {
            url,
            fields,
            profile,
            method,
            headers,
            confirmation,
            yes,
            dry_run,
            refresh_baseline,
        } => {
            let options = cli::SubmitOptions {
                url,
                profile,
                method,
                headers,
                confirmation,
                yes,
                dry_run,
                refresh_baseline,
            };
            cli::run_submit(&fields, options).await?
        }
        Commands::Diff { fields } => {
            cli::run_diff(&fields).await?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
