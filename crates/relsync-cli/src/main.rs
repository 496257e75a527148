//! relsync - Sync a GitHub release into Jira.

mod actions;
mod commands;
mod event;
mod inputs;
mod output;

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "relsync")]
#[command(author, version, about = "Tag the Jira issues referenced by a release with its version")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "human")]
    format: output::OutputFormat,

    #[command(flatten)]
    inputs: inputs::Inputs,
}

fn main() -> ExitCode {
    // stdout carries the report and workflow commands
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let actions = actions::Actions::from_env();

    let result = tokio::runtime::Runtime::new()
        .map_err(anyhow::Error::from)
        .and_then(|rt| rt.block_on(commands::sync(&cli.inputs, &actions, cli.format)));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = ?err, "Sync failed");
            actions::set_failed(&actions::failure_message(&err));
            ExitCode::FAILURE
        }
    }
}
