//! Step outputs and failure reporting for the workflow runner.

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Where step outputs go.
///
/// With an output file (`GITHUB_OUTPUT`) each output is appended as a
/// `name=value` line; without one the legacy `::set-output` command is
/// printed to stdout.
#[derive(Debug, Clone, Default)]
pub struct Actions {
    output_file: Option<PathBuf>,
}

impl Actions {
    #[must_use]
    pub const fn new(output_file: Option<PathBuf>) -> Self {
        Self { output_file }
    }

    /// Read the output file location from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let output_file = std::env::var_os("GITHUB_OUTPUT")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self::new(output_file)
    }

    /// Publish `value` as the step output `name`, JSON-encoded.
    ///
    /// # Errors
    /// Returns error if the value cannot be encoded or the output file
    /// cannot be written.
    pub fn set_output<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> io::Result<()> {
        let encoded = serde_json::to_string(value)?;

        match &self.output_file {
            Some(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                writeln!(file, "{name}={encoded}")
            }
            None => {
                println!("::set-output name={name}::{}", escape_data(&encoded));
                Ok(())
            }
        }
    }
}

/// Mark the step failed with `message`.
pub fn set_failed(message: &str) {
    println!("::error::{}", escape_data(message));
}

/// One-line failure message: the error followed by every cause its own
/// message does not already include.
#[must_use]
pub fn failure_message(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}

/// Escape a workflow command payload.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
