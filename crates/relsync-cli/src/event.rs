//! The workflow event payload.

use relsync_core::Release;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("failed to read event payload {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No release data found in the event payload")]
    NoRelease,
}

/// The subset of a `release` event relsync reads.
#[derive(Debug, Default, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub release: Option<Release>,
}

impl EventPayload {
    /// Decode a payload from JSON text.
    ///
    /// # Errors
    /// Returns `EventError::Parse` for malformed JSON.
    pub fn from_json(text: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Read the release from the event file at `path`.
///
/// A run without an event file behaves like an event without a release.
///
/// # Errors
/// Returns `EventError` if the file cannot be read or parsed, or carries no
/// release.
pub fn load_release(path: Option<&Path>) -> Result<Release, EventError> {
    let Some(path) = path else {
        return Err(EventError::NoRelease);
    };

    let text = std::fs::read_to_string(path).map_err(|source| EventError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    EventPayload::from_json(&text)?
        .release
        .ok_or(EventError::NoRelease)
}
