//! Error types for relsync-core.

use thiserror::Error;

/// Result type alias for relsync-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Boxed error raised by an [`IssueTracker`](crate::IssueTracker) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The release tag holds no `<major>.<minor>.<patch>` triple.
    #[error("Could not determine version name from release tag")]
    VersionName { tag: String },

    /// The project prefix is blank.
    #[error("project prefix must not be empty")]
    EmptyPrefix,

    /// The project prefix cannot be turned into a key pattern.
    #[error("invalid project prefix '{prefix}': {source}")]
    InvalidPrefix {
        prefix: String,
        #[source]
        source: regex::Error,
    },

    /// The tracker could not be prepared for the run.
    #[error("tracker initialization failed: {0}")]
    Tracker(#[source] BoxError),
}
