//! Error types for the Jira backend.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for Jira operations.
pub type Result<T> = std::result::Result<T, JiraError>;

/// Errors that can occur talking to Jira.
#[derive(Debug, Error)]
pub enum JiraError {
    /// Issue does not exist or is not visible to the account.
    #[error("issue not found: {0}")]
    NotFound(String),

    /// No workflow transition leads to the requested status.
    #[error("no transition to status '{status}' available for {key}")]
    InvalidTransition { key: String, status: String },

    /// Project id was not resolved yet.
    #[error("project not resolved, initialize the client first")]
    NotInitialized,

    /// Jira answered with a non-success status.
    #[error("jira api error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// Transport or response decoding error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Host could not be turned into an API URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Credentials could not be encoded into a header.
    #[error("invalid credentials: {0}")]
    Credentials(#[from] reqwest::header::InvalidHeaderValue),
}
