//! Error types for the GitHub client.

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for GitHub operations.
pub type Result<T> = std::result::Result<T, GithubError>;

/// Errors that can occur talking to GitHub.
#[derive(Debug, Error)]
pub enum GithubError {
    /// Pull request does not exist or is not visible to the token.
    #[error("pull request not found: {0}")]
    NotFound(String),

    /// GitHub answered with a non-success status.
    #[error("github api error ({status}) for {reference}")]
    Api { status: StatusCode, reference: String },

    /// Transport or response decoding error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// API URL is malformed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// Token could not be encoded into a header.
    #[error("invalid token: {0}")]
    Token(#[from] reqwest::header::InvalidHeaderValue),
}
