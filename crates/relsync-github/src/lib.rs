//! GitHub pull request lookup for relsync.

pub mod client;
pub mod error;

pub use client::{GithubClient, PullRequest, DEFAULT_API_URL};
pub use error::{GithubError, Result};
