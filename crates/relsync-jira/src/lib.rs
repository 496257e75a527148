//! Jira backend for relsync.
//!
//! Talks to the Jira Cloud REST API v3:
//! - `project/{key}`: project id lookup
//! - `issue/{key}`: issue state and field updates
//! - `issue/{key}/transitions`: workflow transitions
//! - `version`, `project/{key}/versions`: fix version management

pub mod client;
pub mod error;
pub mod schema;

#[cfg(test)]
mod testutils;

pub use client::JiraClient;
pub use error::{JiraError, Result};
