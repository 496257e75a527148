//! relsync-core: Release-to-tracker reconciliation.
//!
//! This crate provides:
//! - `derive_version_name`: Tracker version names from release tags
//! - `extract_issue_keys`: Issue keys from release notes and linked change requests
//! - `filter_issues`: Concurrent issue fetch with subtask/child/already-tagged exclusion
//! - `run`: The full sync, with per-issue failure isolation
//! - `IssueTracker` / `ChangeRequestSource`: Seams implemented by the API clients

pub mod config;
pub mod error;
pub mod filter;
pub mod issue;
pub mod keys;
pub mod sync;
pub mod tracker;
pub mod version;

#[cfg(test)]
mod testutils;

pub use config::{Release, SyncConfig};
pub use error::{BoxError, CoreError, Result};
pub use filter::{fetch_issues, filter_issues, FilterPolicy, Rejection};
pub use issue::{project_of, Issue, IssueStatus};
pub use keys::{extract_issue_keys, KeyPattern};
pub use sync::{run, SyncOutcome, SyncReport};
pub use tracker::{
    ChangeRequest, ChangeRequestRef, ChangeRequestSource, IssueTracker, VersionCreation,
    VersionRelease,
};
pub use version::derive_version_name;
