//! Seams to the issue tracker and the code-hosting platform.

use crate::issue::Issue;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Pull-request URLs: `.../<owner>/<repo>/pull/<number>`.
static CHANGE_REQUEST_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[^\s/]+(?:/[^\s/]+)*?/([A-Za-z0-9_.-]+)/([A-Za-z0-9_.-]+)/pull/(\d+)")
        .expect("change request pattern is valid")
});

/// Reference to a change request on the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChangeRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl ChangeRequestRef {
    /// Create a new change request reference.
    #[must_use]
    pub fn new(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            number,
        }
    }

    /// Parse a single change-request URL.
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let caps = CHANGE_REQUEST_URL.captures(url)?;
        Some(Self::new(&caps[1], &caps[2], caps[3].parse().ok()?))
    }

    /// Every change-request URL in `text`, in order of appearance.
    pub fn find_all(text: &str) -> impl Iterator<Item = (&str, Option<Self>)> {
        CHANGE_REQUEST_URL
            .find_iter(text)
            .map(|m| (m.as_str(), Self::parse(m.as_str())))
    }
}

impl fmt::Display for ChangeRequestRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}#{}", self.owner, self.repo, self.number)
    }
}

/// Title and description of a change request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// Hosting-platform lookup of change requests.
#[async_trait]
pub trait ChangeRequestSource: Send + Sync {
    /// Fetch a change request. `None` when it cannot be resolved for any
    /// reason; implementations log the cause themselves.
    async fn fetch_change_request(&self, reference: &ChangeRequestRef) -> Option<ChangeRequest>;
}

/// Result of asking the tracker to create a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionCreation {
    /// The version was created, unreleased.
    Created,
    /// A version with this name already exists in the project.
    AlreadyExists,
}

/// Result of the final release step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRelease {
    /// The version was marked released.
    Released,
    /// The version was found and left as is.
    LeftUnreleased,
    /// No version with this name exists in the project.
    NotFound,
}

/// Issue tracker operations used by a sync run.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Error raised for unexpected failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Resolve and cache the tracker project. Must run before `create_version`.
    async fn initialize(&self) -> Result<(), Self::Error>;

    /// Fetch the current state of an issue.
    async fn fetch_issue(&self, key: &str) -> Result<Issue, Self::Error>;

    /// Create an unreleased version in the project.
    async fn create_version(&self, name: &str) -> Result<VersionCreation, Self::Error>;

    /// Look up a version by exact name and, if `released`, mark it released.
    async fn release_version(&self, name: &str, released: bool) -> Result<VersionRelease, Self::Error>;

    /// Add a fix version to an issue.
    async fn add_version(&self, key: &str, name: &str) -> Result<(), Self::Error>;

    /// Add a component to an issue.
    async fn add_component(&self, key: &str, name: &str) -> Result<(), Self::Error>;

    /// Transition an issue to the status with this name (case-insensitive).
    async fn update_status(&self, key: &str, status: &str) -> Result<(), Self::Error>;
}
