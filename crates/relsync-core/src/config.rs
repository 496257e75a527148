//! Run configuration and release input.

use crate::filter::FilterPolicy;
use serde::{Deserialize, Serialize};

/// Options controlling a sync run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SyncConfig {
    /// Tracker project key; scopes key matching and version creation.
    pub project_prefix: String,

    /// Label prepended to the derived version name.
    #[serde(default)]
    pub version_prefix: Option<String>,

    /// Leave subtasks untouched.
    #[serde(default)]
    pub skip_subtask: bool,

    /// Leave child issues untouched.
    #[serde(default)]
    pub skip_child: bool,

    /// Component added to every updated issue.
    #[serde(default)]
    pub component: Option<String>,

    /// Status every updated issue is transitioned to.
    #[serde(default)]
    pub status: Option<String>,

    /// Mark the version released once issues are updated.
    #[serde(default = "default_released")]
    pub released: bool,
}

const fn default_released() -> bool {
    true
}

impl SyncConfig {
    /// Create a config for a project with every option at its default.
    #[must_use]
    pub fn new(project_prefix: impl Into<String>) -> Self {
        Self {
            project_prefix: project_prefix.into(),
            version_prefix: None,
            skip_subtask: false,
            skip_child: false,
            component: None,
            status: None,
            released: default_released(),
        }
    }

    /// Exclusion switches for the issue filter.
    #[must_use]
    pub const fn filter_policy(&self) -> FilterPolicy {
        FilterPolicy {
            skip_subtask: self.skip_subtask,
            skip_child: self.skip_child,
        }
    }
}

/// The release that triggered the run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Release {
    /// Git tag the release was cut from.
    pub tag_name: String,

    /// Display name of the release.
    #[serde(default)]
    pub name: Option<String>,

    /// Release notes.
    #[serde(default)]
    pub body: Option<String>,
}

impl Release {
    /// Create a release with a tag and notes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            name: None,
            body: Some(body.into()),
        }
    }

    /// Release notes, empty when absent.
    #[must_use]
    pub fn notes(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}
