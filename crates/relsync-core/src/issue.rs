//! Tracker issue model.

use serde::{Deserialize, Serialize};

/// Workflow state of an issue.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct IssueStatus {
    pub name: String,
    pub id: String,
}

/// Snapshot of a tracker issue taken when it was fetched.
///
/// Never mutated after construction; updates go through the tracker and are
/// not reflected back into the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Issue {
    /// Issue key (e.g., "ABC-123"). Empty for an unresolved placeholder.
    pub key: String,

    /// Project segment of `key`.
    pub project: String,

    /// Whether the issue type is a subtask.
    pub is_subtask: bool,

    /// Names of the fix versions currently attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fix_versions: Vec<String>,

    /// Current workflow state.
    pub status: IssueStatus,

    /// Names of the components currently attached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<String>,

    /// Key of the parent issue, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,

    /// Project segment of `parent_key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_project: Option<String>,
}

/// Project segment of an issue key: everything before the first `-`.
#[must_use]
pub fn project_of(key: &str) -> &str {
    key.split('-').next().unwrap_or_default()
}

impl Issue {
    /// Create an issue with the given key and no other state.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            project: project_of(&key).to_string(),
            key,
            ..Self::default()
        }
    }

    /// Placeholder for an issue whose fetch failed. Its key is empty, so every
    /// filter rejects it.
    #[must_use]
    pub fn unresolved() -> Self {
        Self::default()
    }

    /// Whether this is the placeholder left by a failed fetch.
    #[must_use]
    pub fn is_unresolved(&self) -> bool {
        self.key.is_empty()
    }

    /// Mark the issue as a subtask.
    #[must_use]
    pub const fn with_subtask(mut self, is_subtask: bool) -> Self {
        self.is_subtask = is_subtask;
        self
    }

    /// Set the parent issue; the parent project is derived from its key.
    #[must_use]
    pub fn with_parent(mut self, parent_key: impl Into<String>) -> Self {
        let parent_key = parent_key.into();
        self.parent_project = Some(project_of(&parent_key).to_string());
        self.parent_key = Some(parent_key);
        self
    }

    /// Set the attached fix versions.
    #[must_use]
    pub fn with_fix_versions(mut self, versions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fix_versions = versions.into_iter().map(Into::into).collect();
        self
    }

    /// Set the attached components.
    #[must_use]
    pub fn with_components(mut self, components: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.components = components.into_iter().map(Into::into).collect();
        self
    }

    /// Set the workflow state.
    #[must_use]
    pub fn with_status(mut self, name: impl Into<String>, id: impl Into<String>) -> Self {
        self.status = IssueStatus {
            name: name.into(),
            id: id.into(),
        };
        self
    }

    /// Check whether the exact version name is already attached.
    #[must_use]
    pub fn has_fix_version(&self, name: &str) -> bool {
        self.fix_versions.iter().any(|v| v == name)
    }
}
