//! Issue validation and exclusion policy.

use crate::issue::Issue;
use crate::tracker::IssueTracker;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Exclusion switches applied to fetched issues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterPolicy {
    /// Drop issues whose type is a subtask.
    pub skip_subtask: bool,
    /// Drop issues that have a parent.
    pub skip_child: bool,
}

/// Why an issue was left out of the update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The fetch failed and left a placeholder.
    Unresolved,
    Subtask,
    Child,
    /// The target version is already attached.
    AlreadyTagged,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unresolved => write!(f, "could not be fetched"),
            Self::Subtask => write!(f, "is a subtask"),
            Self::Child => write!(f, "is a child issue"),
            Self::AlreadyTagged => write!(f, "already carries the version"),
        }
    }
}

impl FilterPolicy {
    /// First rule that rejects `issue`, checked in a fixed order:
    /// placeholder, subtask, child, already tagged.
    ///
    /// An issue counts as a child when it has a parent link or when its
    /// project equals its parent's project.
    #[must_use]
    pub fn rejection(&self, issue: &Issue, version_name: &str) -> Option<Rejection> {
        if issue.is_unresolved() {
            return Some(Rejection::Unresolved);
        }

        if self.skip_subtask && issue.is_subtask {
            return Some(Rejection::Subtask);
        }

        if self.skip_child
            && (issue.parent_key.is_some()
                || issue.parent_project.as_deref() == Some(issue.project.as_str()))
        {
            return Some(Rejection::Child);
        }

        if issue.has_fix_version(version_name) {
            return Some(Rejection::AlreadyTagged);
        }

        None
    }
}

/// Fetch every key concurrently. The result lines up with `keys`; a failed
/// fetch leaves an unresolved placeholder in its slot.
pub async fn fetch_issues<T>(tracker: &Arc<T>, keys: &[String]) -> Vec<Issue>
where
    T: IssueTracker + 'static,
{
    let mut join_set = JoinSet::new();

    for (index, key) in keys.iter().enumerate() {
        let tracker = Arc::clone(tracker);
        let key = key.clone();
        join_set.spawn(async move {
            let issue = match tracker.fetch_issue(&key).await {
                Ok(issue) => issue,
                Err(e) => {
                    warn!(key = %key, error = %e, "Failed to fetch issue");
                    Issue::unresolved()
                }
            };
            (index, issue)
        });
    }

    let mut slots: Vec<Option<Issue>> = vec![None; keys.len()];
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok((index, issue)) => slots[index] = Some(issue),
            Err(e) => warn!(error = %e, "Issue fetch task did not complete"),
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.unwrap_or_else(Issue::unresolved))
        .collect()
}

/// Fetch `keys` and keep the issues that should receive `version_name`,
/// preserving the order of `keys`.
pub async fn filter_issues<T>(
    tracker: &Arc<T>,
    keys: &[String],
    version_name: &str,
    policy: FilterPolicy,
) -> Vec<Issue>
where
    T: IssueTracker + 'static,
{
    fetch_issues(tracker, keys)
        .await
        .into_iter()
        .filter(|issue| match policy.rejection(issue, version_name) {
            Some(reason) => {
                debug!(key = %issue.key, reason = %reason, "Skipping issue");
                false
            }
            None => true,
        })
        .collect()
}
