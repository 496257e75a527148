//! One release-to-tracker sync run.

use crate::config::{Release, SyncConfig};
use crate::error::{CoreError, Result};
use crate::filter::filter_issues;
use crate::issue::Issue;
use crate::keys::{extract_issue_keys, KeyPattern};
use crate::tracker::{ChangeRequestSource, IssueTracker, VersionCreation, VersionRelease};
use crate::version::derive_version_name;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What a completed run did.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SyncReport {
    /// Tracker version name applied to the issues.
    pub version: String,
    /// Issues that received every requested update.
    pub issue_keys: Vec<String>,
    /// Issues for which an update failed.
    pub failed_keys: Vec<String>,
}

/// How a run ended without a fatal error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The release references no issues; nothing was touched.
    NoIssues { version: String },
    /// Issues were processed.
    Completed(SyncReport),
}

/// Apply the release's version to every issue it references.
///
/// Fatal errors are limited to tracker initialization, an unusable tag and
/// an unusable project prefix. Everything after issue discovery is
/// best-effort: version creation and release problems are logged, and a
/// failing issue is recorded in the report without stopping the others.
///
/// # Errors
/// Returns `CoreError` if the tracker cannot be initialized or no version
/// name can be derived from the tag.
pub async fn run<T, S>(
    config: &SyncConfig,
    release: &Release,
    tracker: Arc<T>,
    source: &S,
) -> Result<SyncOutcome>
where
    T: IssueTracker + 'static,
    S: ChangeRequestSource + ?Sized,
{
    tracker
        .initialize()
        .await
        .map_err(|e| CoreError::Tracker(Box::new(e)))?;

    let version = derive_version_name(&release.tag_name, config.version_prefix.as_deref())
        .ok_or_else(|| CoreError::VersionName {
            tag: release.tag_name.clone(),
        })?;
    info!(tag = %release.tag_name, version = %version, "Resolved version name");

    let pattern = KeyPattern::new(&config.project_prefix)?;
    let keys = extract_issue_keys(release.notes(), &pattern, source).await;
    if keys.is_empty() {
        info!("No issue keys found in release notes");
        return Ok(SyncOutcome::NoIssues { version });
    }
    info!(count = keys.len(), keys = ?keys, "Discovered issue keys");

    match tracker.create_version(&version).await {
        Ok(VersionCreation::Created) => info!(version = %version, "Created version"),
        Ok(VersionCreation::AlreadyExists) => {
            info!(version = %version, "Version already exists, reusing it");
        }
        Err(e) => warn!(version = %version, error = %e, "Failed to create version, continuing"),
    }

    let issues = filter_issues(&tracker, &keys, &version, config.filter_policy()).await;
    info!(count = issues.len(), "Issues to update");

    let mut report = SyncReport {
        version,
        ..SyncReport::default()
    };

    for issue in &issues {
        match update_issue(tracker.as_ref(), issue, config, &report.version).await {
            Ok(()) => {
                info!(key = %issue.key, "Updated issue");
                report.issue_keys.push(issue.key.clone());
            }
            Err(e) => {
                warn!(key = %issue.key, error = %e, "Failed to update issue");
                report.failed_keys.push(issue.key.clone());
            }
        }
    }

    match tracker.release_version(&report.version, config.released).await {
        Ok(VersionRelease::Released) => info!(version = %report.version, "Released version"),
        Ok(VersionRelease::LeftUnreleased) => {
            info!(version = %report.version, "Version left unreleased");
        }
        Ok(VersionRelease::NotFound) => {
            warn!(version = %report.version, "Version not found, cannot release it");
        }
        Err(e) => warn!(version = %report.version, error = %e, "Failed to release version"),
    }

    if !report.failed_keys.is_empty() {
        warn!(
            "Failed to update {} issue(s): {}",
            report.failed_keys.len(),
            report.failed_keys.join(", ")
        );
    }

    Ok(SyncOutcome::Completed(report))
}

/// Version, then component, then status. Stops at the first failure.
async fn update_issue<T>(
    tracker: &T,
    issue: &Issue,
    config: &SyncConfig,
    version: &str,
) -> std::result::Result<(), T::Error>
where
    T: IssueTracker + ?Sized,
{
    tracker.add_version(&issue.key, version).await?;

    if let Some(component) = &config.component {
        tracker.add_component(&issue.key, component).await?;
    }

    if let Some(status) = &config.status {
        tracker.update_status(&issue.key, status).await?;
    }

    Ok(())
}
