//! Command implementations.

use crate::actions::Actions;
use crate::event::load_release;
use crate::inputs::Inputs;
use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use relsync_core::{SyncOutcome, SyncReport};
use relsync_github::GithubClient;
use relsync_jira::JiraClient;
use std::sync::Arc;
use tracing::info;

/// Output carrying the keys of updated issues.
pub const ISSUE_KEYS_OUTPUT: &str = "jira_issue_keys";

/// Output carrying the keys of issues whose update failed.
pub const FAILED_KEYS_OUTPUT: &str = "fail_jira_issue_keys";

/// Sync the triggering release into Jira.
///
/// # Errors
/// Returns error for missing inputs, an unreadable event, or a fatal sync failure.
pub async fn sync(inputs: &Inputs, actions: &Actions, format: OutputFormat) -> Result<()> {
    let config = inputs.sync_config()?;
    let jira = inputs.jira_access()?;
    let tracker = Arc::new(
        JiraClient::new(jira.host, jira.email, jira.token, config.project_prefix.as_str())
            .context("Failed to create Jira client")?,
    );
    let github = GithubClient::new(inputs.github_token()?, &inputs.github_api_url)
        .context("Failed to create GitHub client")?;

    let release = load_release(inputs.event_path.as_deref())?;
    info!(tag = %release.tag_name, project = %config.project_prefix, "Syncing release");

    match relsync_core::run(&config, &release, tracker, &github).await? {
        SyncOutcome::NoIssues { version } => {
            output::print_success(
                &format!("No issue keys found for {version}, nothing to do"),
                format,
            );
        }
        SyncOutcome::Completed(report) => {
            publish(actions, &report).context("Failed to write step outputs")?;
            output::print(&report, format)?;
        }
    }

    Ok(())
}

/// Publish a report as step outputs.
fn publish(actions: &Actions, report: &SyncReport) -> Result<()> {
    actions.set_output(ISSUE_KEYS_OUTPUT, &report.issue_keys)?;
    actions.set_output(FAILED_KEYS_OUTPUT, &report.failed_keys)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_publish_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("output");
        let report = SyncReport {
            version: "v1.0.0".to_string(),
            issue_keys: vec!["ABC-1".to_string()],
            failed_keys: vec!["ABC-403".to_string()],
        };

        publish(&Actions::new(Some(path.clone())), &report).unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "jira_issue_keys=[\"ABC-1\"]\nfail_jira_issue_keys=[\"ABC-403\"]\n"
        );
    }
}
