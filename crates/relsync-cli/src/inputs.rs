//! Action inputs.
//!
//! Every input is a flag and an environment variable named the way GitHub
//! Actions exposes `with:` values (`INPUT_<NAME>`, name upper-cased, dashes
//! kept). Actions passes unset inputs as empty strings, so empty values count
//! as absent.

use clap::Args;
use relsync_core::SyncConfig;
use relsync_github::DEFAULT_API_URL;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Input required and not supplied: {0}")]
    Missing(&'static str),

    #[error("Input does not meet YAML 1.2 \"Core Schema\" specification: {name} (got '{value}')")]
    InvalidBool { name: &'static str, value: String },
}

#[derive(Debug, Clone, Args)]
pub struct Inputs {
    /// Token used to read pull requests
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// GitHub API root
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub github_api_url: String,

    /// Jira host (e.g. acme.atlassian.net)
    #[arg(long, env = "INPUT_JIRA-HOST")]
    pub jira_host: Option<String>,

    /// Jira account email
    #[arg(long, env = "INPUT_JIRA-EMAIL")]
    pub jira_email: Option<String>,

    /// Jira API token
    #[arg(long, env = "INPUT_JIRA-TOKEN", hide_env_values = true)]
    pub jira_token: Option<String>,

    /// Jira project key; only keys with this prefix are picked up
    #[arg(long, env = "INPUT_PROJECT-PREFIX")]
    pub project_prefix: Option<String>,

    /// Label prepended to the version name
    #[arg(long, env = "INPUT_JIRA-VERSION-PREFIX")]
    pub jira_version_prefix: Option<String>,

    /// Leave subtasks untouched [default: false]
    #[arg(long, env = "INPUT_SKIP-SUBTASK")]
    pub skip_subtask: Option<String>,

    /// Leave child issues untouched [default: false]
    #[arg(long, env = "INPUT_SKIP-CHILD")]
    pub skip_child: Option<String>,

    /// Component to add to every updated issue
    #[arg(long, env = "INPUT_COMPONENT")]
    pub component: Option<String>,

    /// Status to move every updated issue to
    #[arg(long, env = "INPUT_STATUS")]
    pub status: Option<String>,

    /// Mark the version released [default: true]
    #[arg(long, env = "INPUT_RELEASED")]
    pub released: Option<String>,

    /// Path of the triggering event payload
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,
}

/// Credentials and host for the Jira client.
#[derive(Debug, Clone)]
pub struct JiraAccess<'a> {
    pub host: &'a str,
    pub email: &'a str,
    pub token: &'a str,
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required<'a>(value: Option<&'a String>, name: &'static str) -> Result<&'a str, InputError> {
    present(value).ok_or(InputError::Missing(name))
}

fn flag(value: Option<&String>, name: &'static str, default: bool) -> Result<bool, InputError> {
    let Some(value) = present(value) else {
        return Ok(default);
    };

    match value {
        "true" | "True" | "TRUE" | "yes" | "1" => Ok(true),
        "false" | "False" | "FALSE" | "no" | "0" => Ok(false),
        _ => Err(InputError::InvalidBool {
            name,
            value: value.to_string(),
        }),
    }
}

impl Inputs {
    /// Run options for the sync.
    ///
    /// # Errors
    /// Returns `InputError` for a missing project prefix or a malformed flag.
    pub fn sync_config(&self) -> Result<SyncConfig, InputError> {
        Ok(SyncConfig {
            project_prefix: required(self.project_prefix.as_ref(), "project-prefix")?.to_string(),
            version_prefix: present(self.jira_version_prefix.as_ref()).map(String::from),
            skip_subtask: flag(self.skip_subtask.as_ref(), "skip-subtask", false)?,
            skip_child: flag(self.skip_child.as_ref(), "skip-child", false)?,
            component: present(self.component.as_ref()).map(String::from),
            status: present(self.status.as_ref()).map(String::from),
            released: flag(self.released.as_ref(), "released", true)?,
        })
    }

    /// Jira host and credentials.
    ///
    /// # Errors
    /// Returns `InputError::Missing` for the first absent value.
    pub fn jira_access(&self) -> Result<JiraAccess<'_>, InputError> {
        Ok(JiraAccess {
            host: required(self.jira_host.as_ref(), "jira-host")?,
            email: required(self.jira_email.as_ref(), "jira-email")?,
            token: required(self.jira_token.as_ref(), "jira-token")?,
        })
    }

    /// Token for pull request lookups.
    ///
    /// # Errors
    /// Returns `InputError::Missing` if absent.
    pub fn github_token(&self) -> Result<&str, InputError> {
        required(self.github_token.as_ref(), "github-token")
    }
}
