//! Request and response bodies of the Jira REST API.
//!
//! Only the fields relsync reads or writes are modelled; everything else in
//! Jira's payloads is ignored on decode.

use relsync_core::{project_of, Issue, IssueStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields requested when fetching an issue.
pub const ISSUE_FIELDS: &str = "issuetype,fixVersions,status,components,parent";

/// `GET /issue/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct IssueResponse {
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueFields {
    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub fix_versions: Vec<NamedRef>,
    #[serde(default)]
    pub status: Option<StatusRef>,
    #[serde(default)]
    pub components: Vec<NamedRef>,
    #[serde(default)]
    pub parent: Option<ParentRef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueType {
    #[serde(default)]
    pub subtask: bool,
}

/// Any `{ "name": ... }` reference: versions, components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatusRef {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentRef {
    pub key: String,
}

impl From<IssueResponse> for Issue {
    fn from(response: IssueResponse) -> Self {
        let fields = response.fields;
        let parent_key = fields.parent.map(|p| p.key);

        Self {
            project: project_of(&response.key).to_string(),
            key: response.key,
            is_subtask: fields.issue_type.is_some_and(|t| t.subtask),
            fix_versions: fields.fix_versions.into_iter().map(|v| v.name).collect(),
            status: fields
                .status
                .map(|s| IssueStatus {
                    name: s.name,
                    id: s.id,
                })
                .unwrap_or_default(),
            components: fields.components.into_iter().map(|c| c.name).collect(),
            parent_project: parent_key.as_deref().map(|k| project_of(k).to_string()),
            parent_key,
        }
    }
}

/// `GET /project/{key}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectResponse {
    pub id: String,
    pub key: String,
}

/// Element of `GET /project/{key}/versions`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub released: bool,
}

/// `POST /version`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVersion<'a> {
    pub name: &'a str,
    pub project_id: &'a str,
    pub released: bool,
}

/// `PUT /version/{id}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdate {
    pub released: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

/// `PUT /issue/{key}` adding one named value to a multi-value field.
#[derive(Debug, Serialize)]
pub struct IssueUpdate {
    pub update: BTreeMap<&'static str, Vec<AddOperation>>,
}

#[derive(Debug, Serialize)]
pub struct AddOperation {
    pub add: NamedRef,
}

impl IssueUpdate {
    /// Add `name` to the field `field` (`fixVersions`, `components`).
    #[must_use]
    pub fn add(field: &'static str, name: &str) -> Self {
        let operation = AddOperation {
            add: NamedRef {
                name: name.to_string(),
            },
        };
        Self {
            update: BTreeMap::from([(field, vec![operation])]),
        }
    }
}

/// `GET /issue/{key}/transitions`
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionsResponse {
    #[serde(default)]
    pub transitions: Vec<Transition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transition {
    pub id: String,
    pub name: String,
    pub to: TransitionTarget,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransitionTarget {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
}

/// `POST /issue/{key}/transitions`
#[derive(Debug, Serialize)]
pub struct TransitionRequest<'a> {
    pub transition: TransitionId<'a>,
}

#[derive(Debug, Serialize)]
pub struct TransitionId<'a> {
    pub id: &'a str,
}

/// Jira's error body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[serde(default)]
    pub error_messages: Vec<String>,
    #[serde(default)]
    pub errors: BTreeMap<String, String>,
}

impl ErrorResponse {
    /// All messages joined into one line.
    #[must_use]
    pub fn summary(&self) -> String {
        self.error_messages
            .iter()
            .cloned()
            .chain(self.errors.iter().map(|(field, msg)| format!("{field}: {msg}")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
