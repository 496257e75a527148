//! Authenticated Jira REST client.

use crate::error::{JiraError, Result};
use crate::schema::{
    ErrorResponse, IssueResponse, IssueUpdate, NewVersion, ProjectResponse, TransitionId,
    TransitionRequest, TransitionsResponse, VersionResponse, VersionUpdate, ISSUE_FIELDS,
};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use relsync_core::{Issue, IssueTracker, VersionCreation, VersionRelease};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

/// REST API root below the Jira host.
const API_PATH: &str = "rest/api/3/";

/// Jira client scoped to one project.
///
/// Credentials are encoded into a basic-auth header once and sent with every
/// request.
#[derive(Debug)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    project_key: String,
    project_id: OnceLock<String>,
}

impl JiraClient {
    /// Create a client for `host` (e.g. `acme.atlassian.net`, scheme optional).
    ///
    /// # Errors
    /// Returns error if the host is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(host: &str, email: &str, token: &str, project_key: impl Into<String>) -> Result<Self> {
        let base_url = api_base_url(host)?;

        let credentials = STANDARD.encode(format!("{email}:{token}"));
        let mut authorization = HeaderValue::from_str(&format!("Basic {credentials}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("relsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url,
            project_key: project_key.into(),
            project_id: OnceLock::new(),
        })
    }

    /// Project key this client is scoped to.
    #[must_use]
    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    /// Cached project id, once resolved.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.get().map(String::as_str)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn find_version(&self, name: &str) -> Result<Option<VersionResponse>> {
        let url = self.endpoint(&format!("project/{}/versions", self.project_key))?;
        let versions: Vec<VersionResponse> =
            ensure_success(self.http.get(url).send().await?).await?.json().await?;

        Ok(versions.into_iter().find(|v| v.name == name))
    }

    async fn update_issue(&self, key: &str, body: &IssueUpdate) -> Result<()> {
        let url = self.endpoint(&format!("issue/{key}"))?;
        ensure_success(self.http.put(url).json(body).send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl IssueTracker for JiraClient {
    type Error = JiraError;

    async fn initialize(&self) -> Result<()> {
        if self.project_id.get().is_some() {
            return Ok(());
        }

        let url = self.endpoint(&format!("project/{}", self.project_key))?;
        let project: ProjectResponse =
            ensure_success(self.http.get(url).send().await?).await?.json().await?;

        debug!(project = %project.key, id = %project.id, "Resolved project");
        // A concurrent initialize may have won; both resolved the same id.
        let _ = self.project_id.set(project.id);
        Ok(())
    }

    async fn fetch_issue(&self, key: &str) -> Result<Issue> {
        let mut url = self.endpoint(&format!("issue/{key}"))?;
        url.query_pairs_mut().append_pair("fields", ISSUE_FIELDS);

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(JiraError::NotFound(key.to_string()));
        }

        let issue: IssueResponse = ensure_success(response).await?.json().await?;
        debug!(key = %issue.key, "Fetched issue");
        Ok(issue.into())
    }

    async fn create_version(&self, name: &str) -> Result<VersionCreation> {
        let project_id = self.project_id.get().ok_or(JiraError::NotInitialized)?;
        let body = NewVersion {
            name,
            project_id,
            released: false,
        };

        let response = self.http.post(self.endpoint("version")?).json(&body).send().await?;
        match ensure_success(response).await {
            Ok(_) => {
                info!(version = %name, "Created Jira version");
                Ok(VersionCreation::Created)
            }
            Err(JiraError::Api { status, message })
                if matches!(status, StatusCode::BAD_REQUEST | StatusCode::CONFLICT)
                    && message.to_ascii_lowercase().contains("already exists") =>
            {
                debug!(version = %name, reason = %message, "Version already exists");
                Ok(VersionCreation::AlreadyExists)
            }
            Err(e) => Err(e),
        }
    }

    async fn release_version(&self, name: &str, released: bool) -> Result<VersionRelease> {
        let Some(version) = self.find_version(name).await? else {
            return Ok(VersionRelease::NotFound);
        };

        if !released {
            return Ok(VersionRelease::LeftUnreleased);
        }

        let body = VersionUpdate {
            released: true,
            release_date: Some(chrono::Utc::now().date_naive().to_string()),
        };
        let url = self.endpoint(&format!("version/{}", version.id))?;
        ensure_success(self.http.put(url).json(&body).send().await?).await?;

        info!(version = %name, id = %version.id, "Released Jira version");
        Ok(VersionRelease::Released)
    }

    async fn add_version(&self, key: &str, name: &str) -> Result<()> {
        self.update_issue(key, &IssueUpdate::add("fixVersions", name)).await?;
        debug!(key = %key, version = %name, "Added fix version");
        Ok(())
    }

    async fn add_component(&self, key: &str, name: &str) -> Result<()> {
        self.update_issue(key, &IssueUpdate::add("components", name)).await?;
        debug!(key = %key, component = %name, "Added component");
        Ok(())
    }

    async fn update_status(&self, key: &str, status: &str) -> Result<()> {
        let url = self.endpoint(&format!("issue/{key}/transitions"))?;
        let available: TransitionsResponse =
            ensure_success(self.http.get(url.clone()).send().await?).await?.json().await?;

        let wanted = status.to_lowercase();
        let transition = available
            .transitions
            .iter()
            .find(|t| t.to.name.to_lowercase() == wanted)
            .ok_or_else(|| JiraError::InvalidTransition {
                key: key.to_string(),
                status: status.to_string(),
            })?;

        let body = TransitionRequest {
            transition: TransitionId { id: &transition.id },
        };
        ensure_success(self.http.post(url).json(&body).send().await?).await?;

        debug!(key = %key, status = %status, transition = %transition.name, "Transitioned issue");
        Ok(())
    }
}

/// `https://<host>/rest/api/3/`; `https://` is assumed when no scheme is given.
fn api_base_url(host: &str) -> Result<Url> {
    let host = host.trim().trim_end_matches('/');
    let root = if host.contains("://") {
        format!("{host}/")
    } else {
        format!("https://{host}/")
    };
    Ok(Url::parse(&root)?.join(API_PATH)?)
}

/// Turn a non-success response into `JiraError::Api` carrying Jira's message.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.summary())
        .ok()
        .filter(|summary| !summary.is_empty())
        .unwrap_or(text);

    Err(JiraError::Api { status, message })
}
