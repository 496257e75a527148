//! Pull request fetching over the GitHub REST API.

use crate::error::{GithubError, Result};
use async_trait::async_trait;
use relsync_core::{ChangeRequest, ChangeRequestRef, ChangeRequestSource};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The parts of a pull request relsync reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

impl From<PullRequest> for ChangeRequest {
    fn from(pr: PullRequest) -> Self {
        Self {
            title: pr.title,
            body: pr.body.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GithubClient {
    http: reqwest::Client,
    api_url: Url,
}

impl GithubClient {
    /// Create a client authenticated with `token` against `api_url`
    /// (`DEFAULT_API_URL`, or `https://<host>/api/v3` for GitHub Enterprise).
    ///
    /// # Errors
    /// Returns error if the URL or token are malformed.
    pub fn new(token: &str, api_url: &str) -> Result<Self> {
        let mut authorization = HeaderValue::from_str(&format!("Bearer {token}"))?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, authorization);
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert("x-github-api-version", HeaderValue::from_static("2022-11-28"));

        let http = reqwest::Client::builder()
            .user_agent(concat!("relsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let api_url = Url::parse(&format!("{}/", api_url.trim_end_matches('/')))?;

        Ok(Self { http, api_url })
    }

    /// Fetch one pull request.
    ///
    /// # Errors
    /// Returns `GithubError::NotFound` for a 404 and `GithubError::Api` for
    /// any other non-success status.
    pub async fn fetch_pull_request(&self, reference: &ChangeRequestRef) -> Result<PullRequest> {
        let url = self.api_url.join(&format!(
            "repos/{}/{}/pulls/{}",
            reference.owner, reference.repo, reference.number
        ))?;

        let response = self.http.get(url).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(GithubError::NotFound(reference.to_string())),
            status => Err(GithubError::Api {
                status,
                reference: reference.to_string(),
            }),
        }
    }
}

#[async_trait]
impl ChangeRequestSource for GithubClient {
    async fn fetch_change_request(&self, reference: &ChangeRequestRef) -> Option<ChangeRequest> {
        match self.fetch_pull_request(reference).await {
            Ok(pr) => {
                debug!(pull_request = %reference, title = %pr.title, "Fetched pull request");
                Some(pr.into())
            }
            Err(e) => {
                debug!(pull_request = %reference, error = %e, "Pull request lookup failed");
                None
            }
        }
    }
}
