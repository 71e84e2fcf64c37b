//! GitHub API client.
//!
//! Provides the three REST calls the approval flow needs: listing pending
//! deployments for a run, checking team membership and reviewing pending
//! deployments. The flow itself talks to the [`DeploymentsApi`] and
//! [`MembershipLookup`] traits so it can run against fakes.

use crate::error::AppError;
use crate::models::RunContext;
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default REST endpoint for github.com.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version sent with every request.
const API_VERSION: &str = "2022-11-28";

/// GitHub API client configuration.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Base URL of the REST API (e.g., `https://api.github.com`).
    pub api_url: String,

    /// Token used as bearer credential.
    pub token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubClientConfig,
}

/// Pending deployment from `GET .../actions/runs/:run_id/pending_deployments`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubPendingDeployment {
    pub environment: GitHubEnvironment,
    #[serde(default)]
    pub reviewers: Vec<GitHubDeploymentReviewer>,
}

/// Environment reference inside a pending deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubEnvironment {
    pub id: u64,
    pub name: String,
}

/// Required reviewer on a pending deployment.
///
/// `type` is `User` or `Team`; the reviewer object is a user (with `login`)
/// or a team (with `name` and `slug`) accordingly.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubDeploymentReviewer {
    #[serde(rename = "type")]
    pub reviewer_type: String,
    pub reviewer: GitHubReviewer,
}

/// User or team object; fields are optional because the shape depends on type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubReviewer {
    pub login: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

/// Body of the review request.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPendingDeploymentsRequest<'a> {
    pub environment_ids: &'a [u64],
    /// `approved` or `rejected`.
    pub state: &'a str,
    pub comment: &'a str,
}

/// Listing and reviewing pending deployments of a run.
#[async_trait]
pub trait DeploymentsApi: Send + Sync {
    /// List deployments of `run` waiting for review.
    async fn pending_deployments(
        &self,
        run: &RunContext,
    ) -> Result<Vec<GitHubPendingDeployment>, AppError>;

    /// Approve the given environments of `run` with `comment`.
    async fn approve_pending_deployments(
        &self,
        run: &RunContext,
        environment_ids: &[u64],
        comment: &str,
    ) -> Result<(), AppError>;
}

/// Team membership checks.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    /// Whether `username` belongs to team `team_slug` of `org`.
    ///
    /// `Ok(false)` means GitHub reported no membership; `Err` means the
    /// check itself failed.
    async fn is_team_member(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<bool, AppError>;
}

impl GitHubClient {
    /// Create a new GitHub client.
    pub fn new(config: GitHubClientConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();

        let token_value = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| AppError::authentication("Invalid token format"))?;
        headers.insert(header::AUTHORIZATION, token_value);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static(API_VERSION),
        );

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the full URL for an API path.
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    /// Endpoint of the pending deployments resource for a run.
    fn pending_deployments_endpoint(run: &RunContext) -> String {
        format!(
            "/repos/{}/{}/actions/runs/{}/pending_deployments",
            urlencoding::encode(&run.owner),
            urlencoding::encode(&run.repo),
            run.run_id
        )
    }

    /// Turn a non-success response into an error.
    async fn error_from_response(response: Response, endpoint: &str) -> AppError {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return AppError::authentication("GitHub token is invalid or expired");
        }

        let status_code = status.as_u16();
        let body = response.text().await.unwrap_or_default();
        // GitHub returns errors as {"message": "...", "documentation_url": "..."}
        let body_message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(String::from));

        let message = match (status, body_message) {
            (_, Some(msg)) => msg,
            (StatusCode::FORBIDDEN, None) => "Access denied".to_string(),
            (StatusCode::NOT_FOUND, None) => "Resource not found".to_string(),
            (StatusCode::TOO_MANY_REQUESTS, None) => "Rate limit exceeded".to_string(),
            _ => format!("Request failed ({}): {}", status_code, body),
        };

        AppError::github_api_full(message, status_code, endpoint)
    }

    /// Handle API response errors and decode the body.
    ///
    /// A success status with a body that does not decode is still an API
    /// failure, e.g. an HTML page served by a proxy.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, AppError> {
        let status = response.status();
        if status.is_success() {
            response.json::<T>().await.map_err(|e| {
                AppError::github_api_full(
                    format!("Failed to parse response: {}", e),
                    status.as_u16(),
                    endpoint,
                )
            })
        } else {
            Err(Self::error_from_response(response, endpoint).await)
        }
    }

    /// List deployments of a run that are waiting for review.
    pub async fn get_pending_deployments_for_run(
        &self,
        run: &RunContext,
    ) -> Result<Vec<GitHubPendingDeployment>, AppError> {
        let endpoint = Self::pending_deployments_endpoint(run);
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// Check a user's membership in a team.
    ///
    /// Any success status means a membership record exists, whatever its
    /// state or body. A 404 means the user is not a member (or the team is
    /// not visible to the token).
    pub async fn get_membership_for_user_in_org(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<bool, AppError> {
        let endpoint = format!(
            "/orgs/{}/teams/{}/memberships/{}",
            urlencoding::encode(org),
            urlencoding::encode(team_slug),
            urlencoding::encode(username)
        );
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;

        log::debug!(
            "Team membership response for {} in {}: {}",
            username,
            team_slug,
            response.status()
        );

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND {
            Ok(false)
        } else {
            Err(Self::error_from_response(response, &endpoint).await)
        }
    }

    /// Approve or reject pending deployments of a run.
    pub async fn review_pending_deployments_for_run(
        &self,
        run: &RunContext,
        request: &ReviewPendingDeploymentsRequest<'_>,
    ) -> Result<(), AppError> {
        let endpoint = Self::pending_deployments_endpoint(run);
        let url = self.api_url(&endpoint);
        let response = self.client.post(&url).json(request).send().await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_from_response(response, &endpoint).await)
        }
    }
}

#[async_trait]
impl DeploymentsApi for GitHubClient {
    async fn pending_deployments(
        &self,
        run: &RunContext,
    ) -> Result<Vec<GitHubPendingDeployment>, AppError> {
        self.get_pending_deployments_for_run(run).await
    }

    async fn approve_pending_deployments(
        &self,
        run: &RunContext,
        environment_ids: &[u64],
        comment: &str,
    ) -> Result<(), AppError> {
        let request = ReviewPendingDeploymentsRequest {
            environment_ids,
            state: "approved",
            comment,
        };
        self.review_pending_deployments_for_run(run, &request).await
    }
}

#[async_trait]
impl MembershipLookup for GitHubClient {
    async fn is_team_member(
        &self,
        org: &str,
        team_slug: &str,
        username: &str,
    ) -> Result<bool, AppError> {
        self.get_membership_for_user_in_org(org, team_slug, username).await
    }
}
