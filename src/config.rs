//! Validated action configuration.

use crate::cli::Cli;
use crate::error::AppError;
use crate::models::RunContext;
use crate::services::github_client::GitHubClientConfig;
use std::path::PathBuf;

/// Everything one invocation needs, checked up front.
#[derive(Debug, Clone)]
pub struct ActionConfig {
    pub client: GitHubClientConfig,
    /// Environment name as given by the user.
    pub environment: String,
    pub run: RunContext,
    pub summary_path: Option<PathBuf>,
    /// Fail the step on GitHub API errors instead of only reporting them.
    pub fail_on_error: bool,
}

impl ActionConfig {
    /// Build the configuration from parsed arguments.
    ///
    /// A missing or blank token input falls back to `GITHUB_TOKEN`.
    /// Environment and actor are kept exactly as given; they are only
    /// checked for being blank.
    pub fn from_cli(cli: Cli) -> Result<Self, AppError> {
        let token = non_blank(cli.github_token)
            .or_else(|| non_blank(std::env::var("GITHUB_TOKEN").ok()))
            .ok_or_else(|| {
                AppError::invalid_input_field("GitHub token is required", "github_token")
            })?;

        let environment = cli.environment;
        if environment.trim().is_empty() {
            return Err(AppError::invalid_input_field(
                "Environment name is required",
                "environment",
            ));
        }

        let (owner, repo) = parse_repository(&cli.repository)?;
        let actor = cli.actor;
        if actor.trim().is_empty() {
            return Err(AppError::invalid_input_field("Actor is required", "actor"));
        }

        Ok(Self {
            client: GitHubClientConfig {
                api_url: cli.api_url,
                token,
                timeout_secs: cli.timeout_secs,
            },
            environment,
            run: RunContext {
                owner,
                repo,
                run_id: cli.run_id,
                actor,
            },
            summary_path: cli.step_summary,
            fail_on_error: cli.fail_on_error,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Split `owner/repo`.
fn parse_repository(repository: &str) -> Result<(String, String), AppError> {
    match repository.trim().split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(AppError::invalid_input_field(
            format!("Expected owner/repo, got '{}'", repository),
            "repository",
        )),
    }
}
