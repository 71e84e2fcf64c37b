//! Fetches the pending deployment gates of the current run.

use crate::error::AppError;
use crate::models::{DeploymentGate, ReviewerEntry, RunContext};
use crate::services::github_client::{
    DeploymentsApi, GitHubDeploymentReviewer, GitHubPendingDeployment,
};

/// Fetch all gates waiting for review in `run`.
///
/// Errors from the API are returned as-is; there is no retry.
pub async fn fetch_pending_gates<A>(
    api: &A,
    run: &RunContext,
) -> Result<Vec<DeploymentGate>, AppError>
where
    A: DeploymentsApi + ?Sized,
{
    let deployments = api.pending_deployments(run).await?;
    log::debug!(
        "Run {} has {} pending deployment(s)",
        run.run_id,
        deployments.len()
    );

    Ok(deployments.into_iter().map(into_gate).collect())
}

fn into_gate(deployment: GitHubPendingDeployment) -> DeploymentGate {
    let environment_name = deployment.environment.name;
    let reviewers = deployment
        .reviewers
        .into_iter()
        .filter_map(|r| {
            let entry = into_reviewer_entry(&r);
            if entry.is_none() {
                log::warn!(
                    "Skipping unsupported reviewer of type '{}' on environment {}",
                    r.reviewer_type,
                    environment_name
                );
            }
            entry
        })
        .collect();

    DeploymentGate {
        environment_id: deployment.environment.id,
        environment_name,
        reviewers,
    }
}

fn into_reviewer_entry(reviewer: &GitHubDeploymentReviewer) -> Option<ReviewerEntry> {
    let inner = &reviewer.reviewer;
    match reviewer.reviewer_type.as_str() {
        "User" => inner.login.clone().map(ReviewerEntry::individual),
        "Team" => match (&inner.name, &inner.slug) {
            (Some(name), Some(slug)) => Some(ReviewerEntry::group(name, slug)),
            _ => None,
        },
        _ => None,
    }
}
