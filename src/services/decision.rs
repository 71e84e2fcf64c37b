//! Acts on an authorization verdict: approve, or explain why not.

use crate::error::AppError;
use crate::models::{AuthorizationVerdict, ExecutionOutcome, RunContext};
use crate::services::github_client::DeploymentsApi;
use crate::services::reporter::ActionsReporter;
use std::io::Write;

/// Heading of the job summary entry written after an approval.
pub const SUMMARY_HEADING: &str = " :white_check_mark: Auto Approval Status";

/// Comment attached to the approval review.
pub fn approval_comment(environments: &str) -> String {
    format!(
        "Auto-Approved by GitHub Action for environment(s) - {}",
        environments
    )
}

/// Execute the verdict for `environment`.
///
/// Only the approved branch calls the API. The approval is sent once; a
/// repeated approval of the same gate is left to GitHub to handle.
pub async fn execute<A, W>(
    api: &A,
    reporter: &mut ActionsReporter<W>,
    run: &RunContext,
    environment: &str,
    verdict: &AuthorizationVerdict,
) -> Result<ExecutionOutcome, AppError>
where
    A: DeploymentsApi + ?Sized,
    W: Write,
{
    if !verdict.environment_found || verdict.matched_gate_ids.is_empty() {
        log::warn!("Environment {} not found in pending deployments", environment);
        reporter.warning(&format!(
            "env '{}' is not part of the workflow or deployment was already approved by one of the reviewers",
            environment
        ))?;
        return Ok(ExecutionOutcome::EnvironmentNotFound {
            environment: environment.to_string(),
        });
    }

    let environments = verdict.environment_list();

    if !verdict.authorized {
        log::info!(
            "{} is not a reviewer in [{}]",
            run.actor,
            verdict.reviewer_list()
        );
        reporter.notice(&format!(
            "Auto Approval Not Possible; current user is not a reviewer for the environment(s) - {}",
            environments
        ))?;
        reporter.info(&format!("Reviewers: {}", verdict.reviewer_list()))?;
        return Ok(ExecutionOutcome::NotAuthorized {
            environments: verdict.matched_environment_names.clone(),
            reviewers: verdict.all_reviewers.iter().cloned().collect(),
        });
    }

    let environment_ids: Vec<u64> = verdict.matched_gate_ids.iter().copied().collect();
    api.approve_pending_deployments(run, &environment_ids, &approval_comment(&environments))
        .await?;
    log::info!(
        "Approved environment(s) {} ({:?}) for {}",
        environments,
        environment_ids,
        run.actor
    );

    reporter.append_summary(
        SUMMARY_HEADING,
        &format!("Auto-Approved by GitHub Action. Reviewer: {}", run.actor),
    )?;

    Ok(ExecutionOutcome::Approved {
        environment_ids,
        environments: verdict.matched_environment_names.clone(),
    })
}
