//! Env Auto Approve - approve pending GitHub deployment reviews.
//!
//! Runs as a workflow step. It looks up the deployments of the current run
//! that wait for review, checks whether the triggering actor is one of the
//! required reviewers (directly or through a team) and, if so, approves
//! every pending gate of the requested environment.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

use config::ActionConfig;
use error::AppError;
use models::{ExecutionOutcome, RunContext};
use services::authorization;
use services::decision;
use services::gate_fetcher;
use services::{ActionsReporter, DeploymentsApi, GitHubClient, MembershipLookup};
use std::io::Write;

/// Fetch, resolve and execute for one environment.
///
/// The team lookups use the repository owner as organisation.
pub async fn auto_approve<C, W>(
    client: &C,
    reporter: &mut ActionsReporter<W>,
    run: &RunContext,
    environment: &str,
) -> Result<ExecutionOutcome, AppError>
where
    C: DeploymentsApi + MembershipLookup + ?Sized,
    W: Write,
{
    log::info!("Auto approval requested for {} environment.", environment);

    let gates = gate_fetcher::fetch_pending_gates(client, run).await?;
    let verdict =
        authorization::resolve(&gates, environment, &run.actor, &run.owner, client).await;

    decision::execute(client, reporter, run, environment, &verdict).await
}

/// Run the action with a real GitHub client, writing to stdout.
pub async fn run(config: &ActionConfig) -> Result<ExecutionOutcome, AppError> {
    let client = GitHubClient::new(config.client.clone())?;
    let mut reporter = ActionsReporter::stdout(config.summary_path.clone());

    auto_approve(&client, &mut reporter, &config.run, &config.environment).await
}

/// Whether an invocation result should fail the workflow step.
///
/// Transport errors fail the step only when `fail_on_error` is set; any
/// other error always fails it.
pub fn fails_step(result: &Result<ExecutionOutcome, AppError>, fail_on_error: bool) -> bool {
    match result {
        Ok(_) => false,
        Err(e) if e.is_transport() => fail_on_error,
        Err(_) => true,
    }
}
