//! Decides whether the actor may approve the gates of an environment.
//!
//! Reviewer entries are checked one after another. A team lookup is awaited
//! before the next entry is looked at, so there is never more than one
//! read-decide-write on the verdict in flight.

use crate::models::{AuthorizationVerdict, DeploymentGate, ReviewerEntry};
use crate::services::github_client::MembershipLookup;

/// Resolve the verdict for `actor` on the gates named `environment`.
///
/// `org` is the organisation that owns the reviewer teams. Gate names are
/// compared ignoring case. A failed membership lookup counts as "not a
/// member" and does not stop the scan.
pub async fn resolve<M>(
    gates: &[DeploymentGate],
    environment: &str,
    actor: &str,
    org: &str,
    membership: &M,
) -> AuthorizationVerdict
where
    M: MembershipLookup + ?Sized,
{
    let matched: Vec<&DeploymentGate> = gates
        .iter()
        .filter(|gate| gate.matches_environment(environment))
        .collect();

    if matched.is_empty() {
        log::info!("No pending gate matches environment {}", environment);
        return AuthorizationVerdict::not_found();
    }

    let mut verdict = AuthorizationVerdict {
        environment_found: true,
        ..Default::default()
    };

    for gate in matched {
        verdict.matched_gate_ids.insert(gate.environment_id);
        verdict
            .matched_environment_names
            .push(gate.environment_name.clone());

        for entry in &gate.reviewers {
            verdict
                .all_reviewers
                .insert(entry.display_name().to_string());

            // Once authorized, the remaining entries only add names.
            if verdict.authorized {
                continue;
            }

            verdict.authorized = match entry {
                ReviewerEntry::Individual { login } => login == actor,
                ReviewerEntry::Group { name, slug } => {
                    check_team(membership, org, slug, name, actor).await
                }
            };
        }
    }

    log::info!("Is a reviewer: {}", verdict.authorized);
    verdict
}

async fn check_team<M>(membership: &M, org: &str, slug: &str, name: &str, actor: &str) -> bool
where
    M: MembershipLookup + ?Sized,
{
    match membership.is_team_member(org, slug, actor).await {
        Ok(is_member) => {
            log::info!(
                "Team membership checked for {} in team {}: {}",
                actor,
                slug,
                if is_member { "member" } else { "not a member" }
            );
            is_member
        }
        Err(e) => {
            log::warn!(
                "Team membership check failed for {} in team {}: {}",
                actor,
                name,
                e
            );
            false
        }
    }
}
