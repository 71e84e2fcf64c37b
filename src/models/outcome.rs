//! Terminal outcomes of one invocation.

use serde::Serialize;

/// What the decision step did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    /// No pending gate for the requested environment.
    EnvironmentNotFound { environment: String },

    /// Gates exist but the actor is not among their reviewers.
    NotAuthorized {
        environments: Vec<String>,
        reviewers: Vec<String>,
    },

    /// All matched gates were approved in one request.
    Approved {
        environment_ids: Vec<u64>,
        environments: Vec<String>,
    },
}

impl ExecutionOutcome {
    /// Whether an approval was submitted.
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::Approved { .. })
    }
}
