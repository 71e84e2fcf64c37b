//! Workflow run context supplied by the runner.

/// Identity of the run being approved and of the user who started it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Repository owner; also the org used for team lookups.
    pub owner: String,
    pub repo: String,
    pub run_id: u64,
    /// Login of the user that triggered the run.
    pub actor: String,
}
