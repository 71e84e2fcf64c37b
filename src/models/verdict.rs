//! Authorization verdict produced by the resolver.

use serde::Serialize;
use std::collections::BTreeSet;

/// Outcome of matching the actor against the gates of one environment.
///
/// Built once by the resolver and read by the decision step afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorizationVerdict {
    /// At least one gate matched the requested environment.
    pub environment_found: bool,
    /// Environment IDs of every matched gate.
    pub matched_gate_ids: BTreeSet<u64>,
    /// Names of matched gates, in gate order.
    pub matched_environment_names: Vec<String>,
    /// Logins and team names across all matched gates.
    pub all_reviewers: BTreeSet<String>,
    /// The actor matched at least one reviewer entry.
    pub authorized: bool,
}

impl AuthorizationVerdict {
    /// Verdict for an environment that has no pending gate.
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Matched environment names joined for display.
    pub fn environment_list(&self) -> String {
        self.matched_environment_names.join(",")
    }

    /// Reviewer names joined for display.
    pub fn reviewer_list(&self) -> String {
        self.all_reviewers
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}
