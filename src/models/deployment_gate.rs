//! Pending deployment gate model.

use serde::Serialize;

/// One environment waiting for approval in the current workflow run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentGate {
    /// Environment ID, used when submitting the approval.
    pub environment_id: u64,
    /// Environment name as configured in the repository.
    pub environment_name: String,
    /// Reviewers allowed to approve this gate, in API order.
    pub reviewers: Vec<ReviewerEntry>,
}

impl DeploymentGate {
    /// Whether this gate belongs to `environment`, ignoring case.
    pub fn matches_environment(&self, environment: &str) -> bool {
        self.environment_name.to_lowercase() == environment.to_lowercase()
    }
}

/// A single required reviewer on a gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReviewerEntry {
    /// A user, matched by login.
    Individual { login: String },
    /// A team, matched through an org membership lookup on `slug`.
    Group { name: String, slug: String },
}

impl ReviewerEntry {
    /// Create an individual reviewer.
    pub fn individual(login: impl Into<String>) -> Self {
        Self::Individual {
            login: login.into(),
        }
    }

    /// Create a group reviewer.
    pub fn group(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self::Group {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Name shown in the reviewer list: the login or the team name.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Individual { login } => login,
            Self::Group { name, .. } => name,
        }
    }
}
