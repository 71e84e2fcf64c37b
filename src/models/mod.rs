//! Data models for the approval flow.
//!
//! Gates are built fresh from each fetch, the verdict is derived from them,
//! and the outcome records what was done. None of them outlive one run.

pub mod deployment_gate;
pub mod outcome;
pub mod run_context;
pub mod verdict;

// Re-exports for convenient access
pub use deployment_gate::{DeploymentGate, ReviewerEntry};
pub use outcome::ExecutionOutcome;
pub use run_context::RunContext;
pub use verdict::AuthorizationVerdict;
