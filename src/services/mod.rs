//! Business logic services.
//!
//! This module contains the GitHub client and the three steps of an
//! invocation: fetching gates, resolving the verdict and acting on it.
//!
//! The steps depend on the client only through its traits and can be driven
//! by fakes in tests.

pub mod authorization;
pub mod decision;
pub mod gate_fetcher;
pub mod github_client;
pub mod reporter;

pub use github_client::{DeploymentsApi, GitHubClient, MembershipLookup};
pub use reporter::ActionsReporter;
