use clap::builder::BoolishValueParser;
use clap::Parser;
use std::path::PathBuf;

/// Approve pending deployment reviews of the current workflow run when the
/// triggering actor is one of the required reviewers.
///
/// Every option falls back to the variable the Actions runner sets, so the
/// binary needs no flags when run as an action step.
#[derive(Debug, Parser)]
#[command(name = "env-auto-approve", version, about)]
pub struct Cli {
    /// Token used to call the GitHub API (falls back to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Environment to approve, compared ignoring case
    #[arg(long, env = "INPUT_ENVIRONMENT")]
    pub environment: String,

    /// Repository in `owner/repo` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Workflow run ID
    #[arg(long, env = "GITHUB_RUN_ID")]
    pub run_id: u64,

    /// Login of the user that triggered the run
    #[arg(long, env = "GITHUB_ACTOR")]
    pub actor: String,

    /// REST API base URL
    #[arg(long, env = "GITHUB_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// File the job summary is appended to
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    pub step_summary: Option<PathBuf>,

    /// Exit non-zero when a GitHub API call fails
    #[arg(
        long,
        env = "INPUT_FAIL_ON_ERROR",
        num_args = 0..=1,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub fail_on_error: bool,

    /// HTTP request timeout in seconds
    #[arg(long, env = "INPUT_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}
