use clap::Parser;
use env_auto_approve::cli::Cli;
use env_auto_approve::config::ActionConfig;
use env_auto_approve::error::AppError;
use env_auto_approve::services::ActionsReporter;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn report_error(reporter: &mut ActionsReporter, err: &AppError) {
    log::error!("{}", err);
    if let Err(e) = reporter.error(&err.to_string()) {
        log::warn!("Failed to write error annotation: {}", e);
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("env_auto_approve=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut reporter = ActionsReporter::stdout(None);

    let config = match ActionConfig::from_cli(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            report_error(&mut reporter, &e);
            return ExitCode::FAILURE;
        }
    };

    let result = env_auto_approve::run(&config).await;
    match &result {
        Ok(outcome) => log::info!(
            "Finished: {}",
            serde_json::to_string(outcome).unwrap_or_default()
        ),
        Err(e) => report_error(&mut reporter, e),
    }

    if env_auto_approve::fails_step(&result, config.fail_on_error) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
