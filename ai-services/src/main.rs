// ai-services/src/main.rs

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ai_services_core::infrastructure::config::load_config;

mod cli;
mod commands;

use cli::{ApplicationAction, BootstrapAction, Cli, Commands};
use commands::AppContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 1. Setup Logging (Tracing)
    // RUST_LOG=debug ai-services bootstrap ... wins over --verbose
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n💥 Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // A. Load the Config (Infra), the CLI flag has the last word
    let cwd = std::env::current_dir().context("Cannot determine the working directory")?;
    let mut config = load_config(cli.config.as_deref(), &cwd)?;
    if let Some(runtime) = cli.runtime {
        config.runtime = runtime;
    }
    let ctx = AppContext::new(config);

    // B. Dispatch
    match cli.command {
        Commands::Bootstrap { action: None } => commands::bootstrap::execute(&ctx).await,
        Commands::Bootstrap {
            action: Some(BootstrapAction::Configure),
        } => commands::configure::execute(&ctx).await,
        Commands::Bootstrap {
            action: Some(BootstrapAction::Validate { skip_validation }),
        } => commands::validate::execute(&ctx, &skip_validation).await,
        Commands::Application {
            action:
                ApplicationAction::Logs {
                    pod,
                    container,
                    namespace,
                },
        } => commands::logs::execute(&ctx, pod, container, namespace).await,
        Commands::Version => commands::version::execute(&ctx),
    }
}
