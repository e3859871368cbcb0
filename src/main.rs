//! Shuttle - build snapshot CLI
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use flying_shuttle::cli::{Cli, Commands};
use flying_shuttle::config::ConfigManager;
use flying_shuttle::error::ShuttleResult;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ShuttleResult<()> {
    let cli = Cli::parse();

    // 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("flying_shuttle=warn"),
        1 => EnvFilter::new("flying_shuttle=info"),
        _ => EnvFilter::new("flying_shuttle=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    match cli.command {
        Commands::Store(args) => flying_shuttle::cli::commands::store(args, &config).await,
        Commands::Fingerprint(args) => {
            flying_shuttle::cli::commands::fingerprint(args, &config).await
        }
    }
}
