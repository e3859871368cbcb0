//! Store command - snapshot a finished build

use super::{resolve_public_env, resolve_tool_version};
use crate::cli::args::StoreArgs;
use crate::config::ShuttleConfig;
use crate::error::ShuttleResult;
use crate::shuttle::ShuttleWriter;
use console::style;
use tracing::debug;

/// Execute the store command
pub async fn execute(args: StoreArgs, config: &ShuttleConfig) -> ShuttleResult<()> {
    let tool_version = resolve_tool_version(args.tool_version.as_deref())?;
    let public_env = resolve_public_env(config, &args.env);
    let shuttle_dir = args.shuttle_dir();
    debug!("Using {} public env vars", public_env.len());

    let writer = ShuttleWriter::new(config.layout.clone(), tool_version);
    let report = writer
        .store(&args.dist_dir, &shuttle_dir, &config.build, &public_env)
        .await?;

    println!(
        "{} Stored shuttle at {}",
        style("[OK]").green(),
        shuttle_dir.display()
    );
    println!(
        "  {} {}",
        style("Global hash:").bold(),
        report.manifest.global_hash
    );
    println!(
        "  {} {} copied, {} skipped",
        style("Server files:").bold(),
        report.server.files_copied,
        report.server.files_skipped
    );
    println!(
        "  {} {} copied",
        style("Static files:").bold(),
        report.static_assets.files_copied
    );
    println!(
        "  {} {} rewritten",
        style("Routes:").bold(),
        report.routes_rewritten
    );
    println!(
        "  {} {}",
        style("Manifests:").bold(),
        report.manifests_copied.join(", ")
    );

    Ok(())
}
