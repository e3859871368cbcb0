//! Fingerprint command - print the invalidation key without touching disk

use super::{resolve_public_env, resolve_tool_version};
use crate::cli::args::{FingerprintArgs, OutputFormat};
use crate::config::ShuttleConfig;
use crate::error::ShuttleResult;
use crate::shuttle::fingerprint::{generate_shuttle_manifest, hash_inputs};

/// Execute the fingerprint command
pub async fn execute(args: FingerprintArgs, config: &ShuttleConfig) -> ShuttleResult<()> {
    let tool_version = resolve_tool_version(args.tool_version.as_deref())?;
    let public_env = resolve_public_env(config, &args.env);

    if args.explain {
        for line in hash_inputs(&config.build, &public_env)? {
            println!("{}", line);
        }
        return Ok(());
    }

    let manifest = generate_shuttle_manifest(&config.build, &public_env, &tool_version)?;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&manifest)?),
        OutputFormat::Plain => println!("{}", manifest.global_hash),
    }

    Ok(())
}
