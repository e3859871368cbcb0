//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shuttle - build snapshots for incremental builds
///
/// Stores a trimmed copy of a finished build together with a fingerprint
/// of every setting that can invalidate it.
#[derive(Parser, Debug)]
#[command(name = "shuttle")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path (defaults to ./shuttle.toml when present)
    #[arg(short, long, global = true, env = "SHUTTLE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Snapshot a finished build into a shuttle directory
    Store(StoreArgs),

    /// Print the invalidation fingerprint for the current configuration
    Fingerprint(FingerprintArgs),
}

/// Arguments for the store command
#[derive(Parser, Debug)]
pub struct StoreArgs {
    /// Build output directory
    #[arg(short, long, default_value = ".next")]
    pub dist_dir: PathBuf,

    /// Shuttle directory (defaults to <dist-dir>/cache/shuttle)
    #[arg(short, long)]
    pub shuttle_dir: Option<PathBuf>,

    /// Build tool version recorded in the shuttle manifest
    #[arg(long, env = "SHUTTLE_TOOL_VERSION")]
    pub tool_version: Option<String>,

    /// Additional public environment variables (KEY=VALUE)
    #[arg(short, long, value_parser = parse_env_var)]
    pub env: Vec<(String, String)>,
}

impl StoreArgs {
    /// Resolved shuttle directory
    pub fn shuttle_dir(&self) -> PathBuf {
        self.shuttle_dir
            .clone()
            .unwrap_or_else(|| self.dist_dir.join("cache").join("shuttle"))
    }
}

/// Arguments for the fingerprint command
#[derive(Parser, Debug)]
pub struct FingerprintArgs {
    /// Build tool version recorded in the shuttle manifest
    #[arg(long, env = "SHUTTLE_TOOL_VERSION")]
    pub tool_version: Option<String>,

    /// Additional public environment variables (KEY=VALUE)
    #[arg(short, long, value_parser = parse_env_var)]
    pub env: Vec<(String, String)>,

    /// Print the hash input lines instead of the manifest
    #[arg(long)]
    pub explain: bool,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,
}

/// Output format for the fingerprint command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Global hash only
    Plain,
}

/// Parse environment variable in KEY=VALUE format
fn parse_env_var(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE format: no '=' found in '{s}'"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
