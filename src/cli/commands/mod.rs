//! CLI command implementations

pub mod fingerprint;
pub mod store;

pub use fingerprint::execute as fingerprint;
pub use store::execute as store;

use crate::config::{collect_public_env, public_env_from_process, PublicEnv, ShuttleConfig};
use crate::error::{ShuttleError, ShuttleResult};

/// Validate the tool version, defaulting to this crate's own version
pub(crate) fn resolve_tool_version(requested: Option<&str>) -> ShuttleResult<String> {
    let version = requested.unwrap_or(env!("CARGO_PKG_VERSION"));
    semver::Version::parse(version).map_err(|e| ShuttleError::InvalidToolVersion {
        version: version.to_string(),
        reason: e.to_string(),
    })?;
    Ok(version.to_string())
}

/// Public variables from the process, overridden by `--env` pairs
pub(crate) fn resolve_public_env(config: &ShuttleConfig, extra: &[(String, String)]) -> PublicEnv {
    let mut env = public_env_from_process(&config.public_env_prefix);
    env.extend(collect_public_env(extra.iter().cloned(), &config.public_env_prefix));
    env
}
