//! Public environment variable discovery
//!
//! Only variables carrying the public prefix are inlined into client-visible
//! output, so only those can invalidate a stored shuttle.

use std::collections::HashMap;
use tracing::warn;

/// Public environment variables by name
pub type PublicEnv = HashMap<String, String>;

/// Keep the `(name, value)` pairs whose name starts with `prefix`
pub fn collect_public_env<I, K, V>(vars: I, prefix: &str) -> PublicEnv
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    vars.into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .filter(|(k, _)| k.starts_with(prefix))
        .collect()
}

/// Collect public variables from the current process environment
///
/// Variables whose name is not UTF-8 cannot carry the prefix and are ignored.
/// A public variable whose value is not UTF-8 cannot be inlined either, so it
/// is skipped with a warning.
pub fn public_env_from_process(prefix: &str) -> PublicEnv {
    let vars = std::env::vars_os().filter_map(|(name, value)| {
        let name = name.into_string().ok()?;
        if !name.starts_with(prefix) {
            return None;
        }
        match value.into_string() {
            Ok(value) => Some((name, value)),
            Err(_) => {
                warn!("Ignoring {}: value is not valid UTF-8", name);
                None
            }
        }
    });
    collect_public_env(vars, prefix)
}
