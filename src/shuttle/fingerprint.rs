//! Invalidation fingerprint for a stored shuttle
//!
//! The global hash covers every public environment variable and an explicit
//! allow-list of build configuration keys. Anything outside the allow-list
//! never affects the hash, so the list must grow whenever a new setting
//! starts changing build output.

use crate::config::schema::{BuildConfig, ReactCompilerSetting};
use crate::config::PublicEnv;
use crate::error::ShuttleResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Name of the fingerprint file at the root of a shuttle
pub const SHUTTLE_MANIFEST: &str = "shuttle-manifest.json";

/// Serialized form of a tracked key that has no value
pub const ABSENT: &str = "undefined";

/// Fingerprint persisted alongside a shuttle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuttleManifest {
    /// Version of the build tool that produced the snapshot
    pub tool_version: String,

    /// Hex SHA256 over public env and tracked config
    pub global_hash: String,
}

/// Resolved value of a tracked configuration key
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedValue {
    /// The key is not set
    Absent,
    /// Plain structural value, serialized as JSON
    Json(serde_json::Value),
    /// Function source text, hashed verbatim
    Source(String),
}

impl TrackedValue {
    fn json<T: Serialize>(value: &T) -> ShuttleResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }

    fn optional<T: Serialize>(value: Option<&T>) -> ShuttleResult<Self> {
        match value {
            Some(v) => Self::json(v),
            None => Ok(Self::Absent),
        }
    }

    /// Text fed to the hash after `key=`
    pub fn serialize(&self) -> ShuttleResult<String> {
        match self {
            Self::Absent => Ok(ABSENT.to_string()),
            Self::Json(value) => Ok(serde_json::to_string(value)?),
            Self::Source(text) => Ok(text.clone()),
        }
    }
}

/// A configuration key that invalidates the shuttle when it changes
pub struct TrackedKey {
    /// Dotted path of the key, as spelled in the build configuration
    pub name: &'static str,
    resolve: fn(&BuildConfig) -> ShuttleResult<TrackedValue>,
}

impl TrackedKey {
    /// Resolve this key against a configuration
    pub fn resolve(&self, config: &BuildConfig) -> ShuttleResult<TrackedValue> {
        (self.resolve)(config)
    }
}

/// Keys whose values can change build output. Kept in declaration order;
/// [`tracked_keys`] sorts them before use.
static TRACKED_KEYS: &[TrackedKey] = &[
    TrackedKey {
        name: "basePath",
        resolve: |c| TrackedValue::json(&c.base_path),
    },
    TrackedKey {
        name: "env",
        resolve: |c| TrackedValue::json(&c.env),
    },
    TrackedKey {
        name: "i18n",
        resolve: |c| TrackedValue::optional(c.i18n.as_ref()),
    },
    TrackedKey {
        name: "images",
        resolve: |c| TrackedValue::json(&c.images),
    },
    TrackedKey {
        name: "productionBrowserSourceMaps",
        resolve: |c| TrackedValue::json(&c.production_browser_source_maps),
    },
    TrackedKey {
        name: "webpack",
        resolve: |c| {
            Ok(match &c.webpack {
                Some(source) => TrackedValue::Source(source.clone()),
                None => TrackedValue::Absent,
            })
        },
    },
    TrackedKey {
        name: "sassOptions",
        resolve: |c| TrackedValue::json(&c.sass_options),
    },
    TrackedKey {
        name: "trailingSlash",
        resolve: |c| TrackedValue::json(&c.trailing_slash),
    },
    TrackedKey {
        name: "experimental.flyingShuttle",
        resolve: |c| TrackedValue::optional(c.experimental.flying_shuttle.as_ref()),
    },
    TrackedKey {
        name: "experimental.ppr",
        resolve: |c| TrackedValue::optional(c.experimental.ppr.as_ref()),
    },
    TrackedKey {
        name: "experimental.reactCompiler",
        resolve: |c| {
            TrackedValue::optional::<ReactCompilerSetting>(c.experimental.react_compiler.as_ref())
        },
    },
];

/// Tracked keys in lexicographic order of their names
pub fn tracked_keys() -> Vec<&'static TrackedKey> {
    let mut keys: Vec<&TrackedKey> = TRACKED_KEYS.iter().collect();
    keys.sort_by_key(|k| k.name);
    keys
}

/// Ordered `name=value` lines that make up the global hash input
pub fn hash_inputs(config: &BuildConfig, public_env: &PublicEnv) -> ShuttleResult<Vec<String>> {
    let mut inputs = Vec::with_capacity(public_env.len() + TRACKED_KEYS.len());

    let mut env_keys: Vec<&String> = public_env.keys().collect();
    env_keys.sort();
    for key in env_keys {
        inputs.push(format!("{}={}", key, public_env[key]));
    }

    for key in tracked_keys() {
        let value = key.resolve(config)?.serialize()?;
        inputs.push(format!("{}={}", key.name, value));
    }

    Ok(inputs)
}

/// Compute the shuttle manifest for a configuration and environment
///
/// Pure: performs no I/O. Callers constructing `public_env` in any order get
/// the same digest for the same contents.
pub fn generate_shuttle_manifest(
    config: &BuildConfig,
    public_env: &PublicEnv,
    tool_version: &str,
) -> ShuttleResult<ShuttleManifest> {
    let mut hasher = Sha256::new();
    for input in hash_inputs(config, public_env)? {
        hasher.update(input.as_bytes());
    }
    let global_hash = hex::encode(hasher.finalize());

    debug!(
        "Computed global hash {} over {} public env vars",
        global_hash,
        public_env.len()
    );

    Ok(ShuttleManifest {
        tool_version: tool_version.to_string(),
        global_hash,
    })
}
