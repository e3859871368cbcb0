//! Configuration schema for flying-shuttle
//!
//! Configuration is stored in `shuttle.toml` at the project root. Keys use
//! the same camelCase spelling as the build tool's own configuration so the
//! serialized values that feed the fingerprint match it field for field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default prefix marking environment variables inlined into client output
pub const DEFAULT_PUBLIC_ENV_PREFIX: &str = "NEXT_PUBLIC_";

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShuttleConfig {
    /// Prefix selecting public environment variables
    pub public_env_prefix: String,

    /// Resolved build configuration
    pub build: BuildConfig,

    /// Layout of the build output tree
    pub layout: DistLayout,
}

impl Default for ShuttleConfig {
    fn default() -> Self {
        Self {
            public_env_prefix: DEFAULT_PUBLIC_ENV_PREFIX.to_string(),
            build: BuildConfig::default(),
            layout: DistLayout::default(),
        }
    }
}

/// The subset of the resolved build configuration that can invalidate a
/// stored shuttle.
///
/// Function-valued settings (`webpack`) are normalized to their source text
/// by whoever produces this structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildConfig {
    /// URL prefix the application is mounted under
    pub base_path: String,

    /// Build-time environment values inlined into the bundle
    pub env: BTreeMap<String, String>,

    /// Internationalized routing
    pub i18n: Option<I18nConfig>,

    /// Image optimization settings
    pub images: ImagesConfig,

    /// Emit source maps for browser bundles
    pub production_browser_source_maps: bool,

    /// Source text of the custom bundler hook
    pub webpack: Option<String>,

    /// Options passed through to the Sass compiler
    pub sass_options: serde_json::Map<String, serde_json::Value>,

    /// Append a trailing slash to every route
    pub trailing_slash: bool,

    /// Experimental switches
    pub experimental: ExperimentalConfig,
}

/// Internationalized routing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct I18nConfig {
    pub locales: Vec<String>,

    pub default_locale: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale_detection: Option<bool>,
}

/// Image optimization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImagesConfig {
    pub device_sizes: Vec<u32>,

    pub image_sizes: Vec<u32>,

    pub path: String,

    pub loader: String,

    pub domains: Vec<String>,

    pub remote_patterns: Vec<RemotePattern>,

    pub formats: Vec<String>,

    #[serde(rename = "minimumCacheTTL")]
    pub minimum_cache_ttl: u32,

    #[serde(rename = "dangerouslyAllowSVG")]
    pub dangerously_allow_svg: bool,

    pub unoptimized: bool,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            device_sizes: vec![640, 750, 828, 1080, 1200, 1920, 2048, 3840],
            image_sizes: vec![16, 32, 48, 64, 96, 128, 256, 384],
            path: "/_next/image".to_string(),
            loader: "default".to_string(),
            domains: vec![],
            remote_patterns: vec![],
            formats: vec!["image/webp".to_string()],
            minimum_cache_ttl: 60,
            dangerously_allow_svg: false,
            unoptimized: false,
        }
    }
}

/// Allowed remote image source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemotePattern {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,

    pub hostname: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
}

/// Experimental switches that change build output
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperimentalConfig {
    pub flying_shuttle: Option<bool>,

    /// Partial prerendering: `true`/`false` or `"incremental"`
    pub ppr: Option<PprSetting>,

    pub react_compiler: Option<ReactCompilerSetting>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PprSetting {
    Enabled(bool),
    Mode(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReactCompilerSetting {
    Enabled(bool),
    Options(ReactCompilerOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReactCompilerOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compilation_mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub panic_threshold: Option<String>,
}

/// Fixed layout of a finished build output tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DistLayout {
    /// Route manifest file name inside `server/`
    pub route_manifest: String,

    /// Manifests at the root of the dist dir copied into `manifests/`
    pub top_level_manifests: Vec<String>,

    /// File name suffixes dropped from the server copy
    pub rejected_server_suffixes: Vec<String>,
}

impl Default for DistLayout {
    fn default() -> Self {
        Self {
            route_manifest: "pages-manifest.json".to_string(),
            top_level_manifests: vec![
                "build-manifest.json".to_string(),
                "routes-manifest.json".to_string(),
                "app-build-manifest.json".to_string(),
                "react-loadable-manifest.json".to_string(),
                "app-path-routes-manifest.json".to_string(),
            ],
            rejected_server_suffixes: vec![
                ".rsc".to_string(),
                ".meta".to_string(),
                ".html".to_string(),
            ],
        }
    }
}
