//! Shuttle construction
//!
//! Materializes a trimmed copy of a finished build plus its fingerprint:
//!
//! ```text
//! shuttle/
//!   shuttle-manifest.json   { toolVersion, globalHash }
//!   server/                 server output without render-time artifacts
//!   static/                 verbatim copy of static assets
//!   manifests/              top-level build manifests
//! ```
//!
//! A store always starts from an empty directory. On failure the shuttle is
//! left in an unspecified state and must be rebuilt from scratch.

use crate::config::{BuildConfig, DistLayout, PublicEnv};
use crate::error::{ShuttleError, ShuttleResult};
use crate::shuttle::copy::{copy_tree, CopyStats};
use crate::shuttle::filter::{KeepAll, ServerArtifactFilter};
use crate::shuttle::fingerprint::{generate_shuttle_manifest, ShuttleManifest, SHUTTLE_MANIFEST};
use crate::shuttle::manifest::normalize_manifest_file;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

pub const SERVER_DIR: &str = "server";
pub const STATIC_DIR: &str = "static";
pub const MANIFESTS_DIR: &str = "manifests";

/// Summary of a completed store
#[derive(Debug, Clone)]
pub struct StoreReport {
    pub manifest: ShuttleManifest,
    pub server: CopyStats,
    pub static_assets: CopyStats,
    pub routes_rewritten: usize,
    pub manifests_copied: Vec<String>,
}

/// Builds shuttles for one build tool version and output layout
#[derive(Debug, Clone)]
pub struct ShuttleWriter {
    layout: DistLayout,
    tool_version: String,
}

impl ShuttleWriter {
    pub fn new(layout: DistLayout, tool_version: impl Into<String>) -> Self {
        Self {
            layout,
            tool_version: tool_version.into(),
        }
    }

    pub fn layout(&self) -> &DistLayout {
        &self.layout
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    /// Replace whatever is at `shuttle_dir` with a fresh shuttle of `dist_dir`
    ///
    /// Two stores must never target the same `shuttle_dir` concurrently;
    /// callers serialize them.
    pub async fn store(
        &self,
        dist_dir: &Path,
        shuttle_dir: &Path,
        config: &BuildConfig,
        public_env: &PublicEnv,
    ) -> ShuttleResult<StoreReport> {
        info!(
            "Storing shuttle {} -> {}",
            dist_dir.display(),
            shuttle_dir.display()
        );

        clear_dir(shuttle_dir).await?;
        if let Err(e) = fs::metadata(dist_dir).await {
            return Err(match e.kind() {
                io::ErrorKind::NotFound => ShuttleError::PathNotFound(dist_dir.to_path_buf()),
                _ => ShuttleError::io(format!("reading dist dir {}", dist_dir.display()), e),
            });
        }

        fs::create_dir_all(shuttle_dir).await.map_err(|e| {
            ShuttleError::io(format!("creating shuttle dir {}", shuttle_dir.display()), e)
        })?;

        let manifest = generate_shuttle_manifest(config, public_env, &self.tool_version)?;
        let manifest_path = shuttle_dir.join(SHUTTLE_MANIFEST);
        fs::write(&manifest_path, serde_json::to_string(&manifest)?)
            .await
            .map_err(|e| ShuttleError::io(format!("writing {}", manifest_path.display()), e))?;
        info!("Shuttle global hash: {}", manifest.global_hash);

        let server_filter =
            ServerArtifactFilter::new(self.layout.rejected_server_suffixes.iter().cloned());
        let server = copy_tree(
            &dist_dir.join(SERVER_DIR),
            &shuttle_dir.join(SERVER_DIR),
            &server_filter,
        )
        .await?;

        // The whole server copy has finished, so the manifest is in place
        let routes_rewritten = normalize_manifest_file(
            &shuttle_dir.join(SERVER_DIR).join(&self.layout.route_manifest),
        )
        .await?;

        let static_assets = copy_tree(
            &dist_dir.join(STATIC_DIR),
            &shuttle_dir.join(STATIC_DIR),
            &KeepAll,
        )
        .await?;

        let manifests_copied = self.copy_top_level_manifests(dist_dir, shuttle_dir).await?;

        info!(
            "Stored shuttle: {} server files ({} skipped), {} static files, {} routes rewritten",
            server.files_copied,
            server.files_skipped,
            static_assets.files_copied,
            routes_rewritten
        );

        Ok(StoreReport {
            manifest,
            server,
            static_assets,
            routes_rewritten,
            manifests_copied,
        })
    }

    async fn copy_top_level_manifests(
        &self,
        dist_dir: &Path,
        shuttle_dir: &Path,
    ) -> ShuttleResult<Vec<String>> {
        let manifests_dir = shuttle_dir.join(MANIFESTS_DIR);
        fs::create_dir_all(&manifests_dir).await.map_err(|e| {
            ShuttleError::io(format!("creating {}", manifests_dir.display()), e)
        })?;

        let mut copied = Vec::with_capacity(self.layout.top_level_manifests.len());
        for name in &self.layout.top_level_manifests {
            let from = dist_dir.join(name);
            let to = manifests_dir.join(name);
            if let Some(parent) = to.parent() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| ShuttleError::io(format!("creating {}", parent.display()), e))?;
            }
            fs::copy(&from, &to).await.map_err(|e| {
                ShuttleError::io(format!("copying manifest {}", from.display()), e)
            })?;
            debug!("Copied manifest {}", name);
            copied.push(name.clone());
        }
        Ok(copied)
    }
}

/// Remove `path` whether it is a directory, a file or missing
async fn clear_dir(path: &Path) -> ShuttleResult<()> {
    let meta = match fs::symlink_metadata(path).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(ShuttleError::io(
                format!("inspecting shuttle dir {}", path.display()),
                e,
            ))
        }
    };

    let result = if meta.is_dir() {
        fs::remove_dir_all(path).await
    } else {
        fs::remove_file(path).await
    };

    match result {
        Ok(()) => {
            debug!("Removed previous shuttle at {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ShuttleError::io(
            format!("removing previous shuttle {}", path.display()),
            e,
        )),
    }
}
