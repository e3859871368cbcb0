//! Recursive tree copy with a file filter
//!
//! The source tree is walked first, following symlinks with loop detection,
//! so every destination directory exists before any file is written beneath
//! it. Accepted files are then copied on a bounded set of concurrent tasks.

use crate::error::{ShuttleError, ShuttleResult};
use crate::shuttle::filter::PathFilter;
use futures_util::stream::{self, StreamExt};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Maximum number of file copies in flight
pub const COPY_CONCURRENCY: usize = 16;

/// Counters reported by [`copy_tree`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub files_copied: usize,
    pub files_skipped: usize,
    pub dirs_created: usize,
    pub bytes_copied: u64,
}

/// Copy `src` into `dst`, keeping only files accepted by `filter`
///
/// Directories are always recreated, even when every file inside them is
/// rejected. A missing `src` is an error.
pub async fn copy_tree(src: &Path, dst: &Path, filter: &dyn PathFilter) -> ShuttleResult<CopyStats> {
    let meta = fs::metadata(src).await.map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ShuttleError::PathNotFound(src.to_path_buf()),
        _ => ShuttleError::io(format!("reading metadata of {}", src.display()), e),
    })?;
    if !meta.is_dir() {
        return Err(ShuttleError::io(
            format!("copying {}", src.display()),
            io::Error::other("source is not a directory"),
        ));
    }

    let mut stats = CopyStats::default();
    let files = plan_copy(src, dst, filter, &mut stats).await?;

    let mut copies = stream::iter(files.into_iter().map(|rel| {
        let from = src.join(&rel);
        let to = dst.join(&rel);
        async move {
            fs::copy(&from, &to).await.map_err(|e| {
                ShuttleError::io(format!("copying {} to {}", from.display(), to.display()), e)
            })
        }
    }))
    .buffer_unordered(COPY_CONCURRENCY);

    while let Some(result) = copies.next().await {
        stats.bytes_copied += result?;
        stats.files_copied += 1;
    }

    debug!(
        "Copied {} -> {}: {} files, {} skipped, {} dirs",
        src.display(),
        dst.display(),
        stats.files_copied,
        stats.files_skipped,
        stats.dirs_created
    );
    Ok(stats)
}

/// Directories and files under a source root, relative to it, in walk order
#[derive(Debug, Default)]
struct TreeListing {
    dirs: Vec<PathBuf>,
    files: Vec<PathBuf>,
}

/// Walk `src` following symlinks. A symlink cycle is an error.
fn list_tree(src: &Path) -> ShuttleResult<TreeListing> {
    let mut listing = TreeListing::default();

    for entry in WalkDir::new(src).follow_links(true).min_depth(1) {
        let entry = entry.map_err(|e| walk_error(src, e))?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| {
                ShuttleError::io(
                    format!("resolving {} under {}", entry.path().display(), src.display()),
                    io::Error::other(e),
                )
            })?
            .to_path_buf();

        if entry.file_type().is_dir() {
            listing.dirs.push(rel);
        } else {
            listing.files.push(rel);
        }
    }

    Ok(listing)
}

fn walk_error(src: &Path, err: walkdir::Error) -> ShuttleError {
    let path = err.path().unwrap_or(src).to_path_buf();
    if let Some(ancestor) = err.loop_ancestor() {
        return ShuttleError::io(
            format!(
                "walking {}: symlink {} loops back to {}",
                src.display(),
                path.display(),
                ancestor.display()
            ),
            io::Error::other("filesystem loop"),
        );
    }
    ShuttleError::io(format!("walking {}", path.display()), err.into())
}

/// Create the destination directory tree and return accepted file paths
/// relative to `src`.
async fn plan_copy(
    src: &Path,
    dst: &Path,
    filter: &dyn PathFilter,
    stats: &mut CopyStats,
) -> ShuttleResult<Vec<PathBuf>> {
    let root = src.to_path_buf();
    let listing = tokio::task::spawn_blocking(move || list_tree(&root))
        .await
        .map_err(|e| {
            ShuttleError::io(format!("walking {}", src.display()), io::Error::other(e))
        })??;

    // Walk order puts every parent before its children
    for rel in std::iter::once(PathBuf::new()).chain(listing.dirs) {
        let target = dst.join(&rel);
        fs::create_dir_all(&target)
            .await
            .map_err(|e| ShuttleError::io(format!("creating directory {}", target.display()), e))?;
        stats.dirs_created += 1;
    }

    let mut files = Vec::with_capacity(listing.files.len());
    for rel in listing.files {
        if filter.keep(&rel) {
            files.push(rel);
        } else {
            trace!("Skipping {}", rel.display());
            stats.files_skipped += 1;
        }
    }

    Ok(files)
}
