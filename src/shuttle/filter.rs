//! Path predicates applied while copying build output

use std::path::Path;

/// Decides whether a file is copied. Paths are relative to the copy root.
pub trait PathFilter: Send + Sync {
    fn keep(&self, path: &Path) -> bool;
}

impl<F> PathFilter for F
where
    F: Fn(&Path) -> bool + Send + Sync,
{
    fn keep(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Accepts every file
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepAll;

impl PathFilter for KeepAll {
    fn keep(&self, _path: &Path) -> bool {
        true
    }
}

/// Drops render-time artifacts from the server output: flight payloads,
/// render metadata and prerendered HTML.
#[derive(Debug, Clone)]
pub struct ServerArtifactFilter {
    rejected_suffixes: Vec<String>,
}

impl ServerArtifactFilter {
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rejected_suffixes: suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ServerArtifactFilter {
    fn default() -> Self {
        Self::new([".rsc", ".meta", ".html"])
    }
}

impl PathFilter for ServerArtifactFilter {
    fn keep(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            // Non UTF-8 names cannot carry one of the suffixes
            return true;
        };
        !self
            .rejected_suffixes
            .iter()
            .any(|suffix| name.ends_with(suffix.as_str()))
    }
}
