//! Route manifest normalization
//!
//! A shuttle is captured before static generation runs, so a route recorded
//! as prerendered HTML must point back at the module that renders it.

use crate::error::{ShuttleError, ShuttleResult};
use std::collections::BTreeMap;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Route identifier to output file path. Written back with keys sorted; only
/// the key set is preserved, not the original key order.
pub type RouteManifest = BTreeMap<String, String>;

const HTML_EXT: &str = ".html";
const MODULE_EXT: &str = ".js";

/// Rewrite every `.html` entry to its `.js` module. Returns the normalized
/// manifest and the number of entries rewritten.
pub fn normalize_route_manifest(manifest: RouteManifest) -> (RouteManifest, usize) {
    let mut rewritten = 0;
    let normalized = manifest
        .into_iter()
        .map(|(route, file)| match file.strip_suffix(HTML_EXT) {
            Some(stem) => {
                rewritten += 1;
                (route, format!("{stem}{MODULE_EXT}"))
            }
            None => (route, file),
        })
        .collect();
    (normalized, rewritten)
}

/// Read a route manifest, normalize it and write it back in place
pub async fn normalize_manifest_file(path: &Path) -> ShuttleResult<usize> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ShuttleError::io(format!("reading route manifest {}", path.display()), e))?;

    let manifest: RouteManifest =
        serde_json::from_str(&content).map_err(|e| ShuttleError::ManifestParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let total = manifest.len();
    let (normalized, rewritten) = normalize_route_manifest(manifest);

    fs::write(path, serde_json::to_string(&normalized)?)
        .await
        .map_err(|e| ShuttleError::io(format!("writing route manifest {}", path.display()), e))?;

    debug!(
        "Normalized {}: {} of {} routes rewritten",
        path.display(),
        rewritten,
        total
    );
    Ok(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manifest(entries: &[(&str, &str)]) -> RouteManifest {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn html_entries_point_at_modules() {
        let input = manifest(&[("/a", "pages/a.html"), ("/b", "pages/b.js")]);
        let (out, rewritten) = normalize_route_manifest(input.clone());

        assert_eq!(out, manifest(&[("/a", "pages/a.js"), ("/b", "pages/b.js")]));
        assert_eq!(rewritten, 1);
        assert!(out.keys().eq(input.keys()));
    }

    #[test]
    fn only_trailing_extension_is_rewritten() {
        let input = manifest(&[
            ("/html", "pages/html.html.js"),
            ("/docs", "pages/docs.htmlx"),
            ("/404", "pages/404.html"),
        ]);
        let (out, rewritten) = normalize_route_manifest(input);

        assert_eq!(out["/html"], "pages/html.html.js");
        assert_eq!(out["/docs"], "pages/docs.htmlx");
        assert_eq!(out["/404"], "pages/404.js");
        assert_eq!(rewritten, 1);
    }

    #[test]
    fn empty_manifest_stays_empty() {
        let (out, rewritten) = normalize_route_manifest(RouteManifest::new());
        assert!(out.is_empty());
        assert_eq!(rewritten, 0);
    }

    #[tokio::test]
    async fn rewrites_file_in_place() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pages-manifest.json");
        std::fs::write(&path, r#"{"/a":"pages/a.html","/b":"pages/b.js"}"#).unwrap();

        let rewritten = normalize_manifest_file(&path).await.unwrap();

        assert_eq!(rewritten, 1);
        let on_disk: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            on_disk,
            serde_json::json!({"/a": "pages/a.js", "/b": "pages/b.js"})
        );
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pages-manifest.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = normalize_manifest_file(&path).await.unwrap_err();
        assert!(matches!(err, ShuttleError::ManifestParse { .. }));
    }

    #[tokio::test]
    async fn non_string_values_are_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("pages-manifest.json");
        std::fs::write(&path, r#"{"/a": 1}"#).unwrap();

        let err = normalize_manifest_file(&path).await.unwrap_err();
        assert!(matches!(err, ShuttleError::ManifestParse { .. }));
    }

    #[tokio::test]
    async fn missing_manifest_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = normalize_manifest_file(&temp.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShuttleError::Io { .. }));
    }
}
