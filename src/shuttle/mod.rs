//! Shuttle snapshots for incremental builds
//!
//! After a full build, a shuttle captures the build output in its
//! pre-static-generation state together with a global hash of everything
//! that can invalidate it. A later build compares hashes to decide whether
//! the shuttle can be reused.
//!
//! # Pipeline
//!
//! | Step | Module | Output |
//! |------|--------|--------|
//! | Fingerprint | `fingerprint` | `shuttle-manifest.json` |
//! | Server copy | `copy` + `filter` | `server/` |
//! | Route rewrite | `manifest` | `server/<route manifest>` |
//! | Static copy | `copy` | `static/` |
//! | Manifests | `store` | `manifests/` |

pub mod copy;
pub mod filter;
pub mod fingerprint;
pub mod manifest;
pub mod store;

pub use copy::{copy_tree, CopyStats};
pub use filter::{KeepAll, PathFilter, ServerArtifactFilter};
pub use fingerprint::{generate_shuttle_manifest, ShuttleManifest, SHUTTLE_MANIFEST};
pub use manifest::{normalize_route_manifest, RouteManifest};
pub use store::{ShuttleWriter, StoreReport};
