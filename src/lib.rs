//! Flying shuttle - build snapshots for incremental builds
//!
//! Computes a deterministic invalidation key for a build's configuration and
//! public environment, and stores a trimmed, reusable copy of the build
//! output that a later build can consult before recompiling.

pub mod cli;
pub mod config;
pub mod error;
pub mod shuttle;

pub use error::{ShuttleError, ShuttleResult};
