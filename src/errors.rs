//! Error types for codebase-review.

use std::path::PathBuf;

use crate::collector::CollectError;
use crate::walker::WalkError;

/// Top-level error type for review operations.
#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("walk error: {0}")]
    Walk(#[from] WalkError),

    #[error("collect error: {0}")]
    Collect(#[from] CollectError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
