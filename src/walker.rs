//! Filtered directory traversal.
//!
//! Uses the `ignore` crate's walker with every standard filter turned off
//! (no gitignore, no hidden-file skipping) so that the [`FilterPolicy`] is
//! the only thing deciding what is visited. Entries come back depth-first in
//! the order the filesystem lists them; a directory's contents follow it
//! immediately.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use thiserror::Error;

use crate::filter::{EntryKind, FilterPolicy, FilterResult};
use crate::tree::FileNode;

/// Errors that can occur during directory walking.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Entry from a filtered walk. The scan root itself is never yielded.
#[derive(Debug, Clone)]
pub struct WalkEntry {
    /// Full path to the entry.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative: PathBuf,
    /// Depth from root (direct children = 1).
    pub depth: usize,
    /// Directory or file. Other kinds are filtered out.
    pub kind: EntryKind,
}

impl WalkEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }

    /// Final path component.
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Walk `root`, yielding every entry the policy accepts.
///
/// Excluded directories are not descended into. Any listing failure is
/// yielded as an error; callers abort on the first one.
///
/// # Examples
///
/// ```no_run
/// use codebase_review::filter::FilterPolicy;
/// use codebase_review::walker::walk;
/// use std::path::Path;
///
/// for entry in walk(Path::new("."), &FilterPolicy::default()).flatten() {
///     println!("{}", entry.relative.display());
/// }
/// ```
pub fn walk(root: &Path, policy: &FilterPolicy) -> impl Iterator<Item = Result<WalkEntry, WalkError>> {
    let root = root.to_path_buf();

    if !root.exists() {
        return either::Either::Left(std::iter::once(Err(WalkError::NotFound { path: root })));
    }
    if !root.is_dir() {
        return either::Either::Left(std::iter::once(Err(WalkError::NotADirectory {
            path: root,
        })));
    }

    let mut builder = WalkBuilder::new(&root);
    builder.standard_filters(false).follow_links(false);

    let filter_root = root.clone();
    let filter_policy = policy.clone();
    builder.filter_entry(move |entry| {
        if entry.depth() == 0 {
            return true;
        }
        let name = entry.file_name().to_string_lossy();
        let kind = entry_kind(entry.file_type());
        let ancestors = ancestor_segments(&filter_root, entry.path());

        match filter_policy.check(&name, kind, &ancestors) {
            FilterResult::Accept(_) => true,
            FilterResult::Reject(reason) => {
                tracing::debug!(path = %entry.path().display(), %reason, "skipping entry");
                false
            }
        }
    });

    let walker = builder.build();

    either::Either::Right(walker.filter_map(move |result| match result {
        Ok(entry) if entry.depth() == 0 => None,
        Ok(entry) => {
            let path = entry.path().to_path_buf();
            let relative = path.strip_prefix(&root).unwrap_or(&path).to_path_buf();
            Some(Ok(WalkEntry {
                relative,
                depth: entry.depth(),
                kind: entry_kind(entry.file_type()),
                path,
            }))
        }
        Err(err) => Some(Err(convert_error(err, None))),
    }))
}

/// Build the filtered file tree below `root`.
///
/// Children keep filesystem listing order, then each level is regrouped so
/// directories precede files. Directories stay in the tree even when nothing
/// beneath them qualifies.
pub fn build_tree(root: &Path, policy: &FilterPolicy) -> Result<FileNode, WalkError> {
    let entries: Vec<WalkEntry> = walk(root, policy).collect::<Result<_, _>>()?;

    let name = root.file_name().map_or_else(
        || root.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    );

    let mut node_map: std::collections::HashMap<PathBuf, FileNode> =
        std::collections::HashMap::new();
    node_map.insert(root.to_path_buf(), FileNode::directory(name));

    for entry in &entries {
        let node = if entry.is_file() {
            FileNode::file(entry.name())
        } else {
            FileNode::directory(entry.name())
        };
        node_map.insert(entry.path.clone(), node);
    }

    // Deepest first so children are attached before their parents move.
    // The sort is stable, which keeps siblings in listing order.
    let mut ordered: Vec<&WalkEntry> = entries.iter().collect();
    ordered.sort_by(|a, b| b.depth.cmp(&a.depth));

    for entry in &ordered {
        if let Some(parent_path) = entry.path.parent() {
            if let Some(child) = node_map.remove(&entry.path) {
                if let Some(parent) = node_map.get_mut(parent_path) {
                    parent.add_child(child);
                }
            }
        }
    }

    let mut result = node_map
        .remove(root)
        .ok_or_else(|| WalkError::Io {
            path: root.to_path_buf(),
            source: std::io::Error::other("failed to build tree"),
        })?;

    result.group_directories_first();
    Ok(result)
}

fn entry_kind(file_type: Option<std::fs::FileType>) -> EntryKind {
    match file_type {
        Some(ft) if ft.is_dir() => EntryKind::Directory,
        Some(ft) if ft.is_file() => EntryKind::File,
        _ => EntryKind::Other,
    }
}

/// Segments of `path`'s parent directory relative to `root`.
fn ancestor_segments(root: &Path, path: &Path) -> Vec<String> {
    path.parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default()
}

fn convert_error(err: ignore::Error, path: Option<PathBuf>) -> WalkError {
    match err {
        ignore::Error::WithPath { path, err } => convert_error(*err, Some(path)),
        ignore::Error::WithDepth { err, .. } => convert_error(*err, path),
        ignore::Error::Io(source) => {
            let path = path.unwrap_or_else(|| PathBuf::from("<walk error>"));
            if source.kind() == std::io::ErrorKind::PermissionDenied {
                WalkError::PermissionDenied { path }
            } else {
                WalkError::Io { path, source }
            }
        }
        other => WalkError::Io {
            path: path.unwrap_or_else(|| PathBuf::from("<walk error>")),
            source: std::io::Error::other(other.to_string()),
        },
    }
}

/// Simple Either type to avoid adding itertools dependency.
mod either {
    pub enum Either<L, R> {
        Left(L),
        Right(R),
    }

    impl<L, R, T> Iterator for Either<L, R>
    where
        L: Iterator<Item = T>,
        R: Iterator<Item = T>,
    {
        type Item = T;

        fn next(&mut self) -> Option<Self::Item> {
            match self {
                Either::Left(l) => l.next(),
                Either::Right(r) => r.next(),
            }
        }
    }
}
