//! Entry filtering for directory scans.
//!
//! A fixed blocklist of directory and file names, an allowlist of file
//! extensions, and a caller-supplied set of excluded directory names that
//! is matched against every path segment below the scan root.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

/// Directory names that are never entered.
pub const IGNORED_DIRS: &[&str] = &["node_modules", "build", "dist", ".git"];

/// File names that are never collected.
pub const IGNORED_FILES: &[&str] = &[".DS_Store", ".gitignore", "package-lock.json", "yarn.lock"];

/// Extensions (with leading dot) of files worth reviewing. Matching is exact
/// and case-sensitive.
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    ".js", ".jsx", ".ts", ".tsx", ".py", ".css", ".html", ".md", ".json",
];

/// What kind of filesystem entry is being filtered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks, sockets, devices. Never included.
    Other,
}

/// Why an entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    IgnoredDirectory,
    IgnoredFile,
    ExcludedDirectory(String),
    ExcludedAncestor(String),
    Extension,
    NotRegular,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::IgnoredDirectory => write!(f, "ignored directory"),
            RejectReason::IgnoredFile => write!(f, "ignored file"),
            RejectReason::ExcludedDirectory(name) => write!(f, "excluded directory {name}"),
            RejectReason::ExcludedAncestor(name) => write!(f, "under excluded directory {name}"),
            RejectReason::Extension => write!(f, "extension not allowed"),
            RejectReason::NotRegular => write!(f, "not a regular file or directory"),
        }
    }
}

/// Result of filtering a single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterResult {
    Accept(EntryKind),
    Reject(RejectReason),
}

impl FilterResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FilterResult::Accept(_))
    }
}

/// Inclusion rules for a scan.
///
/// # Examples
///
/// ```
/// use codebase_review::filter::{EntryKind, FilterPolicy};
///
/// let policy = FilterPolicy::default().with_excluded(["tests"]);
/// let top_level: &[&str] = &[];
///
/// assert!(policy.should_include("app.js", EntryKind::File, top_level));
/// assert!(!policy.should_include("app.js", EntryKind::File, &["src", "tests"]));
/// assert!(!policy.should_include("node_modules", EntryKind::Directory, top_level));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterPolicy {
    ignored_dirs: BTreeSet<String>,
    ignored_files: BTreeSet<String>,
    allowed_extensions: BTreeSet<String>,
    excluded: Vec<String>,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        Self {
            ignored_dirs: IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
            ignored_files: IGNORED_FILES.iter().map(|s| s.to_string()).collect(),
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded: Vec::new(),
        }
    }
}

impl FilterPolicy {
    /// Add caller-excluded directory names. Names are trimmed and empty names
    /// dropped; the rest are kept as given, duplicates included, so the
    /// summary echoes the caller's list.
    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() {
                self.excluded.push(name.to_string());
            }
        }
        self
    }

    /// Caller-excluded directory names, in the order they were given.
    pub fn excluded(&self) -> &[String] {
        &self.excluded
    }

    /// Decide whether an entry is part of the scan.
    ///
    /// `ancestors` are the path segments of the entry's parent directory
    /// relative to the scan root (empty for entries directly under it).
    pub fn check<S: AsRef<str>>(&self, name: &str, kind: EntryKind, ancestors: &[S]) -> FilterResult {
        for segment in ancestors {
            let segment = segment.as_ref();
            if self.is_excluded(segment) {
                return FilterResult::Reject(RejectReason::ExcludedAncestor(segment.to_string()));
            }
        }

        match kind {
            EntryKind::Directory => {
                if self.ignored_dirs.contains(name) {
                    FilterResult::Reject(RejectReason::IgnoredDirectory)
                } else if self.is_excluded(name) {
                    FilterResult::Reject(RejectReason::ExcludedDirectory(name.to_string()))
                } else {
                    FilterResult::Accept(kind)
                }
            }
            EntryKind::File => {
                if self.ignored_files.contains(name) {
                    FilterResult::Reject(RejectReason::IgnoredFile)
                } else if !self.is_allowed_extension(name) {
                    FilterResult::Reject(RejectReason::Extension)
                } else {
                    FilterResult::Accept(kind)
                }
            }
            EntryKind::Other => FilterResult::Reject(RejectReason::NotRegular),
        }
    }

    /// Shorthand for `check(..).is_accepted()`.
    pub fn should_include<S: AsRef<str>>(&self, name: &str, kind: EntryKind, ancestors: &[S]) -> bool {
        self.check(name, kind, ancestors).is_accepted()
    }

    fn is_excluded(&self, segment: &str) -> bool {
        self.excluded.iter().any(|e| e == segment)
    }

    fn is_allowed_extension(&self, name: &str) -> bool {
        extension_of(name).is_some_and(|ext| self.allowed_extensions.contains(ext.as_str()))
    }
}

/// Split a comma-separated list of directory names, trimming each entry and
/// dropping empty ones.
///
/// ```
/// use codebase_review::filter::parse_exclude_list;
///
/// assert_eq!(parse_exclude_list(" tests, docs ,,"), ["tests", "docs"]);
/// ```
pub fn parse_exclude_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

/// Extension of a file name including the leading dot.
///
/// Dotfiles without a further dot (`.eslintrc`) have no extension.
pub fn extension_of(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
}
