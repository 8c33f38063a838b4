//! Content collection.
//!
//! Walks the scan root with the same [`FilterPolicy`] the tree uses, reads
//! every qualifying file, and appends it to one growing report body. A
//! running line counter tracks where each file's `File:` header will land
//! in the assembled report.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::filter::FilterPolicy;
use crate::lines::split_line_count;
use crate::output::FILE_DELIMITER;
use crate::walker::{walk, WalkError};

/// Lines taken by a file header: the `File:` line and the blank after it.
const HEADER_LINES: usize = 2;

/// Errors that can occur while collecting file contents.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] WalkError),
}

/// A collected file and the report line its header starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Path relative to the scan root.
    pub path: String,
    /// 1-based line of the `File:` header in the final report.
    pub start_line: usize,
}

impl fmt::Display for FileDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (starts at line {})", self.path, self.start_line)
    }
}

/// Accumulator for one collection pass.
#[derive(Debug, Clone, Default)]
pub struct TraversalState {
    /// Concatenated headers, contents and delimiters.
    pub output: String,
    /// Descriptors in collection order.
    pub files: Vec<FileDescriptor>,
    /// Sum of the line counts of every collected file.
    pub total_lines: usize,
    /// Report line the next header will start on.
    pub current_line: usize,
}

impl TraversalState {
    /// Start a pass whose first header lands on `start_line`.
    pub fn new(start_line: usize) -> Self {
        Self {
            current_line: start_line,
            ..Default::default()
        }
    }

    /// Number of files collected so far.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Append one file to the body and advance the line counter.
    pub fn record(&mut self, relative_path: &str, content: &str) -> &FileDescriptor {
        let lines = split_line_count(content);
        let descriptor = FileDescriptor {
            path: relative_path.to_string(),
            start_line: self.current_line,
        };

        self.output.push_str("File: ");
        self.output.push_str(&descriptor.to_string());
        self.output.push_str("\n\n");
        self.current_line += HEADER_LINES;

        self.output.push_str(content);
        self.current_line += lines;

        self.output.push_str(FILE_DELIMITER);
        self.current_line += split_line_count(FILE_DELIMITER);

        self.total_lines += lines;
        self.files.push(descriptor);
        &self.files[self.files.len() - 1]
    }
}

/// Collect every qualifying file under `root`, in walk order.
///
/// Invalid UTF-8 is replaced rather than rejected. Any listing or read
/// failure aborts the pass.
pub fn collect_contents(
    root: &Path,
    policy: &FilterPolicy,
    start_line: usize,
) -> Result<TraversalState, CollectError> {
    let mut state = TraversalState::new(start_line);

    for entry in walk(root, policy) {
        let entry = entry?;
        if !entry.is_file() {
            continue;
        }

        let bytes = fs::read(&entry.path).map_err(|source| CollectError::Read {
            path: entry.path.clone(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes);
        let relative = entry.relative.to_string_lossy();

        let descriptor = state.record(&relative, &content);
        tracing::debug!(
            path = %descriptor.path,
            start_line = descriptor.start_line,
            "collected file"
        );
    }

    Ok(state)
}
