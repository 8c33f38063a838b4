//! Report assembly.
//!
//! A report is a summary block, the directory tree, an index of collected
//! files, and then the concatenated file contents:
//!
//! ```text
//! Summary:
//!   - Directory: ./project
//!   - Files processed: 2
//!   - Total lines: 5
//!   - Duration: 0.01 seconds
//!   - Excluded directories: None
//!
//! ================================================================================
//!
//! Directory Structure:
//!
//! ├── sub/
//! │   └── b.md
//! └── a.js
//!
//! Files extracted:
//! a.js (starts at line 22)
//! sub/b.md (starts at line 32)
//!
//! ================================================================================
//!
//! File: a.js (starts at line 22)
//! ...
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::collector::FileDescriptor;
use crate::lines::split_line_count;

macro_rules! separator {
    () => {
        "================================================================================"
    };
}

/// Horizontal rule between report sections (80 `=`).
pub const SEPARATOR: &str = separator!();

/// Text appended after every collected file.
pub const FILE_DELIMITER: &str = concat!("\n\n", separator!(), "\n\n");

/// Name of the report written into the scanned directory.
pub const REPORT_FILE_NAME: &str = "codebase_review.txt";

/// Figures shown in the summary block.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    /// Scan root as given by the caller.
    pub root: PathBuf,
    pub files_processed: usize,
    pub total_lines: usize,
    /// Wall-clock time of the content collection pass.
    pub duration: Duration,
    pub excluded: Vec<String>,
}

impl ReviewSummary {
    /// Summary with zero counts, used before anything has been collected.
    pub fn placeholder(root: impl Into<PathBuf>, excluded: &[String]) -> Self {
        Self {
            root: root.into(),
            files_processed: 0,
            total_lines: 0,
            duration: Duration::ZERO,
            excluded: excluded.to_vec(),
        }
    }
}

/// Comma-joined exclusions, or `None` when there are none.
pub fn format_excluded(excluded: &[String]) -> String {
    if excluded.is_empty() {
        "None".to_string()
    } else {
        excluded.join(", ")
    }
}

/// Render the summary block, including its trailing separator.
pub fn format_summary(summary: &ReviewSummary) -> String {
    format!(
        "Summary:\n  \
         - Directory: {}\n  \
         - Files processed: {}\n  \
         - Total lines: {}\n  \
         - Duration: {:.2} seconds\n  \
         - Excluded directories: {}\n\
         \n\
         {SEPARATOR}\n\
         \n",
        summary.root.display(),
        summary.files_processed,
        summary.total_lines,
        summary.duration.as_secs_f64(),
        format_excluded(&summary.excluded),
    )
}

/// Render the file index, including its trailing separator.
pub fn format_file_index(files: &[FileDescriptor]) -> String {
    let mut output = String::from("Files extracted:\n");
    let entries: Vec<String> = files.iter().map(ToString::to_string).collect();
    output.push_str(&entries.join("\n"));
    output.push_str("\n\n");
    output.push_str(SEPARATOR);
    output.push_str("\n\n");
    output
}

/// Everything that precedes the file contents.
pub fn format_header(summary: &ReviewSummary, tree: &str, files: &[FileDescriptor]) -> String {
    let mut output = String::with_capacity(4096);
    output.push_str(&format_summary(summary));
    output.push_str("Directory Structure:\n\n");
    output.push_str(tree);
    output.push('\n');
    output.push_str(&format_file_index(files));
    output
}

/// Line number assigned to the first file header, given the header text
/// built before collection started (zero counts, empty file index).
pub fn first_content_line(placeholder_header: &str) -> usize {
    split_line_count(placeholder_header) + 1
}

/// Join the final header and the collected body. Only trailing whitespace
/// of the body is trimmed.
pub fn assemble_report(
    summary: &ReviewSummary,
    tree: &str,
    files: &[FileDescriptor],
    body: &str,
) -> String {
    let mut report = format_header(summary, tree, files);
    report.push_str(body.trim_end());
    report
}
