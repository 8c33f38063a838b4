//! Fluent builder API for codebase reviews.
//!
//! Drives the whole pipeline: a placeholder header to seed line numbers,
//! a timed content collection pass, a fresh tree, and the final report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::collector::{collect_contents, FileDescriptor};
use crate::errors::ReviewError;
use crate::filter::FilterPolicy;
use crate::output::{
    assemble_report, first_content_line, format_header, ReviewSummary, REPORT_FILE_NAME,
};
use crate::tree::tree_from_path;

/// Builder for a codebase review.
///
/// # Examples
///
/// ```no_run
/// use codebase_review::builder::Review;
///
/// let (path, result) = Review::new("./my-project")
///     .exclude(["tests", "docs"])
///     .write()
///     .unwrap();
///
/// println!("{} files written to {}", result.summary.files_processed, path.display());
/// ```
#[derive(Debug, Clone)]
pub struct Review {
    root: PathBuf,
    policy: FilterPolicy,
}

impl Review {
    /// Create a new builder for the given root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            policy: FilterPolicy::default(),
        }
    }

    /// Skip directories with these names at any depth.
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.policy = self.policy.with_excluded(names);
        self
    }

    /// Where [`Review::write`] puts the report.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(REPORT_FILE_NAME)
    }

    /// Run the pipeline and return the report without writing it.
    pub fn build(&self) -> Result<ReviewResult, ReviewError> {
        let root = self.root.as_path();
        check_root(root)?;
        let excluded = self.policy.excluded().to_vec();

        // Only the line count of this draft is used.
        let draft_tree = tree_from_path(root, &self.policy)?;
        let placeholder = format_header(&ReviewSummary::placeholder(root, &excluded), &draft_tree, &[]);
        let start_line = first_content_line(&placeholder);
        tracing::info!(root = %root.display(), start_line, "starting collection");

        let started = Instant::now();
        let state = collect_contents(root, &self.policy, start_line)?;
        let duration = started.elapsed();
        tracing::info!(
            files = state.file_count(),
            lines = state.total_lines,
            elapsed_s = duration.as_secs_f64(),
            "collection finished"
        );

        let summary = ReviewSummary {
            root: root.to_path_buf(),
            files_processed: state.file_count(),
            total_lines: state.total_lines,
            duration,
            excluded,
        };

        let tree = tree_from_path(root, &self.policy)?;
        let report = assemble_report(&summary, &tree, &state.files, &state.output);

        Ok(ReviewResult {
            report,
            summary,
            files: state.files,
        })
    }

    /// Build the report and write it to `<root>/codebase_review.txt`.
    ///
    /// Nothing is written unless the whole report was built.
    pub fn write(&self) -> Result<(PathBuf, ReviewResult), ReviewError> {
        let result = self.build()?;
        let path = self.output_path();
        write_report(&path, &result.report)?;
        Ok((path, result))
    }
}

/// Result of a review run.
#[derive(Debug, Clone)]
pub struct ReviewResult {
    /// Full report text.
    pub report: String,
    pub summary: ReviewSummary,
    /// Collected files in collection order.
    pub files: Vec<FileDescriptor>,
}

/// Write a finished report, overwriting any previous one.
pub fn write_report(path: &Path, report: &str) -> Result<(), ReviewError> {
    fs::write(path, report).map_err(|source| ReviewError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = report.len(), "report written");
    Ok(())
}

fn check_root(root: &Path) -> Result<(), ReviewError> {
    if !root.exists() {
        return Err(ReviewError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ReviewError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::CollectError;
    use crate::lines::split_line_count;
    use crate::output::SEPARATOR;
    use crate::walker::WalkError;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let dir = TempDir::new().unwrap();

        fs::write(dir.path().join("a.js"), "const a = 1;\nconst b = 2;\nexport { a, b };").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/b.md"), "# Title\nBody").unwrap();

        dir
    }

    fn header_line(report: &str, descriptor: &FileDescriptor) -> usize {
        let header = format!("File: {descriptor}");
        report
            .split('\n')
            .position(|line| line == header)
            .map(|i| i + 1)
            .unwrap()
    }

    #[test]
    fn test_build_counts() {
        let dir = create_test_project();

        let result = Review::new(dir.path()).build().unwrap();

        assert_eq!(result.summary.files_processed, 2);
        assert_eq!(result.summary.total_lines, 5);
        assert_eq!(result.files.len(), 2);
        assert!(result.report.contains("  - Files processed: 2\n"));
        assert!(result.report.contains("  - Total lines: 5\n"));
        assert!(result.report.contains("  - Excluded directories: None\n"));
    }

    #[test]
    fn test_build_sections_in_order() {
        let dir = create_test_project();
        let report = Review::new(dir.path()).build().unwrap().report;

        let summary = report.find("Summary:").unwrap();
        let structure = report.find("Directory Structure:").unwrap();
        let index = report.find("Files extracted:").unwrap();
        let content = report.find("File: ").unwrap();
        assert!(summary < structure && structure < index && index < content);

        assert!(report.contains("├── sub/\n│   └── b.md\n└── a.js\n"));
        assert!(report.ends_with(SEPARATOR));
    }

    #[test]
    fn test_first_start_line_follows_placeholder() {
        let dir = create_test_project();
        let result = Review::new(dir.path()).build().unwrap();

        let placeholder = format_header(
            &ReviewSummary::placeholder(dir.path(), &[]),
            "├── sub/\n│   └── b.md\n└── a.js\n",
            &[],
        );
        assert_eq!(result.files[0].start_line, split_line_count(&placeholder) + 1);
        assert!(result.files[0].start_line < result.files[1].start_line);
    }

    #[test]
    fn test_single_file_annotation_matches_report() {
        // With one file the placeholder and final file index are the same
        // height, so the annotation points at the header exactly.
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("only.py"), "print('hi')\n").unwrap();

        let result = Review::new(dir.path()).build().unwrap();
        let descriptor = &result.files[0];

        assert_eq!(header_line(&result.report, descriptor), descriptor.start_line - 1);
    }

    #[test]
    fn test_exclude_removes_tree_and_content() {
        let dir = create_test_project();

        let result = Review::new(dir.path()).exclude(["sub"]).build().unwrap();

        assert_eq!(result.summary.files_processed, 1);
        assert_eq!(result.summary.total_lines, 3);
        assert!(!result.report.contains("sub/"));
        assert!(!result.report.contains("# Title"));
        assert!(result.report.contains("  - Excluded directories: sub\n"));
    }

    #[test]
    fn test_no_qualifying_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "notes").unwrap();

        let result = Review::new(dir.path()).build().unwrap();

        assert_eq!(result.summary.files_processed, 0);
        assert_eq!(result.summary.total_lines, 0);
        assert!(result.files.is_empty());
        assert!(result
            .report
            .contains("Directory Structure:\n\n\nFiles extracted:\n\n\n"));
    }

    #[test]
    fn test_write_creates_report_and_is_repeatable() {
        let dir = create_test_project();
        let review = Review::new(dir.path());

        let (path, first) = review.write().unwrap();
        assert_eq!(path, dir.path().join(REPORT_FILE_NAME));
        assert_eq!(fs::read_to_string(&path).unwrap(), first.report);

        // The report itself is a .txt and never collected.
        let (_, second) = review.write().unwrap();
        assert_eq!(first.files, second.files);
        assert_eq!(first.summary.total_lines, second.summary.total_lines);
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = Review::new(&missing).write().unwrap_err();
        assert!(matches!(err, ReviewError::PathNotFound(_)));
        assert!(!missing.join(REPORT_FILE_NAME).exists());
    }

    #[test]
    fn test_file_root() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();

        let err = Review::new(&file).build().unwrap_err();
        assert!(matches!(err, ReviewError::NotADirectory(_)));
    }

    #[test]
    fn test_write_error_reported() {
        // A directory in the report's place cannot be overwritten.
        let dir = create_test_project();
        fs::create_dir(dir.path().join(REPORT_FILE_NAME)).unwrap();

        let err = Review::new(dir.path()).write().unwrap_err();
        assert!(matches!(err, ReviewError::Write { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_aborts_without_report() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_project();
        let locked = dir.path().join("bad.js");
        fs::write(&locked, "secret").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Permission bits do not stop root.
        if fs::read(&locked).is_ok() {
            return;
        }

        let err = Review::new(dir.path()).write().unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o644)).unwrap();

        assert!(matches!(
            err,
            ReviewError::Collect(CollectError::Read { ref path, .. }) if path == &locked
        ));
        assert!(!dir.path().join(REPORT_FILE_NAME).exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_directory_aborts_without_report() {
        use std::os::unix::fs::PermissionsExt;

        let dir = create_test_project();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("c.ts"), "export {}").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let err = Review::new(dir.path()).write().unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            err,
            ReviewError::Walk(WalkError::PermissionDenied { .. })
        ));
        assert!(!dir.path().join(REPORT_FILE_NAME).exists());
    }
}
