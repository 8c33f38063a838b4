//! codebase-review - Concatenate a codebase into one annotated review file.
//!
//! Walks a directory, renders the filtered structure as a tree, and joins
//! the contents of every reviewable source file into a single report. Each
//! file is annotated with the report line its section starts on.
//!
//! # Quick Start
//!
//! ```no_run
//! use codebase_review::builder::Review;
//!
//! let result = Review::new("./my-project")
//!     .exclude(["tests"])
//!     .build()
//!     .unwrap();
//!
//! println!("{} files, {} lines", result.summary.files_processed, result.summary.total_lines);
//! ```
//!
//! # Modules
//!
//! - [`filter`] - Blocklists, extension allowlist, and caller exclusions
//! - [`walker`] - Filtered depth-first traversal
//! - [`tree`] - File tree representation and rendering
//! - [`lines`] - The line counting rule behind every annotation
//! - [`collector`] - File content collection with line bookkeeping
//! - [`output`] - Report sections and assembly
//! - [`builder`] - Fluent API driving the pipeline

pub mod filter;
pub mod errors;
pub mod lines;
pub mod tree;
pub mod walker;
pub mod collector;
pub mod output;
pub mod builder;

// Re-export key types at crate root for convenience
pub use builder::{Review, ReviewResult};
pub use collector::{CollectError, FileDescriptor, TraversalState};
pub use errors::ReviewError;
pub use filter::{EntryKind, FilterPolicy, FilterResult};
pub use output::{ReviewSummary, REPORT_FILE_NAME};
pub use tree::{render_tree, FileNode, NodeKind};
pub use walker::WalkError;
