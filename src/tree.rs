//! File tree representation and rendering.
//!
//! Provides types for representing the filtered directory structure and a
//! renderer that draws it with box-drawing characters.

use std::path::Path;

use crate::errors::ReviewError;
use crate::filter::FilterPolicy;
use crate::walker::build_tree;

/// The type of a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
}

/// A node in the file tree.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// File or directory name (not full path).
    pub name: String,
    pub kind: NodeKind,
    /// Child nodes (empty for files).
    children: Vec<FileNode>,
}

impl FileNode {
    /// Create a new directory node.
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            children: Vec::new(),
        }
    }

    /// Create a new file node.
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    /// Add a child node. Only valid for directories.
    pub fn add_child(&mut self, child: FileNode) {
        self.children.push(child);
    }

    /// Get child nodes.
    pub fn children(&self) -> &[FileNode] {
        &self.children
    }

    /// Move directories ahead of files at every level.
    ///
    /// This is a stable regrouping, not a sort: within each group the
    /// existing (filesystem listing) order is kept.
    pub fn group_directories_first(&mut self) {
        self.children.sort_by_key(|child| child.is_file());
        for child in &mut self.children {
            child.group_directories_first();
        }
    }
}

/// Box-drawing characters for tree rendering.
const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const VERTICAL: &str = "│   ";
const SPACE: &str = "    ";

/// Render the contents of `root` as a tree, one line per entry.
///
/// The root itself is not drawn. Directories carry a trailing `/`. The last
/// visible child at each level gets the terminal connector.
///
/// # Examples
///
/// ```
/// use codebase_review::tree::{render_tree, FileNode};
///
/// let mut root = FileNode::directory("project");
/// let mut sub = FileNode::directory("sub");
/// sub.add_child(FileNode::file("b.md"));
/// root.add_child(sub);
/// root.add_child(FileNode::file("a.js"));
///
/// assert_eq!(render_tree(&root), "├── sub/\n│   └── b.md\n└── a.js\n");
/// ```
pub fn render_tree(root: &FileNode) -> String {
    let mut output = String::with_capacity(4096);
    render_children(&mut output, root, "");
    output
}

fn render_children(output: &mut String, node: &FileNode, prefix: &str) {
    let child_count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let is_last = i == child_count - 1;

        output.push_str(prefix);
        output.push_str(if is_last { LAST_BRANCH } else { BRANCH });
        output.push_str(&child.name);
        if child.is_directory() {
            output.push('/');
        }
        output.push('\n');

        if child.is_directory() {
            let continuation = if is_last { SPACE } else { VERTICAL };
            render_children(output, child, &format!("{prefix}{continuation}"));
        }
    }
}

/// Build and render the filtered tree under `root` in one step.
pub fn tree_from_path(root: &Path, policy: &FilterPolicy) -> Result<String, ReviewError> {
    let tree = build_tree(root, policy)?;
    Ok(render_tree(&tree))
}
