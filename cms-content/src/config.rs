//! Source configuration for content loading.
//!
//! The content root follows the one-directory-per-collection convention:
//! `content/articles/*.md`, `content/newsletters/*.md`, and so on. The
//! collection name is the first path component under the root; the record id
//! is the file stem.

use std::path::PathBuf;

/// Filesystem options for the content load pass.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SourceConfig {
    /// Content root directory. Required.
    pub root: PathBuf,
    /// Exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// Maximum frontmatter file size in bytes (default: 1 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`** — following symlinks allows escaping the
    /// content root and reading unrelated files in CI environments.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 16).
    pub max_depth: usize,
    /// Maximum number of content files to load (default: `10_000`).
    /// Prevents memory exhaustion on pathological content trees.
    pub max_files: usize,
}

impl SourceConfig {
    /// Config rooted at the given content directory, with defaults otherwise.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
            max_file_size: 1_048_576,
            follow_links: false,
            max_depth: 16,
            max_files: 10_000,
        }
    }
}
