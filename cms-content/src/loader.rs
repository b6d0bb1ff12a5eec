//! Content discovery and loading.
//!
//! Walks the content root and turns every markdown file into a
//! [`ContentRecord`]. Safety properties enforced here:
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the content root
//! - Bounded streaming reads prevent memory exhaustion on oversized files
//! - Maximum directory depth and file count are enforced
//!
//! Load failures are captured as [`LoadError`]s and never silently
//! discarded — a file that cannot be loaded must fail the build.

use std::io::Read;
use std::path::{Path, PathBuf};

use glob::Pattern;
use walkdir::WalkDir;

use crate::config::SourceConfig;
use crate::error::{LoadError, LoadErrorKind};
use crate::frontmatter::{self, FrontmatterError};
use crate::record::ContentRecord;

/// Directories never scanned for content.
const SKIP_DIRS: &[&str] = &["node_modules", ".git", ".astro", "dist", "target"];

/// Load every content record under the configured root.
///
/// Returns `(records, load_errors)`; both can be non-empty at once, and a
/// file that fails to load never prevents its siblings from loading.
#[must_use]
pub fn load_content(config: &SourceConfig) -> (Vec<ContentRecord>, Vec<LoadError>) {
    let mut records = Vec::new();
    let mut load_errors = Vec::new();

    let mut exclude_patterns = Vec::with_capacity(config.exclude.len());
    for pat_str in &config.exclude {
        match Pattern::new(pat_str) {
            Ok(pat) => exclude_patterns.push(pat),
            Err(e) => {
                load_errors.push(LoadError {
                    file: PathBuf::from(pat_str),
                    kind: LoadErrorKind::InvalidExcludePattern,
                    message: format!("invalid exclude glob pattern '{pat_str}': {e}"),
                });
            }
        }
    }

    let canonical_root = match config.root.canonicalize() {
        Ok(r) => r,
        Err(e) => {
            load_errors.push(LoadError {
                file: config.root.clone(),
                kind: LoadErrorKind::Io,
                message: format!("failed to canonicalize content root: {e}"),
            });
            return (records, load_errors);
        }
    };

    for entry_result in WalkDir::new(&config.root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(is_not_skip_dir)
    {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| config.root.clone(), Path::to_path_buf);
                load_errors.push(LoadError {
                    file: path,
                    kind: LoadErrorKind::Walk,
                    message: format!("directory traversal error: {walk_err}"),
                });
                continue;
            }
        };

        let file_path = entry.path();
        if !file_path.is_file() || !is_content_file(file_path) {
            continue;
        }
        if matches_exclude(file_path, &exclude_patterns) {
            continue;
        }

        if records.len() + load_errors.len() >= config.max_files {
            load_errors.push(LoadError {
                file: file_path.to_path_buf(),
                kind: LoadErrorKind::Walk,
                message: format!(
                    "load aborted: max_files limit ({}) reached; remaining files not loaded",
                    config.max_files
                ),
            });
            break;
        }

        // Enforce the root boundary: a symlinked file must not resolve
        // outside the content root.
        match file_path.canonicalize() {
            Ok(canonical_path) => {
                if !canonical_path.starts_with(&canonical_root) {
                    load_errors.push(LoadError {
                        file: file_path.to_path_buf(),
                        kind: LoadErrorKind::OutsideRoot,
                        message: format!(
                            "path resolves outside content root: {} -> {}",
                            file_path.display(),
                            canonical_path.display()
                        ),
                    });
                    continue;
                }
            }
            Err(e) => {
                load_errors.push(LoadError {
                    file: file_path.to_path_buf(),
                    kind: LoadErrorKind::Io,
                    message: format!("failed to canonicalize path: {e}"),
                });
                continue;
            }
        }

        match load_one(file_path, &config.root, config.max_file_size) {
            Ok(record) => records.push(record),
            Err(load_err) => load_errors.push(load_err),
        }
    }

    records.sort_by(|a, b| a.file.cmp(&b.file));
    (records, load_errors)
}

fn load_one(path: &Path, root: &Path, max_file_size: u64) -> Result<ContentRecord, LoadError> {
    let (collection, id) = record_coordinates(path, root)?;
    let content = read_file_bounded(path, max_file_size)?;

    let data = frontmatter::extract(&content).map_err(|e| match e {
        FrontmatterError::Missing => LoadError {
            file: path.to_path_buf(),
            kind: LoadErrorKind::MissingFrontmatter,
            message: "no frontmatter block found (expected a leading '---' fence)".to_owned(),
        },
        FrontmatterError::Yaml(msg) => LoadError {
            file: path.to_path_buf(),
            kind: LoadErrorKind::YamlParse,
            message: format!("frontmatter is not valid YAML: {msg}"),
        },
    })?;

    tracing::debug!(collection = %collection, id = %id, file = %path.display(), "loaded content record");
    Ok(ContentRecord::new(collection, id, path, data))
}

/// Derive `(collection, id)` from the file's position under the root.
///
/// The collection is the first path component under the root; the id is the
/// file stem. A content file directly under the root belongs to no
/// collection and is a layout error.
fn record_coordinates(path: &Path, root: &Path) -> Result<(String, String), LoadError> {
    let layout_error = |message: String| LoadError {
        file: path.to_path_buf(),
        kind: LoadErrorKind::OutsideCollection,
        message,
    };

    let relative = path.strip_prefix(root).map_err(|_| {
        layout_error(format!(
            "content file is not under the content root: {}",
            path.display()
        ))
    })?;

    let mut components = relative.components();
    let collection = components
        .next()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .ok_or_else(|| layout_error("content file has an empty relative path".to_owned()))?;

    if components.next().is_none() {
        return Err(layout_error(
            "content file sits directly under the content root, outside any collection directory"
                .to_owned(),
        ));
    }

    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| layout_error("content file has no file stem".to_owned()))?;

    Ok((collection, id))
}

fn is_content_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("md" | "mdx")
    )
}

/// Check if a directory entry should be included (i.e., is NOT a skip dir).
fn is_not_skip_dir(entry: &walkdir::DirEntry) -> bool {
    if entry.file_type().is_dir()
        && let Some(name) = entry.file_name().to_str()
    {
        return !SKIP_DIRS.contains(&name);
    }
    true
}

fn matches_exclude(path: &Path, exclude_patterns: &[Pattern]) -> bool {
    let path_str = path.to_string_lossy();
    for pattern in exclude_patterns {
        if pattern.matches(&path_str)
            || path
                .file_name()
                .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
        {
            return true;
        }
    }
    false
}

/// Read a file with a bounded streaming read, enforcing `max_file_size`.
///
/// Uses `Read::take` so the size check and the read are the same operation —
/// no TOCTOU window, no unbounded `read_to_string`.
fn read_file_bounded(path: &Path, max_file_size: u64) -> Result<String, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| LoadError {
        file: path.to_path_buf(),
        kind: LoadErrorKind::Io,
        message: format!("failed to open file: {e}"),
    })?;

    let mut buffer = Vec::new();
    file.take(max_file_size + 1)
        .read_to_end(&mut buffer)
        .map_err(|e| LoadError {
            file: path.to_path_buf(),
            kind: LoadErrorKind::Io,
            message: format!("failed to read file: {e}"),
        })?;

    if buffer.len() as u64 > max_file_size {
        return Err(LoadError {
            file: path.to_path_buf(),
            kind: LoadErrorKind::TooLarge,
            message: format!("file exceeds maximum size of {max_file_size} bytes"),
        });
    }

    String::from_utf8(buffer).map_err(|_| LoadError {
        file: path.to_path_buf(),
        kind: LoadErrorKind::Encoding,
        message: "file is not valid UTF-8".to_owned(),
    })
}
