//! Error types for content validation.

use std::path::PathBuf;

use serde::Serialize;

/// The kind of load-level failure that prevented a content file from being validated.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// An I/O error occurred while reading the file.
    Io,
    /// The file exceeded the configured maximum size limit.
    TooLarge,
    /// The file has no leading `---` frontmatter block.
    MissingFrontmatter,
    /// The frontmatter block could not be parsed as YAML.
    YamlParse,
    /// The file content is not valid UTF-8.
    Encoding,
    /// A directory traversal error (permission denied, loop detected, etc.).
    Walk,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
    /// The resolved path is outside the content root (symlink escape).
    OutsideRoot,
    /// The file sits directly under the content root, outside any collection directory.
    OutsideCollection,
}

/// A load-level error: a content file that could not be validated at all.
///
/// These are distinct from [`Issue`] (a record that was loaded and failed its
/// schema). A `LoadError` means the file could not even be read or parsed —
/// the build must treat these as failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct LoadError {
    /// The file path that could not be loaded.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: LoadErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl LoadError {
    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [load error] {}", self.file.display(), self.message)
    }
}

/// The kind of schema failure a record produced.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum IssueKind {
    /// A field is missing, has the wrong type, or violates its bounds.
    FieldType,
    /// A cross-field refinement predicate returned false.
    Refinement,
    /// A reference points at a record that does not exist in the target collection.
    Reference,
}

/// A single validation failure found on a content record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Issue {
    /// Collection the record belongs to.
    pub collection: String,
    /// Record identifier (the content file stem).
    pub record_id: String,
    /// Source file the record was loaded from.
    pub file: PathBuf,
    /// Dotted field path (e.g. `heroImage.image`); empty for record-level issues.
    pub field: String,
    /// What category of failure this is.
    pub kind: IssueKind,
    /// The authored or generated failure message.
    pub message: String,
}

impl Issue {
    /// Format the issue for human-readable output.
    ///
    /// Field-level: `{collection}/{id}: {field}: {message} ({file})`
    /// Record-level: `{collection}/{id}: {message} ({file})`
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.field.is_empty() {
            format!(
                "{}/{}: {} ({})",
                self.collection,
                self.record_id,
                self.message,
                self.file.display()
            )
        } else {
            format!(
                "{}/{}: {}: {} ({})",
                self.collection,
                self.record_id,
                self.field,
                self.message,
                self.file.display()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_field_level_issue() {
        let issue = Issue {
            collection: "newsletters".to_owned(),
            record_id: "issue-42".to_owned(),
            file: PathBuf::from("content/newsletters/issue-42.md"),
            field: "title".to_owned(),
            kind: IssueKind::FieldType,
            message: "Title must be at least 30 characters".to_owned(),
        };

        let formatted = issue.format_human_readable();
        assert!(formatted.contains("newsletters/issue-42"));
        assert!(formatted.contains("title:"));
        assert!(formatted.contains("Title must be at least 30 characters"));
        assert!(formatted.contains("content/newsletters/issue-42.md"));
    }

    #[test]
    fn test_format_record_level_issue() {
        let issue = Issue {
            collection: "newsletters".to_owned(),
            record_id: "issue-42".to_owned(),
            file: PathBuf::from("content/newsletters/issue-42.md"),
            field: String::new(),
            kind: IssueKind::Refinement,
            message: "All articles must be unique".to_owned(),
        };

        let formatted = issue.format_human_readable();
        assert!(formatted.contains("newsletters/issue-42"));
        assert!(formatted.contains("All articles must be unique"));
        assert!(!formatted.contains(": :"));
    }

    #[test]
    fn test_format_load_error() {
        let err = LoadError {
            file: PathBuf::from("content/articles/bad.md"),
            kind: LoadErrorKind::YamlParse,
            message: "YAML parse error".to_owned(),
        };
        let formatted = err.format_human_readable();
        assert!(formatted.contains("[load error]"));
        assert!(formatted.contains("content/articles/bad.md"));
    }
}
