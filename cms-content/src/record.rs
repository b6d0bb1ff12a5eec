//! The loaded form of one authored content file.

use std::path::PathBuf;

use serde_json::Value;

/// One content record: the parsed frontmatter of a single content file.
///
/// Immutable once loaded. The record id is the file stem, which is also the
/// identifier other collections use in `Reference` fields.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ContentRecord {
    /// Collection the record belongs to (directory under the content root).
    pub collection: String,
    /// Record identifier (file stem / slug).
    pub id: String,
    /// Path of the source file.
    pub file: PathBuf,
    /// Parsed frontmatter.
    pub data: Value,
}

impl ContentRecord {
    /// A record with the given coordinates and frontmatter data.
    #[must_use]
    pub fn new(
        collection: impl Into<String>,
        id: impl Into<String>,
        file: impl Into<PathBuf>,
        data: Value,
    ) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
            file: file.into(),
            data,
        }
    }
}
