//! Build report types.

use serde::Serialize;

use crate::error::{Issue, LoadError};

/// Result of one build-time validation pass over the content tree.
///
/// Publishing must check both `issues` and `load_errors`. A non-empty
/// `load_errors` means some content was never validated at all — treat it
/// as a build failure regardless of `issues`.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct BuildReport {
    /// Number of records successfully loaded and validated.
    pub scanned_records: usize,
    /// Number of files that could not be loaded (read/parse failures).
    pub failed_files: usize,
    /// Whether every record passed AND no load errors occurred.
    pub ok: bool,
    /// Schema failures found on loaded records.
    pub issues: Vec<Issue>,
    /// Files that could not be read or parsed.
    pub load_errors: Vec<LoadError>,
}

impl BuildReport {
    /// Total number of files attempted (validated + failed).
    #[must_use]
    pub fn files_attempted(&self) -> usize {
        self.scanned_records + self.failed_files
    }

    /// Number of schema issues found.
    #[must_use]
    pub fn issues_count(&self) -> usize {
        self.issues.len()
    }
}
