//! # cms-content
//!
//! Content-collection schemas and the build-time validation engine for the
//! course site.
//!
//! The crate separates the **core validation engine** (pure: record + schema
//! + reference index in, issues out) from **content loading** (filesystem
//! walking and frontmatter parsing). A build runs [`validate_content`] once
//! over the content root; a failing report blocks publishing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cms_content::{validate_content, SchemaSet, SourceConfig};
//!
//! let source = SourceConfig::new("content");
//! let schemas = SchemaSet::builtin();
//!
//! let report = validate_content(&source, &schemas).unwrap();
//! println!("Records validated: {}", report.scanned_records);
//! println!("Issues: {}", report.issues_count());
//! println!("OK: {}", report.ok);
//! ```

pub mod collections;
mod config;
mod engine;
mod error;
mod frontmatter;
mod images;
mod index;
mod loader;
pub mod output;
mod record;
mod report;
mod schema;

pub use collections::SchemaSet;
pub use config::SourceConfig;
pub use engine::validate_record;
pub use error::{Issue, IssueKind, LoadError, LoadErrorKind};
pub use images::{FixedProbe, FsImageProbe, ImageProbe, ProbeError};
pub use index::CollectionIndex;
pub use loader::load_content;
pub use record::ContentRecord;
pub use report::BuildReport;
pub use schema::{ASPECT_EPSILON, Constraint, Field, ImageConstraint, Refinement, Schema};

/// Validate every content record under the configured root.
///
/// This is the primary public API: load all records, build the
/// cross-collection reference index, then validate each record against its
/// collection schema. Failures accumulate — a failing record never stops
/// validation of its siblings, and load failures are reported alongside
/// schema issues rather than aborting the pass.
///
/// Image dimensions are probed from disk; use [`validate_content_with`] to
/// supply a different [`ImageProbe`].
///
/// # Errors
///
/// Returns an error only when the content root itself does not exist.
/// Per-file failures land in `report.load_errors` and never abort the pass.
pub fn validate_content(
    source: &SourceConfig,
    schemas: &SchemaSet,
) -> anyhow::Result<BuildReport> {
    validate_content_with(source, schemas, &FsImageProbe)
}

/// [`validate_content`] with an explicit image probe.
///
/// # Errors
///
/// Returns an error only when the content root itself does not exist.
pub fn validate_content_with(
    source: &SourceConfig,
    schemas: &SchemaSet,
    probe: &dyn ImageProbe,
) -> anyhow::Result<BuildReport> {
    if !source.root.exists() {
        anyhow::bail!("Content root does not exist: {}", source.root.display());
    }

    let (records, load_errors) = load_content(source);
    let index = CollectionIndex::build(&records);

    let mut issues = Vec::new();
    for record in &records {
        match schemas.get(&record.collection) {
            Some(schema) => {
                issues.extend(validate_record(schema, record, &index, probe));
            }
            None => {
                // Unvalidated content must not slip through to publish.
                issues.push(Issue {
                    collection: record.collection.clone(),
                    record_id: record.id.clone(),
                    file: record.file.clone(),
                    field: String::new(),
                    kind: IssueKind::FieldType,
                    message: format!("no schema registered for collection '{}'", record.collection),
                });
            }
        }
    }

    let report = BuildReport {
        scanned_records: records.len(),
        failed_files: load_errors.len(),
        ok: issues.is_empty() && load_errors.is_empty(),
        issues,
        load_errors,
    };

    tracing::info!(
        records = report.scanned_records,
        failed = report.failed_files,
        issues = report.issues_count(),
        ok = report.ok,
        "content validation pass finished"
    );

    Ok(report)
}
