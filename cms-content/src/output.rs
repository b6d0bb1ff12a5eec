//! Shared output formatting for build reports.
//!
//! Provides JSON and plain-text formatters for `BuildReport`.
//! Color/terminal formatting is intentionally excluded from this module —
//! that concern belongs to the CLI layer.

use std::io::Write;

use crate::error::IssueKind;
use crate::report::BuildReport;

/// Format a `BuildReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &BuildReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `BuildReport` as human-readable plain text to a writer.
///
/// Color/ANSI formatting is the responsibility of the caller (CLI layer).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &BuildReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  CONTENT COLLECTION VALIDATOR")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Records validated:  {}", report.scanned_records)?;
    writeln!(writer, "  Files failed:       {}", report.failed_files)?;
    writeln!(writer, "  Issues found:       {}", report.issues_count())?;
    writeln!(writer)?;

    if !report.load_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  LOAD ERRORS (files that could not be validated)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for load_err in &report.load_errors {
            writeln!(writer, "{}", load_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.issues.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  VALIDATION ISSUES")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for issue in &report.issues {
            writeln!(writer, "{}", issue.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} records passed validation",
            report.scanned_records
        )?;
    } else {
        if !report.load_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be loaded; publishing is blocked",
                report.failed_files
            )?;
        }
        if !report.issues.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} schema issue(s) found; publishing is blocked",
                report.issues_count()
            )?;
            writeln!(writer)?;
            writeln!(writer, "  To fix:")?;

            let has_reference = report
                .issues
                .iter()
                .any(|i| i.kind == IssueKind::Reference);
            let has_field_type = report
                .issues
                .iter()
                .any(|i| i.kind == IssueKind::FieldType);
            let has_refinement = report
                .issues
                .iter()
                .any(|i| i.kind == IssueKind::Refinement);

            if has_field_type {
                writeln!(
                    writer,
                    "    - Check field types and bounds against the collection schema"
                )?;
            }
            if has_reference {
                writeln!(
                    writer,
                    "    - Referenced records must exist in the target collection (id = file stem)"
                )?;
            }
            if has_refinement {
                writeln!(writer, "    - Refinement messages above state the exact rule")?;
            }
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Issue, IssueKind};
    use std::path::PathBuf;

    fn sample_report() -> BuildReport {
        BuildReport {
            scanned_records: 3,
            failed_files: 0,
            ok: false,
            issues: vec![Issue {
                collection: "newsletters".to_owned(),
                record_id: "issue-1".to_owned(),
                file: PathBuf::from("content/newsletters/issue-1.md"),
                field: "title".to_owned(),
                kind: IssueKind::FieldType,
                message: "Title must be at least 30 characters".to_owned(),
            }],
            load_errors: vec![],
        }
    }

    #[test]
    fn test_write_human_lists_issues() {
        let mut out = Vec::new();
        write_human(&sample_report(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("CONTENT COLLECTION VALIDATOR"));
        assert!(text.contains("Title must be at least 30 characters"));
        assert!(text.contains("publishing is blocked"));
    }

    #[test]
    fn test_write_json_round_trips_counts() {
        let mut out = Vec::new();
        write_json(&sample_report(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["scanned_records"], 3);
        assert_eq!(value["ok"], false);
        assert_eq!(value["issues"][0]["field"], "title");
    }
}
