//! The validation engine: one record against one schema.
//!
//! Evaluation order: every top-level field constraint is checked
//! independently and failures accumulate — a record with three bad fields
//! reports all three. Cross-field refinements run only when the field pass
//! produced zero issues, so predicates may assume a type-checked record.
//! The engine is pure given (record, schema, index, probe).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Issue, IssueKind};
use crate::images::{ImageProbe, ratio_matches};
use crate::index::CollectionIndex;
use crate::record::ContentRecord;
use crate::schema::{Constraint, Field, ImageConstraint, Schema};

#[allow(clippy::unwrap_used)] // literal pattern, compiles
static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap());

/// Validate a single record against its collection schema.
///
/// Returns every issue found; an empty vector means the record passed.
#[must_use]
pub fn validate_record(
    schema: &Schema,
    record: &ContentRecord,
    index: &CollectionIndex,
    probe: &dyn ImageProbe,
) -> Vec<Issue> {
    let mut ctx = Ctx {
        record,
        issues: Vec::new(),
    };

    let Some(map) = record.data.as_object() else {
        ctx.push(
            "",
            IssueKind::FieldType,
            "frontmatter must be a YAML mapping".to_owned(),
        );
        return ctx.issues;
    };

    if schema.closed {
        for key in map.keys() {
            if !schema.fields.iter().any(|f| f.name == *key) {
                ctx.push(key, IssueKind::FieldType, format!("unknown field '{key}'"));
            }
        }
    }

    for field in &schema.fields {
        match map.get(&field.name) {
            Some(value) => check_constraint(&mut ctx, &field.name, &field.constraint, value, index, probe),
            None if field.required => ctx.push(
                &field.name,
                IssueKind::FieldType,
                format!(
                    "missing required field, expected {}",
                    field.constraint.type_name()
                ),
            ),
            None => {}
        }
    }

    // Refinements see the record only after a clean field pass.
    if ctx.issues.is_empty() {
        for refinement in &schema.refinements {
            if !refinement.check(&record.data) {
                ctx.push("", IssueKind::Refinement, refinement.message().to_owned());
            }
        }
    }

    ctx.issues
}

struct Ctx<'a> {
    record: &'a ContentRecord,
    issues: Vec<Issue>,
}

impl Ctx<'_> {
    fn push(&mut self, field: &str, kind: IssueKind, message: String) {
        self.issues.push(Issue {
            collection: self.record.collection.clone(),
            record_id: self.record.id.clone(),
            file: self.record.file.clone(),
            field: field.to_owned(),
            kind,
            message,
        });
    }
}

fn check_constraint(
    ctx: &mut Ctx<'_>,
    path: &str,
    constraint: &Constraint,
    value: &Value,
    index: &CollectionIndex,
    probe: &dyn ImageProbe,
) {
    match constraint {
        Constraint::Text { min, max } => check_text(ctx, path, *min, *max, value),
        Constraint::Number { min, max } => check_number(ctx, path, *min, *max, value),
        Constraint::Date => check_date(ctx, path, value),
        Constraint::Bool => {
            if !value.is_boolean() {
                push_type_mismatch(ctx, path, "boolean", value);
            }
        }
        Constraint::Slug => check_slug(ctx, path, value),
        Constraint::Reference { collection } => check_reference(ctx, path, collection, value, index),
        Constraint::List { item } => check_list(ctx, path, item, value, index, probe),
        Constraint::Object { fields, closed } => {
            check_object(ctx, path, fields, *closed, value, index, probe);
        }
        Constraint::Image(spec) => check_image(ctx, path, spec, value, probe),
    }
}

fn push_type_mismatch(ctx: &mut Ctx<'_>, path: &str, expected: &str, value: &Value) {
    ctx.push(
        path,
        IssueKind::FieldType,
        format!("expected {expected}, found {}", value_type_name(value)),
    );
}

fn check_text(ctx: &mut Ctx<'_>, path: &str, min: Option<usize>, max: Option<usize>, value: &Value) {
    let Some(text) = value.as_str() else {
        push_type_mismatch(ctx, path, "string", value);
        return;
    };
    let len = text.chars().count();
    if let Some(min) = min
        && len < min
    {
        let subject = humanize_field(path);
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("{subject} must be at least {min} characters"),
        );
    }
    if let Some(max) = max
        && len > max
    {
        let subject = humanize_field(path);
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("{subject} must be at most {max} characters"),
        );
    }
}

fn check_number(ctx: &mut Ctx<'_>, path: &str, min: Option<f64>, max: Option<f64>, value: &Value) {
    let Some(n) = value.as_f64() else {
        push_type_mismatch(ctx, path, "number", value);
        return;
    };
    if let Some(min) = min
        && n < min
    {
        let subject = humanize_field(path);
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("{subject} must be at least {min}"),
        );
    }
    if let Some(max) = max
        && n > max
    {
        let subject = humanize_field(path);
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("{subject} must be at most {max}"),
        );
    }
}

fn check_date(ctx: &mut Ctx<'_>, path: &str, value: &Value) {
    let Some(text) = value.as_str() else {
        push_type_mismatch(ctx, path, "date", value);
        return;
    };
    if chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() {
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("expected date in YYYY-MM-DD format, found '{text}'"),
        );
    }
}

fn check_slug(ctx: &mut Ctx<'_>, path: &str, value: &Value) {
    let Some(text) = value.as_str() else {
        push_type_mismatch(ctx, path, "slug", value);
        return;
    };
    if !SLUG_RE.is_match(text) {
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("expected slug (lowercase letters, digits, hyphens), found '{text}'"),
        );
    }
}

fn check_reference(
    ctx: &mut Ctx<'_>,
    path: &str,
    collection: &str,
    value: &Value,
    index: &CollectionIndex,
) {
    let Some(id) = value.as_str() else {
        push_type_mismatch(ctx, path, "reference", value);
        return;
    };
    if !index.contains(collection, id) {
        ctx.push(
            path,
            IssueKind::Reference,
            format!("references missing record '{id}' in collection '{collection}'"),
        );
    }
}

fn check_list(
    ctx: &mut Ctx<'_>,
    path: &str,
    item: &Constraint,
    value: &Value,
    index: &CollectionIndex,
    probe: &dyn ImageProbe,
) {
    let Some(items) = value.as_array() else {
        push_type_mismatch(ctx, path, "array", value);
        return;
    };
    for (i, element) in items.iter().enumerate() {
        let element_path = format!("{path}[{i}]");
        check_constraint(ctx, &element_path, item, element, index, probe);
    }
}

fn check_object(
    ctx: &mut Ctx<'_>,
    path: &str,
    fields: &[Field],
    closed: bool,
    value: &Value,
    index: &CollectionIndex,
    probe: &dyn ImageProbe,
) {
    let Some(map) = value.as_object() else {
        push_type_mismatch(ctx, path, "object", value);
        return;
    };

    if closed {
        for key in map.keys() {
            if !fields.iter().any(|f| f.name == *key) {
                let key_path = format!("{path}.{key}");
                ctx.push(
                    &key_path,
                    IssueKind::FieldType,
                    format!("unknown field '{key}'"),
                );
            }
        }
    }

    for field in fields {
        let field_path = format!("{path}.{}", field.name);
        match map.get(&field.name) {
            Some(v) => check_constraint(ctx, &field_path, &field.constraint, v, index, probe),
            None if field.required => ctx.push(
                &field_path,
                IssueKind::FieldType,
                format!(
                    "missing required field, expected {}",
                    field.constraint.type_name()
                ),
            ),
            None => {}
        }
    }
}

fn check_image(
    ctx: &mut Ctx<'_>,
    path: &str,
    spec: &ImageConstraint,
    value: &Value,
    probe: &dyn ImageProbe,
) {
    let Some(rel) = value.as_str() else {
        push_type_mismatch(ctx, path, "image", value);
        return;
    };

    let asset_path = match ctx.record.file.parent() {
        Some(dir) => dir.join(rel),
        None => std::path::PathBuf::from(rel),
    };

    let (width, height) = match probe.dimensions(&asset_path) {
        Ok(dims) => dims,
        Err(e) => {
            ctx.push(path, IssueKind::FieldType, e.to_string());
            return;
        }
    };

    let subject = humanize_field(path);
    if width < spec.min_width || height < spec.min_height {
        ctx.push(
            path,
            IssueKind::FieldType,
            format!(
                "{subject} must be at least {}x{}",
                spec.min_width, spec.min_height
            ),
        );
    }
    if let Some(target) = spec.aspect_ratio
        && !ratio_matches(width, height, target)
    {
        ctx.push(
            path,
            IssueKind::FieldType,
            format!("{subject} aspect ratio must be {target}:1"),
        );
    }
}

fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Turn a field path into a human subject for generated messages.
///
/// Takes the first path segment and splits camelCase:
/// `title` -> `Title`, `heroImage.image` -> `Hero image`.
fn humanize_field(path: &str) -> String {
    let segment = path
        .split(['.', '['])
        .next()
        .unwrap_or(path);

    let mut out = String::with_capacity(segment.len() + 4);
    for (i, c) in segment.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push(' ');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => out,
    }
}
