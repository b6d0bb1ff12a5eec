//! Declarative schema model: field constraints plus cross-field refinements.
//!
//! A [`Schema`] is authored once per content collection and never changes at
//! runtime. Field constraints are evaluated independently; [`Refinement`]
//! predicates run against the full record only after every field constraint
//! passed, so they may assume an already type-checked input.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;

/// Tolerance for the aspect-ratio equality check.
///
/// Bit-exact `width / height == ratio` rejects valid images due to
/// rounding: the canonical 1200x630 hero is 1.9048, not 1.91. Dimension
/// checks accept any ratio within this epsilon, chosen so 1200x630 and
/// 1300x680 (1.9118) pass a 1.91 target while 1300x700 (1.857) still
/// fails.
pub const ASPECT_EPSILON: f64 = 0.01;

/// Dimension requirements for a media asset field.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct ImageConstraint {
    /// Minimum pixel width.
    pub min_width: u32,
    /// Minimum pixel height.
    pub min_height: u32,
    /// Exact `width / height` target, checked within [`ASPECT_EPSILON`].
    pub aspect_ratio: Option<f64>,
}

/// A single field constraint.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Constraint {
    /// String with optional inclusive length bounds.
    Text {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Number with optional inclusive range.
    Number { min: Option<f64>, max: Option<f64> },
    /// Calendar date, `YYYY-MM-DD`.
    Date,
    /// Boolean flag.
    Bool,
    /// Lowercase alphanumeric-and-hyphen identifier.
    Slug,
    /// Identifier of an existing record in another collection.
    Reference { collection: String },
    /// Homogeneous array; every element must satisfy `item`.
    List { item: Box<Constraint> },
    /// Nested object with its own field set.
    Object { fields: Vec<Field>, closed: bool },
    /// Path to a media asset, resolved relative to the content file.
    Image(ImageConstraint),
}

impl Constraint {
    /// Short name of the expected type, used in generated failure messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Constraint::Text { .. } => "string",
            Constraint::Number { .. } => "number",
            Constraint::Date => "date",
            Constraint::Bool => "boolean",
            Constraint::Slug => "slug",
            Constraint::Reference { .. } => "reference",
            Constraint::List { .. } => "array",
            Constraint::Object { .. } => "object",
            Constraint::Image(_) => "image",
        }
    }
}

/// A named field with its constraint.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Field {
    pub name: String,
    pub required: bool,
    pub constraint: Constraint,
}

impl Field {
    /// A field that must be present on every record.
    #[must_use]
    pub fn required(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            required: true,
            constraint,
        }
    }

    /// A field that may be absent; the constraint applies only when present.
    #[must_use]
    pub fn optional(name: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            name: name.into(),
            required: false,
            constraint,
        }
    }
}

/// A cross-field predicate with an authored failure message.
///
/// The predicate receives the full record and runs only when every field
/// constraint passed, so it may treat its input as already type-checked.
pub struct Refinement {
    message: String,
    predicate: Box<dyn Fn(&Value) -> bool + Send + Sync>,
}

impl Refinement {
    /// A refinement with an authored message and arbitrary predicate.
    #[must_use]
    pub fn new(
        message: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// The built-in uniqueness refinement over an array field.
    ///
    /// Fails with `"All <field> must be unique"` when any two elements of the
    /// named array are equal. Absent or non-array values pass (the field
    /// constraints already reported those).
    #[must_use]
    pub fn unique(field: &str) -> Self {
        let name = field.to_owned();
        Self::new(format!("All {field} must be unique"), move |record| {
            let Some(items) = record.get(&name).and_then(Value::as_array) else {
                return true;
            };
            let mut seen = HashSet::with_capacity(items.len());
            items.iter().all(|item| seen.insert(item.to_string()))
        })
    }

    /// The authored failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the predicate against a fully type-checked record.
    #[must_use]
    pub fn check(&self, record: &Value) -> bool {
        (self.predicate)(record)
    }
}

impl fmt::Debug for Refinement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Refinement")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// The full schema for one content collection.
#[derive(Debug)]
#[non_exhaustive]
pub struct Schema {
    /// Collection name this schema validates.
    pub name: String,
    /// Ordered top-level field constraints.
    pub fields: Vec<Field>,
    /// When true, unknown top-level keys fail the record.
    pub closed: bool,
    /// Cross-field refinements, run after a clean field pass.
    pub refinements: Vec<Refinement>,
}

impl Schema {
    /// An open schema with no fields or refinements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            closed: false,
            refinements: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unique_refinement_passes_distinct() {
        let r = Refinement::unique("articles");
        assert_eq!(r.message(), "All articles must be unique");
        assert!(r.check(&json!({ "articles": ["a", "b", "c"] })));
    }

    #[test]
    fn test_unique_refinement_fails_duplicate() {
        let r = Refinement::unique("articles");
        assert!(!r.check(&json!({ "articles": ["a", "b", "a"] })));
    }

    #[test]
    fn test_unique_refinement_ignores_missing_field() {
        let r = Refinement::unique("articles");
        assert!(r.check(&json!({ "title": "no articles here" })));
    }

    #[test]
    fn test_custom_refinement() {
        let r = Refinement::new("Excerpt must be shorter than description", |record| {
            let excerpt = record.get("excerpt").and_then(Value::as_str).unwrap_or("");
            let description = record
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("");
            excerpt.len() <= description.len()
        });
        assert!(r.check(&json!({ "excerpt": "ab", "description": "abcd" })));
        assert!(!r.check(&json!({ "excerpt": "abcd", "description": "ab" })));
    }
}
