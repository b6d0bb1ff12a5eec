//! Built-in collection schemas for the course site.
//!
//! One schema per content collection, mirroring the authored content
//! contract: any field a template reads must be guaranteed present here.

use std::collections::HashMap;

use crate::schema::{Constraint, Field, ImageConstraint, Refinement, Schema};

/// Named set of collection schemas, looked up by collection name.
#[derive(Debug, Default)]
pub struct SchemaSet {
    schemas: HashMap<String, Schema>,
}

impl SchemaSet {
    /// An empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the schema for its collection.
    pub fn insert(&mut self, schema: Schema) {
        self.schemas.insert(schema.name.clone(), schema);
    }

    /// The schema for a collection, if one is registered.
    #[must_use]
    pub fn get(&self, collection: &str) -> Option<&Schema> {
        self.schemas.get(collection)
    }

    /// Registered collection names, unordered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// The full set of site collection schemas.
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.insert(articles());
        set.insert(authors());
        set.insert(categories());
        set.insert(clients());
        set.insert(courses());
        set.insert(newsletters());
        set.insert(testimonials());
        set.insert(videos());
        set
    }
}

fn text() -> Constraint {
    Constraint::Text {
        min: None,
        max: None,
    }
}

fn text_max(max: usize) -> Constraint {
    Constraint::Text {
        min: None,
        max: Some(max),
    }
}

fn reference(collection: &str) -> Constraint {
    Constraint::Reference {
        collection: collection.to_owned(),
    }
}

fn reference_list(collection: &str) -> Constraint {
    Constraint::List {
        item: Box::new(reference(collection)),
    }
}

/// Newsletter issues. Bounds and messages match the authored contract:
/// title 30-70 chars, description at most 200, hero image at least
/// 1200x630 with a 1.91:1 aspect ratio, unique article and course refs.
#[must_use]
pub fn newsletters() -> Schema {
    Schema {
        name: "newsletters".to_owned(),
        fields: vec![
            Field::required("articles", reference_list("articles")),
            Field::required("courses", reference_list("courses")),
            Field::required("description", text_max(200)),
            Field::required("excerpt", text()),
            Field::required(
                "heroImage",
                Constraint::Object {
                    fields: vec![
                        Field::required(
                            "image",
                            Constraint::Image(ImageConstraint {
                                min_width: 1200,
                                min_height: 630,
                                aspect_ratio: Some(1.91),
                            }),
                        ),
                        Field::required("alt", text()),
                    ],
                    closed: true,
                },
            ),
            Field::required("publishedDate", Constraint::Date),
            Field::required(
                "title",
                Constraint::Text {
                    min: Some(30),
                    max: Some(70),
                },
            ),
        ],
        closed: true,
        refinements: vec![Refinement::unique("articles"), Refinement::unique("courses")],
    }
}

/// Long-form articles.
#[must_use]
pub fn articles() -> Schema {
    Schema {
        name: "articles".to_owned(),
        fields: vec![
            Field::required("title", text_max(120)),
            Field::optional("description", text_max(200)),
            Field::required("author", reference("authors")),
            Field::optional("category", reference("categories")),
            Field::required("publishedDate", Constraint::Date),
            Field::optional("updatedDate", Constraint::Date),
            Field::optional("draft", Constraint::Bool),
            Field::optional(
                "tags",
                Constraint::List {
                    item: Box::new(Constraint::Slug),
                },
            ),
        ],
        closed: true,
        refinements: vec![Refinement::unique("tags")],
    }
}

/// Author bios.
#[must_use]
pub fn authors() -> Schema {
    Schema {
        name: "authors".to_owned(),
        fields: vec![
            Field::required("name", text()),
            Field::optional("bio", text_max(500)),
            Field::optional(
                "photo",
                Constraint::Image(ImageConstraint {
                    min_width: 400,
                    min_height: 400,
                    aspect_ratio: None,
                }),
            ),
            Field::optional("website", text()),
        ],
        closed: true,
        refinements: vec![],
    }
}

/// Article categories.
#[must_use]
pub fn categories() -> Schema {
    Schema {
        name: "categories".to_owned(),
        fields: vec![
            Field::required("name", text()),
            Field::optional("description", text_max(200)),
        ],
        closed: true,
        refinements: vec![],
    }
}

/// Client logos shown on the landing page.
#[must_use]
pub fn clients() -> Schema {
    Schema {
        name: "clients".to_owned(),
        fields: vec![
            Field::required("name", text()),
            Field::optional(
                "logo",
                Constraint::Image(ImageConstraint {
                    min_width: 200,
                    min_height: 100,
                    aspect_ratio: None,
                }),
            ),
            Field::optional("website", text()),
        ],
        closed: true,
        refinements: vec![],
    }
}

/// Courses sold through the site. The slug doubles as the curriculum
/// endpoint path segment, so it carries a strict slug constraint.
#[must_use]
pub fn courses() -> Schema {
    Schema {
        name: "courses".to_owned(),
        fields: vec![
            Field::required("title", text_max(120)),
            Field::required("slug", Constraint::Slug),
            Field::optional("description", text_max(200)),
            Field::optional("author", reference("authors")),
            Field::optional(
                "price",
                Constraint::Number {
                    min: Some(0.0),
                    max: None,
                },
            ),
            Field::optional("publishedDate", Constraint::Date),
        ],
        closed: true,
        refinements: vec![],
    }
}

/// Student testimonials.
#[must_use]
pub fn testimonials() -> Schema {
    Schema {
        name: "testimonials".to_owned(),
        fields: vec![
            Field::required("name", text()),
            Field::required("quote", text_max(1000)),
            Field::optional("client", reference("clients")),
            Field::optional("course", reference("courses")),
        ],
        closed: true,
        refinements: vec![],
    }
}

/// Embedded videos.
#[must_use]
pub fn videos() -> Schema {
    Schema {
        name: "videos".to_owned(),
        fields: vec![
            Field::required("title", text_max(120)),
            Field::required("url", text()),
            Field::optional("description", text_max(200)),
        ],
        closed: true,
        refinements: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_site_collections() {
        let set = SchemaSet::builtin();
        for name in [
            "articles",
            "authors",
            "categories",
            "clients",
            "courses",
            "newsletters",
            "testimonials",
            "videos",
        ] {
            assert!(set.get(name).is_some(), "missing schema for {name}");
        }
        assert!(set.get("informationals").is_none());
    }

    #[test]
    fn test_newsletter_schema_shape() {
        let schema = newsletters();
        assert!(schema.closed);
        assert_eq!(schema.refinements.len(), 2);
        let title = schema
            .fields
            .iter()
            .find(|f| f.name == "title")
            .expect("title field");
        assert_eq!(
            title.constraint,
            Constraint::Text {
                min: Some(30),
                max: Some(70)
            }
        );
    }
}
