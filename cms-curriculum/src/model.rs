//! Curriculum model and wire decoding.
//!
//! The internal endpoint returns `{ "updatedLectureSections": [...] }` where
//! sections and lectures carry `position` and `is_published` flags. Decoding
//! drops unpublished entries and orders by position, so the rest of the
//! crate only ever sees the display-ready shape.

use serde::{Deserialize, Serialize};

/// One lecture inside a section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lecture {
    pub id: u64,
    pub name: String,
}

/// One ordered section of lectures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Section {
    pub id: u64,
    pub name: String,
    pub lectures: Vec<Lecture>,
}

/// Ordered sections of ordered lectures belonging to one course.
pub type Curriculum = Vec<Section>;

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(rename = "updatedLectureSections", default)]
    updated_lecture_sections: Vec<WireSection>,
}

#[derive(Debug, Deserialize)]
struct WireSection {
    id: u64,
    name: String,
    #[serde(default = "published_default")]
    is_published: bool,
    #[serde(default)]
    position: i64,
    #[serde(default)]
    lectures: Vec<WireLecture>,
}

#[derive(Debug, Deserialize)]
struct WireLecture {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default = "published_default")]
    is_published: bool,
    #[serde(default)]
    position: i64,
}

// Entries without the flag are live content.
fn published_default() -> bool {
    true
}

/// Decode a curriculum response body.
///
/// # Errors
///
/// Returns a `serde_json::Error` when the body is not the expected wire
/// shape.
pub fn decode(body: &[u8]) -> Result<Curriculum, serde_json::Error> {
    let wire: WireResponse = serde_json::from_slice(body)?;

    let mut sections = wire.updated_lecture_sections;
    sections.retain(|s| s.is_published);
    sections.sort_by_key(|s| s.position);

    Ok(sections
        .into_iter()
        .map(|section| {
            let mut lectures = section.lectures;
            lectures.retain(|l| l.is_published);
            lectures.sort_by_key(|l| l.position);
            Section {
                id: section.id,
                name: section.name,
                lectures: lectures
                    .into_iter()
                    .map(|l| Lecture {
                        id: l.id,
                        name: l.name.unwrap_or_default(),
                    })
                    .collect(),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_filters_unpublished_and_sorts() {
        let body = br#"{
            "updatedLectureSections": [
                {
                    "id": 2, "name": "Advanced", "is_published": true, "position": 2,
                    "lectures": [
                        { "id": 21, "name": "Later", "is_published": true, "position": 2 },
                        { "id": 20, "name": "First", "is_published": true, "position": 1 },
                        { "id": 22, "name": "Draft", "is_published": false, "position": 3 }
                    ]
                },
                {
                    "id": 1, "name": "Basics", "is_published": true, "position": 1,
                    "lectures": []
                },
                {
                    "id": 3, "name": "Hidden", "is_published": false, "position": 0,
                    "lectures": []
                }
            ]
        }"#;

        let curriculum = decode(body).unwrap();
        assert_eq!(curriculum.len(), 2);
        assert_eq!(curriculum[0].name, "Basics");
        assert_eq!(curriculum[1].name, "Advanced");
        let names: Vec<&str> = curriculum[1]
            .lectures
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, ["First", "Later"]);
    }

    #[test]
    fn test_decode_defaults_missing_flags_to_published() {
        let body = br#"{
            "updatedLectureSections": [
                { "id": 1, "name": "Basics", "lectures": [ { "id": 10 } ] }
            ]
        }"#;
        let curriculum = decode(body).unwrap();
        assert_eq!(curriculum.len(), 1);
        assert_eq!(curriculum[0].lectures[0].id, 10);
        assert_eq!(curriculum[0].lectures[0].name, "");
    }

    #[test]
    fn test_decode_empty_body_object() {
        let curriculum = decode(b"{}").unwrap();
        assert!(curriculum.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_body() {
        assert!(decode(b"not json").is_err());
        assert!(decode(br#"{ "updatedLectureSections": 42 }"#).is_err());
    }
}
