//! Frontmatter extraction for markdown content files.
//!
//! A content file opens with a `---` fence, carries a YAML mapping, and
//! closes with a second `---` fence. Everything after the closing fence is
//! the rendered body, which the validation engine never reads.

use serde_json::Value;

/// Why a frontmatter block could not be produced from file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    /// The file does not open with a `---` fence, or the fence never closes.
    Missing,
    /// The block between the fences is not valid YAML.
    Yaml(String),
}

/// Extract and parse the YAML frontmatter of a content file.
///
/// Leading blank lines before the opening fence are tolerated. An empty
/// block parses as an empty mapping so that required-field reporting (rather
/// than a parse error) describes the problem.
///
/// # Errors
///
/// Returns [`FrontmatterError::Missing`] when no fenced block exists and
/// [`FrontmatterError::Yaml`] when the block is not valid YAML.
pub fn extract(content: &str) -> Result<Value, FrontmatterError> {
    let mut lines = content.lines();

    loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => {}
            Some(line) if line.trim_end() == "---" => break,
            _ => return Err(FrontmatterError::Missing),
        }
    }

    let mut block: Vec<&str> = Vec::new();
    let mut closed = false;
    for line in lines {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        block.push(line);
    }
    if !closed {
        return Err(FrontmatterError::Missing);
    }

    let yaml = block.join("\n");
    if yaml.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }

    serde_saphyr::from_str::<Value>(&yaml).map_err(|e| FrontmatterError::Yaml(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_basic_mapping() {
        let content = "---\ntitle: Hello\ndraft: false\n---\n\nBody text.\n";
        let value = extract(content).unwrap();
        assert_eq!(value, json!({ "title": "Hello", "draft": false }));
    }

    #[test]
    fn test_extract_tolerates_leading_blank_lines() {
        let content = "\n\n---\ntitle: Hello\n---\nBody\n";
        let value = extract(content).unwrap();
        assert_eq!(value, json!({ "title": "Hello" }));
    }

    #[test]
    fn test_extract_empty_block_is_empty_mapping() {
        let value = extract("---\n---\nBody\n").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_missing_opening_fence() {
        assert_eq!(extract("# Just markdown\n"), Err(FrontmatterError::Missing));
    }

    #[test]
    fn test_unclosed_fence() {
        assert_eq!(
            extract("---\ntitle: Hello\n"),
            Err(FrontmatterError::Missing)
        );
    }

    #[test]
    fn test_invalid_yaml_reports_parse_error() {
        let result = extract("---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn test_body_with_stray_fences_ignored() {
        let content = "---\ntitle: Hello\n---\nBody\n---\nmore: yaml\n---\n";
        let value = extract(content).unwrap();
        assert_eq!(value, json!({ "title": "Hello" }));
    }
}
