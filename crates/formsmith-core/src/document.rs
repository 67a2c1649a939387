//! Form documents: the persisted shape of a form (name, fields, options).
//!
//! Documents load from JSON, YAML or TOML. Field entries are parsed one by
//! one so that a single malformed entry is skipped instead of failing the
//! whole document.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use crate::field::Field;
use crate::options::FormOptions;

/// Current document schema version.
pub const DOCUMENT_VERSION: u32 = 1;

fn default_version() -> u32 {
    DOCUMENT_VERSION
}

fn default_name() -> String {
    "Untitled Form".to_string()
}

/// Root structure of a form file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDocument {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub options: FormOptions,
}

impl Default for FormDocument {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: DOCUMENT_VERSION,
            fields: Vec::new(),
            options: FormOptions::default(),
        }
    }
}

impl FormDocument {
    pub fn new(name: impl Into<String>, fields: Vec<Field>, options: FormOptions) -> Self {
        Self {
            name: name.into(),
            version: DOCUMENT_VERSION,
            fields,
            options,
        }
    }
}

/// Errors that can occur while loading a form document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("{format} parse error: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for document operations.
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Parse a document from a JSON string.
pub fn parse_json(content: &str) -> Result<FormDocument> {
    serde_json::from_str(content).map_err(|e| DocumentError::Parse {
        format: "json",
        message: e.to_string(),
    })
}

/// Parse a document from a YAML string.
pub fn parse_yaml(content: &str) -> Result<FormDocument> {
    serde_yaml::from_str(content).map_err(|e| DocumentError::Parse {
        format: "yaml",
        message: e.to_string(),
    })
}

/// Parse a document from a TOML string.
pub fn parse_toml(content: &str) -> Result<FormDocument> {
    toml::from_str(content).map_err(|e| DocumentError::Parse {
        format: "toml",
        message: e.to_string(),
    })
}

/// Parse a bare JSON array of fields (the shape editors copy to the
/// clipboard) or a full document.
pub fn parse_json_any(content: &str) -> Result<FormDocument> {
    if content.trim_start().starts_with('[') {
        let raw: Vec<serde_json::Value> =
            serde_json::from_str(content).map_err(|e| DocumentError::Parse {
                format: "json",
                message: e.to_string(),
            })?;
        return Ok(FormDocument {
            fields: collect_fields(raw),
            ..FormDocument::default()
        });
    }
    parse_json(content)
}

/// Load a document from a file path (auto-detect format by extension).
pub fn load_document(path: &Path) -> Result<FormDocument> {
    let content = std::fs::read_to_string(path)?;
    let doc = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => parse_yaml(&content)?,
        Some("toml") => parse_toml(&content)?,
        Some("json") => parse_json_any(&content)?,
        _ => parse_json_any(&content).or_else(|_| parse_yaml(&content))?,
    };
    debug!(path = %path.display(), fields = doc.fields.len(), "loaded form document");
    Ok(doc)
}

/// Serialize a document as pretty JSON.
pub fn to_json(doc: &FormDocument) -> Result<String> {
    serde_json::to_string_pretty(doc).map_err(|e| DocumentError::Parse {
        format: "json",
        message: e.to_string(),
    })
}

fn lenient_fields<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<Field>, D::Error> {
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(collect_fields(raw))
}

fn collect_fields(raw: Vec<serde_json::Value>) -> Vec<Field> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Field>(value) {
            Ok(field) => Some(field),
            Err(e) => {
                warn!(index, error = %e, "skipping unreadable field entry");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::FieldType;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_json_minimal() {
        let doc = parse_json(r#"{"name": "Contact", "fields": [{"id": "a", "type": "text"}]}"#)
            .unwrap();
        assert_eq!(doc.name, "Contact");
        assert_eq!(doc.version, DOCUMENT_VERSION);
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.options, FormOptions::default());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let doc = parse_json(
            r#"{"fields": [
                {"id": "a", "type": "text"},
                42,
                {"id": "b", "type": "email", "required": "yes"},
                {"id": "c", "type": "email"}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<_> = doc.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn parse_bare_array() {
        let doc = parse_json_any(r#"[{"id": "a", "type": "pageBreak"}]"#).unwrap();
        assert_eq!(doc.name, "Untitled Form");
        assert_eq!(doc.fields[0].field_type, FieldType::PageBreak);
    }

    #[test]
    fn parse_yaml_document() {
        let yaml = r##"
name: Survey
fields:
  - id: q1
    type: radio
    label: Pick one
    options:
      - { label: Yes, value: "yes" }
      - { label: No, value: "no" }
options:
  primaryColor: "#000000"
"##;
        let doc = parse_yaml(yaml).unwrap();
        assert_eq!(doc.name, "Survey");
        assert_eq!(doc.fields[0].options.len(), 2);
        assert_eq!(doc.options.primary_color, "#000000");
    }

    #[test]
    fn parse_toml_document() {
        let toml_str = r#"
name = "Signup"

[[fields]]
id = "email"
type = "email"
label = "Email"
required = true
"#;
        let doc = parse_toml(toml_str).unwrap();
        assert_eq!(doc.fields[0].field_type, FieldType::Email);
        assert!(doc.fields[0].required);
    }

    #[test]
    fn load_document_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(&path, r#"{"name": "F", "fields": []}"#).unwrap();
        let doc = load_document(&path).unwrap();
        assert_eq!(doc.name, "F");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = load_document(Path::new("/nonexistent/form.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Io(_)));
    }

    #[test]
    fn to_json_roundtrip() {
        let doc = parse_json(r#"{"name": "R", "fields": [{"id": "a", "type": "text", "label": "A"}]}"#)
            .unwrap();
        let back = parse_json(&to_json(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
