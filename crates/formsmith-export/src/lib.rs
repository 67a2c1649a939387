//! Code generators for formsmith forms.
//!
//! [`generate`] turns a field list, form name and form options into the text
//! of one export format. Every generator is deterministic: identical input
//! produces byte-identical output.

pub mod error;
pub mod escape;
pub mod html;
pub mod json;
pub mod react;
mod runtime;
pub mod table;
pub mod wordpress;
pub mod writer;

use formsmith_core::enums::{CssFramework, ExportFormat};
use formsmith_core::field::Field;
use formsmith_core::options::FormOptions;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub use error::{ExportError, Result};

/// Default shortcode tag of the WordPress generator.
pub const DEFAULT_SHORTCODE_TAG: &str = "formsmith";

/// Generator settings that do not belong to the form itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    /// Class vocabulary for the markup generator.
    pub framework: CssFramework,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Tag name used by the shortcode generator.
    pub shortcode_tag: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            framework: CssFramework::default(),
            indent: 2,
            shortcode_tag: DEFAULT_SHORTCODE_TAG.to_string(),
        }
    }
}

/// Everything a generator reads.
#[derive(Debug, Clone)]
pub struct ExportRequest<'a> {
    pub name: &'a str,
    pub fields: &'a [Field],
    pub options: &'a FormOptions,
    pub settings: ExportSettings,
}

impl<'a> ExportRequest<'a> {
    pub fn new(name: &'a str, fields: &'a [Field], options: &'a FormOptions) -> Self {
        Self {
            name,
            fields,
            options,
            settings: ExportSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_framework(mut self, framework: CssFramework) -> Self {
        self.settings.framework = framework;
        self
    }
}

/// Generates the artifact for `format`.
pub fn generate(format: ExportFormat, request: &ExportRequest<'_>) -> Result<String> {
    if !(1..=8).contains(&request.settings.indent) {
        return Err(ExportError::new(
            format,
            format!("indent must be between 1 and 8 (got {})", request.settings.indent),
        ));
    }

    let output = match format {
        ExportFormat::Json => json::generate(request)?,
        ExportFormat::CssFramework => html::generate(request),
        ExportFormat::React => react::generate(request, react::Dialect::Jsx)?,
        ExportFormat::Typescript => react::generate(request, react::Dialect::Tsx)?,
        ExportFormat::Wordpress => wordpress::generate(request)?,
    };
    debug!(
        format = %format,
        fields = request.fields.len(),
        bytes = output.len(),
        "generated export"
    );
    Ok(output)
}

/// The fields a generator may render: malformed entries (no id or no type)
/// are dropped with a warning, page breaks are kept for partitioning.
pub(crate) fn usable_fields(format: ExportFormat, fields: &[Field]) -> Vec<Field> {
    fields
        .iter()
        .enumerate()
        .filter_map(|(index, field)| {
            if field.is_well_formed() {
                Some(field.clone())
            } else {
                warn!(
                    format = %format,
                    index,
                    id = %field.id,
                    "skipping malformed field"
                );
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::enums::{FieldType, Operator};
    use formsmith_core::field::FieldBuilder;

    fn sample_fields() -> Vec<Field> {
        vec![
            FieldBuilder::new(FieldType::Text, "name")
                .label("Name")
                .required(true)
                .build(),
            FieldBuilder::new(FieldType::PageBreak, "pb").label("Details").build(),
            FieldBuilder::new(FieldType::Select, "country")
                .label("Country")
                .option("United States", "us")
                .option("Other", "other")
                .build(),
            FieldBuilder::new(FieldType::Text, "other_country")
                .label("Which country?")
                .rule("country", Operator::Equals, "other")
                .build(),
        ]
    }

    #[test]
    fn every_format_is_deterministic() {
        let fields = sample_fields();
        let options = FormOptions::default();
        let request = ExportRequest::new("Contact", &fields, &options);
        for format in ExportFormat::ALL {
            let first = generate(format, &request).unwrap();
            let second = generate(format, &request).unwrap();
            assert_eq!(first, second, "{format}");
            assert!(!first.is_empty());
        }
    }

    #[test]
    fn malformed_fields_are_skipped_everywhere() {
        let mut fields = sample_fields();
        fields.push(Field {
            id: "ghost_field".into(),
            field_type: FieldType::Custom(String::new()),
            ..Field::default()
        });
        fields.push(Field {
            id: String::new(),
            label: "Nameless".into(),
            ..Field::default()
        });
        let options = FormOptions::default();
        let request = ExportRequest::new("Contact", &fields, &options);
        for format in ExportFormat::ALL {
            let output = generate(format, &request).unwrap();
            assert!(!output.contains("ghost_field"), "{format}");
            assert!(!output.contains("Nameless"), "{format}");
            assert!(output.contains("other_country"), "{format}");
        }
    }

    #[test]
    fn bad_indent_is_an_error() {
        let options = FormOptions::default();
        let request = ExportRequest::new("F", &[], &options).with_settings(ExportSettings {
            indent: 0,
            ..ExportSettings::default()
        });
        let err = generate(ExportFormat::React, &request).unwrap_err();
        assert_eq!(err.format, ExportFormat::React);
        assert!(err.to_string().starts_with("react export failed"));
    }

    #[test]
    fn empty_form_still_generates() {
        let options = FormOptions::default();
        let request = ExportRequest::new("Empty", &[], &options);
        for format in ExportFormat::ALL {
            assert!(generate(format, &request).is_ok(), "{format}");
        }
    }
}
