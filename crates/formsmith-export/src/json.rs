//! Structured-data export.
//!
//! The output is a form document that loads back through
//! `formsmith_core::document::parse_json`. Page breaks stay in `fields` so
//! a reloaded wizard splits the same way; wizards also get a top-level
//! `steps` outline, which the loader ignores.

use formsmith_core::document::DOCUMENT_VERSION;
use formsmith_core::enums::{ExportFormat, FieldType};
use formsmith_core::field::Field;
use formsmith_core::options::FormOptions;
use formsmith_logic::{Partition, partition};
use serde::Serialize;

use crate::table::RendererTable;
use crate::{ExportError, ExportRequest, Result, usable_fields};

#[derive(Serialize)]
struct JsonExport<'a> {
    name: &'a str,
    version: u32,
    fields: Vec<Field>,
    options: &'a FormOptions,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    steps: Vec<StepOutline<'a>>,
}

#[derive(Serialize)]
struct StepOutline<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'a str,
    fields: Vec<&'a str>,
}

/// Every built-in type maps to itself; anything else becomes `text`.
fn type_table() -> RendererTable<&'static str> {
    FieldType::BUILTIN
        .iter()
        .fold(RendererTable::new("text"), |table, t| {
            table.register(std::slice::from_ref(t), t.as_str())
        })
}

pub fn generate(request: &ExportRequest<'_>) -> Result<String> {
    let usable = usable_fields(ExportFormat::Json, request.fields);
    let layout = partition(&usable);
    let types = type_table();

    let fields = usable
        .iter()
        .map(|f| Field {
            field_type: FieldType::from(types.get(&f.field_type)),
            ..f.clone()
        })
        .collect();

    let export = JsonExport {
        name: request.name,
        version: DOCUMENT_VERSION,
        fields,
        options: request.options,
        steps: outline(&layout),
    };

    let mut text = serde_json::to_string_pretty(&export)
        .map_err(|e| ExportError::new(ExportFormat::Json, e.to_string()))?;
    text.push('\n');
    Ok(text)
}

fn outline<'a>(layout: &'a Partition<'_>) -> Vec<StepOutline<'a>> {
    if !layout.is_wizard {
        return Vec::new();
    }
    layout
        .steps
        .iter()
        .map(|step| StepOutline {
            id: &step.id,
            title: &step.title,
            description: &step.description,
            fields: step.fields.iter().map(|f| f.id.as_str()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::document::parse_json;
    use formsmith_core::enums::Operator;
    use formsmith_core::field::FieldBuilder;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_required_field_round_trips() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "name")
                .label("Name")
                .required(true)
                .build(),
        ];
        let options = FormOptions::default();
        let output = generate(&ExportRequest::new("Contact", &fields, &options)).unwrap();

        let doc = parse_json(&output).unwrap();
        assert_eq!(doc.name, "Contact");
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields[0].label, "Name");
        assert!(doc.fields[0].required);
        assert!(!output.contains("\"steps\""));
    }

    #[test]
    fn wizard_gets_step_outline() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "a").build(),
            FieldBuilder::new(FieldType::PageBreak, "pb").label("More").build(),
            FieldBuilder::new(FieldType::Email, "b").build(),
        ];
        let options = FormOptions::default();
        let output = generate(&ExportRequest::new("W", &fields, &options)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["fields"].as_array().unwrap().len(), 3);
        assert_eq!(value["fields"][1]["type"], "pageBreak");
        assert_eq!(value["steps"][1]["title"], "More");
        assert_eq!(value["steps"][1]["fields"], serde_json::json!(["b"]));
    }

    #[test]
    fn wizard_reloads_with_the_same_steps() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "a").build(),
            FieldBuilder::new(FieldType::PageBreak, "pb").label("Two").build(),
            FieldBuilder::new(FieldType::Text, "b").build(),
        ];
        let options = FormOptions::default();
        let output = generate(&ExportRequest::new("W", &fields, &options)).unwrap();
        let doc = parse_json(&output).unwrap();

        let before = partition(&fields);
        let after = partition(&doc.fields);
        assert_eq!(after.steps.len(), before.steps.len());
        assert!(after.is_wizard);
        assert_eq!(after.steps[1].title, "Two");
        assert_eq!(after.steps[1].fields[0].id, "b");
    }

    #[test]
    fn unknown_type_degrades_to_text_and_logic_is_kept() {
        let fields = vec![
            FieldBuilder::new(FieldType::Custom("slider3d".into()), "s")
                .rule("a", Operator::GreaterThan, "3")
                .build(),
        ];
        let options = FormOptions::default();
        let output = generate(&ExportRequest::new("U", &fields, &options)).unwrap();
        let doc = parse_json(&output).unwrap();
        assert_eq!(doc.fields[0].field_type, FieldType::Text);
        assert_eq!(
            doc.fields[0].active_logic().unwrap().rules[0].operator,
            Operator::GreaterThan
        );
    }

    #[test]
    fn hostile_strings_stay_inside_json_strings() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "x")
                .label("\"},{\"id\":\"injected")
                .build(),
        ];
        let options = FormOptions::default();
        let output = generate(&ExportRequest::new("Q", &fields, &options)).unwrap();
        let doc = parse_json(&output).unwrap();
        assert_eq!(doc.fields.len(), 1);
        assert_eq!(doc.fields[0].label, "\"},{\"id\":\"injected");
    }
}
