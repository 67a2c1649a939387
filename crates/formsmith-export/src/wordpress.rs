//! Shortcode export for the WordPress form plugin dialect.
//!
//! The form is one enclosing shortcode with a self-closing `_field` child
//! per control, grouped into `_step` children when the form is a wizard.
//! Conditional logic rides along as an entity-escaped JSON attribute.

use formsmith_core::enums::{ExportFormat, FieldType};
use formsmith_core::field::Field;
use formsmith_core::values::format_number;
use formsmith_logic::partition;

use crate::escape::{js_json, shortcode_attr as attr, shortcode_list_item};
use crate::table::RendererTable;
use crate::writer::CodeWriter;
use crate::{ExportError, ExportRequest, Result, usable_fields};

/// Control types the plugin understands. Anything else becomes `text`.
fn type_table() -> RendererTable<&'static str> {
    RendererTable::new("text")
        .register(&[FieldType::Email], "email")
        .register(&[FieldType::Number, FieldType::Rating], "number")
        .register(&[FieldType::Phone], "tel")
        .register(&[FieldType::Url], "url")
        .register(&[FieldType::Password], "password")
        .register(&[FieldType::Textarea, FieldType::Paragraph], "textarea")
        .register(&[FieldType::Select, FieldType::Country], "select")
        .register(&[FieldType::Multiselect], "multiselect")
        .register(&[FieldType::Radio], "radio")
        .register(&[FieldType::Checkbox], "checkbox")
        .register(&[FieldType::Date], "date")
        .register(&[FieldType::Time], "time")
        .register(&[FieldType::Datetime], "datetime")
        .register(&[FieldType::File], "file")
        .register(&[FieldType::Range, FieldType::Scale], "range")
        .register(&[FieldType::Color], "color")
        .register(&[FieldType::Hidden], "hidden")
}

/// Returns `true` for tags the shortcode parser accepts.
fn is_valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

pub fn generate(request: &ExportRequest<'_>) -> Result<String> {
    let tag = request.settings.shortcode_tag.as_str();
    if !is_valid_tag(tag) {
        return Err(ExportError::new(
            ExportFormat::Wordpress,
            format!("invalid shortcode tag: {:?}", tag),
        ));
    }

    let usable = usable_fields(ExportFormat::Wordpress, request.fields);
    let layout = partition(&usable);
    let types = type_table();
    let opts = request.options;

    let mut w = CodeWriter::new(request.settings.indent);
    let mut form_attrs = vec![("name", attr(request.name))];
    if !opts.description.is_empty() {
        form_attrs.push(("description", attr(&opts.description)));
    }
    form_attrs.extend([
        ("submit", attr(&opts.submit_button_text)),
        ("success", attr(&opts.success_message)),
        ("primary_color", attr(&opts.primary_color)),
        ("background_color", attr(&opts.background_color)),
        ("text_color", attr(&opts.text_color)),
        ("border_color", attr(&opts.border_color)),
        ("error_color", attr(&opts.error_color)),
    ]);
    if layout.is_wizard {
        form_attrs.extend([
            ("next", attr(&opts.next_button_text)),
            ("previous", attr(&opts.previous_button_text)),
            ("progress", opts.show_progress_bar.to_string()),
        ]);
    }
    w.open(shortcode(tag, &form_attrs));

    for step in &layout.steps {
        if layout.is_wizard {
            let mut step_attrs = vec![("id", attr(&step.id)), ("title", attr(&step.title))];
            if !step.description.is_empty() {
                step_attrs.push(("description", attr(&step.description)));
            }
            w.open(shortcode(&format!("{}_step", tag), &step_attrs));
        }
        for field in step.fields.iter().copied() {
            let field_attrs = field_attrs(field, types.get(&field.field_type))
                .map_err(|e| ExportError::new(ExportFormat::Wordpress, e.to_string()))?;
            w.line(shortcode(&format!("{}_field", tag), &field_attrs));
        }
        if layout.is_wizard {
            w.close(format!("[/{}_step]", tag));
        }
    }

    w.close(format!("[/{}]", tag));
    Ok(w.finish())
}

/// Opening shortcode. Attribute values must already be escaped.
fn shortcode(tag: &str, attrs: &[(&str, String)]) -> String {
    let mut out = format!("[{}", tag);
    for (key, value) in attrs {
        out.push_str(&format!(" {}=\"{}\"", key, value));
    }
    out.push(']');
    out
}

fn field_attrs(field: &Field, mapped: &str) -> serde_json::Result<Vec<(&'static str, String)>> {
    let mut attrs = vec![
        ("id", attr(&field.id)),
        ("type", mapped.to_string()),
        ("label", attr(&field.label)),
    ];
    if field.required {
        attrs.push(("required", "true".into()));
    }
    if field.disabled {
        attrs.push(("disabled", "true".into()));
    }
    for (key, value) in [
        ("placeholder", &field.placeholder),
        ("default", &field.default_value),
        ("help", &field.help_text),
        ("width", &field.width),
        ("class", &field.custom_class),
    ] {
        if !value.is_empty() {
            attrs.push((key, attr(value)));
        }
    }
    if !field.options.is_empty() {
        // Items escape `|` and `,` so that the separators stay structural.
        let list = field
            .options
            .iter()
            .map(|o| format!("{}|{}", shortcode_list_item(&o.label), shortcode_list_item(&o.value)))
            .collect::<Vec<_>>()
            .join(",");
        attrs.push(("options", list));
    }
    if let Some(n) = field.min_length {
        attrs.push(("minlength", n.to_string()));
    }
    if let Some(n) = field.max_length {
        attrs.push(("maxlength", n.to_string()));
    }
    if let Some(ref p) = field.pattern {
        attrs.push(("pattern", attr(p)));
    }
    for (key, value) in [("min", field.min), ("max", field.max), ("step", field.step)] {
        if let Some(n) = value {
            attrs.push((key, format_number(n)));
        }
    }
    if let Some(logic) = field.active_logic() {
        attrs.push(("logic", attr(&js_json(logic)?)));
    }
    Ok(attrs)
}
