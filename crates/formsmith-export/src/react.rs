//! Component-source export: a self-contained React function component.
//!
//! Unlike static markup, the component evaluates conditional logic live
//! with an embedded copy of the condition runtime. Both dialects share the
//! renderers; TypeScript only adds annotations.

use std::collections::BTreeMap;

use formsmith_core::enums::{ExportFormat, FieldType};
use formsmith_core::field::{ConditionalLogic, Field};
use formsmith_core::options::FormOptions;
use formsmith_core::values::{FormValue, FormValues, format_number};
use formsmith_logic::partition;

use crate::escape::{component_name, js_json, js_string as js};
use crate::html::input_types;
use crate::runtime;
use crate::table::RendererTable;
use crate::writer::CodeWriter;
use crate::{ExportError, ExportRequest, Result, usable_fields};

/// Source dialect of the generated component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Jsx,
    Tsx,
}

impl Dialect {
    fn format(self) -> ExportFormat {
        match self {
            Self::Jsx => ExportFormat::React,
            Self::Tsx => ExportFormat::Typescript,
        }
    }

    /// Returns `annotation` in TypeScript and nothing in JavaScript.
    fn ty(self, annotation: &'static str) -> &'static str {
        match self {
            Self::Jsx => "",
            Self::Tsx => annotation,
        }
    }
}

struct Ctx<'a> {
    options: &'a FormOptions,
    input_types: RendererTable<&'static str>,
}

type Render = fn(&Field, &Ctx<'_>, &mut CodeWriter);

fn renderers() -> RendererTable<Render> {
    RendererTable::new(render_input as Render)
        .register(&[FieldType::Textarea, FieldType::Paragraph], render_textarea)
        .register(&[FieldType::Select, FieldType::Country], render_select)
        .register(&[FieldType::Multiselect], render_multiselect)
        .register(&[FieldType::Radio], render_radio)
        .register(&[FieldType::Checkbox], render_checkbox)
        .register(&[FieldType::File], render_file)
        .register(&[FieldType::Hidden], render_hidden)
}

pub fn generate(request: &ExportRequest<'_>, dialect: Dialect) -> Result<String> {
    let format = dialect.format();
    let usable = usable_fields(format, request.fields);
    let layout = partition(&usable);
    let controls: Vec<&Field> = layout
        .steps
        .iter()
        .flat_map(|s| s.fields.iter().copied())
        .collect();

    let logic: BTreeMap<&str, &ConditionalLogic> = controls
        .iter()
        .filter_map(|f| f.active_logic().map(|l| (f.id.as_str(), l)))
        .collect();
    let to_err = |e: serde_json::Error| ExportError::new(format, e.to_string());
    let logic_json = js_json(&logic).map_err(to_err)?;
    let initial_json = js_json(&initial_values(&controls)).map_err(to_err)?;

    let ctx = Ctx {
        options: request.options,
        input_types: input_types(),
    };
    let table = renderers();
    let opts = request.options;
    let ty = |a| dialect.ty(a);

    let mut w = CodeWriter::new(request.settings.indent);
    w.line("import React, { useState } from 'react';");
    w.blank();
    w.block(match dialect {
        Dialect::Jsx => runtime::JSX,
        Dialect::Tsx => runtime::TSX,
    });
    w.blank();
    w.line(format!(
        "const conditionalLogic{} = {};",
        ty(": Record<string, ConditionalLogic>"),
        logic_json
    ));
    w.blank();
    w.line(format!("const initialValues{} = {};", ty(": FormValues"), initial_json));
    w.blank();
    if layout.is_wizard {
        w.line(format!("const STEP_COUNT = {};", layout.steps.len()));
        w.blank();
    }

    w.open(format!(
        "export default function {}() {{",
        component_name(request.name)
    ));
    w.line(format!(
        "const [values, setValues] = useState{}(initialValues);",
        ty("<FormValues>")
    ));
    if layout.is_wizard {
        w.line("const [currentStep, setCurrentStep] = useState(0);");
    }
    w.line("const [submitted, setSubmitted] = useState(false);");
    w.blank();
    w.line(format!(
        "const setValue = (id{}, value{}) => setValues((prev) => ({{ ...prev, [id]: value }}));",
        ty(": string"),
        ty(": FormValue")
    ));
    w.open(format!(
        "const hasValue = (id{}, option{}){} => {{",
        ty(": string"),
        ty(": string"),
        ty(": boolean")
    ));
    w.line("const current = values[id];");
    w.line("return Array.isArray(current) && current.includes(option);");
    w.close("};");
    w.open(format!(
        "const toggleValue = (id{}, option{}) =>",
        ty(": string"),
        ty(": string")
    ));
    w.open("setValues((prev) => {");
    w.line("const current = prev[id];");
    w.line(format!(
        "const list{} = Array.isArray(current) ? current : [];",
        ty(": string[]")
    ));
    w.line("const next = list.includes(option) ? list.filter((item) => item !== option) : [...list, option];");
    w.line("return { ...prev, [id]: next };");
    w.close("});");
    w.dedent();
    w.line(format!(
        "const isVisible = (id{}){} => isFieldVisible(conditionalLogic[id], values);",
        ty(": string"),
        ty(": boolean")
    ));
    w.blank();
    w.open(format!(
        "const handleSubmit = (event{}) => {{",
        ty(": React.FormEvent<HTMLFormElement>")
    ));
    w.line("event.preventDefault();");
    w.line("setSubmitted(true);");
    w.close("};");
    w.blank();
    w.open("if (submitted) {");
    w.line(format!(
        "return <div className=\"form-success\">{{{}}}</div>;",
        js(&opts.success_message)
    ));
    w.close("}");
    w.blank();

    w.open("return (");
    w.open(format!(
        "<form className=\"formsmith-form\" onSubmit={{handleSubmit}} noValidate={{{}}} style={{{{ color: {}, backgroundColor: {} }}}}>",
        !(opts.validate_on_blur || opts.validate_on_change),
        js(&opts.text_color),
        js(&opts.background_color)
    ));
    w.line(format!("<h2>{{{}}}</h2>", js(request.name)));
    if !opts.description.is_empty() {
        w.line(format!(
            "<p className=\"form-description\">{{{}}}</p>",
            js(&opts.description)
        ));
    }

    if layout.is_wizard {
        if opts.show_progress_bar {
            w.open("<div className=\"form-progress\">");
            w.line(format!(
                "<div className=\"form-progress-bar\" style={{{{ width: `${{((currentStep + 1) / STEP_COUNT) * 100}}%`, backgroundColor: {} }}}} />",
                js(&opts.primary_color)
            ));
            w.close("</div>");
            w.line("<p className=\"form-progress-label\">Step {currentStep + 1} of {STEP_COUNT}</p>");
        }
        for (index, step) in layout.steps.iter().enumerate() {
            w.open(format!("{{currentStep === {} && (", index));
            w.open(format!("<fieldset className=\"form-step\" data-step={{{}}}>", js(&step.id)));
            w.line(format!("<legend>{{{}}}</legend>", js(&step.title)));
            if !step.description.is_empty() {
                w.line(format!(
                    "<p className=\"form-step-description\">{{{}}}</p>",
                    js(&step.description)
                ));
            }
            for field in step.fields.iter().copied() {
                let render = table.get(&field.field_type);
                render(field, &ctx, &mut w);
            }
            w.close("</fieldset>");
            w.close(")}");
        }
        write_step_nav(&mut w, opts);
    } else {
        for field in controls.iter().copied() {
            let render = table.get(&field.field_type);
            render(field, &ctx, &mut w);
        }
        w.line(format!(
            "<button type=\"submit\" style={{{{ backgroundColor: {} }}}}>{{{}}}</button>",
            js(&opts.primary_color),
            js(&opts.submit_button_text)
        ));
    }

    w.close("</form>");
    w.close(");");
    w.close("}");
    Ok(w.finish())
}

/// Starting values from each control's default value.
fn initial_values(controls: &[&Field]) -> FormValues {
    controls
        .iter()
        .filter(|f| !f.default_value.is_empty())
        .map(|f| {
            let value = match f.field_type {
                FieldType::Checkbox if f.options.is_empty() => {
                    FormValue::Bool(matches!(f.default_value.as_str(), "true" | "checked" | "1"))
                }
                FieldType::Checkbox | FieldType::Multiselect => FormValue::List(
                    f.default_value
                        .split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                ),
                _ => FormValue::Text(f.default_value.clone()),
            };
            (f.id.as_str(), value)
        })
        .collect()
}

fn write_step_nav(w: &mut CodeWriter, opts: &FormOptions) {
    w.open("<div className=\"form-navigation\">");
    w.open("{currentStep > 0 && (");
    w.line(format!(
        "<button type=\"button\" onClick={{() => setCurrentStep(currentStep - 1)}}>{{{}}}</button>",
        js(&opts.previous_button_text)
    ));
    w.close(")}");
    w.open("{currentStep < STEP_COUNT - 1 ? (");
    w.line(format!(
        "<button type=\"button\" onClick={{() => setCurrentStep(currentStep + 1)}}>{{{}}}</button>",
        js(&opts.next_button_text)
    ));
    w.close(") : (");
    w.indent();
    w.line(format!(
        "<button type=\"submit\" style={{{{ backgroundColor: {} }}}}>{{{}}}</button>",
        js(&opts.primary_color),
        js(&opts.submit_button_text)
    ));
    w.close(")}");
    w.close("</div>");
}

// -- Field renderers ---------------------------------------------------------

fn open_field(field: &Field, w: &mut CodeWriter) {
    if field.active_logic().is_some() {
        w.open(format!("{{isVisible({}) && (", js(&field.id)));
    }
    let mut class = String::from("form-field");
    for extra in [&field.width, &field.custom_class] {
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(extra);
        }
    }
    w.open(format!("<div className={{{}}}>", js(&class)));
}

fn close_field(field: &Field, w: &mut CodeWriter) {
    if !field.help_text.is_empty() {
        w.line(format!("<small className=\"form-help\">{{{}}}</small>", js(&field.help_text)));
    }
    w.close("</div>");
    if field.active_logic().is_some() {
        w.close(")}");
    }
}

fn asterisk(field: &Field, ctx: &Ctx<'_>) -> &'static str {
    if field.required && ctx.options.show_required_asterisk {
        " <span className=\"form-required\">*</span>"
    } else {
        ""
    }
}

fn label_line(field: &Field, ctx: &Ctx<'_>) -> String {
    let class = if field.hide_label { " className=\"sr-only\"" } else { "" };
    format!(
        "<label htmlFor={{{}}}{}>{{{}}}{}</label>",
        js(&field.id),
        class,
        js(&field.label),
        asterisk(field, ctx)
    )
}

fn group_title(field: &Field, ctx: &Ctx<'_>) -> String {
    format!(
        "<span className=\"form-label\">{{{}}}{}</span>",
        js(&field.label),
        asterisk(field, ctx)
    )
}

/// `id`, `name`, `required` and `disabled`.
fn base_attrs(field: &Field) -> Vec<String> {
    let id = js(&field.id);
    let mut attrs = vec![format!("id={{{}}}", id), format!("name={{{}}}", id)];
    if field.required {
        attrs.push("required".into());
    }
    if field.disabled {
        attrs.push("disabled".into());
    }
    attrs
}

fn text_binding(field: &Field) -> [String; 2] {
    let id = js(&field.id);
    [
        format!("value={{toText(values[{}])}}", id),
        format!("onChange={{(e) => setValue({}, e.target.value)}}", id),
    ]
}

fn constraint_attrs(field: &Field) -> Vec<String> {
    let mut attrs = Vec::new();
    if !field.placeholder.is_empty() {
        attrs.push(format!("placeholder={{{}}}", js(&field.placeholder)));
    }
    if let Some(n) = field.min_length {
        attrs.push(format!("minLength={{{}}}", n));
    }
    if let Some(n) = field.max_length {
        attrs.push(format!("maxLength={{{}}}", n));
    }
    if let Some(ref p) = field.pattern {
        attrs.push(format!("pattern={{{}}}", js(p)));
    }
    for (name, value) in [("min", field.min), ("max", field.max), ("step", field.step)] {
        if let Some(n) = value {
            attrs.push(format!("{}={{{}}}", name, format_number(n)));
        }
    }
    attrs
}

fn render_input(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let input_type = ctx.input_types.get(&field.field_type);
    let mut attrs = vec![format!("type=\"{}\"", input_type)];
    attrs.extend(base_attrs(field));
    attrs.extend(text_binding(field));
    attrs.extend(constraint_attrs(field));

    open_field(field, w);
    w.line(label_line(field, ctx));
    w.line(format!("<input {} />", attrs.join(" ")));
    close_field(field, w);
}

fn render_textarea(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let mut attrs = base_attrs(field);
    attrs.push("rows={4}".into());
    attrs.extend(text_binding(field));
    attrs.extend(constraint_attrs(field));

    open_field(field, w);
    w.line(label_line(field, ctx));
    w.line(format!("<textarea {} />", attrs.join(" ")));
    close_field(field, w);
}

fn render_select(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    if field.options.is_empty() {
        return render_input(field, ctx, w);
    }
    let mut attrs = base_attrs(field);
    attrs.extend(text_binding(field));
    let prompt = if field.placeholder.is_empty() {
        "Select an option"
    } else {
        field.placeholder.as_str()
    };

    open_field(field, w);
    w.line(label_line(field, ctx));
    w.open(format!("<select {}>", attrs.join(" ")));
    w.line(format!("<option value=\"\">{{{}}}</option>", js(prompt)));
    for option in &field.options {
        w.line(format!(
            "<option value={{{}}}>{{{}}}</option>",
            js(&option.value),
            js(&option.label)
        ));
    }
    w.close("</select>");
    close_field(field, w);
}

fn render_multiselect(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let id = js(&field.id);
    let mut attrs = base_attrs(field);
    attrs.push("multiple".into());
    attrs.push(format!(
        "value={{Array.isArray(values[{id}]) ? values[{id}] : []}}",
        id = id
    ));
    attrs.push(format!(
        "onChange={{(e) => setValue({}, Array.from(e.target.selectedOptions, (option) => option.value))}}",
        id
    ));

    open_field(field, w);
    w.line(label_line(field, ctx));
    w.open(format!("<select {}>", attrs.join(" ")));
    for option in &field.options {
        w.line(format!(
            "<option value={{{}}}>{{{}}}</option>",
            js(&option.value),
            js(&option.label)
        ));
    }
    w.close("</select>");
    close_field(field, w);
}

fn render_radio(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let id = js(&field.id);
    open_field(field, w);
    w.line(group_title(field, ctx));
    for option in &field.options {
        let value = js(&option.value);
        let mut attrs = vec![
            "type=\"radio\"".to_string(),
            format!("name={{{}}}", id),
            format!("value={{{}}}", value),
            format!("checked={{values[{}] === {}}}", id, value),
            format!("onChange={{() => setValue({}, {})}}", id, value),
        ];
        if field.required {
            attrs.push("required".into());
        }
        if field.disabled {
            attrs.push("disabled".into());
        }
        w.open("<label className=\"form-check\">");
        w.line(format!("<input {} />", attrs.join(" ")));
        w.line(format!("<span>{{{}}}</span>", js(&option.label)));
        w.close("</label>");
    }
    close_field(field, w);
}

fn render_checkbox(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let id = js(&field.id);
    open_field(field, w);
    if field.options.is_empty() {
        let mut attrs = vec!["type=\"checkbox\"".to_string()];
        attrs.extend(base_attrs(field));
        attrs.push(format!("checked={{values[{}] === true}}", id));
        attrs.push(format!("onChange={{(e) => setValue({}, e.target.checked)}}", id));
        w.open("<label className=\"form-check\">");
        w.line(format!("<input {} />", attrs.join(" ")));
        w.line(format!("<span>{{{}}}{}</span>", js(&field.label), asterisk(field, ctx)));
        w.close("</label>");
    } else {
        w.line(group_title(field, ctx));
        for option in &field.options {
            let value = js(&option.value);
            let mut attrs = vec![
                "type=\"checkbox\"".to_string(),
                format!("name={{{}}}", id),
                format!("value={{{}}}", value),
                format!("checked={{hasValue({}, {})}}", id, value),
                format!("onChange={{() => toggleValue({}, {})}}", id, value),
            ];
            if field.disabled {
                attrs.push("disabled".into());
            }
            w.open("<label className=\"form-check\">");
            w.line(format!("<input {} />", attrs.join(" ")));
            w.line(format!("<span>{{{}}}</span>", js(&option.label)));
            w.close("</label>");
        }
    }
    close_field(field, w);
}

fn render_file(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let id = js(&field.id);
    let mut attrs = vec!["type=\"file\"".to_string()];
    attrs.extend(base_attrs(field));
    attrs.push(format!(
        "onChange={{(e) => setValue({}, e.target.files && e.target.files.length > 0 ? e.target.files[0].name : '')}}",
        id
    ));

    open_field(field, w);
    w.line(label_line(field, ctx));
    w.line(format!("<input {} />", attrs.join(" ")));
    close_field(field, w);
}

fn render_hidden(field: &Field, _ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let id = js(&field.id);
    w.line(format!(
        "<input type=\"hidden\" name={{{}}} value={{toText(values[{}])}} />",
        id, id
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::enums::{LogicAction, Operator};
    use formsmith_core::field::FieldBuilder;

    fn contact_fields() -> Vec<Field> {
        vec![
            FieldBuilder::new(FieldType::Select, "country")
                .label("Country")
                .option("United States", "us")
                .option("Other", "other")
                .build(),
            FieldBuilder::new(FieldType::Text, "other_country")
                .label("Which country?")
                .required(true)
                .rule("country", Operator::Equals, "other")
                .action(LogicAction::Show)
                .build(),
        ]
    }

    fn render(fields: &[Field], dialect: Dialect) -> String {
        let options = FormOptions::default();
        generate(&ExportRequest::new("Contact", fields, &options), dialect).unwrap()
    }

    #[test]
    fn jsx_component_shape() {
        let out = render(&contact_fields(), Dialect::Jsx);
        assert!(out.starts_with("import React, { useState } from 'react';\n"));
        assert!(out.contains("function evaluateCondition(rule, values) {"));
        assert!(out.contains("export default function ContactForm() {"));
        assert!(out.contains("const [values, setValues] = useState(initialValues);"));
        assert!(!out.contains("currentStep"));
        assert!(!out.contains(": string"));
    }

    #[test]
    fn logic_is_live() {
        let out = render(&contact_fields(), Dialect::Jsx);
        assert!(out.contains(
            r#"const conditionalLogic = {"other_country":{"rules":[{"field":"country","operator":"equals","value":"other"}],"combinator":"AND","action":"show"}};"#
        ));
        assert!(out.contains(r#"{isVisible("other_country") && ("#));
        assert!(!out.contains(r#"{isVisible("country")"#));
    }

    #[test]
    fn tsx_adds_types() {
        let out = render(&contact_fields(), Dialect::Tsx);
        assert!(out.contains("type FormValues = Record<string, FormValue | undefined>;"));
        assert!(out.contains("const conditionalLogic: Record<string, ConditionalLogic> = "));
        assert!(out.contains("useState<FormValues>(initialValues)"));
        assert!(out.contains("const handleSubmit = (event: React.FormEvent<HTMLFormElement>) => {"));
    }

    #[test]
    fn controls_and_constraints() {
        let fields = vec![
            FieldBuilder::new(FieldType::Phone, "phone")
                .label("Phone")
                .required(true)
                .max_length(20)
                .pattern("[0-9 +]+")
                .build(),
            FieldBuilder::new(FieldType::Range, "level").min(0.0).max(10.0).step(0.5).build(),
        ];
        let out = render(&fields, Dialect::Jsx);
        assert!(out.contains(
            r#"<input type="tel" id={"phone"} name={"phone"} required value={toText(values["phone"])} onChange={(e) => setValue("phone", e.target.value)} maxLength={20} pattern={"[0-9 +]+"} />"#
        ));
        assert!(out.contains("min={0} max={10} step={0.5}"));
        assert!(out.contains(r#"{"Phone"} <span className="form-required">*</span>"#));
    }

    #[test]
    fn choice_controls() {
        let fields = vec![
            FieldBuilder::new(FieldType::Checkbox, "topics")
                .option("News", "news")
                .option("Offers", "offers")
                .default_value("news")
                .build(),
            FieldBuilder::new(FieldType::Checkbox, "agree").default_value("true").build(),
            FieldBuilder::new(FieldType::Radio, "size").option("Small", "s").build(),
        ];
        let out = render(&fields, Dialect::Jsx);
        assert!(out.contains(r#"checked={hasValue("topics", "news")} onChange={() => toggleValue("topics", "news")}"#));
        assert!(out.contains(r#"checked={values["agree"] === true}"#));
        assert!(out.contains(r#"checked={values["size"] === "s"} onChange={() => setValue("size", "s")}"#));
        assert!(out.contains(r#"const initialValues = {"agree":true,"topics":["news"]};"#));
    }

    #[test]
    fn wizard_navigation() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "a").build(),
            FieldBuilder::new(FieldType::PageBreak, "pb").label("Second").build(),
            FieldBuilder::new(FieldType::Text, "b").build(),
        ];
        let out = render(&fields, Dialect::Jsx);
        assert!(out.contains("const STEP_COUNT = 2;"));
        assert!(out.contains("{currentStep === 0 && ("));
        assert!(out.contains("{currentStep === 1 && ("));
        assert!(out.contains(r#"<legend>{"Second"}</legend>"#));
        assert!(out.contains("setCurrentStep(currentStep + 1)"));
        assert!(out.contains("form-progress-bar"));
    }

    #[test]
    fn string_content_is_escaped() {
        let fields = vec![
            FieldBuilder::new(FieldType::Text, "x")
                .label("\"}</label><script>alert(1)</script>{\"")
                .build(),
        ];
        let out = render(&fields, Dialect::Jsx);
        assert!(!out.contains("<script>"));
        assert!(out.contains(r#"{"\"}\u003c/label>\u003cscript>alert(1)\u003c/script>{\""}"#));
    }

    #[test]
    fn indent_width_is_respected() {
        let fields = vec![FieldBuilder::new(FieldType::Text, "a").build()];
        let options = FormOptions::default();
        let mut request = ExportRequest::new("F", &fields, &options);
        request.settings.indent = 4;
        let out = generate(&request, Dialect::Jsx).unwrap();
        assert!(out.contains("\n    const [values, setValues]"));
        assert!(out.contains("\n    if (value === undefined || value === null) return '';"));
    }
}
