//! Markup export: a standalone HTML document styled for a CSS framework.
//!
//! Static markup cannot execute rules, so conditional logic travels as an
//! inert `data-conditional-logic` attribute for a runtime script to pick up.
//! Wizard forms carry a small inline script that moves between steps.

use formsmith_core::enums::{CssFramework, ExportFormat, FieldType};
use formsmith_core::field::Field;
use formsmith_core::options::FormOptions;
use formsmith_core::values::format_number;
use formsmith_logic::partition;

use crate::escape::{html as esc, js_json, slug};
use crate::table::RendererTable;
use crate::writer::CodeWriter;
use crate::{ExportRequest, usable_fields};

/// Class names for one framework.
#[derive(Debug, Clone, Copy)]
struct Classes {
    container: &'static str,
    form: &'static str,
    group: &'static str,
    label: &'static str,
    input: &'static str,
    select: &'static str,
    check: &'static str,
    check_input: &'static str,
    check_label: &'static str,
    help: &'static str,
    step: &'static str,
    button: &'static str,
    button_secondary: &'static str,
    stylesheet: Option<&'static str>,
    script: Option<&'static str>,
}

const BOOTSTRAP: Classes = Classes {
    container: "container my-5",
    form: "needs-validation",
    group: "mb-3",
    label: "form-label",
    input: "form-control",
    select: "form-select",
    check: "form-check",
    check_input: "form-check-input",
    check_label: "form-check-label",
    help: "form-text",
    step: "form-step mb-4",
    button: "btn btn-primary",
    button_secondary: "btn btn-outline-secondary me-2",
    stylesheet: Some("https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css"),
    script: None,
};

const TAILWIND: Classes = Classes {
    container: "max-w-2xl mx-auto my-10 px-4",
    form: "space-y-6",
    group: "mb-4",
    label: "block text-sm font-medium mb-1",
    input: "block w-full rounded-md border px-3 py-2",
    select: "block w-full rounded-md border px-3 py-2",
    check: "flex items-center gap-2",
    check_input: "h-4 w-4",
    check_label: "text-sm",
    help: "mt-1 text-sm opacity-75",
    step: "form-step space-y-4",
    button: "rounded-md px-4 py-2 font-medium text-white",
    button_secondary: "rounded-md border px-4 py-2 mr-2",
    stylesheet: None,
    script: Some("https://cdn.tailwindcss.com"),
};

const PLAIN: Classes = Classes {
    container: "form-container",
    form: "form",
    group: "form-group",
    label: "form-label",
    input: "form-input",
    select: "form-select",
    check: "form-check",
    check_input: "form-check-input",
    check_label: "form-check-label",
    help: "form-help",
    step: "form-step",
    button: "form-submit",
    button_secondary: "form-button",
    stylesheet: None,
    script: None,
};

fn classes_for(framework: CssFramework) -> &'static Classes {
    match framework {
        CssFramework::Bootstrap => &BOOTSTRAP,
        CssFramework::Tailwind => &TAILWIND,
        CssFramework::Plain => &PLAIN,
    }
}

/// `type` attribute of `<input>` controls. Unmapped types render as `text`.
pub(crate) fn input_types() -> RendererTable<&'static str> {
    RendererTable::new("text")
        .register(&[FieldType::Text], "text")
        .register(&[FieldType::Email], "email")
        .register(&[FieldType::Number, FieldType::Rating], "number")
        .register(&[FieldType::Phone], "tel")
        .register(&[FieldType::Url], "url")
        .register(&[FieldType::Password], "password")
        .register(&[FieldType::Date], "date")
        .register(&[FieldType::Time], "time")
        .register(&[FieldType::Datetime], "datetime-local")
        .register(&[FieldType::File], "file")
        .register(&[FieldType::Range, FieldType::Scale], "range")
        .register(&[FieldType::Color], "color")
        .register(&[FieldType::Hidden], "hidden")
}

struct Ctx<'a> {
    classes: &'static Classes,
    options: &'a FormOptions,
    input_types: RendererTable<&'static str>,
}

type Render = fn(&Field, &Ctx<'_>, &mut CodeWriter);

fn renderers() -> RendererTable<Render> {
    RendererTable::new(render_input as Render)
        .register(&[FieldType::Textarea, FieldType::Paragraph], render_textarea)
        .register(
            &[FieldType::Select, FieldType::Multiselect, FieldType::Country],
            render_select,
        )
        .register(&[FieldType::Radio], render_choices)
        .register(&[FieldType::Checkbox], render_checkbox)
        .register(&[FieldType::Hidden], render_hidden)
}

pub fn generate(request: &ExportRequest<'_>) -> String {
    let usable = usable_fields(ExportFormat::CssFramework, request.fields);
    let layout = partition(&usable);
    // Colours land unquoted inside <style>; anything but a hex colour is
    // replaced by its default.
    let opts = &request.options.sanitized();
    let ctx = Ctx {
        classes: classes_for(request.settings.framework),
        options: opts,
        input_types: input_types(),
    };
    let table = renderers();
    let form_id = slug(request.name);

    let mut w = CodeWriter::new(request.settings.indent);
    w.line("<!DOCTYPE html>");
    w.open("<html lang=\"en\">");
    w.open("<head>");
    w.line("<meta charset=\"UTF-8\">");
    w.line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    w.line(format!("<title>{}</title>", esc(request.name)));
    if let Some(href) = ctx.classes.stylesheet {
        w.line(format!("<link rel=\"stylesheet\" href=\"{}\">", href));
    }
    if let Some(src) = ctx.classes.script {
        w.line(format!("<script src=\"{}\"></script>", src));
    }
    write_style(&mut w, opts);
    w.close("</head>");
    w.open("<body>");
    w.open(format!("<div class=\"{}\">", ctx.classes.container));
    w.open(format!(
        "<form id=\"{}\" class=\"{} formsmith-form\" data-wizard=\"{}\">",
        form_id, ctx.classes.form, layout.is_wizard
    ));
    w.line(format!("<h2>{}</h2>", esc(request.name)));
    if !opts.description.is_empty() {
        w.line(format!("<p class=\"form-description\">{}</p>", esc(&opts.description)));
    }

    if layout.is_wizard && opts.show_progress_bar {
        w.open(format!(
            "<div class=\"form-progress\" data-steps=\"{}\">",
            layout.steps.len()
        ));
        w.line(format!(
            "<div class=\"form-progress-bar\" style=\"width: {}%\"></div>",
            format_number(100.0 / layout.steps.len() as f64)
        ));
        w.close("</div>");
    }

    for (index, step) in layout.steps.iter().enumerate() {
        if layout.is_wizard {
            let hidden = if index == 0 { "" } else { " hidden" };
            w.open(format!(
                "<fieldset class=\"{}\" data-step=\"{}\"{}>",
                ctx.classes.step,
                esc(&step.id),
                hidden
            ));
            w.line(format!("<legend>{}</legend>", esc(&step.title)));
            if !step.description.is_empty() {
                w.line(format!(
                    "<p class=\"form-step-description\">{}</p>",
                    esc(&step.description)
                ));
            }
        }
        for field in step.fields.iter().copied() {
            let render = table.get(&field.field_type);
            render(field, &ctx, &mut w);
        }
        if layout.is_wizard {
            write_step_nav(&mut w, &ctx, index, layout.steps.len());
            w.close("</fieldset>");
        }
    }

    if !layout.is_wizard {
        w.line(format!(
            "<button type=\"submit\" class=\"{}\">{}</button>",
            ctx.classes.button,
            esc(&opts.submit_button_text)
        ));
    }
    w.line(format!(
        "<div class=\"form-success\" hidden>{}</div>",
        esc(&opts.success_message)
    ));
    if layout.is_wizard {
        w.open("<script>");
        w.block(STEP_SCRIPT);
        w.close("</script>");
    }
    w.close("</form>");
    w.close("</div>");
    w.close("</body>");
    w.close("</html>");
    w.finish()
}

/// Step navigation for wizard forms. The script sits inside the form so it
/// finds its own fieldsets without relying on the form id.
const STEP_SCRIPT: &str = r#"
(function () {
  var form = document.currentScript.parentElement;
  var steps = form.querySelectorAll("fieldset[data-step]");
  var bar = form.querySelector(".form-progress-bar");
  var current = 0;
  function show(index) {
    steps.forEach(function (step, i) {
      step.hidden = i !== index;
    });
    current = index;
    if (bar) {
      bar.style.width = ((index + 1) / steps.length) * 100 + "%";
    }
  }
  form.addEventListener("click", function (event) {
    var action = event.target.getAttribute("data-action");
    if (action === "next") {
      var controls = steps[current].querySelectorAll("input, select, textarea");
      for (var i = 0; i < controls.length; i++) {
        if (!controls[i].reportValidity()) {
          return;
        }
      }
      show(current + 1);
    } else if (action === "previous") {
      show(current - 1);
    }
  });
})();
"#;

fn write_style(w: &mut CodeWriter, opts: &FormOptions) {
    w.open("<style>");
    w.open(".formsmith-form {");
    w.line(format!("--fs-primary: {};", opts.primary_color));
    w.line(format!("--fs-background: {};", opts.background_color));
    w.line(format!("--fs-text: {};", opts.text_color));
    w.line(format!("--fs-border: {};", opts.border_color));
    w.line(format!("--fs-error: {};", opts.error_color));
    w.line("background-color: var(--fs-background);");
    w.line("color: var(--fs-text);");
    w.close("}");
    w.line(".formsmith-form input, .formsmith-form select, .formsmith-form textarea { border-color: var(--fs-border); }");
    w.line(".formsmith-form button[type=\"submit\"], .formsmith-form .form-progress-bar { background-color: var(--fs-primary); }");
    w.line(".formsmith-form .form-required, .formsmith-form .form-error { color: var(--fs-error); }");
    w.line(".formsmith-form .form-progress { height: 4px; background-color: var(--fs-border); margin-bottom: 1rem; }");
    w.line(".formsmith-form .form-progress-bar { height: 100%; }");
    w.close("</style>");
}

fn write_step_nav(w: &mut CodeWriter, ctx: &Ctx<'_>, index: usize, count: usize) {
    let opts = ctx.options;
    w.open("<div class=\"form-navigation\">");
    if index > 0 {
        w.line(format!(
            "<button type=\"button\" class=\"{}\" data-action=\"previous\">{}</button>",
            ctx.classes.button_secondary,
            esc(&opts.previous_button_text)
        ));
    }
    if index + 1 < count {
        w.line(format!(
            "<button type=\"button\" class=\"{}\" data-action=\"next\">{}</button>",
            ctx.classes.button,
            esc(&opts.next_button_text)
        ));
    } else {
        w.line(format!(
            "<button type=\"submit\" class=\"{}\">{}</button>",
            ctx.classes.button,
            esc(&opts.submit_button_text)
        ));
    }
    w.close("</div>");
}

// -- Field renderers ---------------------------------------------------------

fn logic_attr(field: &Field) -> String {
    field
        .active_logic()
        .and_then(|logic| js_json(logic).ok())
        .map(|json| format!(" data-conditional-logic=\"{}\"", esc(&json)))
        .unwrap_or_default()
}

fn open_group(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let mut class = ctx.classes.group.to_string();
    for extra in [&field.width, &field.custom_class] {
        if !extra.is_empty() {
            class.push(' ');
            class.push_str(extra);
        }
    }
    w.open(format!(
        "<div class=\"{}\" data-field-id=\"{}\"{}>",
        esc(&class),
        esc(&field.id),
        logic_attr(field)
    ));
}

fn close_group(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    if !field.help_text.is_empty() {
        w.line(format!(
            "<div id=\"{}-help\" class=\"{}\">{}</div>",
            esc(&field.id),
            ctx.classes.help,
            esc(&field.help_text)
        ));
    }
    w.close("</div>");
}

fn label_line(field: &Field, ctx: &Ctx<'_>) -> String {
    let class = if field.hide_label {
        format!("{} visually-hidden", ctx.classes.label)
    } else {
        ctx.classes.label.to_string()
    };
    format!(
        "<label for=\"{}\" class=\"{}\">{}{}</label>",
        esc(&field.id),
        class,
        esc(&field.label),
        asterisk(field, ctx)
    )
}

fn asterisk(field: &Field, ctx: &Ctx<'_>) -> &'static str {
    if field.required && ctx.options.show_required_asterisk {
        " <span class=\"form-required\">*</span>"
    } else {
        ""
    }
}

/// Attributes shared by every value control.
fn common_attrs(field: &Field) -> String {
    let mut attrs = format!(" id=\"{}\" name=\"{}\"", esc(&field.id), esc(&field.id));
    if field.required {
        attrs.push_str(" required");
    }
    if field.disabled {
        attrs.push_str(" disabled");
    }
    if !field.help_text.is_empty() {
        attrs.push_str(&format!(" aria-describedby=\"{}-help\"", esc(&field.id)));
    }
    attrs
}

/// Native validation attributes for the constraints this control supports.
fn constraint_attrs(field: &Field) -> String {
    let mut attrs = String::new();
    if let Some(n) = field.min_length {
        attrs.push_str(&format!(" minlength=\"{}\"", n));
    }
    if let Some(n) = field.max_length {
        attrs.push_str(&format!(" maxlength=\"{}\"", n));
    }
    if let Some(ref p) = field.pattern {
        attrs.push_str(&format!(" pattern=\"{}\"", esc(p)));
    }
    if let Some(n) = field.min {
        attrs.push_str(&format!(" min=\"{}\"", format_number(n)));
    }
    if let Some(n) = field.max {
        attrs.push_str(&format!(" max=\"{}\"", format_number(n)));
    }
    if let Some(n) = field.step {
        attrs.push_str(&format!(" step=\"{}\"", format_number(n)));
    }
    attrs
}

fn render_input(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let input_type = ctx.input_types.get(&field.field_type);
    let mut attrs = common_attrs(field);
    if !field.placeholder.is_empty() {
        attrs.push_str(&format!(" placeholder=\"{}\"", esc(&field.placeholder)));
    }
    if !field.default_value.is_empty() && input_type != "file" {
        attrs.push_str(&format!(" value=\"{}\"", esc(&field.default_value)));
    }
    attrs.push_str(&constraint_attrs(field));
    let class = if input_type == "range" { "form-range" } else { ctx.classes.input };

    open_group(field, ctx, w);
    w.line(label_line(field, ctx));
    w.line(format!(
        "<input type=\"{}\" class=\"{}\"{}>",
        input_type, class, attrs
    ));
    close_group(field, ctx, w);
}

fn render_textarea(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let mut attrs = common_attrs(field);
    if !field.placeholder.is_empty() {
        attrs.push_str(&format!(" placeholder=\"{}\"", esc(&field.placeholder)));
    }
    attrs.push_str(&constraint_attrs(field));

    open_group(field, ctx, w);
    w.line(label_line(field, ctx));
    w.line(format!(
        "<textarea class=\"{}\" rows=\"4\"{}>{}</textarea>",
        ctx.classes.input,
        attrs,
        esc(&field.default_value)
    ));
    close_group(field, ctx, w);
}

fn render_select(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    if field.options.is_empty() {
        return render_input(field, ctx, w);
    }
    let multiple = field.field_type == FieldType::Multiselect;
    let defaults: Vec<&str> = field.default_value.split(',').map(str::trim).collect();

    open_group(field, ctx, w);
    w.line(label_line(field, ctx));
    w.open(format!(
        "<select class=\"{}\"{}{}>",
        ctx.classes.select,
        common_attrs(field),
        if multiple { " multiple" } else { "" }
    ));
    if !multiple {
        let prompt = if field.placeholder.is_empty() {
            "Select an option"
        } else {
            field.placeholder.as_str()
        };
        w.line(format!("<option value=\"\">{}</option>", esc(prompt)));
    }
    for option in &field.options {
        let selected = if defaults.contains(&option.value.as_str()) { " selected" } else { "" };
        w.line(format!(
            "<option value=\"{}\"{}>{}</option>",
            esc(&option.value),
            selected,
            esc(&option.label)
        ));
    }
    w.close("</select>");
    close_group(field, ctx, w);
}

fn render_choices(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    let input_type = if field.field_type == FieldType::Radio { "radio" } else { "checkbox" };
    let defaults: Vec<&str> = field.default_value.split(',').map(str::trim).collect();

    open_group(field, ctx, w);
    w.line(format!(
        "<span class=\"{}\">{}{}</span>",
        ctx.classes.label,
        esc(&field.label),
        asterisk(field, ctx)
    ));
    for (index, option) in field.options.iter().enumerate() {
        let option_id = format!("{}-{}", field.id, index);
        let checked = if defaults.contains(&option.value.as_str()) { " checked" } else { "" };
        let required = if field.required && input_type == "radio" { " required" } else { "" };
        let disabled = if field.disabled { " disabled" } else { "" };
        w.open(format!("<div class=\"{}\">", ctx.classes.check));
        w.line(format!(
            "<input type=\"{}\" class=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\"{}{}{}>",
            input_type,
            ctx.classes.check_input,
            esc(&option_id),
            esc(&field.id),
            esc(&option.value),
            checked,
            required,
            disabled
        ));
        w.line(format!(
            "<label class=\"{}\" for=\"{}\">{}</label>",
            ctx.classes.check_label,
            esc(&option_id),
            esc(&option.label)
        ));
        w.close("</div>");
    }
    close_group(field, ctx, w);
}

fn render_checkbox(field: &Field, ctx: &Ctx<'_>, w: &mut CodeWriter) {
    if !field.options.is_empty() {
        return render_choices(field, ctx, w);
    }
    let checked = matches!(field.default_value.as_str(), "true" | "checked" | "1");

    open_group(field, ctx, w);
    w.open(format!("<div class=\"{}\">", ctx.classes.check));
    w.line(format!(
        "<input type=\"checkbox\" class=\"{}\" value=\"true\"{}{}>",
        ctx.classes.check_input,
        common_attrs(field),
        if checked { " checked" } else { "" }
    ));
    w.line(format!(
        "<label class=\"{}\" for=\"{}\">{}{}</label>",
        ctx.classes.check_label,
        esc(&field.id),
        esc(&field.label),
        asterisk(field, ctx)
    ));
    w.close("</div>");
    close_group(field, ctx, w);
}

fn render_hidden(field: &Field, _ctx: &Ctx<'_>, w: &mut CodeWriter) {
    w.line(format!(
        "<input type=\"hidden\" id=\"{}\" name=\"{}\" value=\"{}\"{}>",
        esc(&field.id),
        esc(&field.id),
        esc(&field.default_value),
        logic_attr(field)
    ));
}
