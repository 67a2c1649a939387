//! `formsmith preview` -- evaluate conditional logic against a set of values.

use anyhow::Result;
use formsmith_core::field::Field;
use formsmith_logic::is_visible;
use formsmith_ui::styles::{render_field_compact, render_muted};
use serde::Serialize;

use crate::cli::PreviewArgs;
use crate::context::{RuntimeContext, load_values_opt};
use crate::output::output_json;

#[derive(Serialize)]
struct FieldVisibility<'a> {
    id: &'a str,
    #[serde(rename = "type")]
    field_type: &'a str,
    label: &'a str,
    visible: bool,
}

/// Execute the `formsmith preview` command.
pub fn run(ctx: &RuntimeContext, args: &PreviewArgs) -> Result<()> {
    let mut session = ctx.open_form(&args.file)?;
    for (id, value) in load_values_opt(args.values.as_deref())?.iter() {
        session.set_value(id, value.clone());
    }

    let all: Vec<(bool, &Field)> = session
        .fields()
        .iter()
        .filter(|f| !f.is_page_break())
        .map(|f| (is_visible(f, session.values()), f))
        .collect();
    let total = all.len();
    let visible = all.iter().filter(|(v, _)| *v).count();
    let rows: Vec<(bool, &Field)> = all
        .into_iter()
        .filter(|(v, _)| *v || !args.visible_only)
        .collect();

    if ctx.json {
        let fields: Vec<FieldVisibility<'_>> = rows
            .iter()
            .map(|(visible, f)| FieldVisibility {
                id: &f.id,
                field_type: f.field_type.as_str(),
                label: &f.label,
                visible: *visible,
            })
            .collect();
        output_json(&serde_json::json!({
            "name": session.name(),
            "visible": visible,
            "total": total,
            "fields": fields,
        }));
        return Ok(());
    }

    for (visible, field) in &rows {
        println!("{}", render_field_compact(field, *visible));
    }
    if !ctx.quiet {
        println!();
        println!(
            "{}",
            render_muted(&format!("{} of {} fields visible", visible, total))
        );
    }
    Ok(())
}
