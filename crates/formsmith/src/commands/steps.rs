//! `formsmith steps` -- show how a form splits into wizard steps.

use anyhow::Result;
use formsmith_logic::partition;
use formsmith_ui::styles::{TREE_CHILD, TREE_LAST, render_muted, render_step_header};

use crate::cli::StepsArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `formsmith steps` command.
pub fn run(ctx: &RuntimeContext, args: &StepsArgs) -> Result<()> {
    let session = ctx.open_form(&args.file)?;
    let layout = partition(session.fields());

    if ctx.json {
        let steps: Vec<serde_json::Value> = layout
            .steps
            .iter()
            .map(|step| {
                serde_json::json!({
                    "id": step.id,
                    "title": step.title,
                    "description": step.description,
                    "fields": step.fields.iter().map(|f| f.id.as_str()).collect::<Vec<_>>(),
                })
            })
            .collect();
        output_json(&serde_json::json!({
            "isWizard": layout.is_wizard,
            "steps": steps,
        }));
        return Ok(());
    }

    let total = layout.steps.len();
    for (index, step) in layout.steps.iter().enumerate() {
        println!("{}", render_step_header(index, total, &step.title));
        if !step.description.is_empty() {
            println!("   {}", render_muted(&step.description));
        }
        for (i, field) in step.fields.iter().enumerate() {
            let branch = if i + 1 == step.fields.len() {
                TREE_LAST
            } else {
                TREE_CHILD
            };
            println!("   {}{} {}", branch, field.id, render_muted(&field.label));
        }
    }

    if !ctx.quiet {
        if total == 0 {
            println!("{}", render_muted("form has no fields"));
        } else if !layout.is_wizard {
            println!("{}", render_muted("single page form"));
        }
    }
    Ok(())
}
