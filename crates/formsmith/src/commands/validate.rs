//! `formsmith validate` -- check a form's fields and, optionally, a submission.

use std::collections::HashSet;

use anyhow::{Result, bail};
use formsmith_core::document::FormDocument;
use formsmith_core::sanitize::limits;
use formsmith_core::session::FormSession;
use formsmith_core::validation::validate_field;
use formsmith_logic::validate_submission;
use formsmith_ui::styles::{render_fail_icon, render_pass_icon, render_warn_icon};
use serde::Serialize;

use crate::cli::ValidateArgs;
use crate::context::{RuntimeContext, load_values};
use crate::output::output_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Problem {
    field_id: String,
    severity: Severity,
    message: String,
}

/// Write-rule problems in a document: per-field rules, duplicate ids, the
/// field cap, and rules that point at fields the form does not have.
fn check_document(doc: &FormDocument) -> Vec<Problem> {
    let mut problems = Vec::new();
    let ids: HashSet<&str> = doc.fields.iter().map(|f| f.id.as_str()).collect();
    let mut seen = HashSet::new();

    if doc.fields.len() > limits::MAX_FIELDS {
        problems.push(Problem {
            field_id: String::new(),
            severity: Severity::Error,
            message: format!("a form holds at most {} fields", limits::MAX_FIELDS),
        });
    }

    for field in &doc.fields {
        if let Err(e) = validate_field(field) {
            problems.push(Problem {
                field_id: field.id.clone(),
                severity: Severity::Error,
                message: e.to_string(),
            });
        }
        if !field.id.is_empty() && !seen.insert(field.id.as_str()) {
            problems.push(Problem {
                field_id: field.id.clone(),
                severity: Severity::Error,
                message: format!("field id already exists: {}", field.id),
            });
        }
        if let Some(logic) = field.active_logic() {
            for rule in logic.rules.iter().filter(|r| !ids.contains(r.field.as_str())) {
                problems.push(Problem {
                    field_id: field.id.clone(),
                    severity: Severity::Warning,
                    message: format!("condition refers to unknown field '{}'", rule.field),
                });
            }
            for rule in logic.rules.iter().filter(|r| {
                r.operator.is_builtin() && !r.operator.value_optional() && r.value.is_empty()
            }) {
                problems.push(Problem {
                    field_id: field.id.clone(),
                    severity: Severity::Warning,
                    message: format!(
                        "'{}' on '{}' compares against an empty value",
                        rule.operator, rule.field
                    ),
                });
            }
            for rule in logic.rules.iter().filter(|r| !r.operator.is_builtin()) {
                problems.push(Problem {
                    field_id: field.id.clone(),
                    severity: Severity::Warning,
                    message: format!("unknown operator '{}' always matches", rule.operator),
                });
            }
        }
    }
    problems
}

/// Execute the `formsmith validate` command.
pub fn run(ctx: &RuntimeContext, args: &ValidateArgs) -> Result<()> {
    let doc = ctx.load_raw_form(&args.file)?;
    let mut problems = check_document(&doc);

    let submission = match &args.values {
        Some(path) => {
            let values = load_values(path)?;
            let session = FormSession::from_document(doc.clone());
            let refused = validate_submission(session.fields(), &values);
            problems.extend(refused.iter().map(|e| Problem {
                field_id: e.field_id.clone(),
                severity: Severity::Error,
                message: e.to_string(),
            }));
            Some(refused.len())
        }
        None => None,
    };

    let errors = problems
        .iter()
        .filter(|p| p.severity == Severity::Error)
        .count();

    if ctx.json {
        output_json(&serde_json::json!({
            "valid": errors == 0,
            "fields": doc.fields.len(),
            "problems": problems,
            "submissionErrors": submission,
        }));
    } else {
        for p in &problems {
            let icon = match p.severity {
                Severity::Error => render_fail_icon(),
                Severity::Warning => render_warn_icon(),
            };
            if p.field_id.is_empty() {
                println!("{} {}", icon, p.message);
            } else {
                println!("{} {}: {}", icon, p.field_id, p.message);
            }
        }
        if errors == 0 && !ctx.quiet {
            println!("{} {} is valid", render_pass_icon(), args.file.display());
        }
    }

    if errors > 0 {
        bail!("{} problem(s) found in {}", errors, args.file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith_core::enums::{FieldType, Operator};
    use formsmith_core::field::FieldBuilder;
    use formsmith_core::options::FormOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn clean_document_has_no_problems() {
        let doc = FormDocument::new(
            "F",
            vec![
                FieldBuilder::new(FieldType::Text, "name").label("Name").build(),
                FieldBuilder::new(FieldType::Text, "nick")
                    .rule("name", Operator::IsNotEmpty, "")
                    .build(),
            ],
            FormOptions::default(),
        );
        assert!(check_document(&doc).is_empty());
    }

    #[test]
    fn duplicates_and_dangling_rules_are_reported() {
        let doc = FormDocument::new(
            "F",
            vec![
                FieldBuilder::new(FieldType::Text, "a").build(),
                FieldBuilder::new(FieldType::Text, "a").build(),
                FieldBuilder::new(FieldType::Text, "b")
                    .rule("missing", Operator::Equals, "x")
                    .rule("a", Operator::Custom("near".into()), "x")
                    .build(),
            ],
            FormOptions::default(),
        );
        let problems = check_document(&doc);
        assert_eq!(problems.len(), 3);
        assert_eq!(problems[0].severity, Severity::Error);
        assert!(problems[1].message.contains("missing"));
        assert!(problems[2].message.contains("near"));
        assert_eq!(problems[2].severity, Severity::Warning);
    }

    #[test]
    fn comparison_without_value_is_a_warning() {
        let doc = FormDocument::new(
            "F",
            vec![
                FieldBuilder::new(FieldType::Text, "a").build(),
                FieldBuilder::new(FieldType::Text, "b")
                    .rule("a", Operator::Equals, "")
                    .rule("a", Operator::IsEmpty, "")
                    .build(),
            ],
            FormOptions::default(),
        );
        let problems = check_document(&doc);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].severity, Severity::Warning);
        assert_eq!(problems[0].message, "'equals' on 'a' compares against an empty value");
    }

    #[test]
    fn broken_write_rules_are_errors() {
        let doc = FormDocument::new(
            "F",
            vec![FieldBuilder::new(FieldType::Select, "plan").build()],
            FormOptions::default(),
        );
        let problems = check_document(&doc);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].field_id, "plan");
        assert_eq!(problems[0].severity, Severity::Error);
    }
}
