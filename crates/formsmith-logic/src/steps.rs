//! Splitting a field list into wizard steps at page breaks.

use formsmith_core::field::Field;
use serde::Serialize;

/// One screen of a multi-step form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step<'a> {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Never contains a page break.
    pub fields: Vec<&'a Field>,
}

impl<'a> Step<'a> {
    fn numbered(n: usize, title: String, description: String) -> Self {
        Self {
            id: format!("step-{}", n),
            title,
            description,
            fields: Vec::new(),
        }
    }
}

/// Result of [`partition`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partition<'a> {
    pub steps: Vec<Step<'a>>,
    pub is_wizard: bool,
}

impl<'a> Partition<'a> {
    /// Total number of controls across all steps.
    pub fn field_count(&self) -> usize {
        self.steps.iter().map(|s| s.fields.len()).sum()
    }
}

/// Splits `fields` into steps.
///
/// A page break closes the open step (if it holds any field) and opens a
/// new one titled by the break's label, or `Step N` when the label is
/// blank. Empty steps are never emitted. A non-empty list that produces no
/// step at all yields one `Form` step with every non-break field.
pub fn partition(fields: &[Field]) -> Partition<'_> {
    let mut steps: Vec<Step<'_>> = Vec::new();
    let mut current = Step::numbered(1, "Step 1".into(), String::new());

    for field in fields {
        if field.is_page_break() {
            if !current.fields.is_empty() {
                steps.push(current);
            }
            let n = steps.len() + 1;
            let title = if field.label.trim().is_empty() {
                format!("Step {}", n)
            } else {
                field.label.clone()
            };
            current = Step::numbered(n, title, field.help_text.clone());
        } else {
            current.fields.push(field);
        }
    }
    if !current.fields.is_empty() {
        steps.push(current);
    }

    if steps.is_empty() && !fields.is_empty() {
        let mut single = Step::numbered(1, "Form".into(), String::new());
        single.fields = fields.iter().filter(|f| !f.is_page_break()).collect();
        steps.push(single);
    }

    let is_wizard = steps.len() > 1;
    Partition { steps, is_wizard }
}
