//! Submission checks against entered values.
//!
//! Hidden fields are never checked, so a required field that conditional
//! logic has hidden does not block submission.

use formsmith_core::field::Field;
use formsmith_core::pattern;
use formsmith_core::values::{FormValue, FormValues, format_number};

use crate::condition::to_number;
use crate::visibility::is_visible;

/// Why a submitted value was refused.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Violation {
    #[error("is required")]
    Required,

    #[error("must be at least {0} characters")]
    TooShort(u32),

    #[error("must be at most {0} characters")]
    TooLong(u32),

    #[error("must be a number")]
    NotANumber,

    #[error("must be at least {}", number(.0))]
    BelowMin(f64),

    #[error("must be at most {}", number(.0))]
    AboveMax(f64),

    #[error("does not match the required format")]
    PatternMismatch,
}

fn number(n: &f64) -> String {
    format_number(*n)
}

/// A refused value on one field.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{label} {violation}")]
pub struct FieldError {
    pub field_id: String,
    pub label: String,
    pub violation: Violation,
}

/// Checks every visible field's value and returns the refusals in field
/// order. An empty result means the submission is acceptable.
pub fn validate_submission(fields: &[Field], values: &FormValues) -> Vec<FieldError> {
    fields
        .iter()
        .filter(|f| f.is_well_formed() && f.field_type.carries_value())
        .filter(|f| is_visible(f, values))
        .filter_map(|f| {
            check_field(f, values.get(&f.id)).map(|violation| FieldError {
                field_id: f.id.clone(),
                label: if f.label.is_empty() { f.id.clone() } else { f.label.clone() },
                violation,
            })
        })
        .collect()
}

fn check_field(field: &Field, value: Option<&FormValue>) -> Option<Violation> {
    let Some(value) = value.filter(|v| !is_blank(v)) else {
        return field.required.then_some(Violation::Required);
    };
    let text = value.to_text();

    if field.field_type.is_text_like() {
        let len = text.chars().count();
        if let Some(min) = field.min_length {
            if len < min as usize {
                return Some(Violation::TooShort(min));
            }
        }
        if let Some(max) = field.max_length {
            if len > max as usize {
                return Some(Violation::TooLong(max));
            }
        }
        if let Some(ref expr) = field.pattern {
            // Whole-value match, as the HTML pattern attribute does.
            if let Ok(re) = pattern::compile(&format!("^(?:{})$", expr)) {
                if let Ok(false) = re.is_match(&text) {
                    return Some(Violation::PatternMismatch);
                }
            }
        }
    }

    if field.field_type.is_numeric() && field.has_constraints() {
        let n = to_number(&text);
        if n.is_nan() {
            return Some(Violation::NotANumber);
        }
        if let Some(min) = field.min {
            if n < min {
                return Some(Violation::BelowMin(min));
            }
        }
        if let Some(max) = field.max {
            if n > max {
                return Some(Violation::AboveMax(max));
            }
        }
    }

    None
}

fn is_blank(value: &FormValue) -> bool {
    match value {
        FormValue::Text(s) => s.trim().is_empty(),
        FormValue::List(items) => items.is_empty(),
        FormValue::Bool(b) => !b,
        FormValue::Number(n) => n.is_nan(),
    }
}
