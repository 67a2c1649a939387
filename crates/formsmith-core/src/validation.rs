//! Field validation rules applied at the write boundary.

use crate::enums::FieldType;
use crate::field::Field;
use crate::pattern;
use crate::sanitize::limits;

/// Error type for rejected field writes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("field id is required")]
    IdRequired,

    #[error("field type is required")]
    TypeRequired,

    #[error("field id already exists: {0}")]
    DuplicateId(String),

    #[error("field not found: {0}")]
    FieldNotFound(String),

    #[error("a form holds at most {0} fields")]
    TooManyFields(usize),

    #[error("index {index} is out of range for {len} fields")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{attribute} does not apply to {field_type} fields")]
    NotApplicable {
        attribute: &'static str,
        field_type: String,
    },

    #[error("{attribute} must be at most {max} (got {value})")]
    LengthOutOfRange {
        attribute: &'static str,
        value: u32,
        max: u32,
    },

    #[error("minLength ({min}) cannot exceed maxLength ({max})")]
    LengthOrder { min: u32, max: u32 },

    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("min ({min}) cannot exceed max ({max})")]
    RangeOrder { min: f64, max: f64 },

    #[error("step must be greater than zero (got {0})")]
    InvalidStep(f64),

    #[error("pattern must be {max} characters or less (got {len})")]
    PatternTooLong { len: usize, max: usize },

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("{0} fields need at least one option")]
    MissingOptions(String),

    #[error("a field holds at most {max} options (got {count})")]
    TooManyOptions { count: usize, max: usize },

    #[error("conditional rule {index} has no field reference")]
    RuleWithoutField { index: usize },

    #[error("conditional rule {index} refers to its own field")]
    SelfReference { index: usize },

    #[error("conditional rule {index} has an invalid pattern: {reason}")]
    InvalidRulePattern { index: usize, reason: String },
}

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validates every attribute of a field that has a write rule.
pub fn validate_field(field: &Field) -> Result<()> {
    if field.id.trim().is_empty() {
        return Err(ValidationError::IdRequired);
    }
    if field.field_type.as_str().is_empty() {
        return Err(ValidationError::TypeRequired);
    }
    validate_options(field)?;
    validate_lengths(field)?;
    validate_range(field)?;
    validate_pattern(field)?;
    validate_rules(field)?;
    Ok(())
}

fn validate_options(field: &Field) -> Result<()> {
    if field.field_type.requires_options() && field.options.is_empty() {
        return Err(ValidationError::MissingOptions(
            field.field_type.as_str().to_owned(),
        ));
    }
    if field.options.len() > limits::MAX_OPTIONS {
        return Err(ValidationError::TooManyOptions {
            count: field.options.len(),
            max: limits::MAX_OPTIONS,
        });
    }
    Ok(())
}

fn validate_lengths(field: &Field) -> Result<()> {
    for (attribute, value) in [("minLength", field.min_length), ("maxLength", field.max_length)] {
        let Some(value) = value else { continue };
        require_applicable(attribute, &field.field_type, FieldType::is_text_like)?;
        if value > limits::MAX_TEXT_LENGTH {
            return Err(ValidationError::LengthOutOfRange {
                attribute,
                value,
                max: limits::MAX_TEXT_LENGTH,
            });
        }
    }
    if let (Some(min), Some(max)) = (field.min_length, field.max_length) {
        if min > max {
            return Err(ValidationError::LengthOrder { min, max });
        }
    }
    Ok(())
}

fn validate_range(field: &Field) -> Result<()> {
    for (attribute, value) in [("min", field.min), ("max", field.max), ("step", field.step)] {
        let Some(value) = value else { continue };
        require_applicable(attribute, &field.field_type, FieldType::is_numeric)?;
        if !value.is_finite() {
            return Err(ValidationError::NotFinite(attribute));
        }
    }
    if let (Some(min), Some(max)) = (field.min, field.max) {
        if min > max {
            return Err(ValidationError::RangeOrder { min, max });
        }
    }
    if let Some(step) = field.step {
        if step <= 0.0 {
            return Err(ValidationError::InvalidStep(step));
        }
    }
    Ok(())
}

fn validate_pattern(field: &Field) -> Result<()> {
    let Some(ref pattern) = field.pattern else {
        return Ok(());
    };
    require_applicable("pattern", &field.field_type, FieldType::is_text_like)?;
    let len = pattern.chars().count();
    if len > limits::PATTERN {
        return Err(ValidationError::PatternTooLong {
            len,
            max: limits::PATTERN,
        });
    }
    pattern::compile(pattern).map_err(|e| ValidationError::InvalidPattern(e.to_string()))?;
    Ok(())
}

fn validate_rules(field: &Field) -> Result<()> {
    let Some(ref logic) = field.conditional_logic else {
        return Ok(());
    };
    for (index, rule) in logic.rules.iter().enumerate() {
        if rule.field.trim().is_empty() {
            return Err(ValidationError::RuleWithoutField { index });
        }
        if rule.field == field.id {
            return Err(ValidationError::SelfReference { index });
        }
        if rule.operator == crate::enums::Operator::Matches {
            pattern::compile(&rule.value).map_err(|e| ValidationError::InvalidRulePattern {
                index,
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}

fn require_applicable(
    attribute: &'static str,
    field_type: &FieldType,
    applies: fn(&FieldType) -> bool,
) -> Result<()> {
    if applies(field_type) {
        Ok(())
    } else {
        Err(ValidationError::NotApplicable {
            attribute,
            field_type: field_type.as_str().to_owned(),
        })
    }
}
