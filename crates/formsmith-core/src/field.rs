//! Field struct -- one form control definition.

use serde::{Deserialize, Serialize};

use crate::enums::{Combinator, FieldType, LogicAction, Operator};

/// Helper for `skip_serializing_if` on `bool` fields.
fn is_false(b: &bool) -> bool {
    !b
}

/// A field with no `type` key deserializes to an empty custom type, which
/// [`Field::is_well_formed`] rejects.
fn missing_type() -> FieldType {
    FieldType::Custom(String::new())
}

/// One selectable choice of a select, radio, multiselect or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A single atomic condition on another field's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Id of the field whose value is inspected.
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl Rule {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }
}

/// Field-level visibility policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalLogic {
    #[serde(default)]
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub combinator: Combinator,
    #[serde(default)]
    pub action: LogicAction,
}

impl ConditionalLogic {
    /// Returns `true` if there is nothing to evaluate.
    pub fn is_inert(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Represents one configurable form control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    // ===== Identity =====
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default = "missing_type")]
    pub field_type: FieldType,

    // ===== Display =====
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help_text: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub default_value: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,

    // ===== Presentation =====
    /// Layout width token (`full`, `half`, `third`, ...).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub width: String,

    /// Control size token (`sm`, `md`, `lg`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub size: String,

    #[serde(default, skip_serializing_if = "is_false")]
    pub hide_label: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub disabled: bool,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub custom_class: String,

    // ===== Constraints =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // ===== Logic =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional_logic: Option<ConditionalLogic>,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            id: String::new(),
            field_type: FieldType::default(),
            label: String::new(),
            placeholder: String::new(),
            help_text: String::new(),
            default_value: String::new(),
            required: false,
            options: Vec::new(),
            width: String::new(),
            size: String::new(),
            hide_label: false,
            disabled: false,
            custom_class: String::new(),
            min_length: None,
            max_length: None,
            min: None,
            max: None,
            step: None,
            pattern: None,
            conditional_logic: None,
        }
    }
}

impl Field {
    /// Returns `true` if the field has both an id and a type.
    ///
    /// Generators and the preview skip fields that fail this check.
    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty() && !self.field_type.as_str().is_empty()
    }

    pub fn is_page_break(&self) -> bool {
        self.field_type.is_page_break()
    }

    /// Returns the conditional logic if it has at least one rule.
    pub fn active_logic(&self) -> Option<&ConditionalLogic> {
        self.conditional_logic.as_ref().filter(|l| !l.is_inert())
    }

    /// Returns `true` if any constraint attribute is set.
    pub fn has_constraints(&self) -> bool {
        self.min_length.is_some()
            || self.max_length.is_some()
            || self.min.is_some()
            || self.max.is_some()
            || self.step.is_some()
            || self.pattern.is_some()
    }
}

/// Builder for constructing a [`Field`] with a fluent API.
pub struct FieldBuilder {
    field: Field,
}

impl FieldBuilder {
    /// Creates a new builder for a field of the given type and id.
    pub fn new(field_type: FieldType, id: impl Into<String>) -> Self {
        let field = Field {
            id: id.into(),
            field_type,
            ..Field::default()
        };
        Self { field }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.field.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.field.placeholder = placeholder.into();
        self
    }

    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.field.help_text = help_text.into();
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.field.default_value = value.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    /// Appends one option.
    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.field.options.push(FieldOption::new(label, value));
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.field.options = options;
        self
    }

    pub fn width(mut self, width: impl Into<String>) -> Self {
        self.field.width = width.into();
        self
    }

    pub fn custom_class(mut self, class: impl Into<String>) -> Self {
        self.field.custom_class = class.into();
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.field.disabled = disabled;
        self
    }

    pub fn hide_label(mut self, hide: bool) -> Self {
        self.field.hide_label = hide;
        self
    }

    pub fn min_length(mut self, n: u32) -> Self {
        self.field.min_length = Some(n);
        self
    }

    pub fn max_length(mut self, n: u32) -> Self {
        self.field.max_length = Some(n);
        self
    }

    pub fn min(mut self, n: f64) -> Self {
        self.field.min = Some(n);
        self
    }

    pub fn max(mut self, n: f64) -> Self {
        self.field.max = Some(n);
        self
    }

    pub fn step(mut self, n: f64) -> Self {
        self.field.step = Some(n);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.field.pattern = Some(pattern.into());
        self
    }

    pub fn logic(mut self, logic: ConditionalLogic) -> Self {
        self.field.conditional_logic = Some(logic);
        self
    }

    /// Adds a rule, creating a default (`AND`, `show`) logic block if needed.
    pub fn rule(mut self, field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        self.field
            .conditional_logic
            .get_or_insert_with(ConditionalLogic::default)
            .rules
            .push(Rule::new(field, operator, value));
        self
    }

    pub fn combinator(mut self, combinator: Combinator) -> Self {
        self.field
            .conditional_logic
            .get_or_insert_with(ConditionalLogic::default)
            .combinator = combinator;
        self
    }

    pub fn action(mut self, action: LogicAction) -> Self {
        self.field
            .conditional_logic
            .get_or_insert_with(ConditionalLogic::default)
            .action = action;
        self
    }

    /// Consumes the builder and returns the constructed [`Field`].
    pub fn build(self) -> Field {
        self.field
    }
}
