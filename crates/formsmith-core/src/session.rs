//! The builder session: sole owner of a form's field list and options.
//!
//! Every mutation goes through the write boundary here. A rejected write
//! leaves the previous state untouched, returns the error, and records its
//! message in [`FormSession::last_error`] for the editor to display.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::FormDocument;
use crate::enums::FieldType;
use crate::field::{ConditionalLogic, Field, FieldOption};
use crate::idgen::generate_field_id;
use crate::options::{FormOptions, OptionsPatch};
use crate::sanitize::{clean_class_list, clean_text, limits};
use crate::validation::{Result, ValidationError, validate_field};
use crate::values::{FormValue, FormValues};

/// A partial update to a [`Field`]. The id and type are immutable.
///
/// Constraint keys use `Option<Option<T>>`: `Some(None)` clears the
/// constraint, `None` leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub default_value: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<FieldOption>>,
    pub width: Option<String>,
    pub size: Option<String>,
    pub hide_label: Option<bool>,
    pub disabled: Option<bool>,
    pub custom_class: Option<String>,
    pub min_length: Option<Option<u32>>,
    pub max_length: Option<Option<u32>>,
    pub min: Option<Option<f64>>,
    pub max: Option<Option<f64>>,
    pub step: Option<Option<f64>>,
    pub pattern: Option<Option<String>>,
    pub conditional_logic: Option<Option<ConditionalLogic>>,
}

impl FieldPatch {
    /// Applies the patch to a copy of `field`.
    fn applied_to(&self, field: &Field) -> Field {
        let mut next = field.clone();
        if let Some(ref v) = self.label {
            next.label = v.clone();
        }
        if let Some(ref v) = self.placeholder {
            next.placeholder = v.clone();
        }
        if let Some(ref v) = self.help_text {
            next.help_text = v.clone();
        }
        if let Some(ref v) = self.default_value {
            next.default_value = v.clone();
        }
        if let Some(v) = self.required {
            next.required = v;
        }
        if let Some(ref v) = self.options {
            next.options = v.clone();
        }
        if let Some(ref v) = self.width {
            next.width = v.clone();
        }
        if let Some(ref v) = self.size {
            next.size = v.clone();
        }
        if let Some(v) = self.hide_label {
            next.hide_label = v;
        }
        if let Some(v) = self.disabled {
            next.disabled = v;
        }
        if let Some(ref v) = self.custom_class {
            next.custom_class = v.clone();
        }
        if let Some(v) = self.min_length {
            next.min_length = v;
        }
        if let Some(v) = self.max_length {
            next.max_length = v;
        }
        if let Some(v) = self.min {
            next.min = v;
        }
        if let Some(v) = self.max {
            next.max = v;
        }
        if let Some(v) = self.step {
            next.step = v;
        }
        if let Some(ref v) = self.pattern {
            next.pattern = v.clone();
        }
        if let Some(ref v) = self.conditional_logic {
            next.conditional_logic = v.clone();
        }
        next
    }
}

/// Cleans every display string of a field: tags stripped, lengths capped.
pub fn sanitize_field(field: &mut Field) {
    field.label = clean_text(&field.label, limits::LABEL);
    field.placeholder = clean_text(&field.placeholder, limits::PLACEHOLDER);
    field.help_text = clean_text(&field.help_text, limits::HELP_TEXT);
    field.default_value = clean_text(&field.default_value, limits::DEFAULT_VALUE);
    field.width = clean_class_list(&field.width);
    field.size = clean_class_list(&field.size);
    field.custom_class = clean_class_list(&field.custom_class);
    for option in &mut field.options {
        option.label = clean_text(&option.label, limits::OPTION_TEXT);
        option.value = clean_text(&option.value, limits::OPTION_TEXT);
    }
    if let Some(ref mut logic) = field.conditional_logic {
        for rule in &mut logic.rules {
            rule.value = clean_text(&rule.value, limits::RULE_VALUE);
        }
    }
}

/// The top-level builder session.
#[derive(Debug, Clone)]
pub struct FormSession {
    name: String,
    fields: Vec<Field>,
    options: FormOptions,
    values: FormValues,
    last_error: Option<String>,
    nonce: u64,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new("Untitled Form")
    }
}

impl FormSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: clean_text(&name.into(), limits::FORM_NAME),
            fields: Vec::new(),
            options: FormOptions::default(),
            values: FormValues::new(),
            last_error: None,
            nonce: 0,
        }
    }

    /// Opens a session on an existing document. Fields that fail the write
    /// rules are dropped with a warning.
    pub fn from_document(doc: FormDocument) -> Self {
        let mut session = Self::new(doc.name);
        session.options = doc.options.sanitized();
        for field in doc.fields {
            let id = field.id.clone();
            if let Err(e) = session.insert_field(session.fields.len(), field) {
                warn!(field = %id, error = %e, "dropping invalid field from document");
            }
        }
        session.last_error = None;
        session
    }

    /// Snapshot of the session as a document.
    pub fn to_document(&self) -> FormDocument {
        FormDocument::new(self.name.clone(), self.fields.clone(), self.options.clone())
    }

    // -- Accessors -----------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn options(&self) -> &FormOptions {
        &self.options
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    /// Message of the most recent rejected write, cleared by the next
    /// successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // -- Field list mutations ------------------------------------------------

    /// Appends a new field of the given type with a generated id and
    /// type-appropriate defaults. Returns the new id.
    pub fn add_field(&mut self, field_type: FieldType) -> Result<String> {
        let id = self.fresh_id(&field_type);
        let mut field = Field {
            id: id.clone(),
            label: field_type.default_label(),
            field_type,
            ..Field::default()
        };
        if field.field_type.requires_options() {
            field.options = vec![
                FieldOption::new("Option 1", "option_1"),
                FieldOption::new("Option 2", "option_2"),
            ];
        }
        let index = self.fields.len();
        self.insert_field(index, field)?;
        Ok(id)
    }

    /// Inserts a complete field at `index`.
    pub fn insert_field(&mut self, index: usize, mut field: Field) -> Result<()> {
        let result = (|| {
            if self.fields.len() >= limits::MAX_FIELDS {
                return Err(ValidationError::TooManyFields(limits::MAX_FIELDS));
            }
            if index > self.fields.len() {
                return Err(ValidationError::IndexOutOfRange {
                    index,
                    len: self.fields.len(),
                });
            }
            field.id = field.id.trim().to_owned();
            if self.field(&field.id).is_some() {
                return Err(ValidationError::DuplicateId(field.id.clone()));
            }
            sanitize_field(&mut field);
            validate_field(&field)?;
            Ok(field)
        })();
        let field = self.record(result)?;
        debug!(id = %field.id, field_type = %field.field_type, index, "inserted field");
        self.fields.insert(index, field);
        Ok(())
    }

    /// Applies a patch to the field with the given id.
    pub fn update_field(&mut self, id: &str, patch: &FieldPatch) -> Result<()> {
        let result = match self.fields.iter().position(|f| f.id == id) {
            None => Err(ValidationError::FieldNotFound(id.to_owned())),
            Some(pos) => {
                let mut next = patch.applied_to(&self.fields[pos]);
                sanitize_field(&mut next);
                validate_field(&next).map(|()| (pos, next))
            }
        };
        let (pos, next) = self.record(result)?;
        self.fields[pos] = next;
        Ok(())
    }

    /// Removes a field and its entered value. Rules elsewhere that referred
    /// to it are left in place and evaluate against an absent value.
    pub fn remove_field(&mut self, id: &str) -> Result<Field> {
        let result = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ValidationError::FieldNotFound(id.to_owned()));
        let pos = self.record(result)?;
        self.values.remove(id);
        Ok(self.fields.remove(pos))
    }

    /// Moves the field at `from` so that it ends up at index `to`.
    pub fn move_field(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.fields.len();
        let result = if from >= len {
            Err(ValidationError::IndexOutOfRange { index: from, len })
        } else if to >= len {
            Err(ValidationError::IndexOutOfRange { index: to, len })
        } else {
            Ok(())
        };
        self.record(result)?;
        let field = self.fields.remove(from);
        self.fields.insert(to, field);
        Ok(())
    }

    /// Copies a field directly after the original. Returns the copy's id.
    pub fn duplicate_field(&mut self, id: &str) -> Result<String> {
        let result = self
            .fields
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| ValidationError::FieldNotFound(id.to_owned()));
        let pos = self.record(result)?;
        let mut copy = self.fields[pos].clone();
        copy.id = self.fresh_id(&copy.field_type);
        if !copy.label.is_empty() {
            copy.label = format!("{} (copy)", copy.label);
        }
        let new_id = copy.id.clone();
        self.insert_field(pos + 1, copy)?;
        Ok(new_id)
    }

    /// Replaces the whole field list (template load). Values are reset.
    /// Nothing changes if any field is rejected.
    pub fn load_template(&mut self, fields: Vec<Field>) -> Result<()> {
        let mut staged = Self::new(self.name.clone());
        for field in fields {
            let index = staged.fields.len();
            if let Err(e) = staged.insert_field(index, field) {
                return self.record(Err(e));
            }
        }
        self.fields = staged.fields;
        self.values.clear();
        self.last_error = None;
        debug!(fields = self.fields.len(), "loaded template");
        Ok(())
    }

    pub fn rename(&mut self, name: &str) {
        self.name = clean_text(name, limits::FORM_NAME);
    }

    // -- Options -------------------------------------------------------------

    /// Applies an options patch. Invalid colours are silently discarded.
    pub fn update_options(&mut self, patch: &OptionsPatch) {
        self.options.apply(patch);
    }

    // -- Values --------------------------------------------------------------

    pub fn set_value(&mut self, field_id: &str, value: impl Into<FormValue>) {
        self.values.set(field_id, value);
    }

    pub fn clear_value(&mut self, field_id: &str) {
        self.values.remove(field_id);
    }

    pub fn reset_values(&mut self) {
        self.values.clear();
    }

    // -- Internal helpers ----------------------------------------------------

    fn fresh_id(&mut self, field_type: &FieldType) -> String {
        let now = Utc::now();
        loop {
            self.nonce += 1;
            let id = generate_field_id(field_type.as_str(), now, self.nonce);
            if self.field(&id).is_none() {
                return id;
            }
        }
    }

    fn record<T>(&mut self, result: Result<T>) -> Result<T> {
        match result {
            Ok(v) => {
                self.last_error = None;
                Ok(v)
            }
            Err(e) => {
                warn!(error = %e, "rejected write");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Operator;
    use crate::field::FieldBuilder;
    use pretty_assertions::assert_eq;

    fn session_with(fields: Vec<Field>) -> FormSession {
        let mut session = FormSession::new("Test");
        session.load_template(fields).unwrap();
        session
    }

    #[test]
    fn add_field_generates_id_and_defaults() {
        let mut session = FormSession::new("Test");
        let id = session.add_field(FieldType::Select).unwrap();
        let field = session.field(&id).unwrap();
        assert!(id.starts_with("field_"));
        assert_eq!(field.label, "Select an option");
        assert_eq!(field.options.len(), 2);
    }

    #[test]
    fn added_ids_are_unique() {
        let mut session = FormSession::new("Test");
        let a = session.add_field(FieldType::Text).unwrap();
        let b = session.add_field(FieldType::Text).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn invalid_pattern_is_rejected_and_state_kept() {
        let mut session = session_with(vec![
            FieldBuilder::new(FieldType::Text, "name").label("Name").build(),
        ]);
        let before = session.fields().to_vec();

        let patch = FieldPatch {
            pattern: Some(Some("[invalid(".into())),
            ..FieldPatch::default()
        };
        let result = session.update_field("name", &patch);

        assert!(matches!(result, Err(ValidationError::InvalidPattern(_))));
        assert_eq!(session.fields(), before.as_slice());
        assert!(session.last_error().unwrap().starts_with("invalid pattern"));
    }

    #[test]
    fn successful_write_clears_last_error() {
        let mut session = session_with(vec![FieldBuilder::new(FieldType::Text, "name").build()]);
        let _ = session.update_field("missing", &FieldPatch::default());
        assert!(session.last_error().is_some());

        let patch = FieldPatch {
            label: Some("<b>Full name</b>".into()),
            ..FieldPatch::default()
        };
        session.update_field("name", &patch).unwrap();
        assert!(session.last_error().is_none());
        assert_eq!(session.field("name").unwrap().label, "Full name");
    }

    #[test]
    fn patch_clears_constraint() {
        let mut session = session_with(vec![
            FieldBuilder::new(FieldType::Text, "a").max_length(10).build(),
        ]);
        let patch = FieldPatch {
            max_length: Some(None),
            ..FieldPatch::default()
        };
        session.update_field("a", &patch).unwrap();
        assert_eq!(session.field("a").unwrap().max_length, None);
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut session = session_with(vec![FieldBuilder::new(FieldType::Text, "a").build()]);
        let result = session.insert_field(1, FieldBuilder::new(FieldType::Email, "a").build());
        assert_eq!(result, Err(ValidationError::DuplicateId("a".into())));
        assert_eq!(session.fields().len(), 1);
    }

    #[test]
    fn field_cap_enforced() {
        let mut session = FormSession::new("Big");
        for _ in 0..limits::MAX_FIELDS {
            session.add_field(FieldType::Text).unwrap();
        }
        assert_eq!(
            session.add_field(FieldType::Text),
            Err(ValidationError::TooManyFields(limits::MAX_FIELDS))
        );
    }

    #[test]
    fn remove_drops_value_and_keeps_dangling_rules() {
        let mut session = session_with(vec![
            FieldBuilder::new(FieldType::Text, "a").build(),
            FieldBuilder::new(FieldType::Text, "b")
                .rule("a", Operator::IsNotEmpty, "")
                .build(),
        ]);
        session.set_value("a", "hello");
        session.remove_field("a").unwrap();
        assert!(session.values().get("a").is_none());
        assert_eq!(
            session.field("b").unwrap().active_logic().unwrap().rules[0].field,
            "a"
        );
    }

    #[test]
    fn move_and_duplicate() {
        let mut session = session_with(vec![
            FieldBuilder::new(FieldType::Text, "a").label("A").build(),
            FieldBuilder::new(FieldType::Text, "b").label("B").build(),
            FieldBuilder::new(FieldType::Text, "c").label("C").build(),
        ]);
        session.move_field(0, 2).unwrap();
        let ids: Vec<_> = session.fields().iter().map(|f| f.id.clone()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let copy = session.duplicate_field("c").unwrap();
        assert_eq!(session.fields()[2].id, copy);
        assert_eq!(session.fields()[2].label, "C (copy)");

        assert!(session.move_field(0, 9).is_err());
    }

    #[test]
    fn load_template_resets_values_and_is_atomic() {
        let mut session = session_with(vec![FieldBuilder::new(FieldType::Text, "a").build()]);
        session.set_value("a", "x");

        let bad = vec![
            FieldBuilder::new(FieldType::Text, "n").build(),
            FieldBuilder::new(FieldType::Text, "m").pattern("(").build(),
        ];
        assert!(session.load_template(bad).is_err());
        assert_eq!(session.fields()[0].id, "a");
        assert_eq!(session.values().len(), 1);

        session
            .load_template(vec![FieldBuilder::new(FieldType::Email, "e").build()])
            .unwrap();
        assert_eq!(session.fields()[0].id, "e");
        assert!(session.values().is_empty());
    }

    #[test]
    fn options_patch_discards_bad_color() {
        let mut session = FormSession::new("Test");
        session.update_options(&OptionsPatch {
            primary_color: Some("#zzzzzz".into()),
            background_color: Some("#abc".into()),
            ..OptionsPatch::default()
        });
        assert_eq!(session.options().primary_color, "#3b82f6");
        assert_eq!(session.options().background_color, "#abc");
    }

    #[test]
    fn from_document_drops_invalid_fields() {
        let doc = FormDocument::new(
            "Doc",
            vec![
                FieldBuilder::new(FieldType::Text, "ok").build(),
                FieldBuilder::new(FieldType::Select, "no-options").build(),
            ],
            FormOptions::default(),
        );
        let session = FormSession::from_document(doc);
        assert_eq!(session.fields().len(), 1);
        assert!(session.last_error().is_none());
        assert_eq!(session.to_document().fields[0].id, "ok");
    }
}
