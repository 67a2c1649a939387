//! Global styling and behaviour options of a form.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::sanitize::{clean_text, limits};

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("color pattern compiles")
});

/// Returns `true` for `#rgb` / `#rrggbb` hex colours.
pub fn is_valid_color(value: &str) -> bool {
    COLOR_RE.is_match(value)
}

fn default_primary_color() -> String {
    "#3b82f6".to_string()
}

fn default_background_color() -> String {
    "#ffffff".to_string()
}

fn default_text_color() -> String {
    "#1f2937".to_string()
}

fn default_border_color() -> String {
    "#d1d5db".to_string()
}

fn default_error_color() -> String {
    "#ef4444".to_string()
}

fn default_submit_text() -> String {
    "Submit".to_string()
}

fn default_success_message() -> String {
    "Thank you! Your submission has been received.".to_string()
}

fn default_next_text() -> String {
    "Next".to_string()
}

fn default_previous_text() -> String {
    "Previous".to_string()
}

fn default_true() -> bool {
    true
}

/// Form-wide options. Every key has a default so that a partial document
/// deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormOptions {
    // ===== Colours =====
    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_background_color")]
    pub background_color: String,

    #[serde(default = "default_text_color")]
    pub text_color: String,

    #[serde(default = "default_border_color")]
    pub border_color: String,

    #[serde(default = "default_error_color")]
    pub error_color: String,

    // ===== Text =====
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    #[serde(default = "default_submit_text")]
    pub submit_button_text: String,

    #[serde(default = "default_success_message")]
    pub success_message: String,

    #[serde(default = "default_next_text")]
    pub next_button_text: String,

    #[serde(default = "default_previous_text")]
    pub previous_button_text: String,

    // ===== Behaviour =====
    #[serde(default = "default_true")]
    pub show_progress_bar: bool,

    #[serde(default = "default_true")]
    pub show_required_asterisk: bool,

    #[serde(default = "default_true")]
    pub validate_on_blur: bool,

    #[serde(default)]
    pub validate_on_change: bool,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            background_color: default_background_color(),
            text_color: default_text_color(),
            border_color: default_border_color(),
            error_color: default_error_color(),
            description: String::new(),
            submit_button_text: default_submit_text(),
            success_message: default_success_message(),
            next_button_text: default_next_text(),
            previous_button_text: default_previous_text(),
            show_progress_bar: true,
            show_required_asterisk: true,
            validate_on_blur: true,
            validate_on_change: false,
        }
    }
}

/// A partial update to [`FormOptions`]. `None` leaves a key untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsPatch {
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub border_color: Option<String>,
    pub error_color: Option<String>,
    pub description: Option<String>,
    pub submit_button_text: Option<String>,
    pub success_message: Option<String>,
    pub next_button_text: Option<String>,
    pub previous_button_text: Option<String>,
    pub show_progress_bar: Option<bool>,
    pub show_required_asterisk: Option<bool>,
    pub validate_on_blur: Option<bool>,
    pub validate_on_change: Option<bool>,
}

impl FormOptions {
    /// Applies a patch. Invalid colours are discarded and the previous value
    /// kept; text is tag-stripped and capped.
    pub fn apply(&mut self, patch: &OptionsPatch) {
        set_color(&mut self.primary_color, &patch.primary_color, "primaryColor");
        set_color(&mut self.background_color, &patch.background_color, "backgroundColor");
        set_color(&mut self.text_color, &patch.text_color, "textColor");
        set_color(&mut self.border_color, &patch.border_color, "borderColor");
        set_color(&mut self.error_color, &patch.error_color, "errorColor");

        set_text(&mut self.description, &patch.description, limits::MESSAGE);
        set_text(&mut self.submit_button_text, &patch.submit_button_text, limits::BUTTON_TEXT);
        set_text(&mut self.success_message, &patch.success_message, limits::MESSAGE);
        set_text(&mut self.next_button_text, &patch.next_button_text, limits::BUTTON_TEXT);
        set_text(
            &mut self.previous_button_text,
            &patch.previous_button_text,
            limits::BUTTON_TEXT,
        );

        if let Some(v) = patch.show_progress_bar {
            self.show_progress_bar = v;
        }
        if let Some(v) = patch.show_required_asterisk {
            self.show_required_asterisk = v;
        }
        if let Some(v) = patch.validate_on_blur {
            self.validate_on_blur = v;
        }
        if let Some(v) = patch.validate_on_change {
            self.validate_on_change = v;
        }
    }

    /// Returns a copy where every invalid colour is replaced by its default
    /// and every text value is cleaned. Used when loading documents written
    /// outside the session.
    pub fn sanitized(&self) -> Self {
        let mut clean = Self::default();
        clean.apply(&OptionsPatch {
            primary_color: Some(self.primary_color.clone()),
            background_color: Some(self.background_color.clone()),
            text_color: Some(self.text_color.clone()),
            border_color: Some(self.border_color.clone()),
            error_color: Some(self.error_color.clone()),
            description: Some(self.description.clone()),
            submit_button_text: Some(self.submit_button_text.clone()),
            success_message: Some(self.success_message.clone()),
            next_button_text: Some(self.next_button_text.clone()),
            previous_button_text: Some(self.previous_button_text.clone()),
            show_progress_bar: Some(self.show_progress_bar),
            show_required_asterisk: Some(self.show_required_asterisk),
            validate_on_blur: Some(self.validate_on_blur),
            validate_on_change: Some(self.validate_on_change),
        });
        clean
    }
}

fn set_color(target: &mut String, candidate: &Option<String>, key: &str) {
    if let Some(value) = candidate {
        let value = value.trim();
        if is_valid_color(value) {
            *target = value.to_owned();
        } else {
            warn!(key, value, "discarding invalid colour");
        }
    }
}

fn set_text(target: &mut String, candidate: &Option<String>, max: usize) {
    if let Some(value) = candidate {
        *target = clean_text(value, max);
    }
}
