//! Colour palette and styling functions for formsmith CLI output.
//!
//! Uses the Ayu Dark palette. Only states that need a reader's attention get
//! colour: hidden fields are dimmed, failures are red, step headers use the
//! accent colour. Icons are small Unicode symbols, not emoji.

use formsmith_core::enums::FieldType;
use formsmith_core::field::Field;
use owo_colors::OwoColorize;

use crate::terminal::supports_color;

// ---------------------------------------------------------------------------
// Ayu Dark color palette (RGB values)
// ---------------------------------------------------------------------------

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff

// Field type colors
const TYPE_CHOICE: (u8, u8, u8) = (0xd2, 0xa6, 0xff); // #d2a6ff
const TYPE_LAYOUT: (u8, u8, u8) = (0x95, 0xe6, 0xcb); // #95e6cb

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

/// Visible field (filled circle).
pub const ICON_VISIBLE: &str = "\u{25CF}";
/// Hidden field (hollow circle).
pub const ICON_HIDDEN: &str = "\u{25CB}";
/// Field carries conditional logic.
pub const ICON_LOGIC: &str = "\u{21AF}";

pub const ICON_PASS: &str = "\u{2713}";
pub const ICON_WARN: &str = "\u{26A0}";
pub const ICON_FAIL: &str = "\u{2716}";

pub const TREE_CHILD: &str = "\u{251C}\u{2500} ";
pub const TREE_LAST: &str = "\u{2514}\u{2500} ";

// ---------------------------------------------------------------------------
// Helper: apply truecolor only when color is supported
// ---------------------------------------------------------------------------

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Core semantic render helpers
// ---------------------------------------------------------------------------

pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

pub fn render_warn(s: &str) -> String {
    color_str(s, WARN)
}

pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

pub fn render_fail_icon() -> String {
    color_str(ICON_FAIL, FAIL)
}

// ---------------------------------------------------------------------------
// Form rendering
// ---------------------------------------------------------------------------

/// Renders a field type. Choice types and non-input types get colour; the
/// rest use standard text.
pub fn render_field_type(field_type: &FieldType) -> String {
    let s = field_type.as_str();
    if field_type.accepts_options() {
        color_str(s, TYPE_CHOICE)
    } else if matches!(field_type, FieldType::PageBreak | FieldType::Hidden) {
        color_str(s, TYPE_LAYOUT)
    } else {
        s.to_string()
    }
}

/// Renders a one-line field summary: `icon id [type] Label *`.
///
/// Hidden fields are dimmed as a whole line.
pub fn render_field_compact(field: &Field, visible: bool) -> String {
    let required = if field.required { " *" } else { "" };
    let logic = if field.active_logic().is_some() {
        format!(" {}", ICON_LOGIC)
    } else {
        String::new()
    };

    if !visible {
        let line = format!(
            "{} {} [{}] {}{}{}",
            ICON_HIDDEN,
            field.id,
            field.field_type.as_str(),
            field.label,
            required,
            logic,
        );
        return color_str(&line, MUTED);
    }

    format!(
        "{} {} [{}] {}{}{}",
        color_str(ICON_VISIBLE, PASS),
        field.id,
        render_field_type(&field.field_type),
        field.label,
        render_fail(required),
        render_accent(&logic),
    )
}

/// Renders a step header: `STEP 2/3  Details`.
pub fn render_step_header(index: usize, total: usize, title: &str) -> String {
    format!(
        "{}  {}",
        color_bold_str(&format!("STEP {}/{}", index + 1, total), ACCENT),
        render_bold(title),
    )
}
