//! Escaping for each target syntax.
//!
//! User-supplied strings never reach generated output unescaped.

use serde::Serialize;

/// Escapes text for HTML element content and double- or single-quoted
/// attribute values.
pub fn html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A double-quoted JavaScript string literal.
///
/// JSON string syntax plus escapes for the two line separators JSON allows
/// raw but older JavaScript parsers reject, and for `<` so that the literal
/// can never close an enclosing `<script>` block.
pub fn js_string(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 2);
    out.push('"');
    for c in input.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '<' => out.push_str("\\u003c"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Serializes a value as a JavaScript expression with the same escapes as
/// [`js_string`].
pub fn js_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let text = serde_json::to_string(value)?;
    Ok(text
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
        .replace('<', "\\u003c"))
}

/// Escapes a shortcode attribute value.
///
/// Brackets would end the shortcode early and quotes would end the
/// attribute, so both become entities. Line breaks collapse to spaces.
pub fn shortcode_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '[' => out.push_str("&#91;"),
            ']' => out.push_str("&#93;"),
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes one entry of a `label|value` option list in a shortcode.
pub fn shortcode_list_item(input: &str) -> String {
    shortcode_attr(input)
        .replace('|', "&#124;")
        .replace(',', "&#44;")
}

/// Turns a display name into a CSS/HTML identifier: lowercase ASCII
/// alphanumerics separated by single dashes.
pub fn slug(input: &str) -> String {
    let mut out = String::new();
    let mut pending_dash = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if out.is_empty() { "form".to_string() } else { out }
}

/// Turns a display name into a PascalCase component name ending in `Form`.
pub fn component_name(input: &str) -> String {
    let mut name: String = input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert_str(0, "Form");
    }
    if !name.ends_with("Form") {
        name.push_str("Form");
    }
    name
}
