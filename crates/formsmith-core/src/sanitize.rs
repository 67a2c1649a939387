//! Write-boundary cleanup for user-supplied strings.

use std::sync::LazyLock;

use regex::Regex;

/// Length caps applied on write, counted in characters.
pub mod limits {
    pub const LABEL: usize = 200;
    pub const PLACEHOLDER: usize = 200;
    pub const HELP_TEXT: usize = 500;
    pub const DEFAULT_VALUE: usize = 1000;
    pub const OPTION_TEXT: usize = 200;
    pub const CUSTOM_CLASS: usize = 100;
    pub const RULE_VALUE: usize = 500;
    pub const FORM_NAME: usize = 100;
    pub const BUTTON_TEXT: usize = 50;
    pub const MESSAGE: usize = 500;
    pub const PATTERN: usize = 500;
    /// Upper bound for `minLength` / `maxLength`.
    pub const MAX_TEXT_LENGTH: u32 = 100_000;
    /// Upper bound on options per field.
    pub const MAX_OPTIONS: usize = 200;
    /// Upper bound on fields per form.
    pub const MAX_FIELDS: usize = 100;
}

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"));

/// Removes anything that looks like an HTML tag.
pub fn strip_tags(input: &str) -> String {
    TAG_RE.replace_all(input, "").into_owned()
}

/// Truncates to at most `max` characters.
pub fn cap(input: &str, max: usize) -> String {
    match input.char_indices().nth(max) {
        Some((idx, _)) => input[..idx].to_owned(),
        None => input.to_owned(),
    }
}

/// Strips tags, then caps the length. Surrounding whitespace is kept so
/// that typing a space in an editor is not undone mid-word.
pub fn clean_text(input: &str, max: usize) -> String {
    cap(&strip_tags(input), max)
}

/// Keeps only characters valid in a space-separated CSS class list.
pub fn clean_class_list(input: &str) -> String {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' ' | ':' | '/'))
        .collect();
    let joined = filtered.split_whitespace().collect::<Vec<_>>().join(" ");
    cap(&joined, limits::CUSTOM_CLASS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_removes_markup() {
        assert_eq!(strip_tags("<b>Name</b>"), "Name");
        assert_eq!(
            strip_tags("Hi <script>alert(1)</script>there"),
            "Hi alert(1)there"
        );
        assert_eq!(strip_tags("a < b"), "a < b");
    }

    #[test]
    fn cap_counts_characters() {
        assert_eq!(cap("héllo", 2), "hé");
        assert_eq!(cap("abc", 10), "abc");
        assert_eq!(cap("", 0), "");
    }

    #[test]
    fn clean_text_strips_then_caps() {
        let long = format!("<i>{}</i>", "x".repeat(300));
        assert_eq!(clean_text(&long, limits::LABEL).len(), limits::LABEL);
    }

    #[test]
    fn class_list_drops_unsafe_characters() {
        assert_eq!(clean_class_list("col-6  \"onclick=x"), "col-6 onclickx");
        assert_eq!(clean_class_list("md:w-1/2 mt-2"), "md:w-1/2 mt-2");
    }
}
