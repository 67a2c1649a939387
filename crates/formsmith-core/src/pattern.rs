//! Patterns written in the browser's regular expression dialect.
//!
//! Exported forms hand `pattern` attributes and `matches` rules to
//! `new RegExp`, so a pattern is only accepted here if it means the same
//! thing there. Lookaround and backreferences are supported through
//! `fancy_regex`; syntax the browser does not understand is refused.

use fancy_regex::Regex;

/// Errors from [`compile`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unsupported syntax '{0}'")]
    Unsupported(String),

    #[error("{0}")]
    Invalid(String),
}

/// Compiles `pattern`, refusing constructs that only Rust's engine accepts.
pub fn compile(pattern: &str) -> Result<Regex, PatternError> {
    check_dialect(pattern)?;
    Regex::new(pattern).map_err(|e| PatternError::Invalid(e.to_string()))
}

/// Matches `text` against `pattern`. A pattern that does not compile, or
/// one that exceeds the backtracking limit, does not match.
pub fn is_match(pattern: &str, text: &str) -> bool {
    compile(pattern)
        .ok()
        .and_then(|re| re.is_match(text).ok())
        .unwrap_or(false)
}

fn check_dialect(pattern: &str) -> Result<(), PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut in_class = false;
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                // \A \z \Z are anchors only in Rust; \p{..} needs the `u`
                // flag in the browser.
                if let Some(&next) = chars.get(i + 1) {
                    if matches!(next, 'A' | 'z' | 'Z' | 'p' | 'P') {
                        return Err(PatternError::Unsupported(format!("\\{next}")));
                    }
                }
                i += 2;
                continue;
            }
            '[' if in_class => {
                if chars.get(i + 1) == Some(&':') {
                    return Err(PatternError::Unsupported("[:class:]".into()));
                }
            }
            '[' => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class && chars.get(i + 1) == Some(&'?') => {
                let rest: String = chars[i + 2..].iter().take(2).collect();
                let group_ok = rest.starts_with(':')
                    || rest.starts_with('=')
                    || rest.starts_with('!')
                    || rest.starts_with("<=")
                    || rest.starts_with("<!")
                    || (rest.starts_with('<')
                        && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'));
                if !group_ok {
                    return Err(PatternError::Unsupported(format!("(?{rest}")));
                }
            }
            _ => {}
        }
        i += 1;
    }
    Ok(())
}
