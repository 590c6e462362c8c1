//! Utility functions for working with REN string literals.

use std::{borrow::Cow, fmt::Write};

/// Escapes a string so that it can be placed between the quotes of a REN string literal.
///
/// `"` and `\` are escaped with a backslash, control characters use their short escape where one
/// exists and a `\u00XX` escape otherwise. Every other character is kept as is.
#[must_use]
pub fn escape_str(s: &str) -> Cow<str> {
    if !s.chars().any(needs_escape) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 2);
    for c in s.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c < '\u{20}' => {
                // writing into a `String` cannot fail
                let _ = write!(escaped, "\\u{:04x}", u32::from(c));
            }
            c => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}

/// Quotes and escapes a string, producing a complete REN string literal.
#[must_use]
pub fn quote_str(s: &str) -> String {
    format!("\"{}\"", escape_str(s))
}

fn needs_escape(c: char) -> bool {
    c == '"' || c == '\\' || c < '\u{20}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_str() {
        assert_eq!(escape_str("Hello, world!"), "Hello, world!");
        assert!(matches!(escape_str("a/b"), Cow::Borrowed("a/b")));
        assert_eq!(escape_str(r#"Hello, "world"!"#), r#"Hello, \"world\"!"#);
        assert_eq!(escape_str(r"Hello, \world\!"), r"Hello, \\world\\!");
        assert_eq!(escape_str("tab\there\n"), r"tab\there\n");
        assert_eq!(escape_str("\u{8}\u{c}\r"), r"\b\f\r");
        assert_eq!(escape_str("\u{0}\u{1b}"), r"\u0000\u001b");
        assert_eq!(escape_str("grüße 😀"), "grüße 😀");
    }

    #[test]
    fn test_quote_str() {
        assert_eq!(quote_str(""), r#""""#);
        assert_eq!(quote_str("say \"hi\""), r#""say \"hi\"""#);
    }
}
