use std::fmt::Display;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// Represents an error that occurred during the lexical analysis of the source code.
///
/// Every error is terminal: tokenization stops at the first one.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedString(#[from] UnterminatedString),
    #[error(transparent)]
    InvalidControlCharacter(#[from] InvalidControlCharacter),
    #[error(transparent)]
    InvalidEscape(#[from] InvalidEscape),
    #[error(transparent)]
    InvalidUnicodeEscape(#[from] InvalidUnicodeEscape),
    #[error(transparent)]
    UnexpectedCharacter(#[from] UnexpectedCharacter),
}

impl Error {
    /// Returns the span of the offending source code.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::UnterminatedString(err) => &err.opening_quote,
            Self::InvalidControlCharacter(err) => &err.span,
            Self::InvalidEscape(err) => &err.span,
            Self::InvalidUnicodeEscape(err) => &err.span,
            Self::UnexpectedCharacter(err) => &err.span,
        }
    }

    /// Returns the byte index the error is reported at.
    ///
    /// For an unterminated string this is the index of the opening quote.
    #[must_use]
    pub fn index(&self) -> usize {
        self.span().start()
    }

    /// Returns the byte index of the opening quote of the string literal the error occurred in.
    ///
    /// Returns [`None`] for errors outside of string literals.
    #[must_use]
    pub fn opening_quote(&self) -> Option<usize> {
        match self {
            Self::UnterminatedString(err) => Some(err.opening_quote.start()),
            Self::InvalidControlCharacter(err) => Some(err.opening_quote),
            Self::InvalidEscape(err) => Some(err.opening_quote),
            Self::InvalidUnicodeEscape(err) => Some(err.opening_quote),
            Self::UnexpectedCharacter(_) => None,
        }
    }
}

/// A string literal is missing its closing quote, possibly because the input ends right after a
/// backslash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedString {
    /// Span of the opening quote.
    pub opening_quote: Span,
}

impl Display for UnterminatedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "unterminated string starting at"),
            SourceCodeDisplay::new(
                &self.opening_quote,
                Some("this string literal is never closed by a matching `\"`")
            )
        )
    }
}

impl std::error::Error for UnterminatedString {}

/// A string literal contains a raw control character while scanning strictly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidControlCharacter {
    /// Span of the control character.
    pub span: Span,

    /// The control character.
    pub character: char,

    /// Byte index of the opening quote of the string literal.
    pub opening_quote: usize,
}

impl Display for InvalidControlCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("invalid control character {:?} at", self.character);
        let help = format!(
            "control characters must be escaped inside string literals, write `{}` instead",
            crate::util::escape_str(&self.character.to_string())
        );

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, message),
            SourceCodeDisplay::new(&self.span, Some(help))
        )
    }
}

impl std::error::Error for InvalidControlCharacter {}

/// A backslash is followed by a character that does not start an escape sequence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidEscape {
    /// Span of the character following the backslash.
    pub span: Span,

    /// The character following the backslash.
    pub selector: char,

    /// Byte index of the opening quote of the string literal.
    pub opening_quote: usize,
}

impl Display for InvalidEscape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("invalid \\escape: {:?}", self.selector);

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, message),
            SourceCodeDisplay::new(
                &self.span,
                Some(r#"valid escapes are `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and `\uXXXX`"#)
            )
        )
    }
}

impl std::error::Error for InvalidEscape {}

/// A `\u` escape is not followed by four hexadecimal digits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidUnicodeEscape {
    /// Span starting at the `u` and covering at most the four characters after it.
    pub span: Span,

    /// Byte index of the opening quote of the string literal.
    pub opening_quote: usize,
}

impl Display for InvalidUnicodeEscape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "invalid \\uXXXX escape"),
            SourceCodeDisplay::new(
                &self.span,
                Some("expected exactly four hexadecimal digits after `\\u`")
            )
        )
    }
}

impl std::error::Error for InvalidUnicodeEscape {}

/// A character outside of a string literal does not start any known token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedCharacter {
    /// Span of the character.
    pub span: Span,

    /// The unexpected character.
    pub character: char,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = format!("unexpected character: {:?}", self.character);

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, message),
            SourceCodeDisplay::new(
                &self.span,
                Some("expected a string literal, a literal value or one of `{`, `}`, `(`, `)`, `#` and whitespace")
            )
        )
    }
}

impl std::error::Error for UnexpectedCharacter {}
