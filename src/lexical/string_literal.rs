//! Decoding of double quoted string literals.
//!
//! String literals follow the JSON escaping rules: the escapes `\"`, `\\`, `\/`, `\b`, `\f`, `\n`,
//! `\r`, `\t` and `\uXXXX`, where a UTF-16 surrogate pair written as two consecutive `\uXXXX`
//! escapes decodes to a single character.

use std::sync::Arc;

use crate::base::source_file::{SourceFile, Span};

use super::{
    error::{InvalidControlCharacter, InvalidEscape, InvalidUnicodeEscape, UnterminatedString},
    Error,
};

const HIGH_SURROGATES: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATES: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Scans the body of a string literal and resolves its escape sequences.
///
/// The scanner holds no state besides its configuration and can be reused for any number of
/// literals.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StringLiteralScanner {
    strict: bool,
}

impl Default for StringLiteralScanner {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl StringLiteralScanner {
    /// Creates a new scanner.
    ///
    /// A strict scanner rejects raw control characters (below U+0020) inside string literals, a
    /// lenient one keeps them verbatim.
    #[must_use]
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Whether raw control characters are rejected.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Scans a string literal whose opening quote sits right before `start`.
    ///
    /// The caller has consumed the opening `"`, so `start` is the byte index right after it.
    ///
    /// Returns the decoded content and the byte index one past the closing quote.
    ///
    /// Unpaired surrogate escapes cannot be represented in a [`String`] and decode to
    /// U+FFFD REPLACEMENT CHARACTER.
    ///
    /// # Errors
    /// - [`Error::UnterminatedString`] if the input ends before the closing quote.
    /// - [`Error::InvalidControlCharacter`] if a raw control character is found in strict mode.
    /// - [`Error::InvalidEscape`] if a backslash is followed by an unknown escape character.
    /// - [`Error::InvalidUnicodeEscape`] if `\u` is not followed by four hexadecimal digits.
    pub fn scan(
        &self,
        source_file: &Arc<SourceFile>,
        start: usize,
    ) -> Result<(String, usize), Error> {
        let content = source_file.content();
        let start = start.min(content.len());
        let opening_quote = start.saturating_sub(1);
        let unterminated = || {
            Error::from(UnterminatedString {
                opening_quote: Span::new_unchecked(source_file.clone(), opening_quote, start),
            })
        };

        let mut decoded = String::new();
        let mut end = start;

        loop {
            let terminator_index =
                find_chunk_boundary(content.as_bytes(), end).ok_or_else(unterminated)?;

            decoded.push_str(&content[end..terminator_index]);
            end = terminator_index + 1;

            match content.as_bytes()[terminator_index] {
                b'"' => return Ok((decoded, end)),
                b'\\' => {}
                control => {
                    let character = char::from(control);

                    if self.strict {
                        return Err(InvalidControlCharacter {
                            span: Span::new_unchecked(source_file.clone(), terminator_index, end),
                            character,
                            opening_quote,
                        }
                        .into());
                    }

                    decoded.push(character);
                    continue;
                }
            }

            let selector = content[end..].chars().next().ok_or_else(unterminated)?;

            if selector == 'u' {
                let (character, next) = decode_unicode_escape(content, end).ok_or_else(|| {
                    // the span covers the `u` and at most four characters after it
                    let span_end = content[end..]
                        .char_indices()
                        .nth(5)
                        .map_or(content.len(), |(offset, _)| end + offset);

                    Error::from(InvalidUnicodeEscape {
                        span: Span::new_unchecked(source_file.clone(), end, span_end),
                        opening_quote,
                    })
                })?;

                decoded.push(character);
                end = next;
            } else {
                let character = unescape_char(selector).ok_or_else(|| {
                    Error::from(InvalidEscape {
                        span: Span::new_unchecked(
                            source_file.clone(),
                            end,
                            end + selector.len_utf8(),
                        ),
                        selector,
                        opening_quote,
                    })
                })?;

                decoded.push(character);
                end += 1;
            }
        }
    }
}

/// Whether the byte ends a run of characters that are copied verbatim.
const fn is_terminator(byte: u8) -> bool {
    byte == b'"' || byte == b'\\' || byte < 0x20
}

/// Finds the index of the next quote, backslash or control character at or after `start`.
///
/// Every terminator is ASCII and UTF-8 continuation bytes never are, so searching the bytes is
/// exact.
fn find_chunk_boundary(bytes: &[u8], start: usize) -> Option<usize> {
    bytes
        .get(start..)?
        .iter()
        .position(|&byte| is_terminator(byte))
        .map(|offset| start + offset)
}

/// Resolves the character of a single character escape sequence.
fn unescape_char(selector: char) -> Option<char> {
    match selector {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '/' => Some('/'),
        'b' => Some('\u{8}'),
        'f' => Some('\u{c}'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        _ => None,
    }
}

/// Reads the four hexadecimal digits starting at `index`.
fn decode_hex4(content: &str, index: usize) -> Option<u32> {
    let digits = content.get(index..index + 4)?;

    // `from_str_radix` would also accept a leading sign
    if !digits.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }

    u32::from_str_radix(digits, 16).ok()
}

/// Decodes the `\uXXXX` escape whose `u` sits at `u_index`, combining it with a directly
/// following low surrogate escape if it is a high surrogate.
///
/// Returns the character and the index after the consumed escapes, or [`None`] if the first
/// escape is malformed.
fn decode_unicode_escape(content: &str, u_index: usize) -> Option<(char, usize)> {
    let unit = decode_hex4(content, u_index + 1)?;
    let mut end = u_index + 5;

    let mut code_point = unit;
    if HIGH_SURROGATES.contains(&unit) && content[end..].starts_with("\\u") {
        let low = decode_hex4(content, end + 2).filter(|low| LOW_SURROGATES.contains(low));
        if let Some(low) = low {
            code_point = 0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00);
            end += 6;
        }
    }

    let character = char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER);

    Some((character, end))
}
