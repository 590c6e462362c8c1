//! Contains the [`Tokenizer`] and the [`TokenStream`] it produces.

use std::{fmt::Debug, sync::Arc};

use derive_more::Deref;

use crate::base::source_file::{SourceFile, Span};

use super::{
    error::UnexpectedCharacter,
    matcher::{LiteralMatcher, NoMatch},
    string_literal::StringLiteralScanner,
    token::{Boolean, Null, Number, StringLiteral, Structural, StructuralKind, Token},
    Error,
};

/// Is the ordered list of tokens a source file consists of.
///
/// The spans of the tokens are contiguous and together cover the whole source file.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl TokenStream {
    /// Tokenizes the given source file with the default [`Tokenizer`].
    ///
    /// # Errors
    /// - If the source file contains a malformed string literal or an unexpected character.
    pub fn tokenize(source_file: &Arc<SourceFile>) -> Result<Self, Error> {
        Tokenizer::default().tokenize(source_file)
    }

    /// Dissolves this struct into the list of its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> {
        self.tokens
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}

/// Turns REN source text into a [`TokenStream`].
///
/// The tokenizer decides on each position in the following order:
/// 1. a `"` starts a string literal,
/// 2. the number matcher,
/// 3. the boolean matcher,
/// 4. the null matcher,
/// 5. one of `{`, `}`, `(`, `)`, `#`, space, tab and newline forms a token of its own.
///
/// Anything else is an [`Error::UnexpectedCharacter`].
///
/// By default string literals are scanned strictly and none of the literal matchers match.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    scanner: StringLiteralScanner,
    number_matcher: Arc<dyn LiteralMatcher>,
    boolean_matcher: Arc<dyn LiteralMatcher>,
    null_matcher: Arc<dyn LiteralMatcher>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            scanner: StringLiteralScanner::default(),
            number_matcher: Arc::new(NoMatch),
            boolean_matcher: Arc::new(NoMatch),
            null_matcher: Arc::new(NoMatch),
        }
    }
}

impl Tokenizer {
    /// Creates a tokenizer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether raw control characters inside string literals are rejected.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.scanner = StringLiteralScanner::new(strict);
        self
    }

    /// Sets the matcher for numeric literals.
    #[must_use]
    pub fn with_number_matcher(mut self, matcher: impl LiteralMatcher + 'static) -> Self {
        self.number_matcher = Arc::new(matcher);
        self
    }

    /// Sets the matcher for boolean literals.
    #[must_use]
    pub fn with_boolean_matcher(mut self, matcher: impl LiteralMatcher + 'static) -> Self {
        self.boolean_matcher = Arc::new(matcher);
        self
    }

    /// Sets the matcher for the null literal.
    #[must_use]
    pub fn with_null_matcher(mut self, matcher: impl LiteralMatcher + 'static) -> Self {
        self.null_matcher = Arc::new(matcher);
        self
    }

    /// Whether raw control characters inside string literals are rejected.
    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.scanner.is_strict()
    }

    /// Tokenizes the whole source file.
    ///
    /// Either every character ends up in a token or the first error is returned.
    ///
    /// # Errors
    /// - [`Error::UnterminatedString`], [`Error::InvalidControlCharacter`],
    ///   [`Error::InvalidEscape`], [`Error::InvalidUnicodeEscape`] for malformed string literals.
    /// - [`Error::UnexpectedCharacter`] for a character that starts no token.
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.identifier()))]
    pub fn tokenize(&self, source_file: &Arc<SourceFile>) -> Result<TokenStream, Error> {
        let content = source_file.content();
        let mut tokens = Vec::new();
        let mut index = 0;

        while let Some(character) = content[index..].chars().next() {
            let token = self.next_token(source_file, index, character)?;

            // every token spans at least one character
            index = token.span().end();

            tracing::trace!(start = token.span().start(), end = index, "read token");
            tokens.push(token);
        }

        tracing::debug!(tokens = tokens.len(), "tokenized source file");

        Ok(TokenStream { tokens })
    }

    /// Reads the token starting with `character` at the byte index `start`.
    fn next_token(
        &self,
        source_file: &Arc<SourceFile>,
        start: usize,
        character: char,
    ) -> Result<Token, Error> {
        let content = source_file.content();
        let span = |end| Span::new_unchecked(source_file.clone(), start, end);

        if character == '"' {
            let (value, end) = self.scanner.scan(source_file, start + 1)?;

            return Ok(StringLiteral {
                span: span(end),
                value,
            }
            .into());
        }

        if let Some(end) = Self::try_match(self.number_matcher.as_ref(), "number", content, start) {
            return Ok(Number { span: span(end) }.into());
        }

        if let Some(end) = Self::try_match(self.boolean_matcher.as_ref(), "boolean", content, start)
        {
            return Ok(Boolean { span: span(end) }.into());
        }

        if let Some(end) = Self::try_match(self.null_matcher.as_ref(), "null", content, start) {
            return Ok(Null { span: span(end) }.into());
        }

        if let Some(kind) = StructuralKind::from_char(character) {
            return Ok(Structural {
                span: span(start + 1),
                kind,
            }
            .into());
        }

        Err(UnexpectedCharacter {
            span: span(start + character.len_utf8()),
            character,
        }
        .into())
    }

    /// Runs a literal matcher and discards matches that would not move the tokenizer forward to a
    /// valid position.
    fn try_match(
        matcher: &dyn LiteralMatcher,
        kind: &'static str,
        content: &str,
        start: usize,
    ) -> Option<usize> {
        let end = matcher.try_match(content, start)?;

        if end <= start || end > content.len() || !content.is_char_boundary(end) {
            tracing::warn!(
                matcher = kind,
                start,
                end,
                "ignoring literal match that does not end after its start on a character boundary"
            );
            return None;
        }

        Some(end)
    }
}
