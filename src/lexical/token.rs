//! Contains the [`Token`] enum and its related types.

use std::{collections::HashMap, sync::OnceLock};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::base::source_file::Span;

/// Is an enumeration of the characters that form a token of their own in REN.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum StructuralKind {
    OpenBrace,
    CloseBrace,
    OpenParenthesis,
    CloseParenthesis,
    Hash,
    Space,
    Tab,
    Newline,
}

impl StructuralKind {
    /// Gets the character this kind stands for.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::OpenBrace => '{',
            Self::CloseBrace => '}',
            Self::OpenParenthesis => '(',
            Self::CloseParenthesis => ')',
            Self::Hash => '#',
            Self::Space => ' ',
            Self::Tab => '\t',
            Self::Newline => '\n',
        }
    }

    /// Looks up the kind of a structural character.
    ///
    /// Returns [`None`] for every character outside the structural set.
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        static CHAR_STRUCTURAL_MAP: OnceLock<HashMap<char, StructuralKind>> = OnceLock::new();
        let map = CHAR_STRUCTURAL_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for kind in Self::iter() {
                map.insert(kind.as_char(), kind);
            }

            map
        });

        map.get(&character).copied()
    }

    /// Whether the character separates other tokens without carrying meaning.
    #[must_use]
    pub fn is_whitespace(self) -> bool {
        matches!(self, Self::Space | Self::Tab | Self::Newline)
    }
}

impl TryFrom<char> for StructuralKind {
    type Error = char;

    fn try_from(character: char) -> Result<Self, Self::Error> {
        Self::from_char(character).ok_or(character)
    }
}

impl From<StructuralKind> for char {
    fn from(kind: StructuralKind) -> Self {
        kind.as_char()
    }
}

/// Is an enumeration containing all kinds of tokens in the REN language.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Token {
    StringLiteral(StringLiteral),
    Structural(Structural),
    Number(Number),
    Boolean(Boolean),
    Null(Null),
}

impl Token {
    /// Returns the span of the token.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::StringLiteral(token) => &token.span,
            Self::Structural(token) => &token.span,
            Self::Number(token) => &token.span,
            Self::Boolean(token) => &token.span,
            Self::Null(token) => &token.span,
        }
    }
}

/// Represents a double quoted string literal with all escape sequences resolved.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringLiteral {
    /// Is the span that makes up the token, including both quotes.
    pub span: Span,

    /// Is the decoded content of the literal.
    pub value: String,
}

impl StringLiteral {
    /// Returns the raw text between the quotes, escape sequences untouched.
    #[must_use]
    pub fn raw_content(&self) -> &str {
        let string = self.span.str();
        &string[1..string.len() - 1]
    }
}

/// Represents a single structural character.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Structural {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the structural character that the token represents.
    pub kind: StructuralKind,
}

impl Structural {
    /// Returns the character of the token.
    #[must_use]
    pub fn character(&self) -> char {
        self.kind.as_char()
    }
}

/// Represents a numeric literal recognized by the number matcher.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number {
    /// Is the span that makes up the token.
    pub span: Span,
}

/// Represents a boolean literal recognized by the boolean matcher.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Boolean {
    /// Is the span that makes up the token.
    pub span: Span,
}

/// Represents a null literal recognized by the null matcher.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Null {
    /// Is the span that makes up the token.
    pub span: Span,
}
