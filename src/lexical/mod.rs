//! The lexical module is responsible for converting raw REN text into a stream of tokens.

pub mod matcher;

pub mod string_literal;

pub mod token;

pub mod token_stream;

mod error;
pub use error::{
    Error, InvalidControlCharacter, InvalidEscape, InvalidUnicodeEscape, UnexpectedCharacter,
    UnterminatedString,
};
