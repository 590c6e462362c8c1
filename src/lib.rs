//! The REN lexical scanner.
//!
//! REN is a small textual configuration language made of structural characters (`{`, `}`, `(`,
//! `)`, `#` and whitespace) and double quoted string literals that use the JSON escaping rules.
//! This crate turns REN source text into a [`TokenStream`].
//!
//! Number, boolean and null literals are recognized by pluggable
//! [`LiteralMatcher`](lexical::matcher::LiteralMatcher)s configured on the [`Tokenizer`].

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod lexical;
pub mod util;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result};

#[doc(inline)]
pub use lexical::token_stream::{TokenStream, Tokenizer};

use crate::base::Error;

/// Loads the file at `path` and converts it to tokens.
///
/// Every error is also reported to the `handler`.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If the source code contains a lexical error.
pub fn tokenize(
    handler: &impl Handler<Error>,
    file_provider: &impl FileProvider,
    path: &Path,
    tokenizer: &Tokenizer,
) -> Result<TokenStream> {
    tracing::info!("Tokenizing the source code at path: {}", path.display());

    let source_file = SourceFile::load(path, path.display().to_string(), file_provider)
        .map_err(|err| report(handler, err))?;

    tokenize_source_file(handler, &source_file, tokenizer)
}

/// Converts source code that is already in memory to tokens.
///
/// Every error is also reported to the `handler`.
///
/// # Errors
/// - If the source code contains a lexical error.
pub fn tokenize_str(
    handler: &impl Handler<Error>,
    identifier: &str,
    source: &str,
    tokenizer: &Tokenizer,
) -> Result<TokenStream> {
    let source_file = SourceFile::in_memory(identifier, source);

    tokenize_source_file(handler, &source_file, tokenizer)
}

fn tokenize_source_file(
    handler: &impl Handler<Error>,
    source_file: &std::sync::Arc<SourceFile>,
    tokenizer: &Tokenizer,
) -> Result<TokenStream> {
    tokenizer
        .tokenize(source_file)
        .map_err(|err| report(handler, Error::from(err)))
}

fn report(handler: &impl Handler<Error>, err: Error) -> Error {
    handler.receive(err.clone());
    err
}
