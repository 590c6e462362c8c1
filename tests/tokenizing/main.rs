use std::path::Path;

use ren::{
    base::{Error, FsProvider, SilentHandler},
    lexical::{self, token::Token},
    tokenize, tokenize_str, Tokenizer,
};

mod properties;

fn string_values(tokens: &[Token]) -> Vec<&str> {
    tokens
        .iter()
        .filter_map(Token::as_string_literal)
        .map(|string| string.value.as_str())
        .collect()
}

#[test]
fn tokenizing_config_file() {
    let handler = SilentHandler::new();
    let provider = FsProvider::from(env!("CARGO_MANIFEST_DIR"));

    let tokens = tokenize(
        &handler,
        &provider,
        Path::new("tests/tokenizing/config.ren"),
        &Tokenizer::default(),
    )
    .expect("Failed to tokenize");

    assert!(handler.into_received().is_empty());
    assert_eq!(tokens.len(), 21);
    assert_eq!(
        string_values(&tokens),
        [
            "name",
            "ren scanner",
            "hash",
            "escapes",
            "tab\tquote\"slash/ é 😀",
        ]
    );

    let structural = tokens
        .iter()
        .filter_map(Token::as_structural)
        .map(|token| token.character())
        .collect::<String>();
    assert_eq!(structural, "{\n\t ()\n\t# \n\t \n}\n");
}

#[test]
fn tokenizing_is_idempotent() {
    let source = include_str!("./config.ren");

    let first = tokenize_str(&SilentHandler::new(), "config.ren", source, &Tokenizer::default())
        .expect("Failed to tokenize");
    let second = tokenize_str(&SilentHandler::new(), "config.ren", source, &Tokenizer::default())
        .expect("Failed to tokenize");

    // spans of different source files never compare equal, so compare what they cover
    let describe = |tokens: &ren::TokenStream| {
        tokens
            .iter()
            .map(|token| (token.span().start(), token.span().end(), format!("{token:?}")))
            .collect::<Vec<_>>()
    };
    assert_eq!(describe(&first), describe(&second));
}

#[test]
fn tokenizing_invalid() {
    colored::control::set_override(false);

    let source = include_str!("./invalid.ren");
    let handler = SilentHandler::new();

    let err = tokenize_str(&handler, "invalid.ren", source, &Tokenizer::default())
        .expect_err("Expecting tokenizing failure");

    let received = handler.into_received();
    assert_eq!(received, [err.clone()]);

    let Error::LexicalError(lexical::Error::InvalidEscape(invalid)) = &err else {
        panic!("Expected an invalid escape error, got {err:?}");
    };
    assert_eq!(invalid.selector, 'q');
    assert_eq!(invalid.span.start(), 15);
    assert_eq!(invalid.opening_quote, 9);

    let rendered = invalid.to_string();
    assert!(rendered.starts_with("[error]: invalid \\escape: 'q'\n--> invalid.ren:2:14\n"));
    assert!(rendered.contains("2 | \t\"key\" \"bad \\q escape\"\n"));
}

#[test]
fn tokenizing_missing_file() {
    let handler = SilentHandler::new();
    let provider = FsProvider::from(env!("CARGO_MANIFEST_DIR"));

    let err = tokenize(
        &handler,
        &provider,
        Path::new("tests/tokenizing/missing.ren"),
        &Tokenizer::default(),
    )
    .expect_err("Expecting a missing file");

    assert!(matches!(err, Error::IoError(_)));
    assert_eq!(handler.into_received().len(), 1);
}

#[test]
fn tokenizing_documented_examples() {
    let handler = SilentHandler::new();
    let tokenizer = Tokenizer::default();

    let tokens = tokenize_str(&handler, "empty", "", &tokenizer).unwrap();
    assert!(tokens.is_empty());

    let tokens = tokenize_str(&handler, "quote", r#""ab\"c""#, &tokenizer).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(string_values(&tokens), ["ab\"c"]);

    let tokens = tokenize_str(&handler, "unicode", r#""\u0041""#, &tokenizer).unwrap();
    assert_eq!(string_values(&tokens), ["A"]);

    let err = tokenize_str(&handler, "unterminated", "\"unterminated", &tokenizer).unwrap_err();
    let Error::LexicalError(err) = &err else {
        panic!("Expected a lexical error, got {err:?}");
    };
    assert!(matches!(err, lexical::Error::UnterminatedString(_)));
    assert_eq!(err.index(), 0);

    let err = tokenize_str(&handler, "newline", "\"a\nb\"", &tokenizer).unwrap_err();
    assert!(matches!(
        err,
        Error::LexicalError(lexical::Error::InvalidControlCharacter(_))
    ));

    let tokens =
        tokenize_str(&handler, "newline", "\"a\nb\"", &Tokenizer::new().strict(false)).unwrap();
    assert_eq!(string_values(&tokens), ["a\nb"]);

    assert_eq!(handler.into_received().len(), 2);
}
