use proptest::prelude::*;
use ren::{
    base::source_file::SourceFile,
    lexical::{string_literal::StringLiteralScanner, token::Token},
    util::{escape_str, quote_str},
    Tokenizer,
};

fn scan(content: &str) -> (String, usize) {
    let source_file = SourceFile::in_memory("property", content);
    StringLiteralScanner::default()
        .scan(&source_file, 1)
        .expect("Failed to scan string literal")
}

/// Pieces of valid REN source: structural characters and complete string literals.
fn source_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec!['{', '}', '(', ')', '#', ' ', '\t', '\n']).prop_map(String::from),
        any::<String>().prop_map(|s| quote_str(&s)),
    ]
}

#[test]
fn escape_table_round_trip() {
    for (selector, character) in [
        ('"', '"'),
        ('\\', '\\'),
        ('/', '/'),
        ('b', '\u{8}'),
        ('f', '\u{c}'),
        ('n', '\n'),
        ('r', '\r'),
        ('t', '\t'),
    ] {
        let (decoded, end) = scan(&format!("\"\\{selector}\""));
        assert_eq!(decoded, character.to_string());
        assert_eq!(end, 4);

        // `/` needs no escape, every other entry is written back with its own selector
        let expected = if selector == '/' {
            "/".to_string()
        } else {
            format!("\\{selector}")
        };
        assert_eq!(escape_str(&decoded), expected);
    }
}

proptest! {
    #[test]
    fn escaped_strings_round_trip(text in any::<String>()) {
        let literal = quote_str(&text);
        let (decoded, end) = scan(&literal);

        prop_assert_eq!(decoded, text);
        prop_assert_eq!(end, literal.len());
    }

    #[test]
    fn surrogate_pairs_combine(high in 0xD800u16..=0xDBFF, low in 0xDC00u16..=0xDFFF) {
        let literal = format!("\"\\u{high:04X}\\u{low:04x}\" tail");
        let (decoded, end) = scan(&literal);

        let expected = char::decode_utf16([high, low])
            .collect::<Result<String, _>>()
            .expect("valid surrogate pair");
        prop_assert_eq!(&decoded, &expected);
        prop_assert_eq!(decoded.chars().count(), 1);
        prop_assert!(u32::from(decoded.chars().next().unwrap_or_default()) >= 0x10000);
        // opening quote, twelve characters of escapes, closing quote
        prop_assert_eq!(end, 14);
    }

    #[test]
    fn unpaired_high_surrogate_stands_alone(high in 0xD800u16..=0xDBFF, next in 0u16..0xDC00) {
        let literal = format!("\"\\u{high:04x}\\u{next:04x}\"");
        let (decoded, end) = scan(&literal);

        let mut chars = decoded.chars();
        prop_assert_eq!(chars.next(), Some(char::REPLACEMENT_CHARACTER));
        let second = char::from_u32(u32::from(next)).unwrap_or(char::REPLACEMENT_CHARACTER);
        prop_assert_eq!(chars.next(), Some(second));
        prop_assert_eq!(chars.next(), None);
        prop_assert_eq!(end, literal.len());
    }

    #[test]
    fn tokenizing_is_deterministic(pieces in prop::collection::vec(source_piece(), 0..32)) {
        let content = pieces.concat();
        let source_file = SourceFile::in_memory("property", content.as_str());
        let tokenizer = Tokenizer::default();

        let first = tokenizer.tokenize(&source_file).expect("valid source");
        let second = tokenizer.tokenize(&source_file).expect("valid source");

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), pieces.len());
    }

    #[test]
    fn token_spans_rebuild_the_source(pieces in prop::collection::vec(source_piece(), 0..32)) {
        let content = pieces.concat();
        let source_file = SourceFile::in_memory("property", content.as_str());

        let tokens = Tokenizer::default().tokenize(&source_file).expect("valid source");

        let rebuilt = tokens.iter().map(|token| token.span().str()).collect::<String>();
        prop_assert_eq!(rebuilt, content);

        for (token, piece) in tokens.iter().zip(&pieces) {
            prop_assert_eq!(token.span().str(), piece.as_str());
            if let Token::StringLiteral(string) = token {
                prop_assert_eq!(quote_str(&string.value), piece.clone());
            }
        }
    }
}
