//! Tests for the token stream: spans, comments, durations and error tokens.

use surql_syntax::lexer::{Duration, DurationUnit, Keyword, LexErrorKind};
use surql_syntax::{Lexer, LineIndex, Position, RelaxedDialect, Span, TokenKind};

fn kinds(src: &str) -> Vec<TokenKind> {
    Lexer::new(src).tokenize().into_iter().map(|t| t.kind).collect()
}

#[test]
fn select_statement_tokens() {
    assert_eq!(
        kinds("SELECT * FROM person;"),
        vec![
            TokenKind::Keyword(Keyword::Select),
            TokenKind::Star,
            TokenKind::Keyword(Keyword::From),
            TokenKind::Identifier(String::from("person")),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_point_into_source() {
    let src = "person:tobie->likes";
    let tokens = Lexer::new(src).tokenize();
    let lexemes: Vec<_> = tokens.iter().map(|t| t.lexeme(src)).collect();
    assert_eq!(lexemes, vec!["person", ":", "tobie", "->", "likes", ""]);
    assert_eq!(tokens[3].span, Span::new(12, 14));
}

#[test]
fn namespace_separator_is_one_token() {
    assert_eq!(
        kinds("math::max"),
        vec![
            TokenKind::Identifier(String::from("math")),
            TokenKind::DoubleColon,
            TokenKind::Identifier(String::from("max")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn duration_in_timeout() {
    assert_eq!(
        kinds("TIMEOUT 250ms"),
        vec![
            TokenKind::Keyword(Keyword::Timeout),
            TokenKind::Duration(Duration::new(250, DurationUnit::Milliseconds)),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_do_not_reach_the_stream() {
    let mut lexer = Lexer::new("# one\n1 // two\n+ /* three */ 2 -- four");
    assert_eq!(
        lexer
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect::<Vec<_>>(),
        vec![
            TokenKind::Number(1),
            TokenKind::Plus,
            TokenKind::Number(2),
            TokenKind::Eof,
        ]
    );
    let texts: Vec<_> = lexer.take_comments().into_iter().map(|c| c.text).collect();
    assert_eq!(texts, vec!["# one", "// two", "/* three */", "-- four"]);
}

#[test]
fn lexing_continues_after_an_error() {
    assert_eq!(
        kinds("a @ b"),
        vec![
            TokenKind::Identifier(String::from("a")),
            TokenKind::Error(LexErrorKind::InvalidCharacter('@')),
            TokenKind::Identifier(String::from("b")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn relaxed_dialect_accepts_lowercase_keywords() {
    let kinds: Vec<_> = Lexer::with_dialect("select * from person", &RelaxedDialect)
        .tokenize()
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds[0], TokenKind::Keyword(Keyword::Select));
    assert_eq!(kinds[2], TokenKind::Keyword(Keyword::From));
}

#[test]
fn line_index_positions() {
    let src = "SELECT *\nFROM person\nWHERE µ";
    let index = LineIndex::new(src);
    assert_eq!(index.position(0), Position { line: 1, column: 1 });
    assert_eq!(index.position(9), Position { line: 2, column: 1 });
    let offset = src.find('µ').unwrap();
    assert_eq!(index.position(offset), Position { line: 3, column: 7 });
    assert_eq!(index.position(src.len() + 10).line, 3);
}
