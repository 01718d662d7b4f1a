//! Tests for error kinds, their locations and their messages.

mod common;
use common::*;

use surql_syntax::lexer::Keyword;
use surql_syntax::parser::Construct;
use surql_syntax::{LineIndex, ParseError, Position, Span, TokenKind};

#[test]
fn missing_from() {
    let err = parse_err("SELECT *");
    assert_eq!(
        err,
        ParseError::Syntax {
            expected: vec!["FROM"],
            found: TokenKind::Eof,
            span: Span::new(8, 8),
        }
    );
    assert_eq!(err.to_string(), "expected `FROM`, found end of input at 8..8");
}

#[test]
fn unexpected_keyword() {
    let err = parse_err("SELECT * FROM WHERE");
    let ParseError::Syntax { found, span, .. } = &err else {
        panic!("Expected syntax error, got {err:?}");
    };
    assert_eq!(*found, TokenKind::Keyword(Keyword::Where));
    assert_eq!(*span, Span::new(14, 19));
    assert_eq!(
        err.message(),
        "expected table name, `(` or `[`, found `WHERE`"
    );
}

#[test]
fn unterminated_string() {
    let err = parse_err("SELECT * FROM person WHERE name = 'Tob");
    assert!(matches!(
        err,
        ParseError::Unterminated {
            construct: Construct::String,
            start,
        } if start.start == 34
    ));
    assert_eq!(err.message(), "unterminated string literal");
}

#[test]
fn unterminated_block_comment() {
    assert!(matches!(
        parse_err("SELECT * FROM person /* never closed"),
        ParseError::Unterminated {
            construct: Construct::Comment,
            ..
        }
    ));
}

#[test]
fn unclosed_paren_reports_the_opening() {
    let err = parse_err("SELECT * FROM person WHERE (a + 1");
    assert_eq!(
        err,
        ParseError::Unterminated {
            construct: Construct::Paren,
            start: Span::new(27, 28),
        }
    );
    assert_eq!(err.to_string(), "unterminated `(` starting at 27..28");
}

#[test]
fn unclosed_bracket_and_brace() {
    assert!(matches!(
        parse_err("[1, [2, 3]"),
        ParseError::Unterminated {
            construct: Construct::Bracket,
            start,
        } if start == Span::new(0, 1)
    ));
    assert!(matches!(
        parse_err("CREATE person CONTENT { a: { b: 1 }"),
        ParseError::Unterminated {
            construct: Construct::Brace,
            ..
        }
    ));
}

#[test]
fn innermost_open_delimiter_is_reported() {
    assert!(matches!(
        parse_err("f([1, 2"),
        ParseError::Unterminated {
            construct: Construct::Bracket,
            start,
        } if start == Span::new(2, 3)
    ));
}

#[test]
fn wrong_closing_delimiter_is_a_syntax_error() {
    assert!(matches!(
        parse_err("(1 + 2]"),
        ParseError::Syntax {
            found: TokenKind::RightBracket,
            ..
        }
    ));
}

#[test]
fn invalid_character() {
    let err = parse_err("SELECT * FROM person WHERE a @ b");
    assert_eq!(
        err,
        ParseError::InvalidCharacter {
            ch: '@',
            span: Span::new(29, 30),
        }
    );
    assert_eq!(err.message(), "invalid character '@'");
}

#[test]
fn number_out_of_range() {
    assert!(matches!(
        parse_err("SELECT * FROM t LIMIT 99999999999999999999999"),
        ParseError::InvalidNumber { span } if span.start == 22
    ));
}

#[test]
fn missing_operand() {
    let err = parse_err("1 +");
    assert!(matches!(
        err,
        ParseError::Syntax {
            ref expected,
            found: TokenKind::Eof,
            ..
        } if expected == &vec!["expression"]
    ));
}

#[test]
fn trailing_garbage() {
    let err = parse_err("SELECT * FROM person;;");
    assert!(matches!(
        err,
        ParseError::Syntax {
            ref expected,
            found: TokenKind::Semicolon,
            ..
        } if expected == &vec!["end of input"]
    ));
}

#[test]
fn errors_carry_positions() {
    let src = "SELECT *\nFROM person\nWHERE age >";
    let err = parse_err(src);
    let index = LineIndex::new(src);
    assert_eq!(
        index.position(err.span().start),
        Position {
            line: 3,
            column: 12
        }
    );
}

#[test]
fn first_error_wins_without_recovery() {
    let err = surql_syntax::parse("SELECT FROM;\nSELECT * FROM person WHERE (").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { .. }));
    assert_eq!(err.span().start, 11);
}

#[test]
fn empty_statement_is_rejected() {
    assert!(matches!(
        surql_syntax::parse(";"),
        Err(ParseError::Syntax {
            found: TokenKind::Semicolon,
            ..
        })
    ));
}
