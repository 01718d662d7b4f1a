#![allow(dead_code)]

use surql_syntax::ast::{CreateStatement, Expr, SelectStatement, Statement, UpdateStatement};
use surql_syntax::{ParseError, SourceFile};

pub fn parse(src: &str) -> Statement {
    surql_syntax::parse_statement(src)
        .unwrap_or_else(|e| panic!("Failed to parse: {src}\nError: {e:?}"))
}

pub fn parse_err(src: &str) -> ParseError {
    surql_syntax::parse_statement(src).expect_err(&format!("Expected parse error for: {src}"))
}

pub fn parse_expr(src: &str) -> Expr {
    surql_syntax::parse_expression(src)
        .unwrap_or_else(|e| panic!("Failed to parse expression: {src}\nError: {e:?}"))
}

pub fn parse_file(src: &str) -> SourceFile {
    surql_syntax::parse(src).unwrap_or_else(|e| panic!("Failed to parse: {src}\nError: {e:?}"))
}

pub fn parse_select(src: &str) -> SelectStatement {
    match parse(src) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_create(src: &str) -> CreateStatement {
    match parse(src) {
        Statement::Create(c) => c,
        other => panic!("Expected CREATE, got {other:?}"),
    }
}

pub fn parse_update(src: &str) -> UpdateStatement {
    match parse(src) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

/// Verifies that rendering a parsed statement and parsing it again
/// yields the same tree.
pub fn round_trip(src: &str) {
    let ast1 = parse(src);
    let rendered = ast1.to_string();
    let ast2 = parse(&rendered);
    assert_eq!(
        ast1, ast2,
        "Round-trip failed.\n  Input:    {src}\n  Rendered: {rendered}"
    );
}
