//! # surql-syntax
//!
//! A lexer and parser for a `SurrealQL`-style query language.
//!
//! This crate provides:
//! - A hand-written lexer with a side channel for comments
//! - A recursive descent parser with Pratt expression parsing
//! - Resolution of record ids (`person:tobie`), dotted fields and graph
//!   edges (`->likes->post`) into a typed AST
//! - Canonical rendering of every AST node through `Display`
//!
//! ## Parsing
//!
//! ```rust
//! use surql_syntax::ast::{SourceItem, Statement};
//!
//! let file = surql_syntax::parse(
//!     "-- adults only\nSELECT name FROM person WHERE age >= 18;",
//! )
//! .unwrap();
//!
//! assert!(matches!(file.items[0], SourceItem::Comment(_)));
//! let statement = file.statements().next().unwrap();
//! assert!(matches!(statement, Statement::Select(_)));
//! assert_eq!(
//!     statement.to_string(),
//!     "SELECT name FROM person WHERE age >= 18"
//! );
//! ```
//!
//! ## Error recovery
//!
//! Tools that want every diagnostic in a file use the recovering driver:
//!
//! ```rust
//! use surql_syntax::Parser;
//!
//! let (file, errors) =
//!     Parser::new("SELECT FROM; SELECT * FROM person;").parse_source_recovering();
//! assert_eq!(errors.len(), 1);
//! assert_eq!(file.statements().count(), 1);
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, SourceFile, Statement};
pub use dialect::{Dialect, RelaxedDialect, StrictDialect};
pub use lexer::{Lexer, LineIndex, Position, Span, Token, TokenKind};
pub use parser::{MAX_DEPTH, ParseError, Parser};

/// Parses a source file of statements and comments.
///
/// # Errors
///
/// Returns the first error in the input.
pub fn parse(source: &str) -> Result<SourceFile, ParseError> {
    Parser::new(source).parse_source()
}

/// Parses a source file under the keyword policy of `dialect`.
///
/// # Errors
///
/// Returns the first error in the input.
pub fn parse_with_dialect(source: &str, dialect: &dyn Dialect) -> Result<SourceFile, ParseError> {
    Parser::with_dialect(source, dialect).parse_source()
}

/// Parses input holding exactly one statement with an optional `;`.
///
/// # Errors
///
/// Returns an error if the statement is invalid or followed by more input.
pub fn parse_statement(source: &str) -> Result<Statement, ParseError> {
    Parser::new(source).parse_single_statement()
}

/// Parses input holding exactly one expression.
///
/// # Errors
///
/// Returns an error if the expression is invalid or followed by more input.
pub fn parse_expression(source: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}
