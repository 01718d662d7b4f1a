//! Parsing, checking and rendering of input sources.

use std::fmt;
use std::io::Read;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

use surql_syntax::{Dialect, Lexer, LineIndex, ParseError, Parser, SourceFile, Span, TokenKind};

use crate::error::{CliError, Result};

/// Display name used for standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// A source text and the name it is reported under.
#[derive(Debug, Clone)]
pub struct Input {
    pub name: String,
    pub source: String,
}

impl Input {
    /// Creates an input from text already in memory.
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Reads `path`, or standard input when `path` is absent or `-`.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Read`] or [`CliError::Stdin`] if reading fails.
    pub fn read(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path != Path::new("-") => {
                let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(Self::new(path.display().to_string(), source))
            }
            _ => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .map_err(CliError::Stdin)?;
                Ok(Self::new(STDIN_NAME, source))
            }
        }
    }
}

/// How `parse` prints the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Canonical query text.
    #[default]
    Sql,
    /// The syntax tree as JSON.
    Json,
    /// Rust debug representation.
    Debug,
}

/// A parse error located by line and column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub path: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    /// Locates `error` within `input`.
    #[must_use]
    pub fn new(input: &Input, index: &LineIndex<'_>, error: &ParseError) -> Self {
        let position = index.position(error.span().start);
        Self {
            path: input.name.clone(),
            line: position.line,
            column: position.column,
            message: error.message(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}",
            self.path, self.line, self.column, self.message
        )
    }
}

/// Parses the whole input, stopping at the first error.
///
/// # Errors
///
/// Returns [`CliError::Parse`] with the located first error.
pub fn parse(input: &Input, dialect: &dyn Dialect) -> Result<SourceFile> {
    Parser::with_dialect(&input.source, dialect)
        .parse_source()
        .map_err(|error| {
            let index = LineIndex::new(&input.source);
            CliError::Parse(Diagnostic::new(input, &index, &error))
        })
}

/// Renders a parsed file in the requested format.
///
/// # Errors
///
/// Returns [`CliError::Serialization`] if JSON output fails.
pub fn render(file: &SourceFile, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Sql => file.to_string(),
        OutputFormat::Json => serde_json::to_string_pretty(file)? + "\n",
        OutputFormat::Debug => format!("{file:#?}\n"),
    })
}

/// Parses the input with recovery and returns every diagnostic.
#[must_use]
pub fn check(input: &Input, dialect: &dyn Dialect) -> Vec<Diagnostic> {
    let (file, errors) = Parser::with_dialect(&input.source, dialect).parse_source_recovering();
    debug!(
        path = %input.name,
        statements = file.statements().count(),
        errors = errors.len(),
        "checked"
    );
    let index = LineIndex::new(&input.source);
    errors
        .iter()
        .map(|error| Diagnostic::new(input, &index, error))
        .collect()
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    kind: &'a TokenKind,
    text: &'a str,
    span: Span,
    line: usize,
    column: usize,
}

/// Lexes the input and returns one JSON object per token, `Eof` included.
///
/// # Errors
///
/// Returns [`CliError::Serialization`] if a token fails to serialize.
pub fn token_lines(input: &Input, dialect: &dyn Dialect) -> Result<Vec<String>> {
    let index = LineIndex::new(&input.source);
    Lexer::with_dialect(&input.source, dialect)
        .tokenize()
        .iter()
        .map(|token| {
            let position = index.position(token.span.start);
            let record = TokenRecord {
                kind: &token.kind,
                text: token.lexeme(&input.source),
                span: token.span,
                line: position.line,
                column: position.column,
            };
            Ok(serde_json::to_string(&record)?)
        })
        .collect()
}
