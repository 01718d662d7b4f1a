//! Parser error types.

use core::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::lexer::{LexErrorKind, Span, Token, TokenKind};

/// A construct that can be left open at the end of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Construct {
    String,
    Comment,
    Paren,
    Bracket,
    Brace,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string literal",
            Self::Comment => "block comment",
            Self::Paren => "`(`",
            Self::Bracket => "`[`",
            Self::Brace => "`{`",
        })
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A character outside the language's alphabet.
    #[error("invalid character {ch:?} at {span}")]
    InvalidCharacter { ch: char, span: Span },

    /// An integer literal that does not fit in 64 bits.
    #[error("number out of range at {span}")]
    InvalidNumber { span: Span },

    /// A token that cannot appear at this position.
    #[error("expected {}, found {found} at {span}", ExpectedList(.expected))]
    Syntax {
        expected: Vec<&'static str>,
        found: TokenKind,
        span: Span,
    },

    /// Input ended inside a string, comment or bracketed construct.
    #[error("unterminated {construct} starting at {start}")]
    Unterminated { construct: Construct, start: Span },

    /// Expressions nested beyond the parser's depth limit.
    #[error("expression nested too deeply at {span}")]
    TooDeep { span: Span },
}

impl ParseError {
    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(expected: &[&'static str], found: &Token) -> Self {
        Self::Syntax {
            expected: expected.to_vec(),
            found: found.kind.clone(),
            span: found.span,
        }
    }

    /// Converts the error token produced by the lexer.
    #[must_use]
    pub const fn from_lex(kind: LexErrorKind, span: Span) -> Self {
        match kind {
            LexErrorKind::InvalidCharacter(ch) => Self::InvalidCharacter { ch, span },
            LexErrorKind::NumberOutOfRange => Self::InvalidNumber { span },
            LexErrorKind::UnterminatedString => Self::Unterminated {
                construct: Construct::String,
                start: span,
            },
            LexErrorKind::UnterminatedComment => Self::Unterminated {
                construct: Construct::Comment,
                start: span,
            },
        }
    }

    /// Returns the location the error points at.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::InvalidCharacter { span, .. }
            | Self::InvalidNumber { span }
            | Self::Syntax { span, .. }
            | Self::TooDeep { span } => *span,
            Self::Unterminated { start, .. } => *start,
        }
    }

    /// Returns the error message without its location.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::InvalidCharacter { ch, .. } => format!("invalid character {ch:?}"),
            Self::InvalidNumber { .. } => String::from("number out of range"),
            Self::Syntax {
                expected, found, ..
            } => format!("expected {}, found {found}", ExpectedList(expected)),
            Self::Unterminated { construct, .. } => format!("unterminated {construct}"),
            Self::TooDeep { .. } => String::from("expression nested too deeply"),
        }
    }
}

/// Renders `a`, `a or b`, `a, b or c`. Keywords and symbols are quoted;
/// lowercase labels such as `expression` are descriptions and are not.
struct ExpectedList<'a>(&'a [&'static str]);

fn write_label(f: &mut fmt::Formatter<'_>, label: &str) -> fmt::Result {
    if label.starts_with(|c: char| c.is_ascii_lowercase()) {
        f.write_str(label)
    } else {
        write!(f, "`{label}`")
    }
}

impl fmt::Display for ExpectedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((last, init)) = self.0.split_last() else {
            return f.write_str("something else");
        };
        for (i, label) in init.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_label(f, label)?;
        }
        if !init.is_empty() {
            f.write_str(" or ")?;
        }
        write_label(f, last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;

    #[test]
    fn test_syntax_error_message() {
        let err = ParseError::Syntax {
            expected: vec!["FROM"],
            found: TokenKind::Eof,
            span: Span::new(9, 9),
        };
        assert_eq!(err.to_string(), "expected `FROM`, found end of input at 9..9");
        assert_eq!(err.message(), "expected `FROM`, found end of input");
    }

    #[test]
    fn test_expected_list_rendering() {
        let err = ParseError::Syntax {
            expected: vec!["BEFORE", "AFTER", "DIFF"],
            found: TokenKind::Keyword(Keyword::Where),
            span: Span::new(0, 5),
        };
        assert_eq!(
            err.message(),
            "expected `BEFORE`, `AFTER` or `DIFF`, found `WHERE`"
        );
    }

    #[test]
    fn test_descriptive_labels_are_not_quoted() {
        let err = ParseError::Syntax {
            expected: vec!["expression", "("],
            found: TokenKind::Semicolon,
            span: Span::new(4, 5),
        };
        assert_eq!(err.message(), "expected expression or `(`, found `;`");
    }

    #[test]
    fn test_from_lex() {
        let span = Span::new(3, 8);
        assert_eq!(
            ParseError::from_lex(LexErrorKind::UnterminatedString, span),
            ParseError::Unterminated {
                construct: Construct::String,
                start: span
            }
        );
        assert_eq!(
            ParseError::from_lex(LexErrorKind::InvalidCharacter('@'), span).span(),
            span
        );
    }
}
