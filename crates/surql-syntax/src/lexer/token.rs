//! Token types for the lexer.

use core::fmt;

use serde::Serialize;

use super::Span;

/// Reserved words of the query language.
///
/// Keywords are spelled in uppercase. Whether lowercase spellings are
/// recognized is decided by the [`Dialect`](crate::dialect::Dialect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Keyword {
    // Statements
    Select,
    Create,
    Update,

    // SELECT
    Value,
    As,
    From,
    Only,
    With,
    NoIndex,
    Index,

    // Clauses
    Where,
    Split,
    Omit,
    Group,
    By,
    All,
    Order,
    Rand,
    Collate,
    Numeric,
    Asc,
    Desc,
    Limit,
    Start,
    At,
    Fetch,
    Timeout,
    Parallel,
    Tempfiles,
    Explain,
    Full,

    // Data clauses
    Content,
    Merge,
    Patch,
    Set,
    Unset,
    Return,
    Before,
    After,
    Diff,

    // Operators
    And,
    Or,
    Contains,
    Inside,
}

impl Keyword {
    const ALL: [Self; 44] = [
        Self::Select,
        Self::Create,
        Self::Update,
        Self::Value,
        Self::As,
        Self::From,
        Self::Only,
        Self::With,
        Self::NoIndex,
        Self::Index,
        Self::Where,
        Self::Split,
        Self::Omit,
        Self::Group,
        Self::By,
        Self::All,
        Self::Order,
        Self::Rand,
        Self::Collate,
        Self::Numeric,
        Self::Asc,
        Self::Desc,
        Self::Limit,
        Self::Start,
        Self::At,
        Self::Fetch,
        Self::Timeout,
        Self::Parallel,
        Self::Tempfiles,
        Self::Explain,
        Self::Full,
        Self::Content,
        Self::Merge,
        Self::Patch,
        Self::Set,
        Self::Unset,
        Self::Return,
        Self::Before,
        Self::After,
        Self::Diff,
        Self::And,
        Self::Or,
        Self::Contains,
        Self::Inside,
    ];

    /// Looks up a keyword by its exact uppercase spelling.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kw| kw.as_str() == s)
    }

    /// Looks up a keyword ignoring ASCII case.
    #[must_use]
    pub fn from_str_ignore_case(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns the keyword as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Value => "VALUE",
            Self::As => "AS",
            Self::From => "FROM",
            Self::Only => "ONLY",
            Self::With => "WITH",
            Self::NoIndex => "NOINDEX",
            Self::Index => "INDEX",
            Self::Where => "WHERE",
            Self::Split => "SPLIT",
            Self::Omit => "OMIT",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::All => "ALL",
            Self::Order => "ORDER",
            Self::Rand => "RAND",
            Self::Collate => "COLLATE",
            Self::Numeric => "NUMERIC",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Limit => "LIMIT",
            Self::Start => "START",
            Self::At => "AT",
            Self::Fetch => "FETCH",
            Self::Timeout => "TIMEOUT",
            Self::Parallel => "PARALLEL",
            Self::Tempfiles => "TEMPFILES",
            Self::Explain => "EXPLAIN",
            Self::Full => "FULL",
            Self::Content => "CONTENT",
            Self::Merge => "MERGE",
            Self::Patch => "PATCH",
            Self::Set => "SET",
            Self::Unset => "UNSET",
            Self::Return => "RETURN",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Diff => "DIFF",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Contains => "CONTAINS",
            Self::Inside => "INSIDE",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit suffix of a duration literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DurationUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
    Years,
}

impl DurationUnit {
    /// Suffixes in the order the lexer tries them. Two-character suffixes
    /// come first so `ms` is never read as `m` followed by `s`.
    pub(crate) const SUFFIXES: [(&'static str, Self); 10] = [
        ("ns", Self::Nanoseconds),
        ("µs", Self::Microseconds),
        ("μs", Self::Microseconds),
        ("ms", Self::Milliseconds),
        ("s", Self::Seconds),
        ("m", Self::Minutes),
        ("h", Self::Hours),
        ("d", Self::Days),
        ("w", Self::Weeks),
        ("y", Self::Years),
    ];

    /// Returns the canonical suffix.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
            Self::Weeks => "w",
            Self::Years => "y",
        }
    }

    /// Length of one unit in nanoseconds. A year counts as 365 days.
    #[must_use]
    pub const fn nanos(&self) -> u128 {
        const SECOND: u128 = 1_000_000_000;
        match self {
            Self::Nanoseconds => 1,
            Self::Microseconds => 1_000,
            Self::Milliseconds => 1_000_000,
            Self::Seconds => SECOND,
            Self::Minutes => 60 * SECOND,
            Self::Hours => 3_600 * SECOND,
            Self::Days => 86_400 * SECOND,
            Self::Weeks => 7 * 86_400 * SECOND,
            Self::Years => 365 * 86_400 * SECOND,
        }
    }
}

/// A duration literal such as `30s` or `5ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Duration {
    pub value: u64,
    pub unit: DurationUnit,
}

impl Duration {
    #[must_use]
    pub const fn new(value: u64, unit: DurationUnit) -> Self {
        Self { value, unit }
    }

    /// Converts to a [`std::time::Duration`], or `None` if the value does
    /// not fit.
    #[must_use]
    pub fn as_std(&self) -> Option<std::time::Duration> {
        let total = u128::from(self.value).checked_mul(self.unit.nanos())?;
        let secs = u64::try_from(total / 1_000_000_000).ok()?;
        let nanos = u32::try_from(total % 1_000_000_000).ok()?;
        Some(std::time::Duration::new(secs, nanos))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

/// A lexical failure, carried by an error token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexErrorKind {
    /// A character outside the recognized alphabet.
    InvalidCharacter(char),
    /// An integer literal that does not fit in 64 bits.
    NumberOutOfRange,
    /// A string literal without its closing quote.
    UnterminatedString,
    /// A `/*` comment without its closing `*/`.
    UnterminatedComment,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // Literals
    /// Unsigned integer literal (e.g., 42)
    Number(u64),
    /// Duration literal (e.g., 10s)
    Duration(Duration),
    /// String literal without its quotes
    String(String),

    // Names
    /// Raw identifier (e.g., person)
    Identifier(String),
    /// Variable without the `$` (e.g., $id)
    Variable(String),
    /// Reserved keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// =
    Eq,
    /// !=
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// ||
    DoublePipe,
    /// &&
    DoubleAmpersand,
    /// ->
    Arrow,
    /// <-
    LeftArrow,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// [
    LeftBracket,
    /// ]
    RightBracket,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// :
    Colon,
    /// ::
    DoubleColon,

    // Special
    /// End of input
    Eof,
    /// Lexical error
    Error(LexErrorKind),
}

impl TokenKind {
    /// Returns the fixed spelling of punctuation and operator tokens.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        let s = match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::DoublePipe => "||",
            Self::DoubleAmpersand => "&&",
            Self::Arrow => "->",
            Self::LeftArrow => "<-",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            _ => return None,
        };
        Some(s)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number `{n}`"),
            Self::Duration(d) => write!(f, "duration `{d}`"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::Variable(name) => write!(f, "variable `${name}`"),
            Self::Keyword(kw) => write!(f, "`{kw}`"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(LexErrorKind::InvalidCharacter(c)) => write!(f, "invalid character {c:?}"),
            Self::Error(LexErrorKind::NumberOutOfRange) => f.write_str("out-of-range number"),
            Self::Error(LexErrorKind::UnterminatedString) => {
                f.write_str("unterminated string literal")
            }
            Self::Error(LexErrorKind::UnterminatedComment) => f.write_str("unterminated comment"),
            other => match other.symbol() {
                Some(s) => write!(f, "`{s}`"),
                None => write!(f, "{other:?}"),
            },
        }
    }
}

/// A token with its span in the source code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Returns the source text the token was scanned from.
    #[must_use]
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start..self.span.end]
    }
}

/// A comment skipped by the lexer, kept for tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    /// Full comment text including its delimiters.
    pub text: String,
    pub span: Span,
}
