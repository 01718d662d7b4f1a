//! Tokenizer implementation.

use super::{Comment, Duration, DurationUnit, Keyword, LexErrorKind, Span, Token, TokenKind};
use crate::dialect::Dialect;

/// A lexer that tokenizes query input.
///
/// Whitespace and comments never reach the token stream. Comments are
/// collected on the side and can be taken with [`Lexer::take_comments`].
/// Lexical errors are returned as [`TokenKind::Error`] tokens so that
/// scanning always continues to the end of input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
    /// Whether keywords match regardless of case.
    keywords_ignore_case: bool,
    comments: Vec<Comment>,
    /// Set once an unterminated comment swallowed the rest of the input.
    pending_error: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer with uppercase-only keywords.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            keywords_ignore_case: false,
            comments: Vec::new(),
            pending_error: None,
        }
    }

    /// Creates a lexer following the keyword policy of `dialect`.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &dyn Dialect) -> Self {
        let mut lexer = Self::new(input);
        lexer.keywords_ignore_case = dialect.keywords_ignore_case();
        lexer
    }

    /// Returns the comments seen so far and clears the buffer.
    pub fn take_comments(&mut self) -> Vec<Comment> {
        core::mem::take(&mut self.comments)
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn push_comment(&mut self, start: usize) {
        self.comments.push(Comment {
            text: String::from(&self.input[start..self.pos]),
            span: Span::new(start, self.pos),
        });
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while self.peek().is_some_and(char::is_whitespace) {
                self.advance();
            }

            let start = self.pos;
            match (self.peek(), self.peek_next()) {
                // Line comments: // ..., -- ..., # ...
                (Some('/'), Some('/')) | (Some('-'), Some('-')) | (Some('#'), _) => {
                    self.skip_line();
                    self.push_comment(start);
                }
                // Block comments: /* ... */, first */ closes
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    loop {
                        match self.advance() {
                            Some('*') if self.peek() == Some('/') => {
                                self.advance();
                                self.push_comment(start);
                                break;
                            }
                            Some(_) => {}
                            None => {
                                self.pending_error = Some(Token::new(
                                    TokenKind::Error(LexErrorKind::UnterminatedComment),
                                    Span::new(start, self.pos),
                                ));
                                return;
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Creates a span from start to current position.
    fn make_span(&self) -> Span {
        Span::new(self.start, self.pos)
    }

    /// Creates a token with the current span.
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.make_span())
    }

    fn error(&self, kind: LexErrorKind) -> Token {
        self.make_token(TokenKind::Error(kind))
    }

    fn is_identifier_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '_'
    }

    fn eat_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(Self::is_identifier_char) {
            self.advance();
        }
        &self.input[start..self.pos]
    }

    /// Scans an identifier or keyword.
    fn scan_identifier(&mut self) -> Token {
        let text = self.eat_identifier();
        let keyword = if self.keywords_ignore_case {
            Keyword::from_str_ignore_case(text)
        } else {
            Keyword::from_str(text)
        };
        match keyword {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Identifier(String::from(text))),
        }
    }

    /// Scans a `$name` variable. The `$` has been consumed.
    fn scan_variable(&mut self) -> Token {
        if !self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        {
            return self.error(LexErrorKind::InvalidCharacter('$'));
        }
        let name = self.eat_identifier();
        self.make_token(TokenKind::Variable(String::from(name)))
    }

    /// Scans an integer, or a duration when a unit suffix follows directly.
    fn scan_number(&mut self) -> Token {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        let Ok(value) = self.input[self.start..self.pos].parse::<u64>() else {
            return self.error(LexErrorKind::NumberOutOfRange);
        };

        let rest = &self.input[self.pos..];
        for (suffix, unit) in DurationUnit::SUFFIXES {
            if let Some(after) = rest.strip_prefix(suffix) {
                if !after.chars().next().is_some_and(Self::is_identifier_char) {
                    self.pos += suffix.len();
                    return self.make_token(TokenKind::Duration(Duration::new(value, unit)));
                }
            }
        }

        self.make_token(TokenKind::Number(value))
    }

    /// Scans a string literal. No escapes: the first matching quote closes.
    fn scan_string(&mut self, quote: char) -> Token {
        self.advance(); // consume opening quote
        let content_start = self.pos;
        loop {
            match self.advance() {
                Some(c) if c == quote => break,
                Some(_) => {}
                None => return self.error(LexErrorKind::UnterminatedString),
            }
        }
        let content = &self.input[content_start..self.pos - quote.len_utf8()];
        self.make_token(TokenKind::String(String::from(content)))
    }

    /// Returns `double` and consumes the next character if it is `second`,
    /// otherwise returns `single`.
    fn either(&mut self, second: char, double: TokenKind, single: TokenKind) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(token) = self.pending_error.take() {
            return token;
        }
        self.skip_whitespace_and_comments();
        if let Some(token) = self.pending_error.take() {
            return token;
        }
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '[' => self.make_token(TokenKind::LeftBracket),
            ']' => self.make_token(TokenKind::RightBracket),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '=' => self.make_token(TokenKind::Eq),

            // Potentially multi-character tokens
            ':' => self.either(':', TokenKind::DoubleColon, TokenKind::Colon),
            '-' => self.either('>', TokenKind::Arrow, TokenKind::Minus),
            '>' => self.either('=', TokenKind::GtEq, TokenKind::Gt),
            '<' => match self.peek() {
                Some('=') => {
                    self.advance();
                    self.make_token(TokenKind::LtEq)
                }
                Some('-') => {
                    self.advance();
                    self.make_token(TokenKind::LeftArrow)
                }
                _ => self.make_token(TokenKind::Lt),
            },
            '!' if self.peek() == Some('=') => {
                self.advance();
                self.make_token(TokenKind::NotEq)
            }
            '|' if self.peek() == Some('|') => {
                self.advance();
                self.make_token(TokenKind::DoublePipe)
            }
            '&' if self.peek() == Some('&') => {
                self.advance();
                self.make_token(TokenKind::DoubleAmpersand)
            }

            // String literals
            '\'' | '"' => {
                self.pos = self.start;
                self.scan_string(c)
            }

            '$' => self.scan_variable(),

            // Numbers and durations
            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }

            // Identifiers and keywords
            c if c.is_ascii_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_identifier()
            }

            c => self.error(LexErrorKind::InvalidCharacter(c)),
        }
    }

    /// Tokenizes the entire input. The last token is always `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::RelaxedDialect;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).into_iter().map(|t| t.kind).collect()
    }

    fn ident(name: &str) -> TokenKind {
        TokenKind::Identifier(String::from(name))
    }

    #[test]
    fn test_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_eof());
    }

    #[test]
    fn test_whitespace_only() {
        assert_eq!(token_kinds("   \n\t  "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_line_comments() {
        for input in [
            "SELECT -- comment\nFROM",
            "SELECT // comment\nFROM",
            "SELECT # comment\nFROM",
        ] {
            assert_eq!(
                token_kinds(input),
                vec![
                    TokenKind::Keyword(Keyword::Select),
                    TokenKind::Keyword(Keyword::From),
                    TokenKind::Eof,
                ]
            );
        }
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        assert_eq!(
            token_kinds("a /* one /* two */ b"),
            vec![ident("a"), ident("b"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_comments_side_channel() {
        let mut lexer = Lexer::new("-- head\nSELECT /* inline */ x");
        let _ = lexer.tokenize();
        let comments = lexer.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, "-- head");
        assert_eq!(comments[0].span, Span::new(0, 7));
        assert_eq!(comments[1].text, "/* inline */");
        assert!(lexer.take_comments().is_empty());
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tokens = tokenize("a /* never closed");
        assert_eq!(tokens[0].kind, ident("a"));
        assert_eq!(
            tokens[1].kind,
            TokenKind::Error(LexErrorKind::UnterminatedComment)
        );
        assert_eq!(tokens[1].span, Span::new(2, 17));
        assert!(tokens[2].is_eof());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            token_kinds("SELECT select Select"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                ident("select"),
                ident("Select"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_relaxed_dialect_keywords() {
        let kinds: Vec<_> = Lexer::with_dialect("select From", &RelaxedDialect)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Keyword(Keyword::From),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(
            token_kinds("foo bar_baz _qux a1"),
            vec![
                ident("foo"),
                ident("bar_baz"),
                ident("_qux"),
                ident("a1"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_non_ascii_identifier_is_invalid() {
        let kinds = token_kinds("é");
        assert_eq!(
            kinds[0],
            TokenKind::Error(LexErrorKind::InvalidCharacter('é'))
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            token_kinds("42 0 123456789"),
            vec![
                TokenKind::Number(42),
                TokenKind::Number(0),
                TokenKind::Number(123_456_789),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_out_of_range() {
        let kinds = token_kinds("99999999999999999999999");
        assert_eq!(kinds[0], TokenKind::Error(LexErrorKind::NumberOutOfRange));
    }

    #[test]
    fn test_durations() {
        let expected = [
            ("5ns", DurationUnit::Nanoseconds),
            ("5µs", DurationUnit::Microseconds),
            ("5μs", DurationUnit::Microseconds),
            ("5ms", DurationUnit::Milliseconds),
            ("5s", DurationUnit::Seconds),
            ("5m", DurationUnit::Minutes),
            ("5h", DurationUnit::Hours),
            ("5d", DurationUnit::Days),
            ("5w", DurationUnit::Weeks),
            ("5y", DurationUnit::Years),
        ];
        for (input, unit) in expected {
            assert_eq!(
                token_kinds(input),
                vec![TokenKind::Duration(Duration::new(5, unit)), TokenKind::Eof],
                "{input}"
            );
        }
    }

    #[test]
    fn test_duration_requires_adjacent_suffix() {
        assert_eq!(
            token_kinds("5 s"),
            vec![TokenKind::Number(5), ident("s"), TokenKind::Eof]
        );
        assert_eq!(
            token_kinds("5sec"),
            vec![TokenKind::Number(5), ident("sec"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds(r#"'hello' "world" 'say "hi"'"#),
            vec![
                TokenKind::String(String::from("hello")),
                TokenKind::String(String::from("world")),
                TokenKind::String(String::from("say \"hi\"")),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_has_no_escapes() {
        assert_eq!(
            token_kinds(r"'a\' b"),
            vec![TokenKind::String(String::from("a\\")), ident("b"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_string() {
        let tokens = tokenize("x = 'open");
        assert_eq!(
            tokens[2].kind,
            TokenKind::Error(LexErrorKind::UnterminatedString)
        );
        assert_eq!(tokens[2].span, Span::new(4, 9));
    }

    #[test]
    fn test_variables() {
        assert_eq!(
            token_kinds("$id $_x"),
            vec![
                TokenKind::Variable(String::from("id")),
                TokenKind::Variable(String::from("_x")),
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            token_kinds("$ id")[0],
            TokenKind::Error(LexErrorKind::InvalidCharacter('$'))
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = != < <= > >= || &&"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::DoublePipe,
                TokenKind::DoubleAmpersand,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_single_pipe_and_bang_are_invalid() {
        assert_eq!(
            token_kinds("|")[0],
            TokenKind::Error(LexErrorKind::InvalidCharacter('|'))
        );
        assert_eq!(
            token_kinds("!")[0],
            TokenKind::Error(LexErrorKind::InvalidCharacter('!'))
        );
    }

    #[test]
    fn test_edge_arrows() {
        assert_eq!(
            token_kinds("person->likes<-user"),
            vec![
                ident("person"),
                TokenKind::Arrow,
                ident("likes"),
                TokenKind::LeftArrow,
                ident("user"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_delimiters() {
        assert_eq!(
            token_kinds("( ) [ ] { } , ; . : ::"),
            vec![
                TokenKind::LeftParen,
                TokenKind::RightParen,
                TokenKind::LeftBracket,
                TokenKind::RightBracket,
                TokenKind::LeftBrace,
                TokenKind::RightBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Dot,
                TokenKind::Colon,
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_record_id_tokens() {
        assert_eq!(
            token_kinds("person:tobie"),
            vec![ident("person"), TokenKind::Colon, ident("tobie"), TokenKind::Eof]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = tokenize("SELECT id");
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(7, 9));
    }

    #[test]
    fn test_scanning_continues_after_error() {
        assert_eq!(
            token_kinds("a @ b"),
            vec![
                ident("a"),
                TokenKind::Error(LexErrorKind::InvalidCharacter('@')),
                ident("b"),
                TokenKind::Eof,
            ]
        );
    }
}
