//! Parser state, token cursor, source driver and statement parsing.

use core::iter::Peekable;
use std::vec;

use tracing::{debug, trace};

use super::error::{Construct, ParseError};
use crate::ast::{
    Assignment, Comment, CreateStatement, Data, FromClause, Identifier, Output, Projection,
    SelectFields, SelectItem, SelectStatement, SourceFile, SourceItem, Statement, TableRef,
    UpdateStatement,
};
use crate::dialect::Dialect;
use crate::lexer::{Duration, Keyword, Lexer, Span, Token, TokenKind};

/// Maximum nesting of expressions and subqueries. Operators chained in one
/// expression count as levels too. Sized to fit a default 2 MiB thread
/// stack in unoptimized builds.
pub const MAX_DEPTH: usize = 128;

/// Query parser.
///
/// The input is tokenized up front; the parser walks the buffered tokens
/// with arbitrary lookahead and never backtracks.
pub struct Parser {
    source: String,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    comments: Peekable<vec::IntoIter<Comment>>,
    /// Current nesting depth, bounded by [`MAX_DEPTH`].
    depth: usize,
    /// Delimiters opened and not yet closed, innermost last.
    open_delimiters: Vec<(Construct, Span)>,
}

impl Parser {
    /// Creates a new parser with uppercase-only keywords.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::from_lexer(input, Lexer::new(input))
    }

    /// Creates a parser following the keyword policy of `dialect`.
    #[must_use]
    pub fn with_dialect(input: &str, dialect: &dyn Dialect) -> Self {
        Self::from_lexer(input, Lexer::with_dialect(input, dialect))
    }

    fn from_lexer(input: &str, mut lexer: Lexer<'_>) -> Self {
        let tokens = lexer.tokenize();
        let comments = lexer.take_comments().into_iter().peekable();
        Self {
            source: input.to_owned(),
            tokens,
            pos: 0,
            comments,
            depth: 0,
            open_delimiters: Vec::new(),
        }
    }

    /// Parses the whole input as a sequence of statements and comments.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn parse_source(&mut self) -> Result<SourceFile, ParseError> {
        let mut items = Vec::new();
        loop {
            self.drain_comments(self.current().span.start, &mut items);
            if self.current().is_eof() {
                break;
            }
            let statement = self.parse_terminated_statement()?;
            items.push(SourceItem::Statement(statement));
            self.drain_comments(self.previous_span().end, &mut items);
        }
        Ok(SourceFile { items })
    }

    /// Parses the whole input, skipping statements that fail to parse.
    ///
    /// After an error the parser skips to just past the next `;` (or to the
    /// end of input) and continues. Failed statements contribute no node.
    pub fn parse_source_recovering(&mut self) -> (SourceFile, Vec<ParseError>) {
        let mut items = Vec::new();
        let mut errors = Vec::new();
        loop {
            self.drain_comments(self.current().span.start, &mut items);
            if self.current().is_eof() {
                break;
            }
            let start = self.pos;
            match self.parse_terminated_statement() {
                Ok(statement) => {
                    items.push(SourceItem::Statement(statement));
                    self.drain_comments(self.previous_span().end, &mut items);
                }
                Err(err) => {
                    debug!(error = %err, "skipping to the next statement");
                    errors.push(err);
                    self.synchronize(start);
                }
            }
        }
        (SourceFile { items }, errors)
    }

    /// Parses input that holds exactly one statement, optionally followed
    /// by `;`.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement is invalid or input remains after it.
    pub fn parse_single_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = self.parse_terminated_statement()?;
        self.expect_eof()?;
        Ok(statement)
    }

    fn parse_terminated_statement(&mut self) -> Result<Statement, ParseError> {
        self.depth = 0;
        self.open_delimiters.clear();
        trace!(offset = self.current().span.start, "statement");
        let statement = self.parse_statement()?;
        self.eat(&TokenKind::Semicolon);
        Ok(statement)
    }

    fn synchronize(&mut self, start: usize) {
        if self.pos == start && !self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        while !self.current().is_eof() {
            if self.eat(&TokenKind::Semicolon) {
                return;
            }
            self.advance();
        }
    }

    fn drain_comments(&mut self, before: usize, items: &mut Vec<SourceItem>) {
        while let Some(comment) = self.comments.next_if(|c| c.span.start < before) {
            items.push(SourceItem::Comment(comment));
        }
    }

    /// Parses a single statement. Anything that does not start with a
    /// statement keyword is parsed as an expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        match self.current().as_keyword() {
            Some(Keyword::Select) => Ok(Statement::Select(self.parse_select_statement()?)),
            Some(Keyword::Create) => Ok(Statement::Create(self.parse_create_statement()?)),
            Some(Keyword::Update) => Ok(Statement::Update(self.parse_update_statement()?)),
            _ => Ok(Statement::Expr(self.parse_expr()?)),
        }
    }

    /// Parses a SELECT statement.
    pub(super) fn parse_select_statement(&mut self) -> Result<SelectStatement, ParseError> {
        self.expect_keyword(Keyword::Select)?;

        let projection = if self.eat_keyword(Keyword::Value) {
            let expr = self.parse_expr()?;
            let alias = self.parse_optional_alias()?;
            Projection::Value { expr, alias }
        } else {
            let fields = if self.check_keyword(Keyword::From) || self.check_keyword(Keyword::Omit)
            {
                None
            } else {
                Some(self.parse_select_fields()?)
            };
            let omit = if self.eat_keyword(Keyword::Omit) {
                Some(self.parse_omit_items()?)
            } else {
                None
            };
            Projection::Fields { fields, omit }
        };

        let from = self.parse_from_clause()?;
        let clauses = self.parse_clauses()?;

        Ok(SelectStatement {
            projection,
            from,
            clauses,
        })
    }

    /// Parses a select list: a lone `*` or comma-separated items.
    pub(super) fn parse_select_fields(&mut self) -> Result<SelectFields, ParseError> {
        if self.check(&TokenKind::Star) && !matches!(self.peek_kind(1), TokenKind::Comma) {
            self.advance();
            return Ok(SelectFields::Wildcard);
        }
        let items = self.parse_comma_separated(Self::parse_select_item)?;
        Ok(SelectFields::Items(items))
    }

    fn parse_select_item(&mut self) -> Result<SelectItem, ParseError> {
        if self.eat(&TokenKind::Star) {
            return Ok(SelectItem::All);
        }
        let expr = self.parse_expr()?;
        let alias = self.parse_optional_alias()?;
        if alias.is_none() && !expr.is_reference_or_call() {
            return Err(self.error_here(&["AS"]));
        }
        Ok(SelectItem::Expr { expr, alias })
    }

    fn parse_optional_alias(&mut self) -> Result<Option<Identifier>, ParseError> {
        if self.eat_keyword(Keyword::As) {
            Ok(Some(self.parse_identifier()?))
        } else {
            Ok(None)
        }
    }

    fn parse_from_clause(&mut self) -> Result<FromClause, ParseError> {
        self.expect_keyword(Keyword::From)?;
        let only = self.eat_keyword(Keyword::Only);
        let targets = self.parse_comma_separated(Self::parse_table_ref)?;
        let with = if self.check_keyword(Keyword::With) {
            Some(self.parse_index_hint()?)
        } else {
            None
        };
        Ok(FromClause {
            only,
            targets,
            with,
        })
    }

    /// Parses a table reference.
    fn parse_table_ref(&mut self) -> Result<TableRef, ParseError> {
        match self.peek_kind(0) {
            TokenKind::LeftParen => {
                let open = self.open_delimiter(Construct::Paren);
                if !self.check_keyword(Keyword::Select) {
                    return Err(self.error_here(&["SELECT"]));
                }
                self.enter()?;
                let query = self.parse_select_statement()?;
                self.leave();
                self.expect_closing(&TokenKind::RightParen, open)?;
                Ok(TableRef::Subquery(Box::new(query)))
            }
            TokenKind::LeftBracket => Ok(TableRef::Array(self.parse_array_items()?)),
            TokenKind::Identifier(_) | TokenKind::Arrow | TokenKind::LeftArrow => {
                Ok(TableRef::Field(self.parse_field_reference()?))
            }
            _ => Err(self.error_here(&["table name", "(", "["])),
        }
    }

    /// Parses a CREATE statement.
    fn parse_create_statement(&mut self) -> Result<CreateStatement, ParseError> {
        self.expect_keyword(Keyword::Create)?;
        let only = self.eat_keyword(Keyword::Only);
        let targets = self.parse_comma_separated(Self::parse_create_target)?;

        let data = match self.current().as_keyword() {
            Some(Keyword::Content) => {
                self.advance();
                Data::Content(self.parse_object()?)
            }
            Some(Keyword::Set) => {
                self.advance();
                Data::Set(self.parse_assignments()?)
            }
            Some(Keyword::Unset) => {
                self.advance();
                Data::Unset(self.parse_assignments()?)
            }
            _ => return Err(self.error_here(&["CONTENT", "SET", "UNSET"])),
        };

        let output = self.parse_output()?;
        let timeout = self.parse_timeout()?;
        let parallel = self.eat_keyword(Keyword::Parallel);

        Ok(CreateStatement {
            only,
            targets,
            data,
            output,
            timeout,
            parallel,
        })
    }

    fn parse_create_target(&mut self) -> Result<Identifier, ParseError> {
        match self.peek_kind(0) {
            TokenKind::Variable(name) => {
                let name = name.clone();
                self.advance();
                Ok(Identifier::Variable(name))
            }
            TokenKind::Identifier(_) => self.parse_identifier(),
            _ => Err(self.error_here(&["identifier", "variable"])),
        }
    }

    /// Parses an UPDATE statement.
    fn parse_update_statement(&mut self) -> Result<UpdateStatement, ParseError> {
        self.expect_keyword(Keyword::Update)?;
        let only = self.eat_keyword(Keyword::Only);
        let targets = self.parse_comma_separated(Self::parse_expr)?;

        let data = match self.current().as_keyword() {
            Some(Keyword::Content) => {
                self.advance();
                Some(Data::Content(self.parse_object()?))
            }
            Some(Keyword::Merge) => {
                self.advance();
                Some(Data::Merge(self.parse_object()?))
            }
            Some(Keyword::Patch) => {
                self.advance();
                if !self.check(&TokenKind::LeftBracket) {
                    return Err(self.error_here(&["["]));
                }
                Some(Data::Patch(self.parse_array_items()?))
            }
            Some(Keyword::Set) => {
                self.advance();
                Some(Data::Set(self.parse_assignments()?))
            }
            Some(Keyword::Unset) => {
                self.advance();
                Some(Data::Unset(self.parse_assignments()?))
            }
            _ => None,
        };

        let where_clause = if self.eat_keyword(Keyword::Where) {
            Some(self.parse_expr()?)
        } else {
            None
        };
        let output = self.parse_output()?;
        let timeout = self.parse_timeout()?;
        let parallel = self.eat_keyword(Keyword::Parallel);

        Ok(UpdateStatement {
            only,
            targets,
            data,
            where_clause,
            output,
            timeout,
            parallel,
        })
    }

    fn parse_assignments(&mut self) -> Result<Vec<Assignment>, ParseError> {
        self.parse_comma_separated(|p| {
            let field = p.parse_field_reference()?;
            p.expect(&TokenKind::Eq)?;
            let value = p.parse_expr()?;
            Ok(Assignment { field, value })
        })
    }

    /// Parses an optional `RETURN` clause.
    fn parse_output(&mut self) -> Result<Option<Output>, ParseError> {
        if !self.eat_keyword(Keyword::Return) {
            return Ok(None);
        }
        let output = match self.current().as_keyword() {
            Some(Keyword::Before) => Output::Before,
            Some(Keyword::After) => Output::After,
            Some(Keyword::Diff) => Output::Diff,
            _ => return Ok(Some(Output::Fields(self.parse_select_fields()?))),
        };
        self.advance();
        Ok(Some(output))
    }

    /// Parses an optional `TIMEOUT duration`.
    pub(super) fn parse_timeout(&mut self) -> Result<Option<Duration>, ParseError> {
        if self.eat_keyword(Keyword::Timeout) {
            Ok(Some(self.expect_duration()?))
        } else {
            Ok(None)
        }
    }

    // Token cursor

    /// Returns the current token.
    pub(super) fn current(&self) -> &Token {
        self.peek_nth(0)
    }

    /// Returns the token `n` positions ahead. Past the end this is the
    /// final `Eof` token.
    pub(super) fn peek_nth(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    pub(super) fn peek_kind(&self, n: usize) -> &TokenKind {
        &self.peek_nth(n).kind
    }

    /// Consumes the current token and returns its span. `Eof` is never
    /// consumed.
    pub(super) fn advance(&mut self) -> Span {
        let span = self.current().span;
        if !self.current().is_eof() {
            self.pos += 1;
        }
        span
    }

    /// Returns the span of the last consumed token.
    pub(super) fn previous_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => Span::default(),
        }
    }

    /// Checks if the current token is of the given kind, ignoring payloads.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.peek_kind(0)) == core::mem::discriminant(kind)
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek_kind(0), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the current token if it is of the given kind.
    pub(super) fn eat(&mut self, kind: &TokenKind) -> bool {
        let matched = self.check(kind);
        if matched {
            self.advance();
        }
        matched
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let matched = self.check_keyword(keyword);
        if matched {
            self.advance();
        }
        matched
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: &TokenKind) -> Result<Span, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&[kind.symbol().unwrap_or("token")]))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<Span, ParseError> {
        if self.check_keyword(keyword) {
            Ok(self.advance())
        } else {
            Err(self.error_here(&[keyword.as_str()]))
        }
    }

    /// Expects and returns a raw identifier.
    pub(super) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.peek_kind(0) {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error_here(&["identifier"])),
        }
    }

    /// Returns the token `n` positions ahead as a plain name: an
    /// identifier, or a keyword spelled as in the source.
    pub(super) fn peek_name(&self, n: usize) -> Option<&str> {
        let token = self.peek_nth(n);
        match &token.kind {
            TokenKind::Identifier(name) => Some(name.as_str()),
            TokenKind::Keyword(_) => Some(token.lexeme(&self.source)),
            _ => None,
        }
    }

    /// Expects a name where keywords carry no meaning: object keys, record
    /// keys and segments after `.`.
    pub(super) fn expect_name(&mut self) -> Result<String, ParseError> {
        let name = self
            .peek_name(0)
            .map(str::to_owned)
            .ok_or_else(|| self.error_here(&["identifier"]))?;
        self.advance();
        Ok(name)
    }

    pub(super) fn expect_duration(&mut self) -> Result<Duration, ParseError> {
        match self.peek_kind(0) {
            TokenKind::Duration(duration) => {
                let duration = *duration;
                self.advance();
                Ok(duration)
            }
            _ => Err(self.error_here(&["duration"])),
        }
    }

    /// Fails unless all input has been consumed.
    ///
    /// # Errors
    ///
    /// Returns a syntax error pointing at the first unconsumed token.
    pub fn expect_eof(&self) -> Result<(), ParseError> {
        if self.current().is_eof() {
            Ok(())
        } else {
            Err(self.error_here(&["end of input"]))
        }
    }

    /// Builds the error for the current token. Lexer error tokens become
    /// their lexical error; end of input inside an open delimiter becomes
    /// [`ParseError::Unterminated`].
    pub(super) fn error_here(&self, expected: &[&'static str]) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Error(kind) => ParseError::from_lex(*kind, token.span),
            TokenKind::Eof => match self.open_delimiters.last() {
                Some(&(construct, start)) => ParseError::Unterminated { construct, start },
                None => ParseError::unexpected(expected, token),
            },
            _ => ParseError::unexpected(expected, token),
        }
    }

    /// Consumes an opening delimiter and records it until it is closed.
    pub(super) fn open_delimiter(&mut self, construct: Construct) -> Span {
        let span = self.advance();
        self.open_delimiters.push((construct, span));
        span
    }

    /// Expects the delimiter closing the innermost open one.
    pub(super) fn expect_closing(
        &mut self,
        close: &TokenKind,
        open: Span,
    ) -> Result<Span, ParseError> {
        let span = self.expect(close)?;
        if self
            .open_delimiters
            .last()
            .is_some_and(|&(_, start)| start == open)
        {
            self.open_delimiters.pop();
        }
        Ok(span)
    }

    /// Parses `item (, item)*`.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        mut parse_item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![parse_item(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(parse_item(self)?);
        }
        Ok(items)
    }

    /// Parses a possibly empty comma-separated list between the current
    /// opening delimiter and `close`.
    pub(super) fn parse_delimited<T>(
        &mut self,
        construct: Construct,
        close: &TokenKind,
        parse_item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let open = self.open_delimiter(construct);
        let items = if self.check(close) {
            Vec::new()
        } else {
            self.parse_comma_separated(parse_item)?
        };
        self.expect_closing(close, open)?;
        Ok(items)
    }

    /// Enters one nesting level.
    pub(super) fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                span: self.current().span,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
