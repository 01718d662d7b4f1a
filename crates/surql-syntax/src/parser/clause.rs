//! SELECT modifier clauses.

use super::Parser;
use super::error::{Construct, ParseError};
use crate::ast::{
    Clause, FetchItem, GroupBy, IndexHint, OmitItem, OrderDirection, OrderItem, OrderModifier,
    OrderTarget,
};
use crate::lexer::{Keyword, TokenKind};

impl Parser {
    /// Parses clauses until the current token starts none.
    pub(super) fn parse_clauses(&mut self) -> Result<Vec<Clause>, ParseError> {
        let mut clauses = Vec::new();
        while let Some(clause) = self.parse_clause()? {
            clauses.push(clause);
        }
        Ok(clauses)
    }

    /// Parses one clause, or returns `None` without consuming anything.
    fn parse_clause(&mut self) -> Result<Option<Clause>, ParseError> {
        let Some(keyword) = self.current().as_keyword() else {
            return Ok(None);
        };
        let clause = match keyword {
            Keyword::Where => {
                self.advance();
                Clause::Where(self.parse_expr()?)
            }
            Keyword::Split => {
                self.advance();
                Clause::Split(self.parse_field_reference()?)
            }
            Keyword::Omit => {
                self.advance();
                Clause::Omit(self.parse_omit_items()?)
            }
            Keyword::Group => {
                self.advance();
                self.eat_keyword(Keyword::By);
                if self.eat_keyword(Keyword::All) {
                    Clause::Group(GroupBy::All)
                } else {
                    Clause::Group(GroupBy::Exprs(
                        self.parse_comma_separated(Self::parse_expr)?,
                    ))
                }
            }
            Keyword::Order => {
                self.advance();
                self.eat_keyword(Keyword::By);
                Clause::Order(self.parse_comma_separated(Self::parse_order_item)?)
            }
            Keyword::Limit => {
                self.advance();
                self.eat_keyword(Keyword::By);
                Clause::Limit(self.parse_expr()?)
            }
            Keyword::Start => {
                self.advance();
                self.eat_keyword(Keyword::At);
                Clause::Start(self.parse_expr()?)
            }
            Keyword::Fetch => {
                self.advance();
                Clause::Fetch(self.parse_comma_separated(Self::parse_fetch_item)?)
            }
            Keyword::Timeout => {
                self.advance();
                Clause::Timeout(self.expect_duration()?)
            }
            Keyword::Parallel => {
                self.advance();
                Clause::Parallel
            }
            Keyword::Tempfiles => {
                self.advance();
                Clause::Tempfiles
            }
            Keyword::Explain => {
                self.advance();
                Clause::Explain {
                    full: self.eat_keyword(Keyword::Full),
                }
            }
            Keyword::With => Clause::With(self.parse_index_hint()?),
            _ => return Ok(None),
        };
        Ok(Some(clause))
    }

    /// Parses OMIT entries, each optionally narrowed by `.{a, b}`.
    pub(super) fn parse_omit_items(&mut self) -> Result<Vec<OmitItem>, ParseError> {
        self.parse_comma_separated(|p| {
            let field = p.parse_field_reference()?;
            let destructure = if matches!(p.peek_kind(0), TokenKind::Dot)
                && matches!(p.peek_kind(1), TokenKind::LeftBrace)
            {
                p.advance();
                let open = p.open_delimiter(Construct::Brace);
                let names = p.parse_comma_separated(Self::expect_identifier)?;
                p.expect_closing(&TokenKind::RightBrace, open)?;
                Some(names)
            } else {
                None
            };
            Ok(OmitItem { field, destructure })
        })
    }

    fn parse_order_item(&mut self) -> Result<OrderItem, ParseError> {
        let target = if self.check_keyword(Keyword::Rand)
            && matches!(self.peek_kind(1), TokenKind::LeftParen)
        {
            self.advance();
            let open = self.open_delimiter(Construct::Paren);
            self.expect_closing(&TokenKind::RightParen, open)?;
            OrderTarget::Rand
        } else {
            OrderTarget::Expr(self.parse_expr()?)
        };

        let modifier = match self.current().as_keyword() {
            Some(Keyword::Collate) => {
                self.advance();
                Some(OrderModifier::Collate(self.parse_order_direction()))
            }
            Some(Keyword::Numeric) => {
                self.advance();
                Some(OrderModifier::Numeric(self.parse_order_direction()))
            }
            _ => self.parse_order_direction().map(OrderModifier::Direction),
        };

        Ok(OrderItem { target, modifier })
    }

    fn parse_order_direction(&mut self) -> Option<OrderDirection> {
        if self.eat_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    fn parse_fetch_item(&mut self) -> Result<FetchItem, ParseError> {
        if !self.at_edge_arrow() {
            return Ok(FetchItem::Field(self.parse_identifier()?));
        }
        let path = self.parse_edge_path()?;
        let alias = if self.eat_keyword(Keyword::As) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(FetchItem::Edge { path, alias })
    }

    /// Parses `WITH NOINDEX` or `WITH INDEX name, ...`.
    pub(super) fn parse_index_hint(&mut self) -> Result<IndexHint, ParseError> {
        self.expect_keyword(Keyword::With)?;
        if self.eat_keyword(Keyword::NoIndex) {
            return Ok(IndexHint::NoIndex);
        }
        if self.eat_keyword(Keyword::Index) {
            return Ok(IndexHint::Index(
                self.parse_comma_separated(Self::parse_identifier)?,
            ));
        }
        Err(self.error_here(&["NOINDEX", "INDEX"]))
    }
}
