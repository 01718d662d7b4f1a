//! Reference resolution: raw names, dotted chains, record ids and edges.
//!
//! The lexer only knows identifiers, `.`, `:` and arrows. Deciding what a run
//! of those tokens means takes one or two tokens of lookahead:
//!
//! - `ident ':' (name | number | string | variable)` is a record id;
//! - `ident '.' name ...` is a dotted chain, and a chain that contains a
//!   record id is a path;
//! - a single identifier or an all-raw chain followed by `->` or `<-` starts
//!   an edge reference.
//!
//! `.{` never continues a chain. It opens an OMIT destructuring block.
//!
//! A name after `.` or `:` may be spelled like a keyword (`a.VALUE`,
//! `person:SELECT`), since no clause can start there.

use super::Parser;
use super::error::ParseError;
use crate::ast::{EdgeDirection, EdgePath, FieldReference, Identifier, RecordId, RecordKey};
use crate::lexer::TokenKind;

impl Parser {
    /// Parses a raw name, or a record id when `:` and a key follow.
    fn parse_identifier_unit(&mut self) -> Result<Identifier, ParseError> {
        let table = self.expect_identifier()?;
        Ok(self.parse_record_key(table))
    }

    /// Turns `table` into a record id if `:` and a key follow.
    fn parse_record_key(&mut self, table: String) -> Identifier {
        if !matches!(self.peek_kind(0), TokenKind::Colon) {
            return Identifier::Raw(table);
        }
        let key = match self.peek_kind(1) {
            TokenKind::Number(n) => RecordKey::Number(*n),
            TokenKind::String(s) => RecordKey::String(s.clone()),
            TokenKind::Variable(name) => RecordKey::Variable(name.clone()),
            _ => match self.peek_name(1) {
                Some(name) => RecordKey::Raw(name.to_owned()),
                None => return Identifier::Raw(table),
            },
        };
        self.advance();
        self.advance();
        Identifier::RecordId(RecordId { table, key })
    }

    /// Returns true if the current token is a `.` that continues a chain.
    fn at_chain_dot(&self) -> bool {
        matches!(self.peek_kind(0), TokenKind::Dot) && self.peek_name(1).is_some()
    }

    /// Parses an identifier: a raw name, a dotted chain of raw names, or a
    /// record id. Never continues into a path or an edge.
    pub(super) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let first = self.parse_identifier_unit()?;
        let Identifier::Raw(name) = first else {
            return Ok(first);
        };
        let mut segments = vec![name];
        while self.at_chain_dot() {
            self.advance();
            segments.push(self.expect_name()?);
        }
        Ok(Identifier::dotted(segments))
    }

    /// Parses a field reference, including edge references with or without
    /// an origin.
    pub(super) fn parse_field_reference(&mut self) -> Result<FieldReference, ParseError> {
        if self.at_edge_arrow() {
            let path = self.parse_edge_path()?;
            return Ok(FieldReference::Edge { origin: None, path });
        }
        if !matches!(self.peek_kind(0), TokenKind::Identifier(_)) {
            return Err(self.error_here(&["identifier", "->", "<-"]));
        }

        let mut segments = vec![self.parse_identifier_unit()?];
        while self.at_chain_dot() {
            self.advance();
            let name = self.expect_name()?;
            segments.push(self.parse_record_key(name));
        }

        let all_raw = segments.iter().all(|s| matches!(s, Identifier::Raw(_)));
        if segments.len() > 1 && !all_raw {
            return Ok(FieldReference::Path(segments));
        }
        let ident = if segments.len() == 1 {
            segments.remove(0)
        } else {
            Identifier::dotted(segments.into_iter().filter_map(|s| match s {
                Identifier::Raw(name) => Some(name),
                _ => None,
            }))
        };

        if self.at_edge_arrow() {
            let path = self.parse_edge_path()?;
            return Ok(FieldReference::Edge {
                origin: Some(ident),
                path,
            });
        }
        Ok(FieldReference::Ident(ident))
    }

    pub(super) fn at_edge_arrow(&self) -> bool {
        matches!(self.peek_kind(0), TokenKind::Arrow | TokenKind::LeftArrow)
    }

    /// Parses one or two hops in a single direction.
    pub(super) fn parse_edge_path(&mut self) -> Result<EdgePath, ParseError> {
        let direction = match self.peek_kind(0) {
            TokenKind::Arrow => EdgeDirection::Out,
            TokenKind::LeftArrow => EdgeDirection::In,
            _ => return Err(self.error_here(&["->", "<-"])),
        };
        let arrow = self.peek_kind(0).clone();
        self.advance();
        let first = self.parse_identifier()?;
        let second = if self.eat(&arrow) {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        // Neither a third hop nor a change of direction is part of an edge
        // path.
        if self.at_edge_arrow() {
            return Err(self.error_here(&["end of edge path"]));
        }
        Ok(EdgePath {
            direction,
            first,
            second,
        })
    }
}
