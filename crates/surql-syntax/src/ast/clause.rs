//! Modifier clauses of SELECT statements.
//!
//! Clauses form an ordered list rather than a record: the grammar accepts
//! them in any order and any number of times, so `LIMIT 1 LIMIT 2` keeps
//! both entries. Consumers decide what duplicates mean.

use core::fmt;

use serde::Serialize;

use super::{EdgePath, Expr, FieldReference, Identifier, write_separated};
use crate::lexer::Duration;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// Returns the keyword spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// The optional suffix of an ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderModifier {
    /// `COLLATE`, `COLLATE ASC`, `COLLATE DESC`
    Collate(Option<OrderDirection>),
    /// `NUMERIC`, `NUMERIC ASC`, `NUMERIC DESC`
    Numeric(Option<OrderDirection>),
    /// `ASC` or `DESC`
    Direction(OrderDirection),
}

impl fmt::Display for OrderModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (word, direction) = match self {
            Self::Collate(direction) => ("COLLATE", *direction),
            Self::Numeric(direction) => ("NUMERIC", *direction),
            Self::Direction(direction) => return f.write_str(direction.as_str()),
        };
        f.write_str(word)?;
        if let Some(direction) = direction {
            write!(f, " {}", direction.as_str())?;
        }
        Ok(())
    }
}

/// What an ORDER BY item sorts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OrderTarget {
    Expr(Expr),
    /// `RAND()`
    Rand,
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    pub target: OrderTarget,
    pub modifier: Option<OrderModifier>,
}

impl fmt::Display for OrderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.target {
            OrderTarget::Expr(expr) => write!(f, "{expr}")?,
            OrderTarget::Rand => f.write_str("RAND()")?,
        }
        if let Some(modifier) = &self.modifier {
            write!(f, " {modifier}")?;
        }
        Ok(())
    }
}

/// An OMIT entry, optionally narrowed to some nested fields with a
/// destructuring block: `address.{city, zip}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OmitItem {
    pub field: FieldReference,
    pub destructure: Option<Vec<String>>,
}

impl fmt::Display for OmitItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.field)?;
        if let Some(names) = &self.destructure {
            write!(f, ".{{{}}}", names.join(", "))?;
        }
        Ok(())
    }
}

/// GROUP BY target. `ALL` and an expression list never mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GroupBy {
    All,
    Exprs(Vec<Expr>),
}

/// A FETCH entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FetchItem {
    Field(Identifier),
    Edge {
        path: EdgePath,
        alias: Option<Identifier>,
    },
}

impl fmt::Display for FetchItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(id) => write!(f, "{id}"),
            Self::Edge { path, alias } => {
                write!(f, "{path}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

/// Index usage hint, `WITH NOINDEX` or `WITH INDEX a, b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IndexHint {
    NoIndex,
    Index(Vec<Identifier>),
}

impl fmt::Display for IndexHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIndex => f.write_str("WITH NOINDEX"),
            Self::Index(names) => {
                f.write_str("WITH INDEX ")?;
                write_separated(f, names, ", ")
            }
        }
    }
}

/// A modifier clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Clause {
    Where(Expr),
    Split(FieldReference),
    Omit(Vec<OmitItem>),
    Group(GroupBy),
    Order(Vec<OrderItem>),
    Limit(Expr),
    Start(Expr),
    Fetch(Vec<FetchItem>),
    Timeout(Duration),
    Parallel,
    Tempfiles,
    Explain { full: bool },
    With(IndexHint),
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Where(expr) => write!(f, "WHERE {expr}"),
            Self::Split(field) => write!(f, "SPLIT {field}"),
            Self::Omit(items) => {
                f.write_str("OMIT ")?;
                write_separated(f, items, ", ")
            }
            Self::Group(GroupBy::All) => f.write_str("GROUP ALL"),
            Self::Group(GroupBy::Exprs(exprs)) => {
                f.write_str("GROUP BY ")?;
                write_separated(f, exprs, ", ")
            }
            Self::Order(items) => {
                f.write_str("ORDER BY ")?;
                write_separated(f, items, ", ")
            }
            Self::Limit(expr) => write!(f, "LIMIT {expr}"),
            Self::Start(expr) => write!(f, "START {expr}"),
            Self::Fetch(items) => {
                f.write_str("FETCH ")?;
                write_separated(f, items, ", ")
            }
            Self::Timeout(duration) => write!(f, "TIMEOUT {duration}"),
            Self::Parallel => f.write_str("PARALLEL"),
            Self::Tempfiles => f.write_str("TEMPFILES"),
            Self::Explain { full: false } => f.write_str("EXPLAIN"),
            Self::Explain { full: true } => f.write_str("EXPLAIN FULL"),
            Self::With(hint) => write!(f, "{hint}"),
        }
    }
}
