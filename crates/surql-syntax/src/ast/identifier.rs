//! Identifier, record id and graph-edge reference types.

use core::fmt;

use serde::Serialize;

use super::{write_string, write_separated};

/// The key half of a record id (`table:key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RecordKey {
    /// `person:tobie`
    Raw(String),
    /// `person:42`
    Number(u64),
    /// `person:'tobie'`
    String(String),
    /// `person:$id`
    Variable(String),
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(name) => f.write_str(name),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write_string(f, s),
            Self::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// A compound identifier addressing one record of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordId {
    pub table: String,
    pub key: RecordKey,
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.table, self.key)
    }
}

/// A name as resolved by the reference resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Identifier {
    /// `person`
    Raw(String),
    /// `address.city`; always at least two segments.
    Dotted(Vec<String>),
    /// `person:tobie`
    RecordId(RecordId),
    /// `$person`
    Variable(String),
}

impl Identifier {
    /// Creates a raw identifier.
    #[must_use]
    pub fn raw(name: impl Into<String>) -> Self {
        Self::Raw(name.into())
    }

    /// Creates a record id with a raw key.
    #[must_use]
    pub fn record(table: impl Into<String>, key: impl Into<String>) -> Self {
        Self::RecordId(RecordId {
            table: table.into(),
            key: RecordKey::Raw(key.into()),
        })
    }

    /// Creates a dotted identifier. Returns a raw identifier when given a
    /// single segment.
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty.
    #[must_use]
    pub fn dotted<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        let mut segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        assert!(!segments.is_empty(), "identifier needs at least one segment");
        if segments.len() == 1 {
            Self::Raw(segments.remove(0))
        } else {
            Self::Dotted(segments)
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(name) => f.write_str(name),
            Self::Dotted(segments) => f.write_str(&segments.join(".")),
            Self::RecordId(id) => write!(f, "{id}"),
            Self::Variable(name) => write!(f, "${name}"),
        }
    }
}

/// Direction of a graph traversal hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeDirection {
    /// `->`
    Out,
    /// `<-`
    In,
}

impl EdgeDirection {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Out => "->",
            Self::In => "<-",
        }
    }
}

/// A graph traversal of one or two hops in a single direction.
///
/// Deeper chains such as `->a->b->c` are rejected by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgePath {
    pub direction: EdgeDirection,
    pub first: Identifier,
    pub second: Option<Identifier>,
}

impl EdgePath {
    /// Number of hops, 1 or 2.
    #[must_use]
    pub const fn hops(&self) -> usize {
        if self.second.is_some() { 2 } else { 1 }
    }
}

impl fmt::Display for EdgePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arrow = self.direction.as_str();
        write!(f, "{arrow}{}", self.first)?;
        if let Some(second) = &self.second {
            write!(f, "{arrow}{second}")?;
        }
        Ok(())
    }
}

/// A reference to a field, a record, or a traversal starting at one.
///
/// A reference continues either with dotted segments or with an edge path,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldReference {
    /// A single identifier, including all-raw dotted chains.
    Ident(Identifier),
    /// A dotted chain that contains a record id, e.g. `person:tobie.name`.
    Path(Vec<Identifier>),
    /// `person:tobie->likes->post`, or `->likes` with no origin.
    Edge {
        origin: Option<Identifier>,
        path: EdgePath,
    },
}

impl FieldReference {
    /// Shorthand for a reference to a raw name.
    #[must_use]
    pub fn raw(name: impl Into<String>) -> Self {
        Self::Ident(Identifier::raw(name))
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(id) => write!(f, "{id}"),
            Self::Path(segments) => write_separated(f, segments, "."),
            Self::Edge { origin, path } => {
                if let Some(origin) = origin {
                    write!(f, "{origin}")?;
                }
                write!(f, "{path}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_display() {
        assert_eq!(Identifier::raw("person").to_string(), "person");
        assert_eq!(Identifier::dotted(["a", "b", "c"]).to_string(), "a.b.c");
        assert_eq!(Identifier::record("person", "tobie").to_string(), "person:tobie");
        assert_eq!(Identifier::Variable(String::from("id")).to_string(), "$id");
    }

    #[test]
    fn test_dotted_single_segment_is_raw() {
        assert_eq!(Identifier::dotted(["a"]), Identifier::raw("a"));
    }

    #[test]
    fn test_record_key_display() {
        let id = RecordId {
            table: String::from("person"),
            key: RecordKey::String(String::from("it's")),
        };
        assert_eq!(id.to_string(), "person:\"it's\"");
        let id = RecordId {
            table: String::from("person"),
            key: RecordKey::Number(7),
        };
        assert_eq!(id.to_string(), "person:7");
    }

    #[test]
    fn test_edge_display() {
        let edge = FieldReference::Edge {
            origin: Some(Identifier::record("person", "tobie")),
            path: EdgePath {
                direction: EdgeDirection::Out,
                first: Identifier::raw("likes"),
                second: Some(Identifier::raw("post")),
            },
        };
        assert_eq!(edge.to_string(), "person:tobie->likes->post");
    }

    #[test]
    fn test_edge_hops() {
        let path = EdgePath {
            direction: EdgeDirection::In,
            first: Identifier::raw("likes"),
            second: None,
        };
        assert_eq!(path.hops(), 1);
        assert_eq!(path.to_string(), "<-likes");
    }

    #[test]
    fn test_path_display() {
        let path = FieldReference::Path(vec![
            Identifier::record("person", "tobie"),
            Identifier::raw("name"),
        ]);
        assert_eq!(path.to_string(), "person:tobie.name");
    }
}
