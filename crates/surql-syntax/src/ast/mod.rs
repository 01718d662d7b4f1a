//! Abstract Syntax Tree (AST) types for query statements.
//!
//! Every node renders back to canonical source text through `Display`.
//! Re-parsing that text yields an equal tree.

mod clause;
mod expression;
mod identifier;
mod statement;

use core::fmt;

pub use clause::{
    Clause, FetchItem, GroupBy, IndexHint, OmitItem, OrderDirection, OrderItem, OrderModifier,
    OrderTarget,
};
pub use expression::{
    BinaryOp, Callee, Expr, FunctionCall, Literal, NamespaceCall, Object, ObjectEntry, ObjectKey,
    Precedence,
};
pub use identifier::{EdgeDirection, EdgePath, FieldReference, Identifier, RecordId, RecordKey};
pub use statement::{
    Assignment, CreateStatement, Data, FromClause, Output, Projection, SelectFields, SelectItem,
    SelectStatement, SourceFile, SourceItem, Statement, TableRef, UpdateStatement,
};

pub use crate::lexer::{Comment, Duration, DurationUnit};

/// Writes a string literal. Single quotes are preferred; double quotes are
/// used when the value contains a single quote.
pub(crate) fn write_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    if s.contains('\'') {
        write!(f, "\"{s}\"")
    } else {
        write!(f, "'{s}'")
    }
}

/// Writes `items` joined by `sep`.
pub(crate) fn write_separated<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
