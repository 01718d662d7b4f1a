//! Statement AST types.

use core::fmt;

use serde::Serialize;

use super::{Clause, Expr, FieldReference, Identifier, IndexHint, Object, OmitItem, write_separated};
use crate::lexer::{Comment, Duration};

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectItem {
    /// `*` inside a longer list.
    All,
    /// An expression, optionally aliased. Without an alias the expression is
    /// a reference or a call.
    Expr {
        expr: Expr,
        alias: Option<Identifier>,
    },
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("*"),
            Self::Expr { expr, alias } => {
                write!(f, "{expr}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
                Ok(())
            }
        }
    }
}

/// A select list: a lone `*` or comma-separated items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectFields {
    Wildcard,
    Items(Vec<SelectItem>),
}

impl fmt::Display for SelectFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("*"),
            Self::Items(items) => write_separated(f, items, ", "),
        }
    }
}

/// What a SELECT produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Projection {
    /// `SELECT VALUE expr [AS alias]`
    Value {
        expr: Expr,
        alias: Option<Identifier>,
    },
    /// `SELECT [fields] [OMIT ...]`
    Fields {
        fields: Option<SelectFields>,
        omit: Option<Vec<OmitItem>>,
    },
}

/// A table reference in FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TableRef {
    /// A table, record, path or edge reference.
    Field(FieldReference),
    /// `(SELECT ...)`
    Subquery(Box<SelectStatement>),
    /// `[expr, ...]`
    Array(Vec<Expr>),
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::Subquery(select) => write!(f, "({select})"),
            Self::Array(items) => {
                f.write_str("[")?;
                write_separated(f, items, ", ")?;
                f.write_str("]")
            }
        }
    }
}

/// The mandatory FROM clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FromClause {
    pub only: bool,
    pub targets: Vec<TableRef>,
    /// A `WITH` hint written directly after the targets.
    pub with: Option<IndexHint>,
}

impl fmt::Display for FromClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FROM ")?;
        if self.only {
            f.write_str("ONLY ")?;
        }
        write_separated(f, &self.targets, ", ")?;
        if let Some(hint) = &self.with {
            write!(f, " {hint}")?;
        }
        Ok(())
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectStatement {
    pub projection: Projection,
    pub from: FromClause,
    /// Modifier clauses in source order, duplicates included.
    pub clauses: Vec<Clause>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT")?;
        match &self.projection {
            Projection::Value { expr, alias } => {
                write!(f, " VALUE {expr}")?;
                if let Some(alias) = alias {
                    write!(f, " AS {alias}")?;
                }
            }
            Projection::Fields { fields, omit } => {
                if let Some(fields) = fields {
                    write!(f, " {fields}")?;
                }
                if let Some(omit) = omit {
                    f.write_str(" OMIT ")?;
                    write_separated(f, omit, ", ")?;
                }
            }
        }
        write!(f, " {}", self.from)?;
        for clause in &self.clauses {
            write!(f, " {clause}")?;
        }
        Ok(())
    }
}

/// `field = value` inside SET or UNSET.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub field: FieldReference,
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.field, self.value)
    }
}

/// The data clause of CREATE and UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Data {
    Content(Object),
    /// UPDATE only.
    Merge(Object),
    /// UPDATE only.
    Patch(Vec<Expr>),
    Set(Vec<Assignment>),
    Unset(Vec<Assignment>),
}

impl fmt::Display for Data {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Content(object) => write!(f, "CONTENT {object}"),
            Self::Merge(object) => write!(f, "MERGE {object}"),
            Self::Patch(items) => {
                f.write_str("PATCH [")?;
                write_separated(f, items, ", ")?;
                f.write_str("]")
            }
            Self::Set(assignments) => {
                f.write_str("SET ")?;
                write_separated(f, assignments, ", ")
            }
            Self::Unset(assignments) => {
                f.write_str("UNSET ")?;
                write_separated(f, assignments, ", ")
            }
        }
    }
}

/// `RETURN BEFORE | AFTER | DIFF | fields`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Output {
    Before,
    After,
    Diff,
    Fields(SelectFields),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("RETURN BEFORE"),
            Self::After => f.write_str("RETURN AFTER"),
            Self::Diff => f.write_str("RETURN DIFF"),
            Self::Fields(fields) => write!(f, "RETURN {fields}"),
        }
    }
}

fn write_tail(
    f: &mut fmt::Formatter<'_>,
    output: Option<&Output>,
    timeout: Option<&Duration>,
    parallel: bool,
) -> fmt::Result {
    if let Some(output) = output {
        write!(f, " {output}")?;
    }
    if let Some(timeout) = timeout {
        write!(f, " TIMEOUT {timeout}")?;
    }
    if parallel {
        f.write_str(" PARALLEL")?;
    }
    Ok(())
}

/// A CREATE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateStatement {
    pub only: bool,
    /// Tables, variables or record ids.
    pub targets: Vec<Identifier>,
    pub data: Data,
    pub output: Option<Output>,
    pub timeout: Option<Duration>,
    pub parallel: bool,
}

impl fmt::Display for CreateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.only {
            f.write_str("ONLY ")?;
        }
        write_separated(f, &self.targets, ", ")?;
        write!(f, " {}", self.data)?;
        write_tail(f, self.output.as_ref(), self.timeout.as_ref(), self.parallel)
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateStatement {
    pub only: bool,
    pub targets: Vec<Expr>,
    pub data: Option<Data>,
    pub where_clause: Option<Expr>,
    pub output: Option<Output>,
    pub timeout: Option<Duration>,
    pub parallel: bool,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UPDATE ")?;
        if self.only {
            f.write_str("ONLY ")?;
        }
        write_separated(f, &self.targets, ", ")?;
        if let Some(data) = &self.data {
            write!(f, " {data}")?;
        }
        if let Some(condition) = &self.where_clause {
            write!(f, " WHERE {condition}")?;
        }
        write_tail(f, self.output.as_ref(), self.timeout.as_ref(), self.parallel)
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Select(SelectStatement),
    Create(CreateStatement),
    Update(UpdateStatement),
    /// Any input that does not start with a statement keyword.
    Expr(Expr),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::Create(create) => write!(f, "{create}"),
            Self::Update(update) => write!(f, "{update}"),
            Self::Expr(expr) => write!(f, "{expr}"),
        }
    }
}

/// A top-level entry of a source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SourceItem {
    Statement(Statement),
    Comment(Comment),
}

/// A parsed source file: statements and the comments between them, in
/// source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceFile {
    pub items: Vec<SourceItem>,
}

impl SourceFile {
    /// Iterates over the statements, skipping comments.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Statement(statement) => Some(statement),
            SourceItem::Comment(_) => None,
        })
    }

    /// Iterates over the top-level comments.
    pub fn comments(&self) -> impl Iterator<Item = &Comment> {
        self.items.iter().filter_map(|item| match item {
            SourceItem::Comment(comment) => Some(comment),
            SourceItem::Statement(_) => None,
        })
    }
}

impl fmt::Display for SourceFile {
    /// Renders one item per line; statements end with `;`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for item in &self.items {
            match item {
                SourceItem::Statement(statement) => writeln!(f, "{statement};")?,
                SourceItem::Comment(comment) => writeln!(f, "{}", comment.text)?,
            }
        }
        Ok(())
    }
}
