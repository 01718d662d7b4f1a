//! Expression AST types.

use core::fmt;

use serde::Serialize;

use super::{FieldReference, Identifier, write_separated, write_string};
use crate::lexer::Duration;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Literal {
    /// String literal, without quotes.
    String(String),
    /// Unsigned integer literal.
    Number(u64),
    /// Duration literal.
    Duration(Duration),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write_string(f, s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Duration(d) => write!(f, "{d}"),
        }
    }
}

/// Precedence levels of binary operators, lowest binding first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Precedence {
    Or,
    And,
    Comparison,
    Additive,
    Multiplicative,
}

/// Binary operators. All of them are left-associative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    // Logical
    Or,
    And,

    // Comparison
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    Contains,
    Inside,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Returns the canonical spelling of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Contains => "CONTAINS",
            Self::Inside => "INSIDE",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        }
    }

    /// Returns the precedence level the operator belongs to.
    #[must_use]
    pub const fn level(&self) -> Precedence {
        match self {
            Self::Or => Precedence::Or,
            Self::And => Precedence::And,
            Self::Eq
            | Self::NotEq
            | Self::Gt
            | Self::Lt
            | Self::GtEq
            | Self::LtEq
            | Self::Contains
            | Self::Inside => Precedence::Comparison,
            Self::Add | Self::Sub => Precedence::Additive,
            Self::Mul | Self::Div | Self::Mod => Precedence::Multiplicative,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `namespace::function`, optionally with an argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespaceCall {
    pub namespace: String,
    pub function: String,
    /// `None` when no parentheses were written.
    pub args: Option<Vec<Expr>>,
}

impl fmt::Display for NamespaceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.namespace, self.function)?;
        if let Some(args) = &self.args {
            f.write_str("(")?;
            write_separated(f, args, ", ")?;
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// What a function call applies its arguments to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Callee {
    /// `count(...)`, `string.len(...)`, `person:tobie(...)`
    Identifier(Identifier),
    /// A chain containing a record id, `person:tobie.name(...)`
    Path(Vec<Identifier>),
    /// `math::max(...)(...)`
    Namespace(NamespaceCall),
}

impl fmt::Display for Callee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::Path(segments) => write_separated(f, segments, "."),
            Self::Namespace(call) => write!(f, "{call}"),
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    pub callee: Callee,
    pub args: Vec<Expr>,
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        write_separated(f, &self.args, ", ")?;
        f.write_str(")")
    }
}

/// Key of an object literal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ObjectKey {
    Raw(String),
    Dotted(Vec<String>),
    String(String),
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(name) => f.write_str(name),
            Self::Dotted(segments) => f.write_str(&segments.join(".")),
            Self::String(s) => write_string(f, s),
        }
    }
}

/// One `key: value` pair of an object literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub key: ObjectKey,
    pub value: Expr,
}

impl fmt::Display for ObjectEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// An object literal. Entries keep their source order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Object {
    pub entries: Vec<ObjectEntry>,
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return f.write_str("{}");
        }
        f.write_str("{ ")?;
        write_separated(f, &self.entries, ", ")?;
        f.write_str(" }")
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A field, record or edge reference.
    Field(FieldReference),

    /// `$name`
    Variable(String),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A function call.
    Call(FunctionCall),

    /// A namespace call, with or without arguments.
    NamespaceCall(NamespaceCall),

    /// `{ key: value, ... }`
    Object(Object),

    /// `[a, b, ...]`
    Array(Vec<Expr>),

    /// Parenthesized expression.
    Paren(Box<Expr>),
}

impl Expr {
    /// Creates a reference to a raw name.
    #[must_use]
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(FieldReference::raw(name))
    }

    /// Creates a new number literal.
    #[must_use]
    pub const fn number(value: u64) -> Self {
        Self::Literal(Literal::Number(value))
    }

    /// Creates a new string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Returns true for references, function calls and namespace calls,
    /// the expressions a select list accepts without an alias.
    #[must_use]
    pub const fn is_reference_or_call(&self) -> bool {
        matches!(self, Self::Field(_) | Self::Call(_) | Self::NamespaceCall(_))
    }
}

/// Writes `expr` as an operand of an operator at level `parent`, adding
/// parentheses when the tree shape would not survive re-parsing.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    parent: Precedence,
    right: bool,
) -> fmt::Result {
    if let Expr::Binary { op, .. } = expr {
        let level = op.level();
        if level < parent || (right && level == parent) {
            return write!(f, "({expr})");
        }
    }
    write!(f, "{expr}")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::Field(field) => write!(f, "{field}"),
            Self::Variable(name) => write!(f, "${name}"),
            Self::Binary { left, op, right } => {
                write_operand(f, left, op.level(), false)?;
                write!(f, " {op} ")?;
                write_operand(f, right, op.level(), true)
            }
            Self::Call(call) => write!(f, "{call}"),
            Self::NamespaceCall(call) => write!(f, "{call}"),
            Self::Object(object) => write!(f, "{object}"),
            Self::Array(items) => {
                f.write_str("[")?;
                write_separated(f, items, ", ")?;
                f.write_str("]")
            }
            Self::Paren(inner) => write!(f, "({inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_levels_are_ordered() {
        assert!(BinaryOp::Mul.level() > BinaryOp::Add.level());
        assert!(BinaryOp::Add.level() > BinaryOp::Contains.level());
        assert!(BinaryOp::Eq.level() > BinaryOp::And.level());
        assert!(BinaryOp::And.level() > BinaryOp::Or.level());
    }

    #[test]
    fn test_binary_display_adds_needed_parens() {
        // (1 + 2) * 3 built without a Paren node
        let expr = Expr::number(1)
            .binary(BinaryOp::Add, Expr::number(2))
            .binary(BinaryOp::Mul, Expr::number(3));
        assert_eq!(expr.to_string(), "(1 + 2) * 3");

        // a - (b - c)
        let expr = Expr::field("a").binary(
            BinaryOp::Sub,
            Expr::field("b").binary(BinaryOp::Sub, Expr::field("c")),
        );
        assert_eq!(expr.to_string(), "a - (b - c)");
    }

    #[test]
    fn test_binary_display_left_assoc_without_parens() {
        let expr = Expr::field("a")
            .binary(BinaryOp::Sub, Expr::field("b"))
            .binary(BinaryOp::Sub, Expr::field("c"));
        assert_eq!(expr.to_string(), "a - b - c");
    }

    #[test]
    fn test_object_display() {
        let object = Object {
            entries: vec![
                ObjectEntry {
                    key: ObjectKey::Raw(String::from("name")),
                    value: Expr::string("Tobie"),
                },
                ObjectEntry {
                    key: ObjectKey::String(String::from("the age")),
                    value: Expr::number(33),
                },
            ],
        };
        assert_eq!(object.to_string(), "{ name: 'Tobie', 'the age': 33 }");
        assert_eq!(Object::default().to_string(), "{}");
    }

    #[test]
    fn test_namespace_call_display() {
        let bare = NamespaceCall {
            namespace: String::from("time"),
            function: String::from("now"),
            args: None,
        };
        assert_eq!(bare.to_string(), "time::now");
        let called = NamespaceCall {
            args: Some(vec![Expr::number(1), Expr::number(2)]),
            ..bare
        };
        assert_eq!(called.to_string(), "time::now(1, 2)");
    }

    #[test]
    fn test_is_reference_or_call() {
        assert!(Expr::field("a").is_reference_or_call());
        assert!(!Expr::number(1).is_reference_or_call());
    }
}
