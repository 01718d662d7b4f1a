//! Pratt expression parser for operator precedence.

use crate::ast::BinaryOp;
use crate::lexer::{Keyword, TokenKind};

/// Returns the infix binding power for a token.
///
/// Returns `(left_bp, right_bp)` where:
/// - Higher binding power = binds tighter
/// - Left associative: left_bp < right_bp
///
/// Returns `None` if the token is not an infix operator.
#[must_use]
pub const fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        // Logical OR (lowest precedence)
        TokenKind::Keyword(Keyword::Or) | TokenKind::DoublePipe => Some((1, 2)),

        // Logical AND
        TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => Some((3, 4)),

        // Comparison and membership
        TokenKind::Eq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::LtEq
        | TokenKind::Gt
        | TokenKind::GtEq
        | TokenKind::Keyword(Keyword::Contains | Keyword::Inside) => Some((5, 6)),

        // Additive
        TokenKind::Plus | TokenKind::Minus => Some((7, 8)),

        // Multiplicative
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((9, 10)),

        _ => None,
    }
}

/// Converts a token to a binary operator. `||` and `&&` map to the same
/// operators as `OR` and `AND`.
#[must_use]
pub const fn token_to_binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Keyword(Keyword::Or) | TokenKind::DoublePipe => Some(BinaryOp::Or),
        TokenKind::Keyword(Keyword::And) | TokenKind::DoubleAmpersand => Some(BinaryOp::And),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::GtEq => Some(BinaryOp::GtEq),
        TokenKind::LtEq => Some(BinaryOp::LtEq),
        TokenKind::Keyword(Keyword::Contains) => Some(BinaryOp::Contains),
        TokenKind::Keyword(Keyword::Inside) => Some(BinaryOp::Inside),
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Mod),
        _ => None,
    }
}
