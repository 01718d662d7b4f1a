//! Expression parsing: the Pratt loop and primary expressions.

use super::Parser;
use super::error::{Construct, ParseError};
use super::pratt::{infix_binding_power, token_to_binary_op};
use crate::ast::{
    Callee, Expr, FieldReference, FunctionCall, Literal, NamespaceCall, Object, ObjectEntry,
    ObjectKey,
};
use crate::lexer::TokenKind;

impl Parser {
    /// Parses a full expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the tokens do not form an expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    /// Parses an expression using Pratt parsing.
    ///
    /// Each folded operator adds a level to the left spine of the tree, so
    /// it counts toward [`MAX_DEPTH`](super::MAX_DEPTH) like a nested
    /// parenthesis does.
    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        self.enter()?;
        let mut lhs = self.parse_primary()?;
        let mut folded = 0;

        loop {
            let Some((l_bp, r_bp)) = infix_binding_power(self.peek_kind(0)) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            let Some(op) = token_to_binary_op(self.peek_kind(0)) else {
                break;
            };
            self.enter()?;
            folded += 1;
            self.advance();
            let rhs = self.parse_expr_bp(r_bp)?;
            lhs = lhs.binary(op, rhs);
        }

        for _ in 0..=folded {
            self.leave();
        }
        Ok(lhs)
    }

    /// Parses a primary expression.
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek_kind(0) {
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Ok(Expr::Literal(Literal::Number(n)))
            }
            TokenKind::Duration(d) => {
                let d = *d;
                self.advance();
                Ok(Expr::Literal(Literal::Duration(d)))
            }
            TokenKind::String(s) => {
                let value = s.clone();
                self.advance();
                Ok(Expr::Literal(Literal::String(value)))
            }
            TokenKind::Variable(name) => {
                let name = name.clone();
                self.advance();
                Ok(Expr::Variable(name))
            }

            TokenKind::LeftParen => {
                let open = self.open_delimiter(Construct::Paren);
                let inner = self.parse_expr()?;
                self.expect_closing(&TokenKind::RightParen, open)?;
                Ok(Expr::Paren(Box::new(inner)))
            }
            TokenKind::LeftBracket => Ok(Expr::Array(self.parse_array_items()?)),
            TokenKind::LeftBrace => Ok(Expr::Object(self.parse_object()?)),

            TokenKind::Identifier(_)
                if matches!(self.peek_kind(1), TokenKind::DoubleColon) =>
            {
                self.parse_namespace_call()
            }
            TokenKind::Identifier(_) | TokenKind::Arrow | TokenKind::LeftArrow => {
                let field = self.parse_field_reference()?;
                if !self.check(&TokenKind::LeftParen) {
                    return Ok(Expr::Field(field));
                }
                let callee = match field {
                    FieldReference::Ident(id) => Callee::Identifier(id),
                    FieldReference::Path(segments) => Callee::Path(segments),
                    FieldReference::Edge { .. } => return Ok(Expr::Field(field)),
                };
                let args = self.parse_arguments()?;
                Ok(Expr::Call(FunctionCall { callee, args }))
            }

            _ => Err(self.error_here(&["expression"])),
        }
    }

    /// Parses `namespace::function`, its optional argument list, and an
    /// optional second argument list that turns it into a call.
    fn parse_namespace_call(&mut self) -> Result<Expr, ParseError> {
        let namespace = self.expect_identifier()?;
        self.expect(&TokenKind::DoubleColon)?;
        let function = self.expect_identifier()?;
        let args = if self.check(&TokenKind::LeftParen) {
            Some(self.parse_arguments()?)
        } else {
            None
        };
        let call = NamespaceCall {
            namespace,
            function,
            args,
        };

        if self.check(&TokenKind::LeftParen) {
            let args = self.parse_arguments()?;
            return Ok(Expr::Call(FunctionCall {
                callee: Callee::Namespace(call),
                args,
            }));
        }
        Ok(Expr::NamespaceCall(call))
    }

    /// Parses `( [expr, ...] )`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.parse_delimited(Construct::Paren, &TokenKind::RightParen, Self::parse_expr)
    }

    /// Parses `[ [expr, ...] ]`.
    pub(super) fn parse_array_items(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.parse_delimited(Construct::Bracket, &TokenKind::RightBracket, Self::parse_expr)
    }

    /// Parses an object literal `{ key: value, ... }`.
    pub(super) fn parse_object(&mut self) -> Result<Object, ParseError> {
        if !self.check(&TokenKind::LeftBrace) {
            return Err(self.error_here(&["{"]));
        }
        let entries =
            self.parse_delimited(Construct::Brace, &TokenKind::RightBrace, |p| {
                let key = p.parse_object_key()?;
                p.expect(&TokenKind::Colon)?;
                let value = p.parse_expr()?;
                Ok(ObjectEntry { key, value })
            })?;
        Ok(Object { entries })
    }

    /// Parses an object key. Keys are plain names, never record ids, so they
    /// bypass reference resolution. Keyword spellings are names here.
    fn parse_object_key(&mut self) -> Result<ObjectKey, ParseError> {
        if let TokenKind::String(s) = self.peek_kind(0) {
            let key = ObjectKey::String(s.clone());
            self.advance();
            return Ok(key);
        }
        if self.peek_name(0).is_none() {
            return Err(self.error_here(&["object key"]));
        }
        let mut segments = vec![self.expect_name()?];
        while matches!(self.peek_kind(0), TokenKind::Dot) && self.peek_name(1).is_some() {
            self.advance();
            segments.push(self.expect_name()?);
        }
        if segments.len() == 1 {
            Ok(ObjectKey::Raw(segments.remove(0)))
        } else {
            Ok(ObjectKey::Dotted(segments))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, Callee, Expr, Identifier, Literal, ObjectKey};
    use crate::lexer::{Duration, DurationUnit};
    use crate::parser::{ParseError, Parser};

    fn expr(input: &str) -> Result<Expr, ParseError> {
        Parser::new(input).parse_expr()
    }

    #[test]
    fn test_expression_precedence() {
        // 1 + 2 * 3 should be parsed as 1 + (2 * 3)
        let e = expr("1 + 2 * 3").unwrap();
        if let Expr::Binary { op, right, .. } = &e {
            assert_eq!(*op, BinaryOp::Add);
            assert!(matches!(
                right.as_ref(),
                Expr::Binary {
                    op: BinaryOp::Mul,
                    ..
                }
            ));
        } else {
            panic!("Expected binary expression");
        }
    }

    #[test]
    fn test_left_associative() {
        let e = expr("a - b - c").unwrap();
        let expected = Expr::field("a")
            .binary(BinaryOp::Sub, Expr::field("b"))
            .binary(BinaryOp::Sub, Expr::field("c"));
        assert_eq!(e, expected);
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("42").unwrap(), Expr::number(42));
        assert_eq!(expr("'hi'").unwrap(), Expr::string("hi"));
        assert_eq!(
            expr("10s").unwrap(),
            Expr::Literal(Literal::Duration(Duration::new(10, DurationUnit::Seconds)))
        );
        assert_eq!(expr("$x").unwrap(), Expr::Variable(String::from("x")));
    }

    #[test]
    fn test_function_call() {
        let Expr::Call(call) = expr("a(x, y)").unwrap() else {
            panic!("Expected call");
        };
        assert_eq!(call.callee, Callee::Identifier(Identifier::raw("a")));
        assert_eq!(call.args, vec![Expr::field("x"), Expr::field("y")]);
    }

    #[test]
    fn test_empty_call() {
        let Expr::Call(call) = expr("count()").unwrap() else {
            panic!("Expected call");
        };
        assert!(call.args.is_empty());
    }

    #[test]
    fn test_namespace_call() {
        let Expr::NamespaceCall(call) = expr("time::now").unwrap() else {
            panic!("Expected namespace call");
        };
        assert_eq!(call.args, None);

        let Expr::NamespaceCall(call) = expr("math::max(1, 2)").unwrap() else {
            panic!("Expected namespace call");
        };
        assert_eq!(call.args.map(|a| a.len()), Some(2));

        assert!(matches!(
            expr("fn::make()(1)").unwrap(),
            Expr::Call(crate::ast::FunctionCall {
                callee: Callee::Namespace(_),
                ..
            })
        ));
    }

    #[test]
    fn test_object_keys() {
        let Expr::Object(object) = expr("{ a: 1, b.c: 2, 'd e': 3 }").unwrap() else {
            panic!("Expected object");
        };
        let keys: Vec<_> = object.entries.iter().map(|e| e.key.clone()).collect();
        assert_eq!(
            keys,
            vec![
                ObjectKey::Raw(String::from("a")),
                ObjectKey::Dotted(vec![String::from("b"), String::from("c")]),
                ObjectKey::String(String::from("d e")),
            ]
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(expr("[]").unwrap(), Expr::Array(vec![]));
        assert!(matches!(expr("{}").unwrap(), Expr::Object(o) if o.entries.is_empty()));
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert!(expr("[1, 2,]").is_err());
        assert!(expr("f(1,)").is_err());
    }

    #[test]
    fn test_unary_minus_rejected() {
        assert!(matches!(expr("-1"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_unclosed_paren() {
        assert!(matches!(
            expr("(1 + 2"),
            Err(ParseError::Unterminated { .. })
        ));
    }
}
