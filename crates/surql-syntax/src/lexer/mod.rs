//! Lexer/Tokenizer
//!
//! This module provides a hand-written lexer that produces a stream of tokens
//! and keeps skipped comments on a side channel.

mod span;
mod token;
mod tokenizer;

pub use span::{LineIndex, Position, Span};
pub use token::{Comment, Duration, DurationUnit, Keyword, LexErrorKind, Token, TokenKind};
pub use tokenizer::Lexer;
