//! Query parser
//!
//! A hand-written recursive descent parser with Pratt expression parsing.
//! Statement and source-level parsing live in `parser`, name resolution in
//! `reference`, and the clause sequence in `clause`.

mod clause;
mod error;
mod expression;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;
mod reference;

pub use error::{Construct, ParseError};
pub use parser::{MAX_DEPTH, Parser};
