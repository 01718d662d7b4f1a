//! Dialect support.
//!
//! The grammar spells its keywords in uppercase and treats them as literal
//! tokens. A dialect decides how strictly that is enforced; everything else
//! about the language is fixed.

mod relaxed;
mod strict;

pub use relaxed::RelaxedDialect;
pub use strict::StrictDialect;

/// Trait for dialect-specific lexing behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns whether keywords are recognized regardless of ASCII case.
    ///
    /// When this is `false`, `select` is an ordinary identifier.
    fn keywords_ignore_case(&self) -> bool {
        false
    }
}

/// Picks the dialect matching a keyword case policy.
#[must_use]
pub fn for_keyword_case(ignore_case: bool) -> &'static dyn Dialect {
    if ignore_case {
        &RelaxedDialect
    } else {
        &StrictDialect
    }
}
