//! The default dialect.

use super::Dialect;

/// Keywords must be written in uppercase, exactly as the grammar spells them.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrictDialect;

impl StrictDialect {
    /// Creates a new strict dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for StrictDialect {
    fn name(&self) -> &'static str {
        "strict"
    }
}
