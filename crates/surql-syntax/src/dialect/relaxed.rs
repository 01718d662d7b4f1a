//! Case-insensitive keyword dialect.

use super::Dialect;

/// Accepts keywords in any ASCII case (`select`, `Select`, `SELECT`).
///
/// Identifiers that collide with a keyword can no longer be used as plain
/// names under this dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct RelaxedDialect;

impl RelaxedDialect {
    /// Creates a new relaxed dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for RelaxedDialect {
    fn name(&self) -> &'static str {
        "relaxed"
    }

    fn keywords_ignore_case(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relaxed_dialect() {
        let dialect = RelaxedDialect::new();
        assert_eq!(dialect.name(), "relaxed");
        assert!(dialect.keywords_ignore_case());
    }
}
