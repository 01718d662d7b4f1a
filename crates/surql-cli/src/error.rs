//! Error types for the command-line tool.

use std::path::PathBuf;

/// Errors that can occur while reading input or writing results.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Failed to read an input file.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Failed to read standard input.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// The input does not parse.
    #[error("{0}")]
    Parse(crate::report::Diagnostic),

    /// Some checked inputs had errors.
    #[error("{count} error(s) found")]
    Failed {
        /// Number of diagnostics reported.
        count: usize,
    },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
