//! Command-line front end for `surql-syntax`.
//!
//! The `surql` binary reads query files (or standard input) and:
//!
//! - **parse** prints the syntax tree as canonical text, JSON or debug output
//! - **check** parses with error recovery and prints every diagnostic as
//!   `path:line:column: message`
//! - **tokens** prints the token stream as JSON lines
//!
//! # CLI Usage
//!
//! ```bash
//! # Canonical rendering of a file
//! surql parse queries.surql
//!
//! # JSON tree from standard input
//! echo 'SELECT * FROM person' | surql parse --format json
//!
//! # Lint several files, lowercase keywords allowed
//! surql --case-insensitive check a.surql b.surql
//! ```

pub mod error;
pub mod report;

pub use error::{CliError, Result};
pub use report::{Diagnostic, Input, OutputFormat};
