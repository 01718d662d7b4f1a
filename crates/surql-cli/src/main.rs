//! surql CLI
//!
//! Command-line tool for parsing and checking `SurrealQL`-style queries.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use surql_cli::CliError;
use surql_cli::report::{self, Input, OutputFormat};
use surql_syntax::dialect;

/// Parser and checker for surql query files.
#[derive(Parser)]
#[command(name = "surql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Recognize keywords regardless of case.
    #[arg(long, global = true, env = "SURQL_CASE_INSENSITIVE")]
    case_insensitive: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a file and print its syntax tree.
    Parse {
        /// Input file (standard input if absent or `-`).
        file: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Sql)]
        format: OutputFormat,
    },

    /// Report every syntax error in the given files.
    Check {
        /// Input files.
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print the token stream as JSON lines.
    Tokens {
        /// Input file (standard input if absent or `-`).
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = dialect::for_keyword_case(cli.case_insensitive);
    debug!(dialect = dialect.name(), "selected dialect");

    match cli.command {
        Commands::Parse { file, format } => {
            let input = Input::read(file.as_deref())?;
            let tree = report::parse(&input, dialect)?;
            print!("{}", report::render(&tree, format)?);
        }

        Commands::Check { files } => {
            let mut count = 0;
            for path in &files {
                let input = Input::read(Some(path.as_path()))?;
                for diagnostic in report::check(&input, dialect) {
                    println!("{diagnostic}");
                    count += 1;
                }
            }
            if count > 0 {
                return Err(CliError::Failed { count }.into());
            }
        }

        Commands::Tokens { file } => {
            let input = Input::read(file.as_deref())?;
            for line in report::token_lines(&input, dialect)? {
                println!("{line}");
            }
        }
    }

    Ok(())
}
