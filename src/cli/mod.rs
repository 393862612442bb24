//! CLI module for the Sunaba compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `sunaba <file>` - Tokenise and parse a file, reporting the first error
//! - `sunaba --tokens <file>` - Dump the line tokens as JSON (debug)
//! - `sunaba --ast <file>` - Dump the AST as JSON (debug)
//! - `sunaba build <file>` - Parse and write the experimental WebAssembly module
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Sunaba programming language compiler
#[derive(Parser, Debug)]
#[command(name = "sunaba")]
#[command(version = VERSION)]
#[command(about = "The Sunaba programming language compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// File to check (default action when no subcommand given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    // Debug/development flags
    /// Dump line tokens as JSON (debug)
    #[arg(long = "tokens", value_name = "FILE", conflicts_with = "file")]
    pub tokens_file: Option<PathBuf>,

    /// Dump the AST as JSON (debug)
    #[arg(long = "ast", value_name = "FILE", conflicts_with = "file")]
    pub ast_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a program and write the experimental WebAssembly module
    Build {
        /// Source file to compile
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output path for the module
        #[arg(short, long, default_value = "out.wasm")]
        output: PathBuf,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.tokens_file {
        return commands::dump_tokens(&file);
    }
    if let Some(file) = cli.ast_file {
        return commands::dump_ast(&file);
    }

    match cli.command {
        Some(Command::Build { file, output }) => commands::build_file(&file, &output),
        None => {
            if let Some(file) = cli.file {
                commands::check_file(&file)
            } else {
                // No command and no file - nothing to do
                Err(CliError::new("", ExitCode::FAILURE))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["sunaba", "program.sunaba"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.file.is_some());
    }

    #[test]
    fn test_cli_parse_build() {
        let cli = Cli::try_parse_from(["sunaba", "build", "program.sunaba"]).unwrap();
        let Some(Command::Build { output, .. }) = cli.command else {
            panic!("Expected Build command");
        };
        assert_eq!(output, PathBuf::from("out.wasm"));
    }

    #[test]
    fn test_cli_parse_build_with_output() {
        let cli =
            Cli::try_parse_from(["sunaba", "build", "program.sunaba", "-o", "add.wasm"]).unwrap();
        let Some(Command::Build { output, .. }) = cli.command else {
            panic!("Expected Build command");
        };
        assert_eq!(output, PathBuf::from("add.wasm"));
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["sunaba", "--tokens", "program.sunaba"]).unwrap();
        assert!(cli.tokens_file.is_some());

        let cli = Cli::try_parse_from(["sunaba", "--ast", "program.sunaba"]).unwrap();
        assert!(cli.ast_file.is_some());
    }

    #[test]
    fn test_cli_rejects_file_with_debug_flag() {
        assert!(Cli::try_parse_from(["sunaba", "--tokens", "a.sunaba", "b.sunaba"]).is_err());
    }
}
