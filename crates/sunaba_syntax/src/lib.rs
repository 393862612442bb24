//! Syntax front-end for the Sunaba language: tokeniser, parser, AST,
//! diagnostics.
//!
//! This crate is dependency-light and intended for reuse across the compiler
//! and future tooling.
//!
//! ## Notes
//! - This crate is intentionally syntax-only: it does not do name
//!   resolution, typing, or code generation.
//! - Both stages are pure: identical input produces identical output or an
//!   identical [`ParseError`].
//!
//! ## Examples
//! ```
//! use sunaba_syntax::compile;
//!
//! let program = compile("def add(a, b)\n    a -> b\n").unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

pub mod ast;
pub mod diagnostics;
pub mod parser;
pub mod tokeniser;

pub use ast::Program;
pub use diagnostics::ParseError;
pub use parser::parse;
pub use tokeniser::{tokenise, LineToken};

/// Tokenise and parse a source string in one step.
///
/// ## Errors
/// Returns the first [`ParseError`] from either stage.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn compile(source: &str) -> Result<Program, ParseError> {
    let lines = tokeniser::tokenise(source)?;
    parser::parse(&lines)
}
