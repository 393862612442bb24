//! Parser for the Sunaba language.
//!
//! Consumes the line-token sequence produced by [`crate::tokeniser`] and
//! builds a [`Program`]. Block structure comes from line indentation; bracket
//! and parenthesis structure comes from balanced-region scanning inside a
//! line. All binary operators share a single precedence level and associate
//! to the left.
//!
//! ## Examples
//!
//! ```
//! use sunaba_syntax::{parser, tokeniser};
//!
//! let lines = tokeniser::tokenise("x -> 1 + 2\n").unwrap();
//! let program = parser::parse(&lines).unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::tokeniser::tokens::{LineToken, Token, TokenKind};

// NOTE: This module is split across multiple files using `include!` to keep
// all parser methods in the same Rust module (preserving privacy + call
// patterns) while avoiding a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
