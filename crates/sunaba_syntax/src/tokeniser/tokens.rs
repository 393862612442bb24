//! Token types for the Sunaba tokeniser.
//!
//! Reserved words are modelled as distinct [`TokenKind`] variants rather than
//! as identifiers matched by string, so the parser's dispatch stays total and
//! exhaustive.
//!
//! ## Notes
//! - Tokens serialise in a `"type"`-tagged form so a token dump can be
//!   compared against recorded fixtures.

use serde::Serialize;
use std::fmt;

// ============================================================================
// OPERATORS
// ============================================================================

/// An operator spelling, shared between the token stream and binary AST
/// nodes. Serialises as its source spelling (`"+"`, `"!="`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelling = match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        };
        write!(f, "{spelling}")
    }
}

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the tokeniser.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum TokenKind {
    /// A word that is not a reserved keyword.
    Identifier { value: String },
    /// The `memory` keyword, always followed by an indexed access.
    Memory,
    /// The `if` keyword.
    If,
    /// The `while` keyword.
    While,
    /// The `def` keyword.
    Def,
    /// The `const` keyword.
    Const,
    /// A run of decimal digits. Numeric parsing is deferred to the parser so
    /// a leading unary minus can participate in the range check.
    NumericLiteral { value: String },
    /// An arithmetic or comparison operator.
    Operator { value: Operator },
    /// The two-character assignment arrow `->`.
    Assignment,
    /// The argument separator `,`.
    Separator,
    /// `(`
    ParentheseStart,
    /// `)`
    ParentheseEnd,
    /// `[`
    BracketStart,
    /// `]`
    BracketEnd,
}

/// A token with its kind and 1-based row (codepoint-unit offset within the
/// line; codepoints beyond the BMP occupy two units).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    #[serde(flatten)]
    pub kind: TokenKind,
    pub row: usize,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, row: usize) -> Self {
        Self { kind, row }
    }
}

/// All tokens of a single non-blank, non-comment line, together with the
/// line's column (1-based line number) and indent level.
///
/// `tokens` is never empty; blank and comment-only lines are dropped by the
/// tokeniser while still advancing the line counter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineToken {
    pub column: usize,
    pub indent: usize,
    pub tokens: Vec<Token>,
}

/// Resolve an identifier spelling to its token kind, turning reserved words
/// into their dedicated variants.
pub fn identifier_kind(value: String) -> TokenKind {
    match value.as_str() {
        "memory" => TokenKind::Memory,
        "if" => TokenKind::If,
        "while" => TokenKind::While,
        "def" => TokenKind::Def,
        "const" => TokenKind::Const,
        _ => TokenKind::Identifier { value },
    }
}
