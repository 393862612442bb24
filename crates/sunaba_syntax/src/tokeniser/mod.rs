//! Tokeniser for the Sunaba programming language.
//!
//! Converts source text into a sequence of [`LineToken`]s, handling:
//! - Per-line indentation levels via an explicit indent stack (tab = 8)
//! - Multi-character operators (`->`, `>=`, `<=`, `!=`)
//! - `#` line comments and nestable `/* ... */` block comments
//! - Per-token rows counted in codepoint units (non-BMP codepoints count
//!   as two, matching the widths recorded in token dumps)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, LineToken, Operator)
//! - `indent` - indent-stack handling

mod indent;
pub mod tokens;

pub use tokens::{LineToken, Operator, Token, TokenKind};

use crate::diagnostics::ParseError;
use tokens::identifier_kind;

/// Per-line scanning state.
///
/// `Minus`, `Comparison` and `Slash` are the "pending" states where a one- or
/// two-character token is decided by the next codepoint; the trailing
/// end-of-line sentinel gives each of them a flush opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No token in progress.
    Idle,
    /// Accumulating an identifier or keyword.
    Identifier,
    /// Accumulating a run of decimal digits.
    Literal,
    /// Just saw `-`: either `->` or the `-` operator.
    Minus,
    /// Just saw `<`, `>` or `!`: either a two-character comparison or a
    /// single-character operator. A bare `!` is an error.
    Comparison(char),
    /// Just saw `/`: either `/*` opens a block comment or the `/` operator.
    Slash,
}

/// Tokeniser state.
///
/// Lines are scanned one at a time; the indent stack and the block-comment
/// depth are the only pieces of state that survive across lines.
pub struct Tokeniser<'a> {
    source: &'a str,
    indent_stack: Vec<usize>,
    comment_depth: usize,
    lines: Vec<LineToken>,
}

impl<'a> Tokeniser<'a> {
    /// Create a new tokeniser for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            indent_stack: vec![0],
            comment_depth: 0,
            lines: Vec::new(),
        }
    }

    /// Tokenise the entire source.
    ///
    /// Blank and comment-only lines are dropped from the output but still
    /// advance the line counter, so every [`LineToken::column`] is the
    /// 1-based physical line number.
    pub fn tokenise(mut self) -> Result<Vec<LineToken>, ParseError> {
        let mut column = 0;
        for raw in self.source.split('\n') {
            column += 1;
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            self.scan_line(line, column)?;
        }
        if self.comment_depth > 0 {
            return Err(ParseError::at_line(
                column,
                "The multi-line comment is not closed",
            ));
        }
        Ok(self.lines)
    }

    fn scan_line(&mut self, line: &str, column: usize) -> Result<(), ParseError> {
        let tokens = self.scan_tokens(line, column)?;
        if tokens.is_empty() {
            return Ok(());
        }
        let indent = self.indent_level(indent::leading_space(line), column)?;
        self.lines.push(LineToken {
            column,
            indent,
            tokens,
        });
        Ok(())
    }

    /// Run the per-character state machine over one line.
    ///
    /// The character stream is extended with a `None` sentinel so every
    /// pending state flushes at end of line.
    fn scan_tokens(&mut self, line: &str, column: usize) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        let mut state = State::Idle;
        let mut buffer = String::new();
        let mut start = 0;
        let mut offset = 0;
        // Previous significant codepoint while inside a block comment. Reset
        // per line, so `*` at end of one line and `/` at the start of the
        // next do not pair up.
        let mut comment_last: Option<char> = None;

        'line: for c in line.chars().map(Some).chain(std::iter::once(None)) {
            // Inside a block comment only `/*` and `*/` are significant.
            if self.comment_depth > 0 {
                if let Some(c) = c {
                    match (comment_last, c) {
                        (Some('*'), '/') => {
                            self.comment_depth -= 1;
                            comment_last = None;
                        }
                        (Some('/'), '*') => {
                            self.comment_depth += 1;
                            comment_last = None;
                        }
                        _ => comment_last = Some(c),
                    }
                    offset += c.len_utf16();
                }
                continue;
            }

            // Each codepoint is reprocessed after a pending state flushes.
            loop {
                match state {
                    State::Idle => match c {
                        None => {}
                        Some('#') => break 'line,
                        Some(c) if c.is_whitespace() => {}
                        Some(c) if c.is_ascii_digit() => {
                            state = State::Literal;
                            start = offset;
                            buffer.push(c);
                        }
                        Some(c) if is_identifier_char(c) => {
                            state = State::Identifier;
                            start = offset;
                            buffer.push(c);
                        }
                        Some('-') => {
                            state = State::Minus;
                            start = offset;
                        }
                        Some(c @ ('<' | '>' | '!')) => {
                            state = State::Comparison(c);
                            start = offset;
                        }
                        Some('/') => {
                            state = State::Slash;
                            start = offset;
                        }
                        Some('+') => tokens.push(operator(Operator::Add, offset)),
                        Some('*') => tokens.push(operator(Operator::Mul, offset)),
                        Some('=') => tokens.push(operator(Operator::Eq, offset)),
                        Some(',') => tokens.push(Token::new(TokenKind::Separator, offset + 1)),
                        Some('(') => {
                            tokens.push(Token::new(TokenKind::ParentheseStart, offset + 1));
                        }
                        Some(')') => {
                            tokens.push(Token::new(TokenKind::ParentheseEnd, offset + 1));
                        }
                        Some('[') => tokens.push(Token::new(TokenKind::BracketStart, offset + 1)),
                        Some(']') => tokens.push(Token::new(TokenKind::BracketEnd, offset + 1)),
                        Some(c) => {
                            return Err(ParseError::at_token(
                                column,
                                offset + 1,
                                format!("Invalid character '{c}'"),
                            ));
                        }
                    },
                    State::Identifier => match c {
                        Some(c) if is_identifier_char(c) => buffer.push(c),
                        _ => {
                            let kind = identifier_kind(std::mem::take(&mut buffer));
                            tokens.push(Token::new(kind, start + 1));
                            state = State::Idle;
                            continue;
                        }
                    },
                    State::Literal => match c {
                        Some(c) if c.is_ascii_digit() => buffer.push(c),
                        _ => {
                            let value = std::mem::take(&mut buffer);
                            tokens.push(Token::new(TokenKind::NumericLiteral { value }, start + 1));
                            state = State::Idle;
                            continue;
                        }
                    },
                    State::Minus => match c {
                        Some('>') => {
                            tokens.push(Token::new(TokenKind::Assignment, start + 1));
                            state = State::Idle;
                        }
                        _ => {
                            tokens.push(operator(Operator::Sub, start));
                            state = State::Idle;
                            continue;
                        }
                    },
                    State::Comparison(first) => match (first, c) {
                        ('!', Some('=')) => {
                            tokens.push(operator(Operator::Ne, start));
                            state = State::Idle;
                        }
                        ('>', Some('=')) => {
                            tokens.push(operator(Operator::Ge, start));
                            state = State::Idle;
                        }
                        ('<', Some('=')) => {
                            tokens.push(operator(Operator::Le, start));
                            state = State::Idle;
                        }
                        ('!', _) => {
                            return Err(ParseError::at_token(
                                column,
                                start + 1,
                                "There should be only '=' after the '!'",
                            ));
                        }
                        ('>', _) => {
                            tokens.push(operator(Operator::Gt, start));
                            state = State::Idle;
                            continue;
                        }
                        _ => {
                            tokens.push(operator(Operator::Lt, start));
                            state = State::Idle;
                            continue;
                        }
                    },
                    State::Slash => match c {
                        Some('*') => {
                            self.comment_depth = 1;
                            comment_last = None;
                            state = State::Idle;
                        }
                        _ => {
                            tokens.push(operator(Operator::Div, start));
                            state = State::Idle;
                            continue;
                        }
                    },
                }
                break;
            }

            if let Some(c) = c {
                offset += c.len_utf16();
            }
        }

        Ok(tokens)
    }
}

fn operator(value: Operator, start: usize) -> Token {
    Token::new(TokenKind::Operator { value }, start + 1)
}

/// Identifier codepoints: ASCII letters and digits, `_`, `@`, `$`, `?`, `'`,
/// and every codepoint from U+0100 upwards. A digit cannot start an
/// identifier because the scanner enters the literal state first.
fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '$' | '?' | '\'') || c as u32 >= 0x100
}

/// Convenience function to tokenise a source string.
///
/// This is a shorthand for `Tokeniser::new(source).tokenise()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn tokenise(source: &str) -> Result<Vec<LineToken>, ParseError> {
    Tokeniser::new(source).tokenise()
}

// ============================================================================
// TESTS
// ============================================================================
