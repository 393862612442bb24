//! Diagnostics for the Sunaba front-end.
//!
//! Every failure in the tokeniser or parser is reported as a [`ParseError`]
//! carrying a single human-readable message. The message always starts with
//! the offending line's column, optionally followed by the offending token's
//! row, so diagnostics are deterministic and easy to test against.

use std::fmt;

/// A tokenise/parse error with its location baked into the message.
///
/// The message is formatted as `"<column> <row>: <description>"` when a
/// specific token is at fault, or `"<column>: <description>"` when the whole
/// line is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    /// Create an error located at a line.
    pub fn at_line(column: usize, message: impl fmt::Display) -> Self {
        Self {
            message: format!("{column}: {message}"),
        }
    }

    /// Create an error located at a token within a line.
    pub fn at_token(column: usize, row: usize, message: impl fmt::Display) -> Self {
        Self {
            message: format!("{column} {row}: {message}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_error_format() {
        let err = ParseError::at_line(3, "Invalid indent space");
        assert_eq!(err.message, "3: Invalid indent space");
    }

    #[test]
    fn test_token_error_format() {
        let err = ParseError::at_token(2, 7, "Out of range integer value");
        assert_eq!(err.message, "2 7: Out of range integer value");
        assert_eq!(err.to_string(), err.message);
    }
}
