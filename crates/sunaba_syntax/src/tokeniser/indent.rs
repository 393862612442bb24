//! Indentation handling for the Sunaba tokeniser.
//!
//! Implements the offside rule with an explicit stack of seen space counts,
//! so a dedent can be validated by membership instead of inferred from
//! whitespace diffs.

use super::Tokeniser;
use crate::diagnostics::ParseError;

impl Tokeniser<'_> {
    /// Map a line's leading-space count to its indent level.
    ///
    /// The stack starts as `[0]`. A count already on the stack truncates the
    /// stack to that entry; a count above the top pushes a new level; a count
    /// below the top that is not on the stack is an error.
    pub(super) fn indent_level(&mut self, space: usize, column: usize) -> Result<usize, ParseError> {
        if let Some(position) = self.indent_stack.iter().position(|&seen| seen == space) {
            self.indent_stack.truncate(position + 1);
            return Ok(position);
        }
        let top = self.indent_stack.last().copied().unwrap_or(0);
        if space > top {
            self.indent_stack.push(space);
            Ok(self.indent_stack.len() - 1)
        } else {
            Err(ParseError::at_line(column, "Invalid indent space"))
        }
    }
}

/// Measure a line's leading whitespace. Tabs widen to 8; any other
/// whitespace counts as 1.
pub(super) fn leading_space(line: &str) -> usize {
    let mut space = 0;
    for c in line.chars() {
        if c == '\t' {
            space += 8;
        } else if c.is_whitespace() {
            space += 1;
        } else {
            break;
        }
    }
    space
}
