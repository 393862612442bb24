/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()`
/// entrypoint, plus the expression-parser state shared with the other
/// chunks.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser
///   methods in a single module while avoiding a single god file.

/// State carried by the recursive expression parser.
#[derive(Debug)]
enum ExprState {
    /// An operand is expected.
    Empty,
    /// An operand is expected under a pending prefix sign.
    PendingUnary(UnaryOperator),
    /// An operand has been parsed; an operator must follow.
    PendingBinary(Expr),
}

/// Parser state.
///
/// The statement stack has the program body at the bottom (`root`) and one
/// frame per currently-open `if`/`while`/`def` block (`frames`). Dedenting
/// truncates the stack, attaching each completed body to the statement that
/// opened it. `min_indent`/`max_indent` constrain the indent of the *next*
/// line: a block opener requires the next line to be deeper, any other
/// statement forbids the next line from being deeper.
pub struct Parser<'a> {
    lines: &'a [LineToken],
    root: Vec<RootStatement>,
    frames: Vec<Vec<Statement>>,
    min_indent: Option<usize>,
    max_indent: Option<usize>,
    /// Column of the line that opened the most recent block.
    open_column: usize,
    /// Column of the line currently being parsed.
    column: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a line-token sequence.
    pub fn new(lines: &'a [LineToken]) -> Self {
        Self {
            lines,
            root: Vec::new(),
            frames: Vec::new(),
            min_indent: None,
            max_indent: None,
            open_column: 0,
            column: 0,
        }
    }

    /// Parse the entire line-token sequence into a [`Program`].
    ///
    /// ## Errors
    /// Returns the first [`ParseError`] encountered; there is no recovery.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        let lines = self.lines;
        for line in lines {
            self.line(line)?;
        }
        if self.min_indent.is_some() {
            return Err(ParseError::at_line(
                self.open_column,
                "There is no body for the last `if` or `while` or `def` statement",
            ));
        }
        self.close_frames(0);
        Ok(Program { body: self.root })
    }
}
