/// Parse a line-token sequence into an AST [`Program`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Errors
/// Returns the first [`ParseError`] encountered; the parser does not
/// recover or accumulate diagnostics.
#[tracing::instrument(skip_all, fields(line_count = lines.len()))]
pub fn parse(lines: &[LineToken]) -> Result<Program, ParseError> {
    Parser::new(lines).parse()
}
