/// Statement-stack plumbing.
///
/// This chunk contains the low-level frame operations used by the line
/// driver: closing block frames on dedent and appending statements to the
/// innermost open body.
impl Parser<'_> {
    /// Close block frames until `depth` remain, attaching each completed
    /// body to the statement that opened it.
    fn close_frames(&mut self, depth: usize) {
        while self.frames.len() > depth {
            if let Some(body) = self.frames.pop() {
                self.attach_body(body);
            }
        }
    }

    /// Attach a completed body to the most recent statement of the enclosing
    /// frame. That statement is always the `if`/`while`/`def` header that
    /// opened the block, so the fallthrough arms are unreachable.
    fn attach_body(&mut self, body: Vec<Statement>) {
        if let Some(parent) = self.frames.last_mut() {
            match parent.last_mut() {
                Some(Statement::If(stmt)) => stmt.body = body,
                Some(Statement::While(stmt)) => stmt.body = body,
                _ => {}
            }
        } else {
            match self.root.last_mut() {
                Some(RootStatement::If(stmt)) => stmt.body = body,
                Some(RootStatement::While(stmt)) => stmt.body = body,
                Some(RootStatement::FunctionDeclaration(decl)) => decl.body = body,
                _ => {}
            }
        }
    }

    /// Append a statement to the innermost open body, or the program body
    /// when no block is open.
    fn push_statement(&mut self, statement: Statement) {
        if let Some(frame) = self.frames.last_mut() {
            frame.push(statement);
        } else {
            self.root.push(statement.into());
        }
    }

    /// Open a new block body for the statement just pushed and require the
    /// next line to sit deeper.
    fn open_block(&mut self, line: &LineToken) {
        self.frames.push(Vec::new());
        self.min_indent = Some(line.indent + 1);
        self.open_column = line.column;
    }
}
