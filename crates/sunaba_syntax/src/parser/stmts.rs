/// Line dispatch and statement parsing.
///
/// Each [`LineToken`] is one statement. After validating the line's indent
/// against the constraints left by the previous line, the driver truncates
/// the statement stack (closing blocks on dedent) and dispatches on the
/// line's first token.
impl Parser<'_> {
    fn line(&mut self, line: &LineToken) -> Result<(), ParseError> {
        self.column = line.column;

        if let Some(min) = self.min_indent {
            if line.indent < min {
                return Err(ParseError::at_line(line.column, "Invalid indent space"));
            }
        }
        if let Some(max) = self.max_indent {
            if line.indent > max {
                return Err(ParseError::at_line(line.column, "Invalid indent space"));
            }
        }
        self.min_indent = None;
        self.max_indent = None;

        self.close_frames(line.indent);
        if line.indent > self.frames.len() {
            return Err(ParseError::at_line(line.column, "Invalid indent space"));
        }

        let Some(first) = line.tokens.first() else {
            return Ok(());
        };
        match &first.kind {
            TokenKind::Identifier { .. } | TokenKind::Memory => self.simple_statement(line),
            TokenKind::If => self.conditional(line, false),
            TokenKind::While => self.conditional(line, true),
            TokenKind::Const => self.constant(line),
            TokenKind::Def => self.function(line),
            _ => Err(ParseError::at_token(
                line.column,
                first.row,
                "The statement cannot start with this token",
            )),
        }
    }

    /// An assignment when the line contains `->`, otherwise a bare call.
    fn simple_statement(&mut self, line: &LineToken) -> Result<(), ParseError> {
        let arrow = line
            .tokens
            .iter()
            .position(|token| token.kind == TokenKind::Assignment);
        let statement = match arrow {
            Some(split) => self.assignment(line, split)?,
            None => self.call_statement(line)?,
        };
        self.push_statement(statement);
        self.max_indent = Some(line.indent);
        Ok(())
    }

    fn assignment(&mut self, line: &LineToken, split: usize) -> Result<Statement, ParseError> {
        let arrow = &line.tokens[split];
        let right_tokens = &line.tokens[split + 1..];
        if right_tokens.is_empty() {
            return Err(ParseError::at_token(
                line.column,
                arrow.row,
                "There is no expression after the '->'",
            ));
        }
        let left_tokens = &line.tokens[..split];
        let left = match self.expression(left_tokens)? {
            Expr::Identifier(identifier) => AssignTarget::Identifier(identifier),
            Expr::Member(member) => AssignTarget::Member(member),
            _ => {
                return Err(ParseError::at_token(
                    line.column,
                    left_tokens[0].row,
                    "The left side of the '->' must be a variable or a memory element",
                ));
            }
        };
        let right = self.expression(right_tokens)?;
        Ok(Statement::Assignment(AssignmentStmt { left, right }))
    }

    /// The only expression allowed to stand alone as a statement is a call.
    fn call_statement(&mut self, line: &LineToken) -> Result<Statement, ParseError> {
        let first_row = line.tokens[0].row;
        match self.expression(&line.tokens)? {
            Expr::Call(call) => Ok(Statement::ExpressionStatement(ExpressionStmt::new(call))),
            _ => Err(ParseError::at_token(
                line.column,
                first_row,
                "Only a function call can be used as a statement",
            )),
        }
    }

    fn conditional(&mut self, line: &LineToken, is_while: bool) -> Result<(), ParseError> {
        let keyword = &line.tokens[0];
        let test_tokens = &line.tokens[1..];
        if test_tokens.is_empty() {
            let name = if is_while { "while" } else { "if" };
            return Err(ParseError::at_token(
                line.column,
                keyword.row,
                format!("There is no condition for the `{name}` statement"),
            ));
        }
        let test = self.expression(test_tokens)?;
        let statement = if is_while {
            Statement::While(WhileStmt {
                test,
                body: Vec::new(),
            })
        } else {
            Statement::If(IfStmt {
                test,
                body: Vec::new(),
            })
        };
        self.push_statement(statement);
        self.open_block(line);
        Ok(())
    }

    /// `const name -> expression`, only allowed at the top level.
    fn constant(&mut self, line: &LineToken) -> Result<(), ParseError> {
        let keyword = &line.tokens[0];
        if line.indent != 0 {
            return Err(ParseError::at_line(
                line.column,
                "The `const` statement must be at the top level",
            ));
        }
        let left = match line.tokens.get(1) {
            Some(Token {
                kind: TokenKind::Identifier { value },
                ..
            }) => Identifier::new(value.clone()),
            _ => {
                return Err(ParseError::at_token(
                    line.column,
                    keyword.row,
                    "The name of the constant is needed after `const`",
                ));
            }
        };
        let arrow_row = match line.tokens.get(2) {
            Some(Token {
                kind: TokenKind::Assignment,
                row,
            }) => *row,
            Some(token) => {
                return Err(ParseError::at_token(
                    line.column,
                    token.row,
                    "'->' is needed after the name of the constant",
                ));
            }
            None => {
                return Err(ParseError::at_token(
                    line.column,
                    line.tokens[1].row,
                    "'->' is needed after the name of the constant",
                ));
            }
        };
        let value_tokens = &line.tokens[3..];
        if value_tokens.is_empty() {
            return Err(ParseError::at_token(
                line.column,
                arrow_row,
                "There is no expression after the '->'",
            ));
        }
        let right = self.expression(value_tokens)?;
        self.root
            .push(RootStatement::Constant(ConstantDecl { left, right }));
        self.max_indent = Some(line.indent);
        Ok(())
    }

    /// `def name(params)`, only allowed at the top level; opens a body.
    fn function(&mut self, line: &LineToken) -> Result<(), ParseError> {
        let keyword = &line.tokens[0];
        if line.indent != 0 {
            return Err(ParseError::at_line(
                line.column,
                "The `def` statement must be at the top level",
            ));
        }
        let id = match line.tokens.get(1) {
            Some(Token {
                kind: TokenKind::Identifier { value },
                ..
            }) => Identifier::new(value.clone()),
            _ => {
                return Err(ParseError::at_token(
                    line.column,
                    keyword.row,
                    "The name of the function is needed after `def`",
                ));
            }
        };
        let open_row = match line.tokens.get(2) {
            Some(Token {
                kind: TokenKind::ParentheseStart,
                row,
            }) => *row,
            Some(token) => {
                return Err(ParseError::at_token(
                    line.column,
                    token.row,
                    "'(' is needed after the name of the function",
                ));
            }
            None => {
                return Err(ParseError::at_token(
                    line.column,
                    line.tokens[1].row,
                    "'(' is needed after the name of the function",
                ));
            }
        };
        let close = self.matching_parenthese(&line.tokens, 2)?;
        if let Some(extra) = line.tokens.get(close + 1) {
            return Err(ParseError::at_token(
                line.column,
                extra.row,
                "The function header must end after ')'",
            ));
        }
        let mut params = Vec::new();
        for slot in split_arguments(&line.tokens[3..close]) {
            match slot {
                [Token {
                    kind: TokenKind::Identifier { value },
                    ..
                }] => params.push(Identifier::new(value.clone())),
                [] => {
                    return Err(ParseError::at_token(
                        line.column,
                        open_row,
                        "The parameter of the function is empty",
                    ));
                }
                [token, ..] => {
                    return Err(ParseError::at_token(
                        line.column,
                        token.row,
                        "The parameter of the function must be an identifier",
                    ));
                }
            }
        }
        self.root.push(RootStatement::FunctionDeclaration(FunctionDecl {
            id,
            params,
            body: Vec::new(),
        }));
        self.open_block(line);
        Ok(())
    }
}
