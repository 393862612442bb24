/// Expression parsing.
///
/// The recursive parser carries an [`ExprState`]: an operand position
/// (`Empty`, or `PendingUnary` under a prefix sign) or an operator position
/// (`PendingBinary` holding the finished left operand). Bracket and
/// parenthesis contents are located by forward-scanning with an open-count
/// and parsed as independent sub-expressions.
///
/// A recursive parse naturally produces right-leaning binary trees, so the
/// public entrypoint finishes with [`rotate_left`], which rewrites the chain
/// into the left-associative normal form. There is no precedence table: all
/// operators bind equally and associate left-to-right.
impl Parser<'_> {
    /// Parse a complete expression from a token slice.
    fn expression(&self, tokens: &[Token]) -> Result<Expr, ParseError> {
        let expr = self.expr_state(tokens, ExprState::Empty)?;
        Ok(rotate_left(expr))
    }

    fn expr_state(&self, tokens: &[Token], state: ExprState) -> Result<Expr, ParseError> {
        let Some(first) = tokens.first() else {
            return Err(ParseError::at_line(self.column, "An expression is expected"));
        };
        match state {
            ExprState::PendingBinary(left) => {
                let operator = match &first.kind {
                    TokenKind::Operator { value } => *value,
                    _ => {
                        return Err(ParseError::at_token(
                            self.column,
                            first.row,
                            "An operator is needed here",
                        ));
                    }
                };
                let tail = &tokens[1..];
                if tail.is_empty() {
                    return Err(ParseError::at_token(
                        self.column,
                        first.row,
                        format!("There is no expression after the operator '{operator}'"),
                    ));
                }
                let right = self.expr_state(tail, ExprState::Empty)?;
                Ok(Expr::binary(operator, left, right))
            }
            state => self.operand(first, tokens, state),
        }
    }

    /// Parse one operand, fold or wrap a pending sign, then hand any
    /// trailing tokens back to the parser in the binary state.
    fn operand(&self, first: &Token, tokens: &[Token], state: ExprState) -> Result<Expr, ParseError> {
        let pending = match state {
            ExprState::PendingUnary(operator) => Some(operator),
            _ => None,
        };
        match &first.kind {
            TokenKind::Identifier { value } => {
                let target = Identifier::new(value.clone());
                match tokens.get(1).map(|token| &token.kind) {
                    Some(TokenKind::BracketStart) => {
                        let (property, rest) = self.bracket_property(tokens, 1)?;
                        let member = Expr::Member(Box::new(MemberExpr { target, property }));
                        self.continue_operand(member, rest, pending)
                    }
                    Some(TokenKind::ParentheseStart) => {
                        let (arguments, rest) = self.call_arguments(tokens, 1)?;
                        let call = Expr::Call(CallExpr {
                            callee: target,
                            arguments,
                        });
                        self.continue_operand(call, rest, pending)
                    }
                    _ => self.continue_operand(Expr::Identifier(target), &tokens[1..], pending),
                }
            }
            TokenKind::Memory => {
                if !matches!(
                    tokens.get(1).map(|token| &token.kind),
                    Some(TokenKind::BracketStart)
                ) {
                    return Err(ParseError::at_token(
                        self.column,
                        first.row,
                        "'[' is needed after `memory`",
                    ));
                }
                let (property, rest) = self.bracket_property(tokens, 1)?;
                let member = Expr::Member(Box::new(MemberExpr {
                    target: Identifier::new("memory"),
                    property,
                }));
                self.continue_operand(member, rest, pending)
            }
            TokenKind::NumericLiteral { value } => {
                let negative = pending == Some(UnaryOperator::Minus);
                let literal = self.numeric_literal(value, first.row, negative)?;
                // A minus is folded into the literal; a plus still wraps.
                let sign = if negative { None } else { pending };
                self.continue_operand(literal, &tokens[1..], sign)
            }
            TokenKind::Operator { value } => {
                let sign = match value {
                    Operator::Add => UnaryOperator::Plus,
                    Operator::Sub => UnaryOperator::Minus,
                    _ => {
                        return Err(ParseError::at_token(
                            self.column,
                            first.row,
                            format!("An expression cannot start with the operator '{value}'"),
                        ));
                    }
                };
                if pending.is_some() {
                    return Err(ParseError::at_token(
                        self.column,
                        first.row,
                        "Only one '+' or '-' can precede an expression",
                    ));
                }
                let tail = &tokens[1..];
                if tail.is_empty() {
                    return Err(ParseError::at_token(
                        self.column,
                        first.row,
                        format!("There is no expression after the operator '{value}'"),
                    ));
                }
                self.expr_state(tail, ExprState::PendingUnary(sign))
            }
            TokenKind::ParentheseStart => {
                let close = self.matching_parenthese(tokens, 0)?;
                let inner = &tokens[1..close];
                if inner.is_empty() {
                    return Err(ParseError::at_token(
                        self.column,
                        first.row,
                        "There is no expression inside the '()'",
                    ));
                }
                let mut expr = self.expression(inner)?;
                if let Expr::Binary(binary) = &mut expr {
                    binary.grouped = true;
                }
                self.continue_operand(expr, &tokens[close + 1..], pending)
            }
            TokenKind::If | TokenKind::While | TokenKind::Def | TokenKind::Const => {
                Err(ParseError::at_token(
                    self.column,
                    first.row,
                    "The keyword cannot be used in an expression",
                ))
            }
            _ => Err(ParseError::at_token(
                self.column,
                first.row,
                "An expression is expected here",
            )),
        }
    }

    fn continue_operand(
        &self,
        operand: Expr,
        rest: &[Token],
        pending: Option<UnaryOperator>,
    ) -> Result<Expr, ParseError> {
        let operand = match pending {
            Some(operator) => Expr::Unary(Box::new(UnaryExpr {
                operator,
                argument: operand,
            })),
            None => operand,
        };
        if rest.is_empty() {
            Ok(operand)
        } else {
            self.expr_state(rest, ExprState::PendingBinary(operand))
        }
    }

    /// Parse a digit run into a 32-bit signed value. A pending minus is
    /// applied during accumulation, so `-2147483648` is in range while
    /// `2147483648` on its own is not.
    fn numeric_literal(&self, digits: &str, row: usize, negative: bool) -> Result<Expr, ParseError> {
        let mut value: i64 = 0;
        for digit in digits.bytes() {
            let digit = i64::from(digit - b'0');
            value = value
                .checked_mul(10)
                .and_then(|v| {
                    if negative {
                        v.checked_sub(digit)
                    } else {
                        v.checked_add(digit)
                    }
                })
                .filter(|v| i32::try_from(*v).is_ok())
                .ok_or_else(|| {
                    ParseError::at_token(self.column, row, "Out of range integer value")
                })?;
        }
        Ok(Expr::number(value as i32))
    }

    /// Consume a balanced `[...]` region starting at `open`, returning the
    /// parsed property and the tokens after the closing bracket.
    fn bracket_property<'t>(
        &self,
        tokens: &'t [Token],
        open: usize,
    ) -> Result<(Expr, &'t [Token]), ParseError> {
        let close = self.matching_bracket(tokens, open)?;
        let inner = &tokens[open + 1..close];
        if inner.is_empty() {
            return Err(ParseError::at_token(
                self.column,
                tokens[open].row,
                "There is no expression inside the '[]'",
            ));
        }
        Ok((self.expression(inner)?, &tokens[close + 1..]))
    }

    /// Consume a balanced `(...)` region starting at `open`, returning the
    /// comma-separated arguments and the tokens after the closing
    /// parenthesis. `()` yields zero arguments; an empty slot is an error.
    fn call_arguments<'t>(
        &self,
        tokens: &'t [Token],
        open: usize,
    ) -> Result<(Vec<Expr>, &'t [Token]), ParseError> {
        let close = self.matching_parenthese(tokens, open)?;
        let region = &tokens[open + 1..close];
        let mut arguments = Vec::new();
        for slot in split_arguments(region) {
            if slot.is_empty() {
                return Err(ParseError::at_token(
                    self.column,
                    tokens[open].row,
                    "The argument of the function call is empty",
                ));
            }
            arguments.push(self.expression(slot)?);
        }
        Ok((arguments, &tokens[close + 1..]))
    }

    /// Index of the parenthesis closing the one at `open`.
    fn matching_parenthese(&self, tokens: &[Token], open: usize) -> Result<usize, ParseError> {
        let mut depth = 0usize;
        for (index, token) in tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::ParentheseStart => depth += 1,
                TokenKind::ParentheseEnd => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::at_token(
            self.column,
            tokens[open].row,
            "The parenthese is not closed",
        ))
    }

    /// Index of the bracket closing the one at `open`.
    fn matching_bracket(&self, tokens: &[Token], open: usize) -> Result<usize, ParseError> {
        let mut depth = 0usize;
        for (index, token) in tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::BracketStart => depth += 1,
                TokenKind::BracketEnd => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::at_token(
            self.column,
            tokens[open].row,
            "The bracket is not closed",
        ))
    }
}

/// Split a balanced region into argument slots at top-level separators.
/// Empty slots are preserved so callers can reject them.
fn split_arguments(region: &[Token]) -> Vec<&[Token]> {
    if region.is_empty() {
        return Vec::new();
    }
    let mut slots = Vec::new();
    let mut depth = 0usize;
    let mut slot_start = 0;
    for (index, token) in region.iter().enumerate() {
        match token.kind {
            TokenKind::ParentheseStart | TokenKind::BracketStart => depth += 1,
            TokenKind::ParentheseEnd | TokenKind::BracketEnd => depth = depth.saturating_sub(1),
            TokenKind::Separator if depth == 0 => {
                slots.push(&region[slot_start..index]);
                slot_start = index + 1;
            }
            _ => {}
        }
    }
    slots.push(&region[slot_start..]);
    slots
}

/// Rotate a right-leaning binary chain into left-associative normal form:
///
/// ```text
/// (l, op, (ll, op2, lr))  →  ((l, op, ll), op2, lr)
/// ```
///
/// iterated until the right child is no longer a binary node. A grouped
/// (parenthesised) right child is atomic and stops the rotation, so
/// parentheses are never flattened into the surrounding chain.
fn rotate_left(mut root: Expr) -> Expr {
    loop {
        match root {
            Expr::Binary(node) => {
                let BinaryExpr {
                    operator,
                    left,
                    right,
                    grouped,
                } = *node;
                match right {
                    Expr::Binary(child) if !child.grouped => {
                        let BinaryExpr {
                            operator: child_operator,
                            left: child_left,
                            right: child_right,
                            ..
                        } = *child;
                        let rotated = Expr::binary(operator, left, child_left);
                        root = Expr::Binary(Box::new(BinaryExpr {
                            operator: child_operator,
                            left: rotated,
                            right: child_right,
                            grouped,
                        }));
                    }
                    right => {
                        return Expr::Binary(Box::new(BinaryExpr {
                            operator,
                            left,
                            right,
                            grouped,
                        }));
                    }
                }
            }
            other => return other,
        }
    }
}
