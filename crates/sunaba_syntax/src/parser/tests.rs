#[cfg(test)]
/// Parser unit tests.
///
/// These cover every statement form, the expression parser's associativity
/// rewrite, and the exact text of the diagnostics.
mod tests {
    use super::*;
    use crate::tokeniser::tokenise;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        parse(&tokenise(source)?)
    }

    fn parse_ok(source: &str) -> Program {
        parse_source(source).unwrap_or_else(|err| panic!("parse failed: {err}"))
    }

    fn parse_err(source: &str) -> String {
        parse_source(source)
            .expect_err("parse should have failed")
            .message
    }

    /// The right-hand side of the first root statement, which must be an
    /// assignment.
    fn assignment_right(program: &Program) -> &Expr {
        match &program.body[0] {
            RootStatement::Assignment(stmt) => &stmt.right,
            other => panic!("expected assignment, got {other:?}"),
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    #[test]
    fn test_simple_add_function() {
        let program = parse_ok("def add(a, b)\n    a -> b\n");
        assert_eq!(program.body.len(), 1);
        let RootStatement::FunctionDeclaration(decl) = &program.body[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(decl.id.name, "add");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.params[0].name, "a");
        assert_eq!(decl.params[1].name, "b");
        assert_eq!(
            decl.body,
            vec![Statement::Assignment(AssignmentStmt {
                left: AssignTarget::Identifier(Identifier::new("a")),
                right: Expr::identifier("b"),
            })]
        );
    }

    #[test]
    fn test_function_without_parameters() {
        let program = parse_ok("def main()\n    run()\n");
        let RootStatement::FunctionDeclaration(decl) = &program.body[0] else {
            panic!("expected function declaration");
        };
        assert!(decl.params.is_empty());
        assert!(matches!(
            &decl.body[0],
            Statement::ExpressionStatement(stmt)
                if matches!(&stmt.expression, Expr::Call(call) if call.callee.name == "run")
        ));
    }

    #[test]
    fn test_constant_declaration() {
        let program = parse_ok("const width -> 100 + 28\n");
        let RootStatement::Constant(decl) = &program.body[0] else {
            panic!("expected constant");
        };
        assert_eq!(decl.left.name, "width");
        assert_eq!(
            decl.right,
            Expr::binary(Operator::Add, Expr::number(100), Expr::number(28))
        );
    }

    #[test]
    fn test_memory_assignment() {
        let program = parse_ok("memory[i + 1] -> 7\n");
        let RootStatement::Assignment(stmt) = &program.body[0] else {
            panic!("expected assignment");
        };
        let AssignTarget::Member(member) = &stmt.left else {
            panic!("expected member target");
        };
        assert_eq!(member.target.name, "memory");
        assert_eq!(
            member.property,
            Expr::binary(Operator::Add, Expr::identifier("i"), Expr::number(1))
        );
        assert_eq!(stmt.right, Expr::number(7));
    }

    #[test]
    fn test_call_statement() {
        let program = parse_ok("draw(x, y, 3)\n");
        let RootStatement::ExpressionStatement(stmt) = &program.body[0] else {
            panic!("expected expression statement");
        };
        let Expr::Call(call) = &stmt.expression else {
            panic!("expected call");
        };
        assert_eq!(call.callee.name, "draw");
        assert_eq!(call.arguments.len(), 3);
    }

    #[test]
    fn test_if_and_while_blocks() {
        let program = parse_ok("while i < 10\n    if i = 5\n        f(i)\n    i -> i + 1\n");
        let RootStatement::While(stmt) = &program.body[0] else {
            panic!("expected while");
        };
        assert_eq!(
            stmt.test,
            Expr::binary(Operator::Lt, Expr::identifier("i"), Expr::number(10))
        );
        assert_eq!(stmt.body.len(), 2);
        let Statement::If(inner) = &stmt.body[0] else {
            panic!("expected nested if");
        };
        assert_eq!(inner.body.len(), 1);
        assert!(matches!(stmt.body[1], Statement::Assignment(_)));
    }

    #[test]
    fn test_dedent_closes_nested_blocks() {
        let program = parse_ok("if a\n    if b\n        x -> 1\ny -> 2\n");
        assert_eq!(program.body.len(), 2);
        let RootStatement::If(outer) = &program.body[0] else {
            panic!("expected if");
        };
        let Statement::If(inner) = &outer.body[0] else {
            panic!("expected nested if");
        };
        assert_eq!(inner.body.len(), 1);
        assert!(matches!(program.body[1], RootStatement::Assignment(_)));
    }

    #[test]
    fn test_statements_after_function_body() {
        let program = parse_ok("def f(a)\n    if a > 0\n        f(a - 1)\nf(3)\n");
        assert_eq!(program.body.len(), 2);
        let RootStatement::FunctionDeclaration(decl) = &program.body[0] else {
            panic!("expected function declaration");
        };
        let Statement::If(guard) = &decl.body[0] else {
            panic!("expected if inside function");
        };
        assert_eq!(guard.body.len(), 1);
        assert!(matches!(program.body[1], RootStatement::ExpressionStatement(_)));
    }

    #[test]
    fn test_block_comments_do_not_change_the_tree() {
        let plain = parse_ok("x -> 1\n");
        let commented = parse_ok("/* a /* b */ c */ x -> 1\n");
        assert_eq!(plain, commented);
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    #[test]
    fn test_left_associative_chain() {
        let program = parse_ok("x -> 1 + 2 + 3 + 4\n");
        let expected = Expr::binary(
            Operator::Add,
            Expr::binary(
                Operator::Add,
                Expr::binary(Operator::Add, Expr::number(1), Expr::number(2)),
                Expr::number(3),
            ),
            Expr::number(4),
        );
        assert_eq!(assignment_right(&program), &expected);
    }

    #[test]
    fn test_mixed_operators_share_one_precedence() {
        // 1 + 2 * 3 is ((1 + 2) * 3): there is no precedence table.
        let program = parse_ok("x -> 1 + 2 * 3\n");
        let expected = Expr::binary(
            Operator::Mul,
            Expr::binary(Operator::Add, Expr::number(1), Expr::number(2)),
            Expr::number(3),
        );
        assert_eq!(assignment_right(&program), &expected);
    }

    #[test]
    fn test_parentheses_are_not_flattened() {
        let program = parse_ok("x -> 1 + (2 + 3)\n");
        let Expr::Binary(outer) = assignment_right(&program) else {
            panic!("expected binary");
        };
        assert_eq!(outer.left, Expr::number(1));
        let Expr::Binary(group) = &outer.right else {
            panic!("expected grouped binary on the right");
        };
        assert!(group.grouped);
        assert_eq!(group.left, Expr::number(2));
        assert_eq!(group.right, Expr::number(3));
    }

    #[test]
    fn test_parenthesised_chain_keeps_rotating_around_the_group() {
        let program = parse_ok("x -> 1 + (2 + 3) + 5\n");
        let Expr::Binary(outer) = assignment_right(&program) else {
            panic!("expected binary");
        };
        assert_eq!(outer.right, Expr::number(5));
        let Expr::Binary(inner) = &outer.left else {
            panic!("expected binary on the left");
        };
        assert_eq!(inner.left, Expr::number(1));
        assert!(matches!(&inner.right, Expr::Binary(group) if group.grouped));
    }

    #[test]
    fn test_unary_operators() {
        let program = parse_ok("x -> -y\n");
        assert_eq!(
            assignment_right(&program),
            &Expr::Unary(Box::new(UnaryExpr {
                operator: UnaryOperator::Minus,
                argument: Expr::identifier("y"),
            }))
        );

        // A minus folds into a literal; a plus wraps it.
        let program = parse_ok("x -> -5\n");
        assert_eq!(assignment_right(&program), &Expr::number(-5));
        let program = parse_ok("x -> +5\n");
        assert_eq!(
            assignment_right(&program),
            &Expr::Unary(Box::new(UnaryExpr {
                operator: UnaryOperator::Plus,
                argument: Expr::number(5),
            }))
        );
    }

    #[test]
    fn test_unary_binds_to_the_operand_only() {
        let program = parse_ok("x -> -a + b\n");
        let expected = Expr::binary(
            Operator::Add,
            Expr::Unary(Box::new(UnaryExpr {
                operator: UnaryOperator::Minus,
                argument: Expr::identifier("a"),
            })),
            Expr::identifier("b"),
        );
        assert_eq!(assignment_right(&program), &expected);
    }

    #[test]
    fn test_nested_calls_and_members() {
        let program = parse_ok("x -> f(g(1, 2), h[3])\n");
        let Expr::Call(call) = assignment_right(&program) else {
            panic!("expected call");
        };
        assert_eq!(call.callee.name, "f");
        assert_eq!(call.arguments.len(), 2);
        assert!(matches!(&call.arguments[0], Expr::Call(inner) if inner.arguments.len() == 2));
        assert!(
            matches!(&call.arguments[1], Expr::Member(member) if member.target.name == "h")
        );
    }

    #[test]
    fn test_zero_argument_call() {
        let program = parse_ok("x -> f()\n");
        assert!(matches!(
            assignment_right(&program),
            Expr::Call(call) if call.arguments.is_empty()
        ));
    }

    #[test]
    fn test_signed_literal_range() {
        let program = parse_ok("x -> -2147483648\n");
        assert_eq!(assignment_right(&program), &Expr::number(i32::MIN));
        let program = parse_ok("x -> 2147483647\n");
        assert_eq!(assignment_right(&program), &Expr::number(i32::MAX));
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    #[test]
    fn test_block_without_body() {
        assert_eq!(
            parse_err("if x\n"),
            "1: There is no body for the last `if` or `while` or `def` statement"
        );
        assert_eq!(
            parse_err("x -> 1\nwhile x\n"),
            "2: There is no body for the last `if` or `while` or `def` statement"
        );
    }

    #[test]
    fn test_block_body_not_indented() {
        assert_eq!(parse_err("if x\ny -> 1\n"), "2: Invalid indent space");
    }

    #[test]
    fn test_unexpected_indent_after_plain_statement() {
        assert_eq!(parse_err("x -> 1\n    y -> 2\n"), "2: Invalid indent space");
    }

    #[test]
    fn test_indented_first_line() {
        assert_eq!(parse_err("    x -> 1\n"), "1: Invalid indent space");
    }

    #[test]
    fn test_integer_out_of_range() {
        assert_eq!(parse_err("x -> 9999999999\n"), "1 6: Out of range integer value");
        assert_eq!(
            parse_err("x -> -2147483649\n"),
            "1 7: Out of range integer value"
        );
        assert_eq!(
            parse_err("x -> 2147483648\n"),
            "1 6: Out of range integer value"
        );
    }

    #[test]
    fn test_constant_errors() {
        assert_eq!(
            parse_err("if x\n    const y -> 1\n"),
            "2: The `const` statement must be at the top level"
        );
        assert_eq!(
            parse_err("const -> 5\n"),
            "1 1: The name of the constant is needed after `const`"
        );
        assert_eq!(
            parse_err("const x 5\n"),
            "1 9: '->' is needed after the name of the constant"
        );
        assert_eq!(
            parse_err("const x\n"),
            "1 7: '->' is needed after the name of the constant"
        );
        assert_eq!(
            parse_err("const x ->\n"),
            "1 9: There is no expression after the '->'"
        );
    }

    #[test]
    fn test_function_errors() {
        assert_eq!(
            parse_err("if x\n    def f()\n"),
            "2: The `def` statement must be at the top level"
        );
        assert_eq!(
            parse_err("def\n"),
            "1 1: The name of the function is needed after `def`"
        );
        assert_eq!(
            parse_err("def f\n"),
            "1 5: '(' is needed after the name of the function"
        );
        assert_eq!(
            parse_err("def f(a,)\n    x -> 1\n"),
            "1 6: The parameter of the function is empty"
        );
        assert_eq!(
            parse_err("def f(1)\n    x -> 1\n"),
            "1 7: The parameter of the function must be an identifier"
        );
        assert_eq!(
            parse_err("def f() x\n    y -> 1\n"),
            "1 9: The function header must end after ')'"
        );
        assert_eq!(
            parse_err("def f(a\n"),
            "1 6: The parenthese is not closed"
        );
    }

    #[test]
    fn test_assignment_errors() {
        assert_eq!(
            parse_err("x ->\n"),
            "1 3: There is no expression after the '->'"
        );
        assert_eq!(
            parse_err("f(x) -> 1\n"),
            "1 1: The left side of the '->' must be a variable or a memory element"
        );
    }

    #[test]
    fn test_only_calls_can_stand_alone() {
        assert_eq!(
            parse_err("x\n"),
            "1 1: Only a function call can be used as a statement"
        );
        assert_eq!(
            parse_err("a + b\n"),
            "1 1: Only a function call can be used as a statement"
        );
    }

    #[test]
    fn test_statement_cannot_start_with_token() {
        assert_eq!(
            parse_err("(x)\n"),
            "1 1: The statement cannot start with this token"
        );
        assert_eq!(
            parse_err("123\n"),
            "1 1: The statement cannot start with this token"
        );
    }

    #[test]
    fn test_missing_condition() {
        assert_eq!(
            parse_err("if\n"),
            "1 1: There is no condition for the `if` statement"
        );
        assert_eq!(
            parse_err("while\n"),
            "1 1: There is no condition for the `while` statement"
        );
    }

    #[test]
    fn test_expression_errors() {
        assert_eq!(parse_err("x -> (1 + 2\n"), "1 6: The parenthese is not closed");
        assert_eq!(parse_err("x -> a[1\n"), "1 7: The bracket is not closed");
        assert_eq!(
            parse_err("x -> a[]\n"),
            "1 7: There is no expression inside the '[]'"
        );
        assert_eq!(
            parse_err("x -> ()\n"),
            "1 6: There is no expression inside the '()'"
        );
        assert_eq!(
            parse_err("f(1,,2)\n"),
            "1 2: The argument of the function call is empty"
        );
        assert_eq!(
            parse_err("x -> if\n"),
            "1 6: The keyword cannot be used in an expression"
        );
        assert_eq!(parse_err("x -> memory\n"), "1 6: '[' is needed after `memory`");
        assert_eq!(
            parse_err("x -> * 2\n"),
            "1 6: An expression cannot start with the operator '*'"
        );
        assert_eq!(parse_err("x -> a b\n"), "1 8: An operator is needed here");
        assert_eq!(
            parse_err("x -> 1 +\n"),
            "1 8: There is no expression after the operator '+'"
        );
        assert_eq!(
            parse_err("x -> - - 1\n"),
            "1 8: Only one '+' or '-' can precede an expression"
        );
        assert_eq!(parse_err("x -> ,\n"), "1 6: An expression is expected here");
    }

    #[test]
    fn test_error_columns_account_for_comment_lines() {
        assert_eq!(
            parse_err("# heading\nif x\n"),
            "2: There is no body for the last `if` or `while` or `def` statement"
        );
    }
}
