//! Abstract Syntax Tree definitions for the Sunaba language.
//!
//! A [`Program`] owns a list of root statements; `const` and `def` are only
//! representable at the root, which the split between [`RootStatement`] and
//! [`Statement`] enforces by construction.
//!
//! Every node serialises as an object with a `"type"` discriminator followed
//! by its fields, which is the shape recorded in syntax dumps.

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use crate::tokeniser::tokens::Operator;

/// Serialise a node struct as `{"type": <tag>, <field>: ..., ...}`.
macro_rules! serialize_node {
    ($node:ident, $tag:literal $(, $field:ident)*) => {
        impl Serialize for $node {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("type", $tag)?;
                $(map.serialize_entry(stringify!($field), &self.$field)?;)*
                map.end()
            }
        }
    };
}

// ============================================================================
// Program and statements
// ============================================================================

/// A whole source file: the list of root statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<RootStatement>,
}

serialize_node!(Program, "Program", body);

/// A statement permitted at indent 0. Only here can `const` and `def`
/// declarations appear.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum RootStatement {
    Assignment(AssignmentStmt),
    ExpressionStatement(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
    Constant(ConstantDecl),
    FunctionDeclaration(FunctionDecl),
}

/// A statement inside an `if`, `while` or `def` body.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Statement {
    Assignment(AssignmentStmt),
    ExpressionStatement(ExpressionStmt),
    If(IfStmt),
    While(WhileStmt),
}

impl From<Statement> for RootStatement {
    fn from(statement: Statement) -> Self {
        match statement {
            Statement::Assignment(stmt) => RootStatement::Assignment(stmt),
            Statement::ExpressionStatement(stmt) => RootStatement::ExpressionStatement(stmt),
            Statement::If(stmt) => RootStatement::If(stmt),
            Statement::While(stmt) => RootStatement::While(stmt),
        }
    }
}

/// `target -> value` assignment. The target on the left of the arrow is a
/// variable or an indexed memory element.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentStmt {
    pub left: AssignTarget,
    pub right: Expr,
}

serialize_node!(AssignmentStmt, "Assignment", left, right);

/// The left side of an assignment: a plain variable or an indexed memory
/// element.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum AssignTarget {
    Identifier(Identifier),
    Member(Box<MemberExpr>),
}

/// A bare call used as a statement. The expression is always [`Expr::Call`];
/// use [`ExpressionStmt::new`] to keep it that way.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
}

impl ExpressionStmt {
    pub fn new(call: CallExpr) -> Self {
        Self {
            expression: Expr::Call(call),
        }
    }
}

serialize_node!(ExpressionStmt, "ExpressionStatement", expression);

/// `if test` with an indented body. The body is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub test: Expr,
    pub body: Vec<Statement>,
}

serialize_node!(IfStmt, "If", test, body);

/// `while test` with an indented body. The body is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Vec<Statement>,
}

serialize_node!(WhileStmt, "While", test, body);

/// `const name -> expression`, root-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDecl {
    pub left: Identifier,
    pub right: Expr,
}

serialize_node!(ConstantDecl, "Constant", left, right);

/// `def name(params)` with an indented body, root-only.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub id: Identifier,
    pub params: Vec<Identifier>,
    pub body: Vec<Statement>,
}

serialize_node!(FunctionDecl, "FunctionDeclaration", id, params, body);

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Expr {
    Unary(Box<UnaryExpr>),
    Binary(Box<BinaryExpr>),
    Member(Box<MemberExpr>),
    Call(CallExpr),
    Identifier(Identifier),
    NumericLiteral(NumericLiteral),
}

impl Expr {
    /// Shorthand for an ungrouped binary node.
    pub fn binary(operator: Operator, left: Expr, right: Expr) -> Expr {
        Expr::Binary(Box::new(BinaryExpr {
            operator,
            left,
            right,
            grouped: false,
        }))
    }

    pub fn identifier(name: impl Into<String>) -> Expr {
        Expr::Identifier(Identifier { name: name.into() })
    }

    pub fn number(value: i32) -> Expr {
        Expr::NumericLiteral(NumericLiteral { value })
    }
}

/// A prefix sign applied to an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum UnaryOperator {
    #[serde(rename = "+")]
    Plus,
    #[serde(rename = "-")]
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: UnaryOperator,
    pub argument: Expr,
}

serialize_node!(UnaryExpr, "Unary", operator, argument);

/// A binary operation. All operators share one precedence level and
/// associate to the left.
///
/// `grouped` records that the node came from a parenthesised sub-expression;
/// the left-rotation pass never flattens across a grouped node. The flag is
/// not part of the serialised shape.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub operator: Operator,
    pub left: Expr,
    pub right: Expr,
    pub grouped: bool,
}

serialize_node!(BinaryExpr, "Binary", operator, left, right);

/// Indexed access `target[property]`. The distinguished name `memory` also
/// takes this form.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub target: Identifier,
    pub property: Expr,
}

serialize_node!(MemberExpr, "Member", target, property);

/// A function call `callee(arguments...)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Identifier,
    pub arguments: Vec<Expr>,
}

serialize_node!(CallExpr, "Call", callee, arguments);

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

serialize_node!(Identifier, "Identifier", name);

/// A decimal literal, stored as a 32-bit signed integer with any leading
/// unary minus already applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLiteral {
    pub value: i32,
}

serialize_node!(NumericLiteral, "NumericLiteral", value);

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_expression_serialises_with_type_tags() {
        let expr = Expr::binary(
            Operator::Add,
            Expr::identifier("i"),
            Expr::number(1),
        );
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({
                "type": "Binary",
                "operator": "+",
                "left": { "type": "Identifier", "name": "i" },
                "right": { "type": "NumericLiteral", "value": 1 },
            })
        );
    }

    #[test]
    fn test_grouped_flag_is_not_serialised() {
        let expr = Expr::Binary(Box::new(BinaryExpr {
            operator: Operator::Mul,
            left: Expr::number(2),
            right: Expr::number(3),
            grouped: true,
        }));
        let value = serde_json::to_value(&expr).unwrap();
        assert!(value.get("grouped").is_none());
    }

    #[test]
    fn test_program_serialises_nested_statements() {
        let program = Program {
            body: vec![RootStatement::FunctionDeclaration(FunctionDecl {
                id: Identifier::new("add"),
                params: vec![Identifier::new("a"), Identifier::new("b")],
                body: vec![Statement::Assignment(AssignmentStmt {
                    left: AssignTarget::Identifier(Identifier::new("a")),
                    right: Expr::identifier("b"),
                })],
            })],
        };
        assert_eq!(
            serde_json::to_value(&program).unwrap(),
            json!({
                "type": "Program",
                "body": [{
                    "type": "FunctionDeclaration",
                    "id": { "type": "Identifier", "name": "add" },
                    "params": [
                        { "type": "Identifier", "name": "a" },
                        { "type": "Identifier", "name": "b" },
                    ],
                    "body": [{
                        "type": "Assignment",
                        "left": { "type": "Identifier", "name": "a" },
                        "right": { "type": "Identifier", "name": "b" },
                    }],
                }],
            })
        );
    }

    #[test]
    fn test_unary_serialisation() {
        let expr = Expr::Unary(Box::new(UnaryExpr {
            operator: UnaryOperator::Plus,
            argument: Expr::identifier("x"),
        }));
        assert_eq!(
            serde_json::to_value(&expr).unwrap(),
            json!({
                "type": "Unary",
                "operator": "+",
                "argument": { "type": "Identifier", "name": "x" },
            })
        );
    }
}
