use serde::Serialize;

use crate::utils::Location;

use super::*;

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    Assign(AssignStmt),
    Update(UpdateStmt),
    If(IfStmt),
    While(WhileStmt),
    Expr(ExprStmt),
}

impl_printer_display!(Stmt);

impl Stmt {
    pub fn start(&self) -> Location {
        match self {
            Stmt::Assign(stmt) => stmt.start,
            Stmt::Update(stmt) => stmt.start,
            Stmt::If(stmt) => stmt.start,
            Stmt::While(stmt) => stmt.start,
            Stmt::Expr(stmt) => stmt.start,
        }
    }
}

/// `let name = value;` or `const name = value;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignStmt {
    pub name: Ident,
    /// Declared with `const`.
    pub immutable: bool,
    pub value: Expr,
    pub start: Location,
}

/// Assignment to an existing binding.
///
/// `x = e` has no operator. `x += e` stores [`BinOp::Add`] and `e`,
/// `x++` stores [`BinOp::Add`] and the literal `1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStmt {
    pub name: Ident,
    pub operator: Option<BinOp>,
    pub value: Expr,
    pub start: Location,
}

/// `if (test) { ... } else if (test) { ... } else { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IfStmt {
    pub test: Expr,
    pub consequent: Block,
    pub else_ifs: Vec<ElseIf>,
    pub alternate: Option<Box<Block>>,
    pub start: Location,
}

/// One `else if (test) { ... }` arm.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElseIf {
    pub test: Expr,
    pub body: Block,
    pub start: Location,
}

/// `while (test) { ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Block,
    pub start: Location,
}

/// An expression evaluated for its value, `expr;`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExprStmt {
    pub expr: Expr,
    pub start: Location,
}
