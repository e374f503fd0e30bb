use compact_str::CompactString;
use serde::Serialize;

use crate::utils::Location;

use super::*;

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Str(StrLit),
    Number(NumberLit),
    Bool(BoolLit),
    Variable(Variable),
}

impl_printer_display!(Expr);

impl Expr {
    pub fn start(&self) -> Location {
        match self {
            Expr::Binary(expr) => expr.start,
            Expr::Unary(expr) => expr.start,
            Expr::Call(expr) => expr.start,
            Expr::Str(lit) => lit.start,
            Expr::Number(lit) => lit.start,
            Expr::Bool(lit) => lit.start,
            Expr::Variable(variable) => variable.start,
        }
    }
}

/// `left operator right`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryExpr {
    pub operator: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub start: Location,
}

/// `operator argument`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnaryExpr {
    pub operator: UnOp,
    pub argument: Box<Expr>,
    pub start: Location,
}

/// `callee(arguments)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: Ident,
    pub arguments: Vec<Expr>,
    pub start: Location,
}

/// A reference to a binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: CompactString,
    pub start: Location,
}
