use serde::Serialize;

use super::*;

/// The root AST node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub items: Vec<Item>,
}

impl_printer_display!(Program);

impl Program {
    /// Iterates over the top-level function definitions.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(function) => Some(function),
            Item::Stmt(_) => None,
        })
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    Function(FunctionDef),
    Stmt(Stmt),
}
