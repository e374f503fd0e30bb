use serde::Serialize;

use crate::utils::Location;

use super::*;

/// A function definition, `fn name() { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: Ident,
    pub body: Block,
    pub start: Location,
}

impl_printer_display!(FunctionDef);
