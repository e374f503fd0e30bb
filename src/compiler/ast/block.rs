use serde::Serialize;

use crate::utils::Location;

use super::*;

/// A block, `{ ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub start: Location,
}

impl_printer_display!(Block);
