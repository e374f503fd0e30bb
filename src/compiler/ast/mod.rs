//! The Cherie Abstract Syntax Tree (AST).
//!
//! Every node owns its children through `Box`/`Vec` and records the
//! [`Location`](crate::utils::Location) of its first token.

mod block;
mod expr;
mod function;
mod ident;
mod lit;
mod operator;
mod printer;
mod program;
mod stmt;
mod visit;

pub use block::*;
pub use expr::*;
pub use function::*;
pub use ident::*;
pub use lit::*;
pub use operator::*;
pub use printer::*;
pub use program::*;
pub use stmt::*;
pub use visit::*;

/// Implements `Display` by rendering the node with [`Printer`].
macro_rules! impl_printer_display {
    ($name:ident) => {
        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut printer = Printer::new();
                self.accept(&mut printer);
                f.write_str(&printer.finish())
            }
        }
    };
}

use impl_printer_display;
