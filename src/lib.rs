//! Cherie Language front end and bytecode VM.
//!
//! ```txt
//!        +-------+             +--------+          +-----------+
//! str -> | lexer | - Tokens -> | parser | - AST -> | visitors  |
//!        +-------+             +--------+          +-----------+
//!                                                   |        |
//!                                          +---------+    +-------------+
//!                                          | printer |    | interpreter |
//!                                          +---------+    +-------------+
//!
//!        +--------------+            +------------------------+
//!        | Instructions | - State -> | Cherie Virtual Machine |
//!        +--------------+            +------------------------+
//! ```
//!
//! The VM is independent of the front end: it executes a hand assembled
//! sequence of fixed-width [`vm::Instruction`]s.
//!
//! # Examples
//!
//! ```rust
//! use cherie_lang::{compiler::parse, eval::{Interpreter, Value}};
//!
//! let program = parse("let a = 2; a + 3 * 4;").unwrap();
//! let value = Interpreter::new().run(&program).unwrap();
//! assert_eq!(value, Value::Int(14));
//! ```
//!
//! ```rust
//! use cherie_lang::vm::{Instruction, State, Vm};
//!
//! let program = vec![
//!     Instruction::load(0, 40).unwrap(),
//!     Instruction::addrs(0, 0, 2).unwrap(),
//!     Instruction::halt(),
//! ];
//! let mut state = State::new();
//! Vm::new(&program).run(&mut state).unwrap();
//! assert_eq!(state.registers[0], 42);
//! ```

// Pedantic warnings
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines, clippy::must_use_candidate)]
#![allow(
    clippy::doc_markdown,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

pub mod compiler;
pub mod errors;
pub mod eval;
pub mod utils;
pub mod vm;

pub use errors::{Error, Result};

/// Parses and evaluates the input source code.
pub fn run(input: &str) -> Result<eval::Value> {
    let program = compiler::parse(input)?;
    Ok(eval::Interpreter::new().run(&program)?)
}
