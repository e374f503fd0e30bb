use compact_str::CompactString;
use thiserror::Error;

use crate::utils::Location;

/// The evaluator error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: CompactString,
        location: Location,
    },
    #[error("undefined function '{name}' at {location}")]
    UndefinedFunction {
        name: CompactString,
        location: Location,
    },
    #[error("function '{name}' is already defined (at {location})")]
    DuplicateFunction {
        name: CompactString,
        location: Location,
    },
    #[error("cannot assign twice to constant '{name}' at {location}")]
    AssignToConstant {
        name: CompactString,
        location: Location,
    },
    #[error("unsupported operand type(s) for {operator}: {operands} at {location}")]
    TypeMismatch {
        operator: CompactString,
        operands: CompactString,
        location: Location,
    },
    #[error("function '{name}' takes {expected} arguments but {found} were supplied at {location}")]
    ArityMismatch {
        name: CompactString,
        expected: usize,
        found: usize,
        location: Location,
    },
    #[error("arithmetic overflow in {operator} at {location}")]
    Overflow {
        operator: CompactString,
        location: Location,
    },
    #[error("division by zero at {location}")]
    DivisionByZero { location: Location },
    #[error("call stack overflow at {location}")]
    StackOverflow { location: Location },
}
