//! Errors of this crate.

use std::result;

use thiserror::Error;

use crate::{
    compiler::error::{LexerError, ParseError},
    eval::EvalError,
    vm::{EncodeError, VmFault},
};

pub type Result<T> = result::Result<T, Error>;

/// Enum representing any Cherie error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),
    #[error("runtime error: {0}")]
    Eval(#[from] EvalError),
    #[error("vm fault: {0}")]
    Vm(#[from] VmFault),
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
}

impl From<LexerError> for Error {
    fn from(value: LexerError) -> Self {
        Error::Parse(value.into())
    }
}
