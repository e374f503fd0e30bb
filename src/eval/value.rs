use std::fmt;

use compact_str::{format_compact, CompactString, ToCompactString};

use crate::{
    compiler::ast::{BinOp, UnOp},
    utils::Location,
};

use super::error::EvalError;

/// A runtime value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Unit,
    Int(i64),
    Float(f64),
    Str(CompactString),
    Bool(bool),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unit => write!(f, "()"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
        }
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Unit => "unit",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
        }
    }

    /// Returns the boolean, or fails for any other type.
    pub fn as_bool(&self, operator: &str, location: Location) -> Result<bool, EvalError> {
        match self {
            Value::Bool(v) => Ok(*v),
            v => Err(EvalError::TypeMismatch {
                operator: operator.to_compact_string(),
                operands: v.type_name().into(),
                location,
            }),
        }
    }

    /// Applies a unary operator.
    pub fn unary(self, operator: UnOp, location: Location) -> Result<Value, EvalError> {
        match (operator, self) {
            (UnOp::Neg, Value::Int(v)) => v.checked_neg().map(Value::Int).ok_or(EvalError::Overflow {
                operator: operator.to_compact_string(),
                location,
            }),
            (UnOp::Neg, Value::Float(v)) => Ok(Value::Float(-v)),
            (UnOp::Not, Value::Bool(v)) => Ok(Value::Bool(!v)),
            (operator, v) => Err(EvalError::TypeMismatch {
                operator: operator.to_compact_string(),
                operands: v.type_name().into(),
                location,
            }),
        }
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Integer arithmetic is checked, mixed int and float operands are
    /// promoted to float.
    pub fn binary(self, operator: BinOp, rhs: Value, location: Location) -> Result<Value, EvalError> {
        match (operator, self, rhs) {
            (BinOp::Eq, lhs, rhs) => Ok(Value::Bool(lhs == rhs)),
            (BinOp::Add, Value::Str(lhs), Value::Str(rhs)) => {
                Ok(Value::Str(format_compact!("{lhs}{rhs}")))
            }
            (BinOp::And, Value::Bool(lhs), Value::Bool(rhs)) => Ok(Value::Bool(lhs && rhs)),
            (BinOp::Or, Value::Bool(lhs), Value::Bool(rhs)) => Ok(Value::Bool(lhs || rhs)),
            (operator, Value::Int(lhs), Value::Int(rhs)) => int_arith(operator, lhs, rhs, location),
            (operator, Value::Int(lhs), Value::Float(rhs)) => {
                float_arith(operator, lhs as f64, rhs, location)
            }
            (operator, Value::Float(lhs), Value::Int(rhs)) => {
                float_arith(operator, lhs, rhs as f64, location)
            }
            (operator, Value::Float(lhs), Value::Float(rhs)) => {
                float_arith(operator, lhs, rhs, location)
            }
            (operator, lhs, rhs) => Err(type_mismatch(operator, &lhs, &rhs, location)),
        }
    }
}

fn type_mismatch(operator: BinOp, lhs: &Value, rhs: &Value, location: Location) -> EvalError {
    EvalError::TypeMismatch {
        operator: operator.to_compact_string(),
        operands: format_compact!("{} and {}", lhs.type_name(), rhs.type_name()),
        location,
    }
}

fn int_arith(operator: BinOp, lhs: i64, rhs: i64, location: Location) -> Result<Value, EvalError> {
    let result = match operator {
        BinOp::Add => lhs.checked_add(rhs),
        BinOp::Sub => lhs.checked_sub(rhs),
        BinOp::Mul => lhs.checked_mul(rhs),
        BinOp::Div if rhs == 0 => return Err(EvalError::DivisionByZero { location }),
        BinOp::Div => lhs.checked_div(rhs),
        BinOp::Eq | BinOp::And | BinOp::Or => {
            return Err(type_mismatch(operator, &Value::Int(lhs), &Value::Int(rhs), location))
        }
    };
    result.map(Value::Int).ok_or(EvalError::Overflow {
        operator: operator.to_compact_string(),
        location,
    })
}

fn float_arith(operator: BinOp, lhs: f64, rhs: f64, location: Location) -> Result<Value, EvalError> {
    Ok(Value::Float(match operator {
        BinOp::Add => lhs + rhs,
        BinOp::Sub => lhs - rhs,
        BinOp::Mul => lhs * rhs,
        BinOp::Div if rhs == 0.0 => return Err(EvalError::DivisionByZero { location }),
        BinOp::Div => lhs / rhs,
        BinOp::Eq | BinOp::And | BinOp::Or => {
            return Err(type_mismatch(
                operator,
                &Value::Float(lhs),
                &Value::Float(rhs),
                location,
            ))
        }
    }))
}
