use std::fmt;

use compact_str::CompactString;
use serde::Serialize;

use crate::utils::Location;

/// A string literal. Char literals are parsed into one-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrLit {
    pub value: CompactString,
    pub start: Location,
}

/// A number literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberLit {
    pub value: Number,
    pub start: Location,
}

/// The value of a number literal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            // Plain decimal notation, the lexer has no exponent syntax.
            Number::Float(v) if v.fract() == 0.0 => write!(f, "{v}.0"),
            Number::Float(v) => write!(f, "{v}"),
        }
    }
}

/// `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoolLit {
    pub value: bool,
    pub start: Location,
}

/// Escapes a string so that the lexer reads it back unchanged.
pub fn escape_str(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\0' => escaped.push_str("\\0"),
            c => escaped.push(c),
        }
    }
    escaped
}
