//! The compiler error types.

use thiserror::Error;

use crate::utils::{Join, Location};

use super::token::TokenKind;

/// The lexer error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("unterminated string literal starting at {location}")]
    UnterminatedString { location: Location },
    #[error("unterminated block comment starting at {location}")]
    UnterminatedComment { location: Location },
    #[error("unterminated character literal at {location}")]
    UnterminatedLiteral { location: Location },
    #[error("invalid character {character:?} at {location}")]
    InvalidCharacter { character: char, location: Location },
    #[error("invalid escape sequence '\\{character}' at {location}")]
    InvalidEscape { character: char, location: Location },
    #[error("malformed number literal {text:?} at {location}")]
    MalformedNumber { text: String, location: Location },
    #[error("unknown symbol {symbol:?} at {location}")]
    UnknownSymbol { symbol: char, location: Location },
    #[error("a lookahead token is already pending at {location}, consume it before peeking again")]
    ProtocolViolation { location: Location },
}

impl LexerError {
    pub fn location(&self) -> Location {
        match self {
            LexerError::UnterminatedString { location }
            | LexerError::UnterminatedComment { location }
            | LexerError::UnterminatedLiteral { location }
            | LexerError::InvalidCharacter { location, .. }
            | LexerError::InvalidEscape { location, .. }
            | LexerError::MalformedNumber { location, .. }
            | LexerError::UnknownSymbol { location, .. }
            | LexerError::ProtocolViolation { location } => *location,
        }
    }
}

/// The parser error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error(
        "unexpected token (expected {}, found {found}) at {location}",
        .expected.iter().join(", "),
    )]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        location: Location,
    },
    #[error("unmatched '(' at {location}")]
    UnmatchedParenthesis { location: Location },
    #[error(
        "unexpected end of input (expected {}) at {location}",
        .expected.iter().join(", "),
    )]
    UnexpectedEndOfInput {
        expected: Vec<TokenKind>,
        location: Location,
    },
    #[error(transparent)]
    Lexer(#[from] LexerError),
}

impl ParseError {
    pub fn location(&self) -> Location {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnmatchedParenthesis { location }
            | ParseError::UnexpectedEndOfInput { location, .. } => *location,
            ParseError::Lexer(e) => e.location(),
        }
    }
}
