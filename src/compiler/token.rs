//! The token.

use std::fmt;

use compact_str::CompactString;
use text_size::TextRange;

use crate::utils::Location;

/// Parsed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Location of the first character of the token.
    pub start: Location,
    pub range: TextRange,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue, start: Location, range: TextRange) -> Self {
        Token {
            kind,
            value,
            start,
            range,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{}", self.kind),
            value => write!(f, "{} {}", self.kind, value),
        }
    }
}

/// The payload carried by a token. At most one value is attached to a token.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TokenValue {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(CompactString),
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::None => Ok(()),
            TokenValue::Bool(v) => write!(f, "{v}"),
            TokenValue::Int(v) => write!(f, "{v}"),
            TokenValue::Float(v) => write!(f, "{v:?}"),
            TokenValue::Char(v) => write!(f, "{v:?}"),
            TokenValue::Str(v) => write!(f, "{v:?}"),
        }
    }
}

/// Enum representing common lexeme types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No token. Never produced by the lexer.
    None,
    /// End of input.
    Eof,
    /// Ident
    Ident,
    /// "12", "0x1f", "1.5", "'c'", "\"abc\"". The value is in [`TokenValue`].
    Literal,

    // Keywords:
    /// "let"
    Let,
    /// "const"
    Const,
    /// "fn"
    Fn,
    /// "while"
    While,
    /// "if"
    If,
    /// "else"
    Else,
    /// "and"
    And,
    /// "or"
    Or,
    /// "not"
    Not,
    /// "true"
    True,
    /// "false"
    False,
    /// "string"
    StringType,
    /// "number"
    NumberType,

    // Two-char tokens:
    /// "=="
    Eq,
    /// "+="
    AddAssign,
    /// "-="
    SubAssign,
    /// "*="
    MulAssign,
    /// "/="
    DivAssign,
    /// "++"
    Increment,
    /// "--"
    Decrement,
    /// "->"
    Arrow,

    // One-char tokens:
    /// "="
    Assign,
    /// "+"
    Add,
    /// "-"
    Sub,
    /// "*"
    Mul,
    /// "/"
    Div,
    /// "("
    OpenParen,
    /// ")"
    CloseParen,
    /// "{"
    OpenBrace,
    /// "}"
    CloseBrace,
    /// "["
    OpenBracket,
    /// "]"
    CloseBracket,
    /// "?"
    Question,
    /// "!"
    Bang,
    /// ","
    Comma,
    /// ":"
    Colon,
    /// ";"
    Semi,
    /// "."
    Dot,
}

impl TokenKind {
    /// Looks up a keyword.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        Some(match ident {
            "let" => TokenKind::Let,
            "const" => TokenKind::Const,
            "fn" => TokenKind::Fn,
            "while" => TokenKind::While,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "and" => TokenKind::And,
            "or" => TokenKind::Or,
            "not" => TokenKind::Not,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "string" => TokenKind::StringType,
            "number" => TokenKind::NumberType,
            _ => return None,
        })
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::Fn
                | TokenKind::While
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::True
                | TokenKind::False
                | TokenKind::StringType
                | TokenKind::NumberType
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TokenKind::None => "<none>",
            TokenKind::Eof => "<eof>",
            TokenKind::Ident => "<ident>",
            TokenKind::Literal => "<literal>",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Fn => "fn",
            TokenKind::While => "while",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::StringType => "string",
            TokenKind::NumberType => "number",
            TokenKind::Eq => "==",
            TokenKind::AddAssign => "+=",
            TokenKind::SubAssign => "-=",
            TokenKind::MulAssign => "*=",
            TokenKind::DivAssign => "/=",
            TokenKind::Increment => "++",
            TokenKind::Decrement => "--",
            TokenKind::Arrow => "->",
            TokenKind::Assign => "=",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Div => "/",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::Question => "?",
            TokenKind::Bang => "!",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Semi => ";",
            TokenKind::Dot => ".",
        })
    }
}
