//! The lexer.

use std::str::Chars;

use compact_str::CompactString;
use text_size::{TextRange, TextSize};

use crate::utils::Location;

use super::{
    error::LexerError,
    token::{Token, TokenKind, TokenValue},
};

/// Peekable iterator over a char sequence.
///
/// Next characters can be peeked via `first` method,
/// and position can be shifted forward via `bump` method.
struct Cursor<'a> {
    /// The input string.
    input: &'a str,
    /// Iterator over chars. Slightly faster than a &str.
    chars: Chars<'a>,
    line: u32,
    /// Number of characters consumed on the current line.
    column: u32,
}

const EOF_CHAR: char = '\0';

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Cursor<'a> {
        Cursor {
            input,
            chars: input.chars(),
            line: 1,
            column: 0,
        }
    }

    /// Peeks the next symbol from the input stream without consuming it.
    /// If requested position doesn't exist, `EOF_CHAR` is returned.
    /// However, getting `EOF_CHAR` doesn't always mean actual end of file,
    /// it should be checked with `is_eof` method.
    fn first(&self) -> char {
        // `.next()` optimizes better than `.nth(0)`
        self.chars.clone().next().unwrap_or(EOF_CHAR)
    }

    /// Peeks the second symbol from the input stream without consuming it.
    fn second(&self) -> char {
        // `.next()` optimizes better than `.nth(1)`
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().unwrap_or(EOF_CHAR)
    }

    /// Checks if there is nothing more to consume.
    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    /// Returns the byte position of cursor.
    fn pos(&self) -> TextSize {
        TextSize::try_from(self.input.len() - self.chars.as_str().len()).unwrap_or_default()
    }

    /// Location of the last consumed character.
    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Location of the next character to be consumed.
    fn next_location(&self) -> Location {
        Location::new(self.line, self.column + 1)
    }

    /// Moves to the next character.
    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Eats symbols while predicate returns true or until the end of file is reached.
    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) {
        while predicate(self.first()) && !self.is_eof() {
            self.bump();
        }
    }

    /// True if the cursor stands at a character that ends a literal or a keyword.
    fn at_boundary(&self) -> bool {
        let c = self.first();
        self.is_eof() || is_whitespace(c) || (c.is_ascii_punctuation() && c != '_')
    }
}

/// True if `c` is considered a whitespace according to Cherie language definition.
pub fn is_whitespace(c: char) -> bool {
    // This is Pattern_White_Space.
    //
    // Note that this set is stable (ie, it doesn't change with different
    // Unicode versions), so it's ok to just hard-code the values.

    matches!(
        c,
        // Usual ASCII suspects
        '\u{0009}'   // \t
        | '\u{000A}' // \n
        | '\u{000B}' // vertical tab
        | '\u{000C}' // form feed
        | '\u{000D}' // \r
        | '\u{0020}' // space

        // NEXT LINE from latin1
        | '\u{0085}'

        // Bidi markers
        | '\u{200E}' // LEFT-TO-RIGHT MARK
        | '\u{200F}' // RIGHT-TO-LEFT MARK

        // Dedicated whitespace characters from Unicode
        | '\u{2028}' // LINE SEPARATOR
        | '\u{2029}' // PARAGRAPH SEPARATOR
    )
}

/// True if `c` is valid as a first character of an identifier.
pub fn is_id_start(c: char) -> bool {
    // This is XID_Start OR '_' (which formally is not a XID_Start).
    c == '_' || unicode_ident::is_xid_start(c)
}

/// True if `c` is valid as a non-first character of an identifier.
pub fn is_id_continue(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}

/// The lexer. Produces tokens on demand with one token of lookahead.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    lookahead: Option<Token>,
}

impl<'a> Lexer<'a> {
    /// Constructs a new `Lexer` over the complete source text.
    pub fn new(input: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(input),
            lookahead: None,
        }
    }

    /// Consumes and returns the next token. A pending lookahead token is returned first.
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        match self.lookahead.take() {
            Some(token) => Ok(token),
            None => self.cursor.advance_token(),
        }
    }

    /// Computes and caches the next token without consuming it.
    ///
    /// Only one lookahead token may be pending: peeking again before the
    /// pending token is consumed by [`Lexer::next_token`] is an error.
    pub fn peek_token(&mut self) -> Result<&Token, LexerError> {
        if self.lookahead.is_some() {
            return Err(LexerError::ProtocolViolation {
                location: self.cursor.location(),
            });
        }
        let token = self.cursor.advance_token()?;
        Ok(self.lookahead.insert(token))
    }

    /// Returns the pending lookahead token, if any.
    pub fn lookahead(&self) -> Option<&Token> {
        self.lookahead.as_ref()
    }

    /// Returns the current position of the lexer.
    pub fn location(&self) -> Location {
        self.cursor.location()
    }
}

/// Creates an iterator that produces tokens from the input string.
///
/// The iterator yields the final [`TokenKind::Eof`] token, and stops after it
/// or after the first error.
pub fn tokenize(input: &str) -> impl Iterator<Item = Result<Token, LexerError>> + '_ {
    let mut lexer = Lexer::new(input);
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let token = lexer.next_token();
        done = token.as_ref().map_or(true, |t| t.kind == TokenKind::Eof);
        Some(token)
    })
}

impl Cursor<'_> {
    /// Parses a token from the input string.
    fn advance_token(&mut self) -> Result<Token, LexerError> {
        self.skip_trivia()?;
        let start = self.next_location();
        let start_pos = self.pos();
        let Some(first_char) = self.bump() else {
            return Ok(Token::new(
                TokenKind::Eof,
                TokenValue::None,
                start,
                TextRange::empty(start_pos),
            ));
        };
        let (kind, value) = match first_char {
            // Character literal.
            '\'' => (TokenKind::Literal, self.char_literal(start)?),

            // String literal.
            '"' => (TokenKind::Literal, self.string(start)?),

            // Numeric literal.
            c @ '0'..='9' => (TokenKind::Literal, self.number(c)?),

            // Identifier or keyword.
            c if is_id_start(c) => self.ident_or_keyword(c),

            // Symbols.
            c => (self.symbol(c)?, TokenValue::None),
        };
        let token = Token::new(kind, value, start, TextRange::new(start_pos, self.pos()));
        log::trace!("token {token} at {}", token.start);
        Ok(token)
    }

    /// Skips whitespace, line comments and block comments.
    fn skip_trivia(&mut self) -> Result<(), LexerError> {
        loop {
            self.eat_while(is_whitespace);
            match (self.first(), self.second()) {
                ('/', '/') => self.eat_while(|c| c != '\n'),
                ('/', '*') => self.block_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn block_comment(&mut self) -> Result<(), LexerError> {
        let location = self.next_location();
        self.bump();
        self.bump();
        // Block comments do not nest, the first "*/" closes the comment.
        while let Some(c) = self.bump() {
            if c == '*' && self.first() == '/' {
                self.bump();
                return Ok(());
            }
        }
        Err(LexerError::UnterminatedComment { location })
    }

    fn ident_or_keyword(&mut self, first_char: char) -> (TokenKind, TokenValue) {
        let mut value = CompactString::default();
        value.push(first_char);
        while is_id_continue(self.first()) && !self.is_eof() {
            value.push(self.first());
            self.bump();
        }

        match TokenKind::keyword(&value) {
            Some(TokenKind::True) if self.at_boundary() => (TokenKind::True, TokenValue::Bool(true)),
            Some(TokenKind::False) if self.at_boundary() => {
                (TokenKind::False, TokenValue::Bool(false))
            }
            Some(keyword) if self.at_boundary() => (keyword, TokenValue::None),
            _ => (TokenKind::Ident, TokenValue::Str(value)),
        }
    }

    fn number(&mut self, first_digit: char) -> Result<TokenValue, LexerError> {
        let mut text = String::from(first_digit);
        let mut is_hex = false;
        let mut is_float = false;
        if first_digit == '0' && self.first() == 'x' {
            self.bump();
            is_hex = true;
            text.clear();
        }
        loop {
            if self.at_boundary() && self.first() != '.' {
                break;
            }
            let c = self.first();
            match c {
                '0'..='9' => {}
                'a'..='f' | 'A'..='F' if is_hex => {}
                '.' if !is_hex && !is_float => is_float = true,
                _ => {
                    text.push(c);
                    self.bump();
                    return Err(self.malformed_number(&text, is_hex));
                }
            }
            text.push(c);
            self.bump();
        }

        if is_float {
            match text.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(TokenValue::Float(value)),
                _ => Err(self.malformed_number(&text, is_hex)),
            }
        } else {
            i64::from_str_radix(&text, if is_hex { 16 } else { 10 })
                .map(TokenValue::Int)
                .map_err(|_| self.malformed_number(&text, is_hex))
        }
    }

    fn malformed_number(&self, text: &str, is_hex: bool) -> LexerError {
        LexerError::MalformedNumber {
            text: if is_hex {
                format!("0x{text}")
            } else {
                text.to_owned()
            },
            location: self.location(),
        }
    }

    fn char_literal(&mut self, start: Location) -> Result<TokenValue, LexerError> {
        let unterminated = LexerError::UnterminatedLiteral { location: start };
        let value = match self.bump() {
            None | Some('\'' | '\n') => return Err(unterminated),
            Some('\\') => self.scan_escape(unterminated.clone())?,
            Some(c) if c.is_control() => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    location: self.location(),
                })
            }
            Some(c) => c,
        };
        if self.bump() == Some('\'') {
            Ok(TokenValue::Char(value))
        } else {
            Err(unterminated)
        }
    }

    fn string(&mut self, start: Location) -> Result<TokenValue, LexerError> {
        let unterminated = LexerError::UnterminatedString { location: start };
        let mut value = CompactString::default();
        loop {
            match self.bump() {
                None | Some('\n') => return Err(unterminated),
                Some('"') => break,
                Some('\\') => value.push(self.scan_escape(unterminated.clone())?),
                Some(c) if c.is_control() => {
                    return Err(LexerError::InvalidCharacter {
                        character: c,
                        location: self.location(),
                    })
                }
                Some(c) => value.push(c),
            }
        }
        Ok(TokenValue::Str(value))
    }

    fn scan_escape(&mut self, unterminated: LexerError) -> Result<char, LexerError> {
        // Previous character was '\\', unescape what follows.
        Ok(match self.bump() {
            None | Some('\n') => return Err(unterminated),
            Some('"') => '"',
            Some('\'') => '\'',
            Some('\\') => '\\',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('0') => '\0',
            Some(c) => {
                return Err(LexerError::InvalidEscape {
                    character: c,
                    location: self.location(),
                })
            }
        })
    }

    fn symbol(&mut self, c: char) -> Result<TokenKind, LexerError> {
        // Two-char tokens are preferred over their one-char prefix.
        let double = match (c, self.first()) {
            ('=', '=') => Some(TokenKind::Eq),
            ('+', '=') => Some(TokenKind::AddAssign),
            ('-', '=') => Some(TokenKind::SubAssign),
            ('*', '=') => Some(TokenKind::MulAssign),
            ('/', '=') => Some(TokenKind::DivAssign),
            ('+', '+') => Some(TokenKind::Increment),
            ('-', '-') => Some(TokenKind::Decrement),
            ('-', '>') => Some(TokenKind::Arrow),
            _ => None,
        };
        if let Some(kind) = double {
            self.bump();
            return Ok(kind);
        }

        Ok(match c {
            '=' => TokenKind::Assign,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            '*' => TokenKind::Mul,
            '/' => TokenKind::Div,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '?' => TokenKind::Question,
            '!' => TokenKind::Bang,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            ';' => TokenKind::Semi,
            '.' => TokenKind::Dot,
            symbol => {
                return Err(LexerError::UnknownSymbol {
                    symbol,
                    location: self.location(),
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! check_first_token_value {
        ($input:expr, $value:expr $(,)?) => {
            let token = Lexer::new($input).next_token().unwrap();
            assert_eq!(token.value, $value)
        };
    }

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).map(|token| token.unwrap().kind).collect()
    }

    #[test]
    fn test_number_int() {
        check_first_token_value!("0", TokenValue::Int(0));
        check_first_token_value!("1", TokenValue::Int(1));
        check_first_token_value!("100000000", TokenValue::Int(100_000_000));
        check_first_token_value!("0xABCD", TokenValue::Int(43981));
        check_first_token_value!("0x1f;", TokenValue::Int(31));
        check_first_token_value!("9223372036854775807", TokenValue::Int(i64::MAX));
    }

    #[test]
    fn test_number_float() {
        check_first_token_value!("0.0", TokenValue::Float(0.));
        check_first_token_value!("1.0", TokenValue::Float(1.));
        check_first_token_value!("1.0001", TokenValue::Float(1.0001));
        check_first_token_value!("12.5)", TokenValue::Float(12.5));
    }

    #[test]
    fn test_malformed_number() {
        let huge_float = "9".repeat(400) + ".0";
        for input in [
            "1.2.3",
            "0x1.5",
            "12abc",
            "12_3",
            "0x",
            "99999999999999999999",
            huge_float.as_str(),
        ] {
            let err = Lexer::new(input).next_token().unwrap_err();
            assert!(
                matches!(err, LexerError::MalformedNumber { .. }),
                "{input}: {err}"
            );
        }
    }

    #[test]
    fn test_string() {
        check_first_token_value!(r#" "abc" "#, TokenValue::Str("abc".into()));
        check_first_token_value!(r#" "" "#, TokenValue::Str("".into()));
        check_first_token_value!(r#" "\"" "#, TokenValue::Str("\"".into()));
        check_first_token_value!(r#" "\n" "#, TokenValue::Str("\n".into()));
        check_first_token_value!(r#" "\\" "#, TokenValue::Str("\\".into()));
        check_first_token_value!(r#" "\t\0" "#, TokenValue::Str("\t\0".into()));
    }

    #[test]
    fn test_string_errors() {
        let mut lexer = Lexer::new("let a = \"abc\ndef\";");
        for _ in 0..3 {
            lexer.next_token().unwrap();
        }
        assert_eq!(
            lexer.next_token(),
            Err(LexerError::UnterminatedString {
                location: Location::new(1, 9)
            })
        );

        assert!(matches!(
            Lexer::new("\"a\u{7}b\"").next_token(),
            Err(LexerError::InvalidCharacter {
                character: '\u{7}',
                ..
            })
        ));
        assert!(matches!(
            Lexer::new(r#""\q""#).next_token(),
            Err(LexerError::InvalidEscape { character: 'q', .. })
        ));
    }

    #[test]
    fn test_char() {
        check_first_token_value!("'a'", TokenValue::Char('a'));
        check_first_token_value!(r"'\n'", TokenValue::Char('\n'));
        check_first_token_value!(r"'\''", TokenValue::Char('\''));
        assert_eq!(
            Lexer::new("'ab'").next_token(),
            Err(LexerError::UnterminatedLiteral {
                location: Location::new(1, 1)
            })
        );
        assert!(Lexer::new("'a").next_token().is_err());
        assert_eq!(
            Lexer::new("'\u{7}'").next_token(),
            Err(LexerError::InvalidCharacter {
                character: '\u{7}',
                location: Location::new(1, 2)
            })
        );
        assert!(Lexer::new("''").next_token().is_err());
    }

    #[test]
    fn test_keyword_and_ident() {
        assert_eq!(
            kinds("let letter const_ fn fnord while if else and or not true false string number"),
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Fn,
                TokenKind::Ident,
                TokenKind::While,
                TokenKind::If,
                TokenKind::Else,
                TokenKind::And,
                TokenKind::Or,
                TokenKind::Not,
                TokenKind::True,
                TokenKind::False,
                TokenKind::StringType,
                TokenKind::NumberType,
                TokenKind::Eof,
            ]
        );
        check_first_token_value!("true;", TokenValue::Bool(true));
        check_first_token_value!("_tmp1", TokenValue::Str("_tmp1".into()));
        check_first_token_value!("ifx", TokenValue::Str("ifx".into()));
    }

    #[test]
    fn test_none_kind_is_never_produced() {
        assert_eq!(TokenKind::None.to_string(), "<none>");
        assert!(!TokenKind::None.is_keyword());
        assert!(!kinds("let a = f(1, \"x\") == 2.5;").contains(&TokenKind::None));
    }

    #[test]
    fn test_symbols_maximal_munch() {
        assert_eq!(
            kinds("= == += -= *= /= + - * / ++ -- -> ( ) { } [ ] ? ! , : ; ."),
            vec![
                TokenKind::Assign,
                TokenKind::Eq,
                TokenKind::AddAssign,
                TokenKind::SubAssign,
                TokenKind::MulAssign,
                TokenKind::DivAssign,
                TokenKind::Add,
                TokenKind::Sub,
                TokenKind::Mul,
                TokenKind::Div,
                TokenKind::Increment,
                TokenKind::Decrement,
                TokenKind::Arrow,
                TokenKind::OpenParen,
                TokenKind::CloseParen,
                TokenKind::OpenBrace,
                TokenKind::CloseBrace,
                TokenKind::OpenBracket,
                TokenKind::CloseBracket,
                TokenKind::Question,
                TokenKind::Bang,
                TokenKind::Comma,
                TokenKind::Colon,
                TokenKind::Semi,
                TokenKind::Dot,
                TokenKind::Eof,
            ]
        );
        assert_eq!(
            kinds("a+++b"),
            vec![
                TokenKind::Ident,
                TokenKind::Increment,
                TokenKind::Add,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_unknown_symbol() {
        assert_eq!(
            Lexer::new("a\n  @").next_token().map(|t| t.kind),
            Ok(TokenKind::Ident)
        );
        let mut lexer = Lexer::new("a\n  @");
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(LexerError::UnknownSymbol {
                symbol: '@',
                location: Location::new(2, 3)
            })
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("// line\na /* block\n * still */ b // tail"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
        // Block comments do not nest.
        assert_eq!(
            kinds("/* /* */ a"),
            vec![TokenKind::Ident, TokenKind::Eof]
        );
        assert_eq!(
            Lexer::new("a /* never closed").next_token().map(|t| t.kind),
            Ok(TokenKind::Ident)
        );
        let mut lexer = Lexer::new("a /* never closed");
        lexer.next_token().unwrap();
        assert_eq!(
            lexer.next_token(),
            Err(LexerError::UnterminatedComment {
                location: Location::new(1, 3)
            })
        );
    }

    #[test]
    fn test_locations() {
        let tokens: Vec<Token> = tokenize("let a\n  = 1;").map(Result::unwrap).collect();
        let starts: Vec<Location> = tokens.iter().map(|t| t.start).collect();
        assert_eq!(
            starts,
            vec![
                Location::new(1, 1),
                Location::new(1, 5),
                Location::new(2, 3),
                Location::new(2, 5),
                Location::new(2, 6),
                Location::new(2, 7),
            ]
        );
        assert_eq!(tokens[1].range, TextRange::new(4.into(), 5.into()));
    }

    #[test]
    fn test_peek_protocol() {
        let mut lexer = Lexer::new("a b");
        assert_eq!(lexer.peek_token().unwrap().kind, TokenKind::Ident);
        assert!(matches!(
            lexer.peek_token(),
            Err(LexerError::ProtocolViolation { .. })
        ));
        let a = lexer.next_token().unwrap();
        assert_eq!(a.value, TokenValue::Str("a".into()));
        assert!(lexer.lookahead().is_none());
        assert_eq!(
            lexer.peek_token().unwrap().value,
            TokenValue::Str("b".into())
        );
        assert_eq!(lexer.next_token().unwrap().value, TokenValue::Str("b".into()));
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}
