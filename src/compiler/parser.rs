//! The parser.

use std::mem;

use compact_str::CompactString;
use text_size::TextRange;

use crate::utils::Location;

use super::{
    ast::*,
    error::ParseError,
    lexer::Lexer,
    token::{Token, TokenKind, TokenValue},
};

/// Recursive descent parser over a [`Lexer`].
///
/// The parser holds the current token and uses the lexer's single token of
/// lookahead to tell an update statement (`x = 1;`) from an expression
/// statement (`x + 1;`).
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    expected_kinds: Vec<TokenKind>,
}

impl<'a> Parser<'a> {
    /// Constructs a new `Parser` with a lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            token: Token::new(
                TokenKind::None,
                TokenValue::None,
                Location::default(),
                TextRange::default(),
            ),
            expected_kinds: Vec::new(),
        }
    }

    /// Parses the whole input into a [`Program`]. Stops at the first error.
    pub fn parse(mut self) -> Result<Program, ParseError> {
        self.bump()?;
        let mut items = Vec::new();
        while !self.check(TokenKind::Eof) {
            if self.check(TokenKind::Fn) {
                items.push(Item::Function(self.parse_function()?));
            } else {
                items.push(Item::Stmt(self.parse_stmt()?));
            }
        }
        log::debug!("parsed {} top-level items", items.len());
        Ok(Program { items })
    }

    /// Returns the kind of the current token.
    fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Returns the kind of the token after the current one without consuming it.
    fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        if let Some(kind) = self.lexer.lookahead().map(|token| token.kind) {
            return Ok(kind);
        }
        Ok(self.lexer.peek_token()?.kind)
    }

    /// Moves to the next token, returning the previous one.
    fn bump(&mut self) -> Result<Token, ParseError> {
        self.expected_kinds.clear();
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.token, next))
    }

    /// Checks if the current token is `t`, and returns `true` if so.
    /// This method will automatically add `t` to `expected_kinds` if `t` is not encountered.
    fn check(&mut self, t: TokenKind) -> bool {
        let is_present = self.kind() == t;
        if !is_present {
            self.expected_kinds.push(t);
        }
        is_present
    }

    /// Consumes a token 't' if it exists. Returns whether the given token was present.
    fn eat(&mut self, t: TokenKind) -> Result<bool, ParseError> {
        let is_present = self.check(t);
        if is_present {
            self.bump()?;
        }
        Ok(is_present)
    }

    /// Expects and consumes the token `t`. Signals an error if the next token is not `t`.
    fn expect(&mut self, t: TokenKind) -> Result<Token, ParseError> {
        if self.check(t) {
            self.bump()
        } else {
            Err(self.unexpected())
        }
    }

    /// Consumes the `)` closing the `(` at `open`.
    fn close_paren(&mut self, open: Location) -> Result<(), ParseError> {
        if self.eat(TokenKind::CloseParen)? {
            Ok(())
        } else {
            Err(ParseError::UnmatchedParenthesis { location: open })
        }
    }

    /// Returns an error for an unexpected token.
    fn unexpected(&mut self) -> ParseError {
        let expected = mem::take(&mut self.expected_kinds);
        let location = self.token.start;
        match self.kind() {
            TokenKind::Eof => ParseError::UnexpectedEndOfInput { expected, location },
            found => ParseError::UnexpectedToken {
                expected,
                found,
                location,
            },
        }
    }

    fn parse_function(&mut self) -> Result<FunctionDef, ParseError> {
        let start = self.expect(TokenKind::Fn)?.start;
        let name = self.parse_ident()?;
        let open = self.expect(TokenKind::OpenParen)?.start;
        self.close_paren(open)?;
        let body = self.parse_block()?;
        Ok(FunctionDef { name, body, start })
    }

    fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.expect(TokenKind::OpenBrace)?.start;
        let mut body = Vec::new();
        while !self.eat(TokenKind::CloseBrace)? {
            if self.kind() == TokenKind::Eof {
                return Err(self.unexpected());
            }
            body.push(self.parse_stmt()?);
        }
        Ok(Block { body, start })
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.token.start;
        Ok(match self.kind() {
            TokenKind::Let | TokenKind::Const => {
                let immutable = self.bump()?.kind == TokenKind::Const;
                let name = self.parse_ident()?;
                self.expect(TokenKind::Assign)?;
                let value = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Stmt::Assign(AssignStmt {
                    name,
                    immutable,
                    value,
                    start,
                })
            }
            TokenKind::If => Stmt::If(self.parse_if()?),
            TokenKind::While => {
                self.bump()?;
                let test = self.parse_condition()?;
                let body = self.parse_block()?;
                Stmt::While(WhileStmt { test, body, start })
            }
            TokenKind::Ident
                if matches!(
                    self.peek_kind()?,
                    TokenKind::Assign
                        | TokenKind::AddAssign
                        | TokenKind::SubAssign
                        | TokenKind::MulAssign
                        | TokenKind::DivAssign
                        | TokenKind::Increment
                        | TokenKind::Decrement
                ) =>
            {
                Stmt::Update(self.parse_update()?)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Stmt::Expr(ExprStmt { expr, start })
            }
        })
    }

    fn parse_update(&mut self) -> Result<UpdateStmt, ParseError> {
        let start = self.token.start;
        let name = self.parse_ident()?;
        let operator = match self.kind() {
            TokenKind::Assign => None,
            TokenKind::AddAssign | TokenKind::Increment => Some(BinOp::Add),
            TokenKind::SubAssign | TokenKind::Decrement => Some(BinOp::Sub),
            TokenKind::MulAssign => Some(BinOp::Mul),
            TokenKind::DivAssign => Some(BinOp::Div),
            _ => {
                self.expected_kinds.push(TokenKind::Assign);
                return Err(self.unexpected());
            }
        };
        let token = self.bump()?;
        let value = if matches!(token.kind, TokenKind::Increment | TokenKind::Decrement) {
            Expr::Number(NumberLit {
                value: Number::Int(1),
                start: token.start,
            })
        } else {
            self.parse_expr()?
        };
        self.expect(TokenKind::Semi)?;
        Ok(UpdateStmt {
            name,
            operator,
            value,
            start,
        })
    }

    fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        let start = self.expect(TokenKind::If)?.start;
        let test = self.parse_condition()?;
        let consequent = self.parse_block()?;
        let mut else_ifs = Vec::new();
        let mut alternate = None;
        while self.check(TokenKind::Else) {
            let else_start = self.bump()?.start;
            if self.eat(TokenKind::If)? {
                let test = self.parse_condition()?;
                let body = self.parse_block()?;
                else_ifs.push(ElseIf {
                    test,
                    body,
                    start: else_start,
                });
            } else {
                alternate = Some(Box::new(self.parse_block()?));
                break;
            }
        }
        Ok(IfStmt {
            test,
            consequent,
            else_ifs,
            alternate,
            start,
        })
    }

    /// Parses `( expression )` after `if` or `while`.
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        let open = self.expect(TokenKind::OpenParen)?.start;
        let test = self.parse_expr()?;
        self.close_paren(open)?;
        Ok(test)
    }

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_precedence(1)
    }

    fn parse_expr_precedence(&mut self, min_precedence: u8) -> Result<Expr, ParseError> {
        let start = self.token.start;
        let mut left = self.parse_expr_unary()?;
        loop {
            let operator = match self.kind() {
                TokenKind::Add => BinOp::Add,
                TokenKind::Sub => BinOp::Sub,
                TokenKind::Mul => BinOp::Mul,
                TokenKind::Div => BinOp::Div,
                TokenKind::Eq => BinOp::Eq,
                TokenKind::And => BinOp::And,
                TokenKind::Or => BinOp::Or,
                _ => break,
            };
            if operator.precedence() < min_precedence {
                break;
            }
            self.bump()?;
            let right = self.parse_expr_precedence(operator.precedence() + 1)?;
            left = Expr::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                start,
            });
        }
        Ok(left)
    }

    fn parse_expr_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.token.start;
        let operator = match self.kind() {
            TokenKind::Sub => UnOp::Neg,
            TokenKind::Bang | TokenKind::Not => UnOp::Not,
            _ => return self.parse_expr_primary(),
        };
        self.bump()?;
        let argument = self.parse_expr_unary()?;
        Ok(Expr::Unary(UnaryExpr {
            operator,
            argument: Box::new(argument),
            start,
        }))
    }

    fn parse_expr_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.token.start;
        match self.kind() {
            TokenKind::OpenParen => {
                self.bump()?;
                let expr = self.parse_expr()?;
                self.close_paren(start)?;
                Ok(expr)
            }
            TokenKind::Ident => {
                let ident = self.parse_ident()?;
                if self.check(TokenKind::OpenParen) {
                    let arguments = self.parse_arguments()?;
                    Ok(Expr::Call(CallExpr {
                        callee: ident,
                        arguments,
                        start,
                    }))
                } else {
                    Ok(Expr::Variable(Variable {
                        name: ident.name,
                        start,
                    }))
                }
            }
            TokenKind::True | TokenKind::False => {
                let value = self.bump()?.kind == TokenKind::True;
                Ok(Expr::Bool(BoolLit { value, start }))
            }
            TokenKind::Literal => {
                let expr = match self.token.value.clone() {
                    TokenValue::Int(v) => Expr::Number(NumberLit {
                        value: Number::Int(v),
                        start,
                    }),
                    TokenValue::Float(v) => Expr::Number(NumberLit {
                        value: Number::Float(v),
                        start,
                    }),
                    TokenValue::Char(c) => Expr::Str(StrLit {
                        value: std::iter::once(c).collect::<CompactString>(),
                        start,
                    }),
                    TokenValue::Str(value) => Expr::Str(StrLit { value, start }),
                    TokenValue::None | TokenValue::Bool(_) => return Err(self.unexpected()),
                };
                self.bump()?;
                Ok(expr)
            }
            _ => {
                self.expected_kinds.extend([
                    TokenKind::OpenParen,
                    TokenKind::Ident,
                    TokenKind::Literal,
                    TokenKind::True,
                    TokenKind::False,
                    TokenKind::Sub,
                    TokenKind::Bang,
                    TokenKind::Not,
                ]);
                Err(self.unexpected())
            }
        }
    }

    /// Parses `( [ expression { "," expression } ] )`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let open = self.expect(TokenKind::OpenParen)?.start;
        let mut arguments = Vec::new();
        if self.eat(TokenKind::CloseParen)? {
            return Ok(arguments);
        }
        loop {
            arguments.push(self.parse_expr()?);
            if !self.eat(TokenKind::Comma)? {
                break;
            }
        }
        self.close_paren(open)?;
        Ok(arguments)
    }

    fn parse_ident(&mut self) -> Result<Ident, ParseError> {
        if let (TokenKind::Ident, TokenValue::Str(name)) = (self.token.kind, &self.token.value) {
            let ident = Ident {
                name: name.clone(),
                start: self.token.start,
            };
            self.bump()?;
            Ok(ident)
        } else {
            self.expected_kinds.push(TokenKind::Ident);
            Err(self.unexpected())
        }
    }
}
