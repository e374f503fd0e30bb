//! The Cherie lang front end.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

/// Parse the input source code into an AST.
pub fn parse(input: &str) -> Result<ast::Program, error::ParseError> {
    parser::Parser::new(lexer::Lexer::new(input)).parse()
}
