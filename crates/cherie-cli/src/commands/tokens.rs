use cherie_lang::compiler::lexer::tokenize;

use crate::{args::TokensCommand, Context};

impl Context {
    pub fn execute_tokens(&mut self, cmd: TokensCommand) -> Result<(), anyhow::Error> {
        let input = self.read_script(&cmd.path)?;
        for token in tokenize(&input) {
            let token = token?;
            println!("{:<8}{token}", token.start.to_string());
        }
        Ok(())
    }
}
