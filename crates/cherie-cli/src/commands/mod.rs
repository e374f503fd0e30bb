use std::fs;

use anyhow::Context as _;

use crate::{
    args::{CherieCliArgs, CherieCliCommand},
    Context,
};

mod ast;
mod run;
mod tokens;

impl Context {
    pub fn execute(&mut self, args: CherieCliArgs) -> Result<(), anyhow::Error> {
        match args.cmd {
            CherieCliCommand::Tokens(cmd) => self.execute_tokens(cmd),
            CherieCliCommand::Ast(cmd) => self.execute_ast(cmd),
            CherieCliCommand::Run(cmd) => self.execute_run(cmd),
        }
    }

    fn read_script(&self, path: &str) -> Result<String, anyhow::Error> {
        fs::read_to_string(path).with_context(|| format!("failed to read {path}"))
    }
}
