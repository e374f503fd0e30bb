use cherie_lang::compiler::parse;

use crate::{args::AstCommand, Context};

impl Context {
    pub fn execute_ast(&mut self, cmd: AstCommand) -> Result<(), anyhow::Error> {
        let input = self.read_script(&cmd.path)?;
        let program = parse(&input)?;
        if cmd.json {
            println!("{}", serde_json::to_string_pretty(&program)?);
        } else {
            print!("{program}");
        }
        Ok(())
    }
}
