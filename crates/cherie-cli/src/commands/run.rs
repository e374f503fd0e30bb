use cherie_lang::{compiler::parse, eval::Interpreter};

use crate::{args::RunCommand, Context};

impl Context {
    pub fn execute_run(&mut self, cmd: RunCommand) -> Result<(), anyhow::Error> {
        let input = self.read_script(&cmd.path)?;
        let program = parse(&input)?;
        let mut interpreter = Interpreter::new();
        let value = interpreter.run(&program)?;
        log::info!("{} finished", cmd.path);
        println!("{value}");
        for (name, binding) in interpreter.env().globals() {
            let keyword = if binding.immutable { "const" } else { "let" };
            println!("{keyword} {name} = {}", binding.value);
        }
        Ok(())
    }
}
