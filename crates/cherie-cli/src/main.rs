use std::process::exit;

use clap::Parser;

use crate::args::CherieCliArgs;

pub mod args;
pub mod commands;

#[derive(Debug, Clone)]
pub struct Context;

fn main() {
    env_logger::init();
    let mut context = Context;
    let args = CherieCliArgs::parse();
    match context.execute(args) {
        Ok(()) => exit(0),
        Err(err) => {
            eprintln!("{err:#}");
            exit(1);
        }
    }
}
