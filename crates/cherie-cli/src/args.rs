use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cherie")]
#[command(bin_name = "cherie")]
#[command(version, about, long_about = None)]
pub struct CherieCliArgs {
    #[command(subcommand)]
    pub cmd: CherieCliCommand,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CherieCliCommand {
    /// Print the tokens of a Cherie script, one per line.
    Tokens(TokensCommand),
    /// Parse a Cherie script and print its syntax tree.
    Ast(AstCommand),
    /// Evaluate a Cherie script.
    Run(RunCommand),
}

#[derive(Debug, Clone, Args)]
pub struct TokensCommand {
    /// The path of the Cherie script to tokenize.
    pub path: String,
}

#[derive(Debug, Clone, Args)]
pub struct AstCommand {
    /// The path of the Cherie script to parse.
    pub path: String,
    /// Print the syntax tree as JSON instead of source text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Args)]
pub struct RunCommand {
    /// The path of the Cherie script to run.
    pub path: String,
}
