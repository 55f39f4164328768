use clap::Parser;
use std::path::PathBuf;

/// Subset-C compiler front end emitting LLVM-style textual IR.
#[derive(Parser, Debug)]
#[command(name = "slcc", version)]
pub struct Args {
    /// Input source file
    pub input: PathBuf,

    /// Stop after lexing and dump the tokens
    #[cfg(feature = "lexer")]
    #[arg(long)]
    pub lex: bool,

    /// Stop after parsing and dump the AST
    #[cfg(feature = "parser")]
    #[arg(long)]
    pub parse: bool,

    /// Stop after structural validation
    #[cfg(feature = "checker")]
    #[arg(long)]
    pub check: bool,

    /// Stop after lowering and dump the IR module
    #[cfg(feature = "codegen")]
    #[arg(long)]
    pub codegen: bool,

    /// Write the IR to the given path instead of <input>.ll
    #[cfg(feature = "emission")]
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
