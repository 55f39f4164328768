mod args;
mod driver_error;

use args::Args;
use clap::Parser;
use driver_error::DriverError;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type BoxedError = Box<dyn std::error::Error>;

#[cfg(feature = "lexer")]
fn tokenize<'a>(source: &'a str, args: &Args) -> Vec<slcc::lexer::Token<'a>> {
    let mut lexer = slcc::lexer::Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token();
        let done = token == slcc::lexer::Token::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    if args.lex {
        dbg!(&tokens);
    }
    tokens
}

#[cfg(feature = "parser")]
fn parse(source: &str, args: &Args) -> Result<slcc::ast::Ast, BoxedError> {
    let ast = slcc::parser::parse(source)?;
    if args.parse {
        dbg!(&ast);
    }
    Ok(ast)
}

#[cfg(feature = "checker")]
fn check(source: &str) -> Result<(), BoxedError> {
    slcc::checker::check(source)?;
    Ok(())
}

#[cfg(feature = "codegen")]
fn lower(source: &str, args: &Args) -> Result<slcc::codegen::ir::Module, BoxedError> {
    let module = slcc::codegen::emit_ir(source)?;
    if args.codegen {
        dbg!(&module);
    }
    Ok(module)
}

#[cfg(feature = "emission")]
fn emit(module: &slcc::codegen::ir::Module, args: &Args) -> Result<(), BoxedError> {
    let out_file = args.output.clone().unwrap_or_else(|| {
        let mut out: PathBuf = args.input.clone();
        out.set_extension("ll");
        out
    });
    fs::write(&out_file, module.to_string())?;
    debug!(path = %out_file.display(), "wrote module");
    Ok(())
}

#[allow(unused_variables)]
fn run() -> Result<(), BoxedError> {
    let args = Args::parse();

    if !fs::exists(&args.input)? {
        let err = DriverError::InputFileDoesNotExist(args.input.clone());
        Err(err)?;
    }
    let source = fs::read_to_string(&args.input).map_err(DriverError::Io)?;

    #[cfg(feature = "lexer")]
    let tokens = tokenize(&source, &args);

    #[cfg(feature = "lexer")]
    if args.lex {
        return Ok(());
    }

    #[cfg(feature = "parser")]
    let ast = parse(&source, &args)?;

    #[cfg(feature = "parser")]
    if args.parse {
        return Ok(());
    }

    #[cfg(feature = "checker")]
    check(&source)?;

    #[cfg(feature = "checker")]
    if args.check {
        return Ok(());
    }

    #[cfg(feature = "codegen")]
    let module = lower(&source, &args)?;

    #[cfg(feature = "codegen")]
    if args.codegen {
        return Ok(());
    }

    #[cfg(feature = "emission")]
    emit(&module, &args)?;

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
