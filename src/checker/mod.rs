//! Structural validation of a translation unit.
//!
//! Runs before code generation: re-parses the source and confirms every
//! top-level item is a well-formed declaration or function. Declarations and
//! functions are both inspected; only the first error is reported. Shapes the
//! code generator refuses on its own (non-constant global initializers,
//! unsupported statements) are deliberately not rejected here so the
//! `codegen:` message surfaces.

mod check_error;

use crate::ast::*;
use crate::parser;
pub use check_error::{CheckError, Result};
use std::collections::HashSet;
use tracing::debug;

fn check_function(fun: &FunDec) -> Result<()> {
    let mut seen = HashSet::new();
    for param in &fun.params {
        if !seen.insert(param.name.as_str()) {
            return Err(CheckError::DuplicateParameter(param.name.clone()));
        }
    }
    Ok(())
}

fn check_items(ast: &Ast) -> Result<()> {
    let mut names = HashSet::new();
    for item in &ast.items {
        let name = match item {
            AstItem::Var(dec) => dec.name.as_str(),
            AstItem::Fun(fun) => {
                check_function(fun)?;
                fun.name.as_str()
            }
        };
        if !names.insert(name) {
            return Err(CheckError::Redefinition(name.to_owned()));
        }
    }
    Ok(())
}

/// Validates `source`, surfacing the first parser or structural error.
pub fn check(source: &str) -> Result<()> {
    let ast = parser::parse(source)?;
    check_items(&ast)?;
    debug!(items = ast.items.len(), "translation unit validated");
    Ok(())
}
