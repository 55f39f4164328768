use crate::checker::CheckError;
use crate::parser::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodegenError>;

/// Lowering errors. Checker and parser failures pass through verbatim; the
/// `expected` variants mark shapes the parser accepts but this backend does
/// not lower yet.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CodegenError {
    #[error("{0}")]
    Check(#[from] CheckError),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("codegen: expected constant initializer")]
    ExpectedConstantInit,
    #[error("codegen: expected scalar declaration")]
    ExpectedScalar,
    #[error("codegen: expected empty parameter list")]
    ExpectedNoParams,
    #[error("codegen: expected call without arguments")]
    ExpectedNoArguments,
    #[error("codegen: expected statement")]
    ExpectedStatement,
    #[error("codegen: expected expression")]
    ExpectedExpression,
    #[error("codegen: write failed")]
    Sink(#[from] std::fmt::Error),
}
