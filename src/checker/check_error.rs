use crate::ast::Identifier;
use crate::parser::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckError>;

/// Validation errors. Parser failures pass through with their own message.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum CheckError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("checker: redefinition of '{0}'")]
    Redefinition(Identifier),
    #[error("checker: duplicate parameter '{0}'")]
    DuplicateParameter(Identifier),
}
