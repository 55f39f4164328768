use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

/// Syntax errors with stable, substring-matchable messages.
///
/// The first failure in a parse wins: construction of the enclosing subtree
/// aborts and the error propagates unchanged to the caller.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ParseError {
    #[error("parser: expected {0}")]
    Expected(&'static str),
    #[error("parser: expected expression")]
    ExpectedExpression,
    #[error("parser: expected identifier")]
    ExpectedIdentifier,
    #[error("parser: expected type")]
    ExpectedType,
    #[error("parser: unexpected ')'")]
    UnexpectedCloseParen,
    #[error("parser: invalid token")]
    InvalidToken,
}
