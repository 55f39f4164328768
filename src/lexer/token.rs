/// Basic token type.
///
/// Identifier and invalid tokens borrow their text from the source buffer;
/// nothing is copied during scanning. The catalog is wider than the grammar
/// the parser consumes (`|` has no production, `&` only a unary one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// end of input
    Eof,
    /// any unknown word (variable names, function names, ..)
    Ident(&'a str),
    /// decimal constant with decoded value (e.g. 100, -5)
    Number(i64),
    /// int keyword
    Int,
    /// char keyword
    Char,
    /// short keyword
    Short,
    /// if keyword
    If,
    /// else keyword
    Else,
    /// while keyword
    While,
    /// for keyword
    For,
    /// return keyword
    Return,
    /// break keyword
    Break,
    /// continue keyword
    Continue,
    /// (
    OpenParen,
    /// )
    CloseParen,
    /// {
    OpenBrace,
    /// }
    CloseBrace,
    /// ;
    Semicolon,
    /// ,
    Comma,
    /// =
    Assign,
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// !
    Bang,
    /// &
    Amp,
    /// |
    Pipe,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// unrecognized character or malformed constant
    Invalid(&'a str),
}

impl<'a> Token<'a> {
    #[inline]
    pub fn is_type(&self) -> bool {
        matches!(self, Token::Int | Token::Char | Token::Short)
    }

    #[inline]
    pub fn is_unaryop(&self) -> bool {
        matches!(
            self,
            Token::Bang | Token::Plus | Token::Minus | Token::Star | Token::Amp
        )
    }

    #[inline]
    pub fn is_binaryop(&self) -> bool {
        matches!(
            self,
            Token::Plus
                | Token::Minus
                | Token::Star
                | Token::Slash
                | Token::Percent
                | Token::AndAnd
                | Token::OrOr
        )
    }
}

impl<'a> From<&'a str> for Token<'a> {
    fn from(s: &'a str) -> Self {
        match s {
            "int" => Self::Int,
            "char" => Self::Char,
            "short" => Self::Short,
            "if" => Self::If,
            "else" => Self::Else,
            "while" => Self::While,
            "for" => Self::For,
            "return" => Self::Return,
            "break" => Self::Break,
            "continue" => Self::Continue,
            _ => Self::Ident(s),
        }
    }
}
