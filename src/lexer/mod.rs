//! Pull-based token scanner.
//!
//! The lexer never fails: anything it does not recognize comes back as
//! [`Token::Invalid`] and is left for the parser to report.

mod cursor;
mod token;

use cursor::Cursor;
pub use token::Token;

pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self { cursor }
    }

    /// Scans and returns the next token, [`Token::Eof`] once input is spent.
    pub fn next_token(&mut self) -> Token<'a> {
        self.cursor.skip_whitespaces();
        let Some(c) = self.cursor.peek() else {
            return Token::Eof;
        };
        match c {
            '0'..='9' => self.lex_number(),
            // a minus glued to a digit belongs to the constant
            '-' if self.cursor.peek_2nd().is_some_and(|c| c.is_ascii_digit()) => self.lex_number(),
            'a'..='z' | 'A'..='Z' | '_' => self.lex_word(),
            _ => self.lex_punctuator(),
        }
    }

    fn lex_word(&mut self) -> Token<'a> {
        let text = self
            .cursor
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        Token::from(text)
    }

    fn lex_number(&mut self) -> Token<'a> {
        let rest = self.cursor.rest();
        let mut len = 0;
        if self.cursor.skip_if(|c| c == '-') {
            len += 1;
        }
        len += self.cursor.take_while(|c| c.is_ascii_digit()).len();

        // 1foo is one malformed token, not a constant and a word
        let tail = self
            .cursor
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        len += tail.len();
        let text = &rest[..len];
        if tail.is_empty() {
            text.parse().map_or(Token::Invalid(text), Token::Number)
        } else {
            Token::Invalid(text)
        }
    }

    fn lex_punctuator(&mut self) -> Token<'a> {
        let rest = self.cursor.rest();
        let Some(c) = self.cursor.take() else {
            return Token::Eof;
        };
        match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '{' => Token::OpenBrace,
            '}' => Token::CloseBrace,
            ';' => Token::Semicolon,
            ',' => Token::Comma,
            '=' => Token::Assign,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '!' => Token::Bang,
            '&' if self.cursor.skip_if(|c| c == '&') => Token::AndAnd,
            '&' => Token::Amp,
            '|' if self.cursor.skip_if(|c| c == '|') => Token::OrOr,
            '|' => Token::Pipe,
            _ => Token::Invalid(&rest[..c.len_utf8()]),
        }
    }
}
