//! Recursive-descent AST builder with one token of lookahead.

mod parse_error;

use crate::ast::*;
use crate::lexer::{Lexer, Token};
pub use parse_error::{ParseError, Result};
use tracing::debug;

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token<'a>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    fn bump(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn bump_if(&mut self, t: &Token) -> bool {
        let condition = self.current == *t;
        if condition {
            self.bump();
        }
        condition
    }

    fn at_end(&self) -> bool {
        self.current == Token::Eof
    }

    fn expect(&mut self, t: &Token, what: &'static str) -> Result<()> {
        if self.bump_if(t) {
            Ok(())
        } else {
            Err(self.error_here(ParseError::Expected(what)))
        }
    }

    /// An invalid lookahead token outranks any contextual message.
    fn error_here(&self, fallback: ParseError) -> ParseError {
        if matches!(self.current, Token::Invalid(_)) {
            ParseError::InvalidToken
        } else {
            fallback
        }
    }
}

fn get_prec(token: &Token) -> u64 {
    match token {
        Token::Star | Token::Slash | Token::Percent => 50,
        Token::Plus | Token::Minus => 45,
        Token::AndAnd => 10,
        Token::OrOr => 5,
        _ => 0,
    }
}

impl TryFrom<&Token<'_>> for AstBinaryOp {
    type Error = ParseError;
    fn try_from(value: &Token) -> std::result::Result<Self, ParseError> {
        match value {
            Token::Plus => Ok(AstBinaryOp::Add),
            Token::Minus => Ok(AstBinaryOp::Subtract),
            Token::Star => Ok(AstBinaryOp::Multiply),
            Token::Slash => Ok(AstBinaryOp::Divide),
            Token::Percent => Ok(AstBinaryOp::Remainder),
            Token::AndAnd => Ok(AstBinaryOp::LogicalAnd),
            Token::OrOr => Ok(AstBinaryOp::LogicalOr),
            _ => Err(ParseError::ExpectedExpression),
        }
    }
}

impl TryFrom<&Token<'_>> for AstUnaryOp {
    type Error = ParseError;
    fn try_from(value: &Token) -> std::result::Result<Self, ParseError> {
        match value {
            Token::Bang => Ok(AstUnaryOp::LogicalNot),
            Token::Plus => Ok(AstUnaryOp::Plus),
            Token::Minus => Ok(AstUnaryOp::Negate),
            Token::Star => Ok(AstUnaryOp::Dereference),
            Token::Amp => Ok(AstUnaryOp::AddressOf),
            _ => Err(ParseError::ExpectedExpression),
        }
    }
}

fn parse_identifier(p: &mut Parser) -> Result<Identifier> {
    if let Token::Ident(name) = p.current {
        let name = name.to_owned();
        p.bump();
        Ok(name)
    } else {
        Err(p.error_here(ParseError::ExpectedIdentifier))
    }
}

impl TryFrom<&Token<'_>> for Scalar {
    type Error = ParseError;
    fn try_from(value: &Token) -> std::result::Result<Self, ParseError> {
        match value {
            Token::Int => Ok(Scalar::Int),
            Token::Char => Ok(Scalar::Char),
            Token::Short => Ok(Scalar::Short),
            _ => Err(ParseError::ExpectedType),
        }
    }
}

fn parse_scalar(p: &mut Parser) -> Result<Scalar> {
    let scalar = Scalar::try_from(&p.current).map_err(|err| p.error_here(err))?;
    p.bump();
    Ok(scalar)
}

fn parse_indirection(p: &mut Parser) -> u32 {
    let mut depth = 0;
    while p.bump_if(&Token::Star) {
        depth += 1;
    }
    depth
}

fn parse_exp(p: &mut Parser, min_prec: u64) -> Result<Exp> {
    let left = parse_factor(p)?;
    parse_exp_tail(p, left, min_prec)
}

fn parse_exp_tail(p: &mut Parser, mut left: Exp, min_prec: u64) -> Result<Exp> {
    while p.current.is_binaryop() {
        let prec = get_prec(&p.current);
        if prec < min_prec {
            break;
        }
        let op = AstBinaryOp::try_from(&p.current)?;
        p.bump();
        // prec + 1 keeps every level left-associative
        let right = parse_exp(p, prec + 1).map(Box::new)?;
        left = Exp::Binary(op, Box::new(left), right);
    }
    Ok(left)
}

fn parse_unary_operation(p: &mut Parser) -> Result<Exp> {
    let op = AstUnaryOp::try_from(&p.current)?;
    p.bump();
    // factors include unary expressions, so operators stack (!-x)
    let inner = parse_factor(p).map(Box::new)?;
    Ok(Exp::Unary(op, inner))
}

fn parse_arguments(p: &mut Parser) -> Result<Vec<Exp>> {
    let mut args = Vec::new();
    if p.current == Token::CloseParen {
        return Ok(args);
    }
    loop {
        let exp = parse_exp(p, 0)?;
        args.push(exp);
        if !p.bump_if(&Token::Comma) {
            break;
        }
    }
    Ok(args)
}

fn parse_factor_call(p: &mut Parser, name: Identifier) -> Result<Exp> {
    p.expect(&Token::OpenParen, "'('")?;
    let arguments = parse_arguments(p)?;
    p.expect(&Token::CloseParen, "')'")?;
    Ok(Exp::Call(name, arguments))
}

fn parse_factor_identifier(p: &mut Parser, name: Identifier) -> Result<Exp> {
    if p.current == Token::OpenParen {
        parse_factor_call(p, name)
    } else {
        Ok(Exp::Var(name))
    }
}

fn parse_factor_subexp(p: &mut Parser) -> Result<Exp> {
    p.expect(&Token::OpenParen, "'('")?;
    let exp = parse_exp(p, 0)?;
    p.expect(&Token::CloseParen, "')'")?;
    Ok(exp)
}

fn parse_factor(p: &mut Parser) -> Result<Exp> {
    match p.current {
        Token::Number(v) => {
            p.bump();
            Ok(Exp::Constant(v))
        }
        Token::Ident(_) => {
            let name = parse_identifier(p)?;
            parse_factor_identifier(p, name)
        }
        Token::OpenParen => parse_factor_subexp(p),
        Token::CloseParen => Err(ParseError::UnexpectedCloseParen),
        Token::Invalid(_) => Err(ParseError::InvalidToken),
        ref t if t.is_unaryop() => parse_unary_operation(p),
        _ => Err(ParseError::ExpectedExpression),
    }
}

fn parse_optional_exp(p: &mut Parser, delim: &Token, what: &'static str) -> Result<Option<Exp>> {
    if p.bump_if(delim) {
        return Ok(None);
    }
    let exp = parse_exp(p, 0)?;
    p.expect(delim, what)?;
    Ok(Some(exp))
}

fn parse_assignment(p: &mut Parser) -> Result<Exp> {
    let name = parse_identifier(p)?;
    p.expect(&Token::Assign, "'='")?;
    let value = parse_exp(p, 0).map(Box::new)?;
    Ok(Exp::Assignment(name, value))
}

fn parse_forinit(p: &mut Parser) -> Result<AstForInit> {
    match p.current {
        Token::Semicolon => {
            p.bump();
            Ok(AstForInit::InitExp(None))
        }
        ref t if t.is_type() => {
            let dec = parse_local_declaration(p)?;
            Ok(AstForInit::InitDecl(dec))
        }
        Token::Ident(_) => {
            let exp = parse_assignment(p)?;
            p.expect(&Token::Semicolon, "';'")?;
            Ok(AstForInit::InitExp(Some(exp)))
        }
        _ => Err(p.error_here(ParseError::ExpectedExpression)),
    }
}

fn parse_forpost(p: &mut Parser) -> Result<Option<Exp>> {
    if p.current == Token::CloseParen {
        return Ok(None);
    }
    // no trailing semicolon here, the close paren delimits
    parse_assignment(p).map(Some)
}

fn parse_for(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::For, "'for'")?;
    p.expect(&Token::OpenParen, "'('")?;
    let init = parse_forinit(p)?;
    let condition = parse_optional_exp(p, &Token::Semicolon, "';'")?;
    let post = parse_forpost(p)?;
    p.expect(&Token::CloseParen, "')'")?;
    let body = parse_statement(p).map(Box::new)?;

    Ok(AstStatement::For {
        init,
        condition,
        post,
        body,
    })
}

fn parse_if(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::If, "'if'")?;
    p.expect(&Token::OpenParen, "'('")?;
    let condition = parse_exp(p, 0)?;
    p.expect(&Token::CloseParen, "')'")?;
    let then = parse_statement(p).map(Box::new)?;
    let else_present = p.bump_if(&Token::Else);
    let els = else_present
        .then(|| parse_statement(p))
        .transpose()?
        .map(Box::new);

    Ok(AstStatement::If {
        condition,
        then,
        els,
    })
}

fn parse_while(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::While, "'while'")?;
    p.expect(&Token::OpenParen, "'('")?;
    let condition = parse_exp(p, 0)?;
    p.expect(&Token::CloseParen, "')'")?;
    let body = parse_statement(p).map(Box::new)?;

    Ok(AstStatement::While { condition, body })
}

fn parse_return(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::Return, "'return'")?;
    let exp = parse_exp(p, 0)?;
    p.expect(&Token::Semicolon, "';'")?;
    Ok(AstStatement::Return(exp))
}

fn parse_break(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::Break, "'break'")?;
    p.expect(&Token::Semicolon, "';'")?;
    Ok(AstStatement::Break)
}

fn parse_continue(p: &mut Parser) -> Result<AstStatement> {
    p.expect(&Token::Continue, "'continue'")?;
    p.expect(&Token::Semicolon, "';'")?;
    Ok(AstStatement::Continue)
}

fn parse_statement_exp(p: &mut Parser) -> Result<AstStatement> {
    let exp = parse_exp(p, 0)?;
    p.expect(&Token::Semicolon, "';'")?;
    Ok(AstStatement::Exp(exp))
}

/// `name = exp;` is an assignment statement; anything else starting with an
/// identifier continues as a plain expression statement.
fn parse_statement_assign_or_exp(p: &mut Parser) -> Result<AstStatement> {
    let name = parse_identifier(p)?;
    if p.bump_if(&Token::Assign) {
        let value = parse_exp(p, 0).map(Box::new)?;
        p.expect(&Token::Semicolon, "';'")?;
        return Ok(AstStatement::Exp(Exp::Assignment(name, value)));
    }
    let factor = parse_factor_identifier(p, name)?;
    let exp = parse_exp_tail(p, factor, 0)?;
    p.expect(&Token::Semicolon, "';'")?;
    Ok(AstStatement::Exp(exp))
}

fn parse_statement(p: &mut Parser) -> Result<AstStatement> {
    match p.current {
        Token::If => parse_if(p),
        Token::While => parse_while(p),
        Token::For => parse_for(p),
        Token::Return => parse_return(p),
        Token::Break => parse_break(p),
        Token::Continue => parse_continue(p),
        Token::Semicolon => {
            p.bump();
            Ok(AstStatement::Null)
        }
        Token::OpenBrace => {
            let block = parse_block(p)?;
            Ok(AstStatement::Compound(block))
        }
        ref t if t.is_type() => parse_local_declaration(p).map(AstStatement::Declaration),
        Token::Ident(_) => parse_statement_assign_or_exp(p),
        _ => parse_statement_exp(p),
    }
}

fn parse_block(p: &mut Parser) -> Result<AstBlock> {
    let mut items = Vec::new();

    p.expect(&Token::OpenBrace, "'{'")?;

    while !p.bump_if(&Token::CloseBrace) {
        match p.current {
            Token::Eof => return Err(ParseError::Expected("'}'")),
            Token::Invalid(_) => return Err(ParseError::InvalidToken),
            _ => {
                let item = parse_statement(p)?;
                items.push(item);
            }
        }
    }

    Ok(AstBlock { items })
}

/// Parses `[= exp] ;` after the declarator. Comma lists are rejected: the
/// next token after the single initializer must be the semicolon.
fn parse_var_tail(p: &mut Parser, var_type: Scalar, indirection: u32, name: Identifier) -> Result<VarDec> {
    let init = if p.bump_if(&Token::Assign) {
        Some(parse_exp(p, 0)?)
    } else {
        None
    };
    p.expect(&Token::Semicolon, "';'")?;
    Ok(VarDec {
        name,
        var_type,
        indirection,
        init,
    })
}

fn parse_local_declaration(p: &mut Parser) -> Result<VarDec> {
    let var_type = parse_scalar(p)?;
    let indirection = parse_indirection(p);
    let name = parse_identifier(p)?;
    parse_var_tail(p, var_type, indirection, name)
}

fn parse_params(p: &mut Parser) -> Result<Vec<Param>> {
    let mut params = Vec::new();
    if p.current == Token::CloseParen {
        return Ok(params);
    }
    loop {
        let param_type = parse_scalar(p)?;
        let indirection = parse_indirection(p);
        let name = parse_identifier(p)?;
        params.push(Param {
            name,
            param_type,
            indirection,
        });
        if !p.bump_if(&Token::Comma) {
            break;
        }
    }
    Ok(params)
}

fn parse_item(p: &mut Parser) -> Result<AstItem> {
    let scalar = parse_scalar(p)?;
    let indirection = parse_indirection(p);
    let name = parse_identifier(p)?;

    if p.bump_if(&Token::OpenParen) {
        let params = parse_params(p)?;
        p.expect(&Token::CloseParen, "')'")?;
        let body = parse_block(p)?;
        Ok(AstItem::Fun(FunDec {
            name,
            fun_type: scalar,
            indirection,
            params,
            body,
        }))
    } else {
        parse_var_tail(p, scalar, indirection, name).map(AstItem::Var)
    }
}

/// Builds the AST for one translation unit.
pub fn parse(source: &str) -> Result<Ast> {
    let mut items = Vec::new();
    let mut p = Parser::new(source);

    while !p.at_end() {
        let item = parse_item(&mut p)?;
        items.push(item);
    }
    debug!(items = items.len(), "parsed translation unit");
    Ok(Ast { items })
}
