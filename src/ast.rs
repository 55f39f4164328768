pub type Identifier = String;

/// A parsed translation unit: the ordered top-level items of one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    pub items: Vec<AstItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstItem {
    Var(VarDec),
    Fun(FunDec),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDec {
    pub name: Identifier,
    pub var_type: Scalar,
    pub indirection: u32,
    pub init: Option<Exp>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunDec {
    pub name: Identifier,
    pub fun_type: Scalar,
    pub indirection: u32,
    pub params: Vec<Param>,
    pub body: AstBlock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: Identifier,
    pub param_type: Scalar,
    pub indirection: u32,
}

/// Declared scalar base type of a declaration, parameter or function.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Scalar {
    Int,
    Char,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstBlock {
    pub items: Vec<AstStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstStatement {
    If {
        condition: Exp,
        then: Box<AstStatement>,
        els: Option<Box<AstStatement>>,
    },
    While {
        condition: Exp,
        body: Box<AstStatement>,
    },
    For {
        init: AstForInit,
        condition: Option<Exp>,
        post: Option<Exp>,
        body: Box<AstStatement>,
    },
    Compound(AstBlock),
    Declaration(VarDec),
    Return(Exp),
    Exp(Exp),
    Break,
    Continue,
    Null,
}

/// The empty init marker is `InitExp(None)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstForInit {
    InitDecl(VarDec),
    InitExp(Option<Exp>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Exp {
    Binary(AstBinaryOp, Box<Exp>, Box<Exp>),
    Unary(AstUnaryOp, Box<Exp>),
    Assignment(Identifier, Box<Exp>),
    Call(Identifier, Vec<Exp>),
    Var(Identifier),
    Constant(i64),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstBinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    LogicalAnd,
    LogicalOr,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AstUnaryOp {
    LogicalNot,
    Plus,
    Negate,
    Dereference,
    AddressOf,
}

impl Exp {
    pub fn is_const(&self) -> bool {
        matches!(self, Exp::Constant(_))
    }

    pub fn get_const(&self) -> Option<i64> {
        match self {
            Exp::Constant(v) => Some(*v),
            _ => None,
        }
    }
}
