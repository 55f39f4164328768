//! IR data model: a module of global scalar values and function definitions,
//! each function a flat instruction vector with label pseudo-instructions.
//! Rendering to text lives in [emission](crate::emission).

pub type Identifier = String;
pub type Instructions = Vec<Instruction>;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Module {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Global {
    pub name: Identifier,
    pub init: i64,
}

/// One function definition. The `entry` label is implicit; every labeled
/// block in `instructions` ends in exactly one terminator (`br` or `ret`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Function {
    pub name: Identifier,
    pub instructions: Instructions,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Instruction {
    Label(Identifier),
    /// `%dst = <op> i32 lhs, rhs`
    Binary(IrBinaryOp, Identifier, Value, Value),
    /// `%dst = icmp ne i32 src, 0`
    IcmpNz(Identifier, Value),
    /// `%dst = call i32 @callee()`
    Call(Identifier, Identifier),
    /// `br label %target`
    Br(Identifier),
    /// `br i1 %flag, label %then, label %else`
    BrCond(Identifier, Identifier, Identifier),
    /// `ret i32 value`
    Ret(Value),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    Imm(i64),
    Temp(Identifier),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IrBinaryOp {
    Add,
    Sub,
    Mul,
    Sdiv,
    Srem,
}
