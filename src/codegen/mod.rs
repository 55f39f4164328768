//! AST-to-IR lowering.
//!
//! Lowers the functional subset: global scalar declarations, functions,
//! blocks, if/while, return, and numeric/call/binary expressions. The parser
//! accepts strictly more (assignments, for loops, unary operators, pointers,
//! call arguments); those shapes fail here with a `codegen:` message. The
//! asymmetry is intentional, a staged backend, not a defect to fix.

mod codegen_error;
#[cfg(all(test, feature = "emission"))]
mod codegen_tests;
pub mod ir;

use crate::ast::*;
use crate::checker;
use crate::parser;
pub use codegen_error::{CodegenError, Result};
use ir::{Global, Instruction, Instructions, IrBinaryOp, Module, Value};
#[cfg(feature = "emission")]
use std::fmt::Write;
use tracing::debug;

/// Fresh temporary and label names, reset at each function entry so names
/// never collide across functions.
struct NameGenerator {
    temp_count: u64,
    label_count: u64,
}

impl NameGenerator {
    fn new() -> Self {
        Self {
            temp_count: 0,
            label_count: 0,
        }
    }

    fn get_temp(&mut self) -> String {
        let c = self.temp_count;
        self.temp_count += 1;
        format!("t{c}")
    }

    fn get_label_id(&mut self) -> u64 {
        let c = self.label_count;
        self.label_count += 1;
        c
    }
}

impl TryFrom<AstBinaryOp> for IrBinaryOp {
    type Error = CodegenError;
    fn try_from(value: AstBinaryOp) -> Result<Self> {
        match value {
            AstBinaryOp::Add => Ok(Self::Add),
            AstBinaryOp::Subtract => Ok(Self::Sub),
            AstBinaryOp::Multiply => Ok(Self::Mul),
            AstBinaryOp::Divide => Ok(Self::Sdiv),
            AstBinaryOp::Remainder => Ok(Self::Srem),
            AstBinaryOp::LogicalAnd | AstBinaryOp::LogicalOr => {
                Err(CodegenError::ExpectedExpression)
            }
        }
    }
}

fn lower_exp(e: Exp, instructions: &mut Instructions, ng: &mut NameGenerator) -> Result<Value> {
    match e {
        Exp::Constant(v) => Ok(Value::Imm(v)),
        Exp::Call(name, args) => {
            if !args.is_empty() {
                return Err(CodegenError::ExpectedNoArguments);
            }
            let dst = ng.get_temp();
            instructions.push(Instruction::Call(dst.clone(), name));
            Ok(Value::Temp(dst))
        }
        Exp::Binary(op, lhs, rhs) => {
            let op = IrBinaryOp::try_from(op)?;
            // left before right fixes evaluation order
            let lhs = lower_exp(*lhs, instructions, ng)?;
            let rhs = lower_exp(*rhs, instructions, ng)?;
            let dst = ng.get_temp();
            instructions.push(Instruction::Binary(op, dst.clone(), lhs, rhs));
            Ok(Value::Temp(dst))
        }
        Exp::Unary(..) | Exp::Assignment(..) | Exp::Var(_) => {
            Err(CodegenError::ExpectedExpression)
        }
    }
}

/// Evaluates a branch condition into an `i1` flag temp.
fn lower_condition(
    condition: Exp,
    instructions: &mut Instructions,
    ng: &mut NameGenerator,
) -> Result<ir::Identifier> {
    let value = lower_exp(condition, instructions, ng)?;
    let flag = ng.get_temp();
    instructions.push(Instruction::IcmpNz(flag.clone(), value));
    Ok(flag)
}

fn lower_if(
    condition: Exp,
    then: AstStatement,
    els: Option<AstStatement>,
    instructions: &mut Instructions,
    ng: &mut NameGenerator,
) -> Result<bool> {
    let id = ng.get_label_id();
    let then_label = format!("if.then{id}");
    let end_label = format!("if.end{id}");

    let flag = lower_condition(condition, instructions, ng)?;
    let false_label = if els.is_some() {
        format!("if.else{id}")
    } else {
        end_label.clone()
    };
    instructions.push(Instruction::BrCond(
        flag,
        then_label.clone(),
        false_label.clone(),
    ));

    instructions.push(Instruction::Label(then_label));
    let then_terminated = lower_statement(then, instructions, ng)?;
    if !then_terminated {
        instructions.push(Instruction::Br(end_label.clone()));
    }

    let Some(els) = els else {
        instructions.push(Instruction::Label(end_label));
        return Ok(false);
    };

    instructions.push(Instruction::Label(false_label));
    let else_terminated = lower_statement(els, instructions, ng)?;
    if then_terminated && else_terminated {
        // no path falls through, the end block would be unreachable
        return Ok(true);
    }
    if !else_terminated {
        instructions.push(Instruction::Br(end_label.clone()));
    }
    instructions.push(Instruction::Label(end_label));
    Ok(false)
}

fn lower_while(
    condition: Exp,
    body: AstStatement,
    instructions: &mut Instructions,
    ng: &mut NameGenerator,
) -> Result<bool> {
    let id = ng.get_label_id();
    let cond_label = format!("while.cond{id}");
    let body_label = format!("while.body{id}");
    let end_label = format!("while.end{id}");

    instructions.push(Instruction::Br(cond_label.clone()));
    instructions.push(Instruction::Label(cond_label.clone()));
    let flag = lower_condition(condition, instructions, ng)?;
    instructions.push(Instruction::BrCond(
        flag,
        body_label.clone(),
        end_label.clone(),
    ));

    instructions.push(Instruction::Label(body_label));
    let body_terminated = lower_statement(body, instructions, ng)?;
    if !body_terminated {
        instructions.push(Instruction::Br(cond_label));
    }
    instructions.push(Instruction::Label(end_label));

    // control may always leave through the end label
    Ok(false)
}

/// Lowers one statement; `Ok(true)` means control cannot fall out of it.
fn lower_statement(
    statement: AstStatement,
    instructions: &mut Instructions,
    ng: &mut NameGenerator,
) -> Result<bool> {
    match statement {
        AstStatement::Return(e) => {
            let value = lower_exp(e, instructions, ng)?;
            instructions.push(Instruction::Ret(value));
            Ok(true)
        }
        AstStatement::If {
            condition,
            then,
            els,
        } => lower_if(condition, *then, els.map(|e| *e), instructions, ng),
        AstStatement::While { condition, body } => {
            lower_while(condition, *body, instructions, ng)
        }
        AstStatement::Compound(block) => lower_block(block, instructions, ng),
        AstStatement::Exp(e) => {
            let _ = lower_exp(e, instructions, ng)?;
            Ok(false)
        }
        AstStatement::Null => Ok(false),
        AstStatement::For { .. }
        | AstStatement::Declaration(_)
        | AstStatement::Break
        | AstStatement::Continue => Err(CodegenError::ExpectedStatement),
    }
}

/// Lowers a block in order, stopping at the first terminated statement:
/// whatever follows is unreachable and must not be emitted.
fn lower_block(
    block: AstBlock,
    instructions: &mut Instructions,
    ng: &mut NameGenerator,
) -> Result<bool> {
    for statement in block.items {
        let terminated = lower_statement(statement, instructions, ng)?;
        if terminated {
            return Ok(true);
        }
    }
    Ok(false)
}

fn lower_function(fun: FunDec) -> Result<ir::Function> {
    if fun.indirection > 0 {
        return Err(CodegenError::ExpectedScalar);
    }
    if !fun.params.is_empty() {
        return Err(CodegenError::ExpectedNoParams);
    }

    let mut ng = NameGenerator::new();
    let mut instructions = Instructions::new();
    let terminated = lower_block(fun.body, &mut instructions, &mut ng)?;
    if !terminated {
        instructions.push(Instruction::Ret(Value::Imm(0)));
    }

    Ok(ir::Function {
        name: fun.name,
        instructions,
    })
}

fn lower_global(dec: VarDec) -> Result<Global> {
    if dec.indirection > 0 {
        return Err(CodegenError::ExpectedScalar);
    }
    let init = match dec.init {
        None => 0,
        Some(Exp::Constant(v)) => v,
        Some(_) => return Err(CodegenError::ExpectedConstantInit),
    };
    Ok(Global {
        name: dec.name,
        init,
    })
}

fn lower_ast(ast: Ast) -> Result<Module> {
    let mut globals = Vec::new();
    let mut functions = Vec::new();
    for item in ast.items {
        match item {
            AstItem::Var(dec) => globals.push(lower_global(dec)?),
            AstItem::Fun(fun) => functions.push(lower_function(fun)?),
        }
    }
    debug!(
        globals = globals.len(),
        functions = functions.len(),
        "lowered module"
    );
    Ok(Module { globals, functions })
}

/// Validates `source` and lowers it to an IR module.
pub fn emit_ir(source: &str) -> Result<Module> {
    checker::check(source)?;
    let ast = parser::parse(source)?;
    lower_ast(ast)
}

/// Renders the IR for `source` into `sink`. On failure anything already
/// written stays in the sink; callers discard it.
#[cfg(feature = "emission")]
pub fn emit(source: &str, sink: &mut impl Write) -> Result<()> {
    let module = emit_ir(source)?;
    write!(sink, "{module}")?;
    Ok(())
}
