//! IR text emission using [Display]
//!
//! Implements [Display] for the [ir](crate::codegen::ir) data model, so a
//! lowered module renders with [to_string] or as a formatting arg in any
//! formatting context (e.g. [format!], [write!], [println!], ..).
//!
//! [Display]: https://doc.rust-lang.org/std/fmt/trait.Display.html
//! [to_string]: https://doc.rust-lang.org/std/string/trait.ToString.html#tymethod.to_string
//! [format!]: https://doc.rust-lang.org/std/macro.format.html
//! [write!]: https://doc.rust-lang.org/std/macro.write.html
//! [println!]: https://doc.rust-lang.org/std/macro.println.html

use crate::codegen::ir::*;

use std::fmt;

impl fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
            Self::Mul => write!(f, "mul"),
            Self::Sdiv => write!(f, "sdiv"),
            Self::Srem => write!(f, "srem"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Imm(v) => write!(f, "{v}"),
            Self::Temp(name) => write!(f, "%{name}"),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "{label}:"),
            Self::Binary(op, dst, lhs, rhs) => {
                write!(f, "  %{dst} = {op} i32 {lhs}, {rhs}")
            }
            Self::IcmpNz(dst, src) => write!(f, "  %{dst} = icmp ne i32 {src}, 0"),
            Self::Call(dst, callee) => write!(f, "  %{dst} = call i32 @{callee}()"),
            Self::Br(target) => write!(f, "  br label %{target}"),
            Self::BrCond(flag, then_label, else_label) => {
                write!(
                    f,
                    "  br i1 %{flag}, label %{then_label}, label %{else_label}"
                )
            }
            Self::Ret(value) => write!(f, "  ret i32 {value}"),
        }
    }
}

impl fmt::Display for Global {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "@{} = global i32 {}", self.name, self.init)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "define i32 @{}() {{", self.name)?;
        writeln!(f, "entry:")?;
        for instruction in &self.instructions {
            writeln!(f, "{instruction}")?;
        }
        writeln!(f, "}}")
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "; ModuleID = 'module'")?;
        for global in &self.globals {
            write!(f, "{global}")?;
        }
        for function in &self.functions {
            writeln!(f)?;
            write!(f, "{function}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_lines() {
        let binary = Instruction::Binary(
            IrBinaryOp::Mul,
            String::from("t0"),
            Value::Imm(2),
            Value::Imm(3),
        );
        assert_eq!("  %t0 = mul i32 2, 3", binary.to_string());

        let icmp = Instruction::IcmpNz(String::from("t1"), Value::Temp(String::from("t0")));
        assert_eq!("  %t1 = icmp ne i32 %t0, 0", icmp.to_string());

        let br = Instruction::BrCond(
            String::from("t1"),
            String::from("if.then0"),
            String::from("if.end0"),
        );
        assert_eq!(
            "  br i1 %t1, label %if.then0, label %if.end0",
            br.to_string()
        );

        let label = Instruction::Label(String::from("while.cond0"));
        assert_eq!("while.cond0:", label.to_string());

        let call = Instruction::Call(String::from("t2"), String::from("f"));
        assert_eq!("  %t2 = call i32 @f()", call.to_string());
    }

    #[test]
    fn test_global_line() {
        let global = Global {
            name: String::from("value"),
            init: 7,
        };
        assert_eq!("@value = global i32 7\n", global.to_string());
    }

    #[test]
    fn test_empty_function() {
        let function = Function {
            name: String::from("main"),
            instructions: vec![Instruction::Ret(Value::Imm(0))],
        };
        let expected = "define i32 @main() {\nentry:\n  ret i32 0\n}\n";
        assert_eq!(expected, function.to_string());
    }
}
