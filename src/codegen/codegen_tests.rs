use super::*;
use crate::checker::CheckError;
use crate::parser::ParseError;

fn emit_text(source: &str) -> String {
    let mut out = String::new();
    emit(source, &mut out).unwrap();
    out
}

#[test]
fn test_global_with_initializer() {
    let text = emit_text("int value = 7;");
    assert_eq!("; ModuleID = 'module'\n@value = global i32 7\n", text);
}

#[test]
fn test_global_defaults_to_zero() {
    let text = emit_text("int value;");
    assert!(text.contains("@value = global i32 0"));
}

#[test]
fn test_precedence_mul_before_add() {
    let text = emit_text("int main(){return 1+2*3;}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  %t0 = mul i32 2, 3
  %t1 = add i32 1, %t0
  ret i32 %t1
}
";
    assert_eq!(expected, text);
    let mul = text.find("mul").unwrap();
    let add = text.find("add").unwrap();
    assert!(mul < add);
}

#[test]
fn test_implicit_return_zero() {
    let text = emit_text("int main(){}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  ret i32 0
}
";
    assert_eq!(expected, text);
}

#[test]
fn test_if_without_else() {
    let text = emit_text("int main(){if (1) { return 2; } return 3;}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  %t0 = icmp ne i32 1, 0
  br i1 %t0, label %if.then0, label %if.end0
if.then0:
  ret i32 2
if.end0:
  ret i32 3
}
";
    assert_eq!(expected, text);
}

#[test]
fn test_if_else_both_return_omits_end_label() {
    let text = emit_text("int main(){if (1) { return 2; } else { return 3; }}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  %t0 = icmp ne i32 1, 0
  br i1 %t0, label %if.then0, label %if.else0
if.then0:
  ret i32 2
if.else0:
  ret i32 3
}
";
    assert_eq!(expected, text);
    assert!(!text.contains("if.end"));
    // both branches terminate, no trailing ret i32 0 either
    assert!(!text.contains("ret i32 0"));
}

#[test]
fn test_if_else_fallthrough_branches_to_end() {
    let text = emit_text("int main(){if (1) { return 2; } else { 4; } return 3;}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  %t0 = icmp ne i32 1, 0
  br i1 %t0, label %if.then0, label %if.else0
if.then0:
  ret i32 2
if.else0:
  br label %if.end0
if.end0:
  ret i32 3
}
";
    assert_eq!(expected, text);
}

#[test]
fn test_while_always_emits_end_label() {
    let text = emit_text("int main(){while (1) { return 2; }}");
    let expected = "\
; ModuleID = 'module'

define i32 @main() {
entry:
  br label %while.cond0
while.cond0:
  %t0 = icmp ne i32 1, 0
  br i1 %t0, label %while.body0, label %while.end0
while.body0:
  ret i32 2
while.end0:
  ret i32 0
}
";
    // even a terminated body leaves the loop unterminated
    assert_eq!(expected, text);
}

#[test]
fn test_while_body_back_edge() {
    let text = emit_text("int main(){while (1) { 5; }}");
    assert!(text.contains("while.body0:\n  br label %while.cond0"));
    assert!(text.contains("while.end0:"));
}

#[test]
fn test_unreachable_statements_not_emitted() {
    let text = emit_text("int main(){return 1; return 2;}");
    assert!(text.contains("ret i32 1"));
    assert!(!text.contains("ret i32 2"));
}

#[test]
fn test_label_ids_are_per_function() {
    let text = emit_text("int f(){if (1) { return 1; } return 0;} int g(){if (1) { return 1; } return 0;}");
    assert_eq!(2, text.matches("if.then0:").count());
}

#[test]
fn test_nested_ifs_get_fresh_labels() {
    let text = emit_text("int main(){if (1) { if (2) { return 1; } } return 0;}");
    assert!(text.contains("if.then0:"));
    assert!(text.contains("if.then1:"));
    assert!(text.contains("if.end1:"));
    assert!(text.contains("if.end0:"));
}

#[test]
fn test_call_in_expression() {
    let text = emit_text("int main(){return f() + 1;}");
    assert!(text.contains("  %t0 = call i32 @f()"));
    assert!(text.contains("  %t1 = add i32 %t0, 1"));
}

#[test]
fn test_deterministic_output() {
    let source = "int x = 1; int main(){while (1) { return f(); } }";
    assert_eq!(emit_text(source), emit_text(source));
}

#[test]
fn test_parser_error_propagates_verbatim() {
    let err = emit_ir("int value").unwrap_err();
    assert_eq!(
        CodegenError::Check(CheckError::Parse(ParseError::Expected("';'"))),
        err
    );
    assert!(err.to_string().contains("expected ';'"));
}

#[test]
fn test_checker_error_propagates_verbatim() {
    let err = emit_ir("int x; int x;").unwrap_err();
    assert!(err.to_string().starts_with("checker: redefinition"));
}

#[test]
fn test_non_constant_global_initializer() {
    let err = emit_ir("int value = f();").unwrap_err();
    assert_eq!(CodegenError::ExpectedConstantInit, err);
    assert!(err.to_string().starts_with("codegen: expected"));
}

#[test]
fn test_pointer_global_rejected() {
    let err = emit_ir("int *p;").unwrap_err();
    assert_eq!(CodegenError::ExpectedScalar, err);
}

#[test]
fn test_function_parameters_rejected() {
    let err = emit_ir("int f(int a) { return a; }").unwrap_err();
    assert_eq!(CodegenError::ExpectedNoParams, err);
}

#[test]
fn test_call_arguments_rejected() {
    let err = emit_ir("int main(){return f(1);}").unwrap_err();
    assert_eq!(CodegenError::ExpectedNoArguments, err);
}

#[test]
fn test_for_statement_rejected() {
    let err = emit_ir("int main(){for (;;) break;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedStatement, err);
}

#[test]
fn test_break_rejected() {
    let err = emit_ir("int main(){while (1) { break; }}").unwrap_err();
    assert_eq!(CodegenError::ExpectedStatement, err);
}

#[test]
fn test_local_declaration_rejected() {
    let err = emit_ir("int main(){int x = 1; return 0;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedStatement, err);
}

#[test]
fn test_assignment_rejected() {
    let err = emit_ir("int main(){x = 1; return 0;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedExpression, err);
}

#[test]
fn test_unary_rejected() {
    let err = emit_ir("int main(){return !1;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedExpression, err);
}

#[test]
fn test_variable_reference_rejected() {
    let err = emit_ir("int x; int main(){return x;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedExpression, err);
}

#[test]
fn test_logical_operator_rejected() {
    let err = emit_ir("int main(){return 1 && 2;}").unwrap_err();
    assert_eq!(CodegenError::ExpectedExpression, err);
}

#[test]
fn test_empty_statement_is_noop() {
    let text = emit_text("int main(){;;}");
    assert!(text.contains("entry:\n  ret i32 0\n}"));
}
