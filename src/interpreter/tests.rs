//! Unit tests for the executor.
//!
//! Every test drives the full pipeline (tokenize, parse, run) over a
//! small source program and checks the value `main` returns.

use std::rc::Rc;

use crate::{
    ast::value::Var,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

fn run_source(source: &str) -> Result<Var, Error> {
    let tokens = tokenize(source.to_string(), Some("test.vec".to_string())).unwrap();
    let program = parse(tokens, Rc::new("test.vec".to_string()))?;
    program.run()
}

#[test]
fn test_run_return_literal() {
    let result = run_source("fun main() { return 42; }").unwrap();
    assert_eq!(result, Var::Int(42));
}

#[test]
fn test_run_arithmetic_precedence() {
    let result = run_source("fun main() { return 1 + 2 * 3; }").unwrap();
    assert_eq!(result, Var::Int(7));

    let result = run_source("fun main() { return (1 + 2) * 3; }").unwrap();
    assert_eq!(result, Var::Int(9));
}

#[test]
fn test_run_left_associative_subtraction() {
    let result = run_source("fun main() { return 10 - 3 - 2; }").unwrap();
    assert_eq!(result, Var::Int(5));
}

#[test]
fn test_run_unary_minus() {
    let result = run_source("fun main() { var a = 3; return -a; }").unwrap();
    assert_eq!(result, Var::Int(-3));
}

#[test]
fn test_run_logical_not() {
    let result = run_source("fun main() { return !0; }").unwrap();
    assert_eq!(result, Var::Int(1));

    let result = run_source("fun main() { return !5; }").unwrap();
    assert_eq!(result, Var::Int(0));
}

#[test]
fn test_run_relational_and_logical() {
    let result = run_source("fun main() { var x = 5; return x > 0 && x < 10; }").unwrap();
    assert_eq!(result, Var::Int(1));

    let result = run_source("fun main() { var x = 5; return x > 9 || x == 5; }").unwrap();
    assert_eq!(result, Var::Int(1));
}

#[test]
fn test_run_uninitialized_var_reads_zero() {
    let result = run_source("fun main() { var x; return x + 1; }").unwrap();
    assert_eq!(result, Var::Int(1));
}

#[test]
fn test_run_if_else() {
    let source = "fun main() { var x = 5; if (x > 0) { return x; } else { return 0; } }";
    assert_eq!(run_source(source).unwrap(), Var::Int(5));

    let source = "fun main() { var x = -5; if (x > 0) { return x; } else { return 0; } }";
    assert_eq!(run_source(source).unwrap(), Var::Int(0));
}

#[test]
fn test_run_while_loop() {
    let source = "fun main() {
        var i = 0;
        var total = 0;
        while (i < 5) {
            total = total + i;
            i = i + 1;
        }
        return total;
    }";
    assert_eq!(run_source(source).unwrap(), Var::Int(10));
}

#[test]
fn test_run_break_and_continue() {
    let source = "fun main() {
        var i = 0;
        var total = 0;
        while (1) {
            i = i + 1;
            if (i > 10) { break; }
            if (i / 2 * 2 == i) { continue; }
            total = total + i;
        }
        return total;
    }";
    // 1 + 3 + 5 + 7 + 9
    assert_eq!(run_source(source).unwrap(), Var::Int(25));
}

#[test]
fn test_run_function_call_and_recursion() {
    let source = "fun fact(n) {
        if (n <= 1) { return 1; }
        return n * fact(n - 1);
    }
    fun main() { return fact(5); }";
    assert_eq!(run_source(source).unwrap(), Var::Int(120));
}

#[test]
fn test_run_two_recursive_calls_in_one_expression() {
    // The second call's argument reads `n` after the first call returned;
    // it must see this invocation's `n`, not the innermost recursion's
    let source = "fun fib(n) {
        if (n < 2) { return n; }
        return fib(n - 1) + fib(n - 2);
    }
    fun main() { return fib(10); }";
    assert_eq!(run_source(source).unwrap(), Var::Int(55));
}

#[test]
fn test_run_locals_survive_recursive_call() {
    let source = "fun depth(n) {
        var mine = n;
        if (n > 0) { depth(n - 1); }
        return mine;
    }
    fun main() { return depth(3); }";
    assert_eq!(run_source(source).unwrap(), Var::Int(3));
}

#[test]
fn test_run_body_falls_off_end() {
    let result = run_source("fun main() { var x = 1; }").unwrap();
    assert_eq!(result, Var::Int(0));
}

#[test]
fn test_run_vector_literal_and_index() {
    let source = "fun main() { var v = [10, 20, 30]; return v[1]; }";
    assert_eq!(run_source(source).unwrap(), Var::Int(20));
}

#[test]
fn test_run_indexed_assignment() {
    let source = "fun main() { var v = [1, 2, 3]; v[0] = 9; return v[0]; }";
    assert_eq!(run_source(source).unwrap(), Var::Int(9));
}

#[test]
fn test_run_slice() {
    let source = "fun main() { var v = [1, 2, 3, 4]; return v[1:3]; }";
    assert_eq!(run_source(source).unwrap(), Var::List(vec![2, 3]));
}

#[test]
fn test_run_len() {
    let source = "fun main() { var v = [1, 2, 3]; return len(v); }";
    assert_eq!(run_source(source).unwrap(), Var::Int(3));

    let source = "fun main() { var x = 7; return len(x); }";
    assert_eq!(run_source(source).unwrap(), Var::Int(1));
}

#[test]
fn test_run_append() {
    let source = "fun main() { var v = [1, 2]; var x = 3; append(x, v); return v; }";
    assert_eq!(run_source(source).unwrap(), Var::List(vec![1, 2, 3]));
}

#[test]
fn test_run_append_list_to_list() {
    let source = "fun main() { var a = [1]; var b = [2, 3]; append(b, a); return a; }";
    assert_eq!(run_source(source).unwrap(), Var::List(vec![1, 2, 3]));
}

#[test]
fn test_run_list_concatenation() {
    let source = "fun main() { var a = [1, 2]; var b = [3]; return a + b; }";
    assert_eq!(run_source(source).unwrap(), Var::List(vec![1, 2, 3]));
}

#[test]
fn test_run_elementwise_arithmetic() {
    let source = "fun main() { var v = [1, 2, 3]; return v * 2; }";
    assert_eq!(run_source(source).unwrap(), Var::List(vec![2, 4, 6]));
}

#[test]
fn test_run_division_by_zero() {
    let result = run_source("fun main() { var x = 0; return 1 / x; }");
    assert_eq!(result.err().unwrap().get_error_name(), "DivisionByZero");
}

#[test]
fn test_run_addition_overflow() {
    let result = run_source("fun main() { return 9223372036854775807 + 1; }");
    assert_eq!(result.err().unwrap().get_error_name(), "IntegerOverflow");
}

#[test]
fn test_run_multiplication_overflow() {
    let result = run_source("fun main() { return 4611686018427387904 * 4; }");
    assert_eq!(result.err().unwrap().get_error_name(), "IntegerOverflow");
}

#[test]
fn test_run_subtraction_overflow() {
    let result = run_source("fun main() { return -9223372036854775807 - 2; }");
    assert_eq!(result.err().unwrap().get_error_name(), "IntegerOverflow");
}

#[test]
fn test_run_index_out_of_bounds() {
    let result = run_source("fun main() { var v = [1]; return v[3]; }");
    assert_eq!(result.err().unwrap().get_error_name(), "IndexOutOfBounds");
}

#[test]
fn test_run_index_into_int_fails() {
    let result = run_source("fun main() { var x = 1; return x[0]; }");
    assert_eq!(result.err().unwrap().get_error_name(), "TypeMismatch");
}

#[test]
fn test_run_missing_main() {
    let result = run_source("fun helper() { return 1; }");
    assert_eq!(result.err().unwrap().get_error_name(), "FunctionNotDeclared");
}

#[test]
fn test_run_main_with_parameters_rejected() {
    let result = run_source("fun main(a) { return a; }");
    assert_eq!(
        result.err().unwrap().get_error_name(),
        "WrongNumberOfArguments"
    );
}

#[test]
fn test_run_shadowed_variable() {
    let source = "fun main() {
        var x = 1;
        { var x = 2; x = 3; }
        return x;
    }";
    assert_eq!(run_source(source).unwrap(), Var::Int(1));
}

#[test]
fn test_run_program_twice_from_same_state() {
    let tokens = tokenize(
        "fun main() { var v = [1]; append(v, v); return len(v); }".to_string(),
        Some("test.vec".to_string()),
    )
    .unwrap();
    let program = parse(tokens, Rc::new("test.vec".to_string())).unwrap();

    // Cells reset between runs: the second run starts from parse-time state
    assert_eq!(program.run().unwrap(), Var::Int(2));
    assert_eq!(program.run().unwrap(), Var::Int(2));
}
