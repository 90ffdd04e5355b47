//! Unit tests for the parser module.
//!
//! Covers grammar recognition, operator precedence shape, the
//! single-comparison relational rule, scope resolution (redeclaration,
//! shadowing, unresolved names), and call arity checking.

use std::rc::Rc;

use crate::{
    ast::{
        ast::Program,
        expressions::{AddExpr, AddOp, BaseKind, MultOp, OrExpr},
        statements::Stmt,
        value::Var,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.vec".to_string())).unwrap();
    parse(tokens, Rc::new("test.vec".to_string()))
}

/// Digs the additive level out of `return <expr>;` at the given
/// statement index of the first function's body.
fn return_add_expr(program: &Program, index: usize) -> AddExpr {
    let stmt = &program.functions()[0].body.body[index];
    let or = match stmt {
        Stmt::Return(or) => or,
        other => panic!("expected return statement, got {:?}", other),
    };
    assert!(or.rest.is_empty());
    assert!(or.first.rest.is_empty());
    assert!(or.first.first.comparison.is_none());
    or.first.first.left.operand.clone()
}

fn declare_value(stmt: &Stmt) -> &OrExpr {
    match stmt {
        Stmt::Declare { value, .. } => value,
        other => panic!("expected declaration, got {:?}", other),
    }
}

fn base_kind(or: &OrExpr) -> &BaseKind {
    &or.first.first.left.operand.first.first.kind
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("").unwrap();
    assert!(program.functions().is_empty());
}

#[test]
fn test_parse_function_declaration() {
    let program = parse_source("fun main() { }").unwrap();

    assert_eq!(program.functions().len(), 1);
    let main = program.find_function("main").unwrap();
    assert!(program.function(main).params.is_empty());
}

#[test]
fn test_parse_parameters() {
    let program = parse_source("fun f(a, b, c) { }").unwrap();

    let f = program.find_function("f").unwrap();
    assert_eq!(program.function(f).params.len(), 3);
}

#[test]
fn test_parse_duplicate_parameter() {
    let result = parse_source("fun f(a, a) { }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableAlreadyDeclared"
    );
}

#[test]
fn test_parse_duplicate_function() {
    let result = parse_source("fun f() { } fun f() { }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "FunctionAlreadyDeclared"
    );
}

#[test]
fn test_parse_rejects_top_level_statement() {
    let result = parse_source("var x = 1;");

    assert_eq!(result.err().unwrap().get_error_name(), "WrongToken");
}

#[test]
fn test_parse_rejects_unknown_statement() {
    let result = parse_source("fun main() { + }");

    assert_eq!(result.err().unwrap().get_error_name(), "UnknownStatement");
}

#[test]
fn test_parse_missing_semicolon() {
    let result = parse_source("fun main() { var x = 1 }");

    assert_eq!(result.err().unwrap().get_error_name(), "WrongToken");
}

#[test]
fn test_parse_unterminated_block() {
    let result = parse_source("fun main() { var x = 1;");

    assert!(result.is_err());
}

#[test]
fn test_precedence_mult_binds_tighter() {
    // 1 + 2 * 3 groups as 1 + (2 * 3)
    let program = parse_source("fun main() { return 1 + 2 * 3; }").unwrap();
    let add = return_add_expr(&program, 0);

    assert!(matches!(
        add.first.first.kind,
        BaseKind::Literal(Var::Int(1))
    ));
    assert!(add.first.rest.is_empty());

    assert_eq!(add.rest.len(), 1);
    let (op, mult) = &add.rest[0];
    assert_eq!(*op, AddOp::Plus);
    assert!(matches!(mult.first.kind, BaseKind::Literal(Var::Int(2))));
    assert_eq!(mult.rest.len(), 1);
    assert_eq!(mult.rest[0].0, MultOp::Multiply);
    assert!(matches!(
        mult.rest[0].1.kind,
        BaseKind::Literal(Var::Int(3))
    ));
}

#[test]
fn test_precedence_grouping() {
    // (1 + 2) * 3 keeps the parenthesized group as the first factor
    let program = parse_source("fun main() { return (1 + 2) * 3; }").unwrap();
    let add = return_add_expr(&program, 0);

    assert!(add.rest.is_empty());
    assert!(matches!(add.first.first.kind, BaseKind::Grouping(_)));
    assert_eq!(add.first.rest.len(), 1);
    assert_eq!(add.first.rest[0].0, MultOp::Multiply);
}

#[test]
fn test_relational_single_comparison() {
    let program = parse_source("fun main() { var a; var b; if (a < b) { } }").unwrap();

    let stmt = &program.functions()[0].body.body[2];
    let condition = match stmt {
        Stmt::If { condition, .. } => condition,
        other => panic!("expected if statement, got {:?}", other),
    };
    assert!(condition.first.first.comparison.is_some());
}

#[test]
fn test_relational_chaining_rejected() {
    // a < b < c: the relational level stops after one comparison, so the
    // dangling `< c` trips the enclosing `)` expectation
    let result = parse_source("fun main() { var a; var b; var c; if (a < b < c) { } }");

    assert_eq!(result.err().unwrap().get_error_name(), "WrongToken");
}

#[test]
fn test_redeclaration_same_scope_fails() {
    let result = parse_source("fun main() { var x = 1; var x = 2; }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableAlreadyDeclared"
    );
}

#[test]
fn test_shadowing_inner_scope_succeeds() {
    let result = parse_source("fun main() { var x = 1; { var x = 2; } }");

    assert!(result.is_ok());
}

#[test]
fn test_outer_variable_visible_in_inner_scope() {
    let result = parse_source("fun main() { var x = 1; { x = 2; } }");

    assert!(result.is_ok());
}

#[test]
fn test_inner_variable_invisible_outside() {
    let result = parse_source("fun main() { { var x = 1; } x = 2; }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_assignment_to_undeclared_fails() {
    let result = parse_source("fun main() { y = 1; }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_call_to_unknown_function_fails() {
    let result = parse_source("fun main() { f(); }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "FunctionNotDeclared"
    );
}

#[test]
fn test_arity_too_few_arguments() {
    let result = parse_source("fun f(a, b) { } fun main() { f(1); }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "WrongNumberOfArguments"
    );
}

#[test]
fn test_arity_too_many_arguments() {
    let result = parse_source("fun f(a, b) { } fun main() { f(1, 2, 3); }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "WrongNumberOfArguments"
    );
}

#[test]
fn test_arity_exact_arguments() {
    let result = parse_source("fun f(a, b) { } fun main() { f(1, 2); }");

    assert!(result.is_ok());
}

#[test]
fn test_function_can_call_itself() {
    // The definition is registered before the body parses
    let result = parse_source("fun f(n) { return f(n - 1); } fun main() { return f(3); }");

    assert!(result.is_ok());
}

#[test]
fn test_vector_literal_and_index() {
    let program =
        parse_source("fun main() { var v = [1, 2, 3]; var x = v[0]; }").unwrap();

    let declare = declare_value(&program.functions()[0].body.body[0]);
    assert!(matches!(
        base_kind(declare),
        BaseKind::Literal(Var::List(items)) if items == &vec![1, 2, 3]
    ));

    let index = declare_value(&program.functions()[0].body.body[1]);
    assert!(matches!(base_kind(index), BaseKind::Index { .. }));
}

#[test]
fn test_slice_is_a_distinct_node() {
    let program =
        parse_source("fun main() { var v = [1, 2, 3]; var s = v[0:2]; }").unwrap();

    let slice = declare_value(&program.functions()[0].body.body[1]);
    assert!(matches!(base_kind(slice), BaseKind::Slice { .. }));
}

#[test]
fn test_index_of_undeclared_variable_fails() {
    let result = parse_source("fun main() { var x = v[0]; }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_empty_vector_literal_fails() {
    let result = parse_source("fun main() { var v = []; }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "EmptyVectorLiteral"
    );
}

#[test]
fn test_vector_literal_elements_must_be_numbers() {
    let result = parse_source("fun main() { var x; var v = [1, x]; }");

    assert_eq!(result.err().unwrap().get_error_name(), "WrongToken");
}

#[test]
fn test_uninitialized_var_defaults_to_zero() {
    let program = parse_source("fun main() { var x; }").unwrap();

    let value = declare_value(&program.functions()[0].body.body[0]);
    assert_eq!(*value, OrExpr::literal(Var::Int(0)));
}

#[test]
fn test_len_of_declared_variable() {
    let program = parse_source("fun main() { var v = [1]; return len(v); }").unwrap();

    let add = return_add_expr(&program, 1);
    assert!(matches!(add.first.first.kind, BaseKind::Len(_)));
}

#[test]
fn test_len_of_undeclared_variable_fails() {
    let result = parse_source("fun main() { return len(v); }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_append_requires_declared_variables() {
    let result = parse_source("fun main() { var a; append(a, b); }");

    assert_eq!(
        result.err().unwrap().get_error_name(),
        "VariableNotDeclared"
    );
}

#[test]
fn test_unary_minus_forms() {
    let result = parse_source(
        "fun main() { var a = 1; var b = 2; var x = -3; var y = -(a + b); var z = -a; }",
    );

    assert!(result.is_ok());
}

#[test]
fn test_indexed_assignment() {
    let program = parse_source("fun main() { var v = [1, 2]; v[0] = 9; }").unwrap();

    match &program.functions()[0].body.body[1] {
        Stmt::Assign { index, .. } => assert!(index.is_some()),
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_is_deterministic() {
    let source = "fun f(a) { return a * 2; } fun main() { var x = f(21); return x; }";

    let first = parse_source(source).unwrap();
    let second = parse_source(source).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_end_to_end_shape() {
    let program = parse_source(
        "fun main() { var x = 5; if (x > 0) { return x; } else { return 0; } }",
    )
    .unwrap();

    assert_eq!(program.functions().len(), 1);
    let main = &program.functions()[0];
    assert_eq!(main.name, "main");
    assert_eq!(main.body.body.len(), 2);

    assert!(matches!(main.body.body[0], Stmt::Declare { .. }));
    match &main.body.body[1] {
        Stmt::If {
            then_block,
            else_block,
            ..
        } => {
            assert_eq!(then_block.body.len(), 1);
            assert_eq!(else_block.as_ref().unwrap().body.len(), 1);
        }
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_number_above_integer_limit() {
    let result = parse_source("fun main() { return 99999999999999999999; }");

    assert_eq!(result.err().unwrap().get_error_name(), "NumberParseError");
}
