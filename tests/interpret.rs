//! Evaluator integration tests
//!
//! Drives the full pipeline: source → parse → eval against a fresh
//! environment.

use texp::ast::Expr;
use texp::diagnostics::EvalError;
use texp::interp::{eval, Env};

/// Parse and evaluate in a fresh environment
fn interpret(source: &str) -> Result<Expr, String> {
    let expr = texp::parser::parse(source).map_err(|e| format!("Parse error: {}", e))?;
    let mut env = Env::new();
    eval(&expr, &mut env).map_err(|e| format!("Runtime error: {}", e))
}

/// Helper to check the result is an integer
fn assert_result_int(source: &str, expected: i64) {
    match interpret(source) {
        Ok(Expr::Int(n)) => assert_eq!(n, expected, "Expected {}, got {}", expected, n),
        Ok(v) => panic!("Expected Int({}), got {:?}", expected, v),
        Err(e) => panic!("Interpretation failed: {}", e),
    }
}

/// Helper to check the evaluation error kind
fn assert_eval_error(source: &str) -> EvalError {
    let expr = texp::parser::parse(source).expect("program should parse");
    let mut env = Env::new();
    match eval(&expr, &mut env) {
        Err(e) => e,
        Ok(v) => panic!("Expected an error, got {:?}", v),
    }
}

// ==================== Values ====================

#[test]
fn test_void_self_evaluates() {
    assert_eq!(interpret("<void>"), Ok(Expr::Void));
}

#[test]
fn test_int_self_evaluates() {
    assert_result_int("<int,42>", 42);
    assert_result_int("<int,-42>", -42);
}

#[test]
fn test_pair_evaluates_children() {
    assert_eq!(
        interpret("<pair,<add,<int,1>,<int,2>>,<void>>"),
        Ok(Expr::Pair(Box::new(Expr::Int(3)), Box::new(Expr::Void)))
    );
}

// ==================== Arithmetic ====================

#[test]
fn test_add() {
    assert_result_int("<add,<int,3>,<int,4>>", 7);
}

#[test]
fn test_mul() {
    assert_result_int("<mul,<int,3>,<int,4>>", 12);
}

#[test]
fn test_neg() {
    assert_result_int("<neg,<int,5>>", -5);
    assert_result_int("<neg,<neg,<int,5>>>", 5);
}

#[test]
fn test_divmod() {
    assert_eq!(
        interpret("<divmod,<int,7>,<int,2>>"),
        Ok(Expr::Pair(Box::new(Expr::Int(3)), Box::new(Expr::Int(1))))
    );
}

#[test]
fn test_divmod_truncates_toward_zero() {
    assert_eq!(
        interpret("<divmod,<neg,<int,7>>,<int,2>>"),
        Ok(Expr::Pair(Box::new(Expr::Int(-3)), Box::new(Expr::Int(-1))))
    );
}

#[test]
fn test_divmod_extreme_operands_never_panic() {
    assert_eq!(
        interpret("<divmod,<int,-9223372036854775808>,<int,-1>>"),
        Ok(Expr::Pair(
            Box::new(Expr::Int(i64::MIN)),
            Box::new(Expr::Int(0)),
        ))
    );
}

#[test]
fn test_arithmetic_wraps_at_the_i64_boundary() {
    assert_result_int(
        "<add,<int,9223372036854775807>,<int,1>>",
        i64::MIN,
    );
    assert_result_int("<neg,<int,-9223372036854775808>>", i64::MIN);
}

#[test]
fn test_divmod_by_zero() {
    assert_eq!(
        assert_eval_error("<divmod,<int,7>,<int,0>>"),
        EvalError::DivisionByZero
    );
}

// ==================== Pairs and projections ====================

#[test]
fn test_fst_snd() {
    assert_result_int("<fst,<pair,<int,1>,<int,2>>>", 1);
    assert_result_int("<snd,<pair,<int,1>,<int,2>>>", 2);
}

#[test]
fn test_projection_of_nested_pair() {
    assert_result_int("<fst,<snd,<pair,<int,1>,<pair,<int,2>,<int,3>>>>>", 2);
}

#[test]
fn test_isvoid() {
    assert_result_int("<isvoid,<void>>", 1);
    assert_result_int("<isvoid,<int,0>>", 0);
    assert_result_int("<isvoid,<pair,<void>,<void>>>", 0);
}

// ==================== Branching ====================

#[test]
fn test_ifgreater_takes_then_branch() {
    assert_result_int("<ifgreater,<int,5>,<int,3>,<int,1>,<int,0>>", 1);
}

#[test]
fn test_ifgreater_takes_else_branch() {
    assert_result_int("<ifgreater,<int,3>,<int,5>,<int,1>,<int,0>>", 0);
    // not strictly greater
    assert_result_int("<ifgreater,<int,3>,<int,3>,<int,1>,<int,0>>", 0);
}

#[test]
fn test_ifgreater_only_evaluates_the_taken_branch() {
    // The else branch would be a type error if evaluated
    assert_result_int(
        "<ifgreater,<int,5>,<int,3>,<int,1>,<fst,<int,0>>>",
        1,
    );
}

// ==================== Scoping ====================

#[test]
fn test_let_binds_in_body() {
    assert_result_int("<let,x,<int,3>,<add,<var,x>,<int,4>>>", 7);
}

#[test]
fn test_let_shadowing_inner_wins() {
    assert_result_int("<let,x,<int,1>,<let,x,<int,2>,<var,x>>>", 2);
}

#[test]
fn test_let_outer_visible_after_inner() {
    assert_result_int(
        "<let,x,<int,1>,<add,<let,x,<int,2>,<var,x>>,<var,x>>>",
        3,
    );
}

#[test]
fn test_let_binding_does_not_escape() {
    let expr = texp::parser::parse("<let,x,<int,1>,<var,x>>").unwrap();
    let mut env = Env::new();
    assert_eq!(eval(&expr, &mut env), Ok(Expr::Int(1)));
    // The ambient environment is untouched
    assert!(env.is_empty());
}

#[test]
fn test_def_persists_in_ambient_environment() {
    let mut env = Env::new();
    let def = texp::parser::parse("<def,x,<int,3>>").unwrap();
    assert_eq!(eval(&def, &mut env), Ok(Expr::Void));

    let use_x = texp::parser::parse("<add,<var,x>,<int,1>>").unwrap();
    assert_eq!(eval(&use_x, &mut env), Ok(Expr::Int(4)));
}

// ==================== Functions ====================

#[test]
fn test_fun_evaluates_to_void_and_binds_closure() {
    let mut env = Env::new();
    let fun = texp::parser::parse("<fun,f,n,<add,<var,n>,<int,1>>>").unwrap();
    assert_eq!(eval(&fun, &mut env), Ok(Expr::Void));
    assert!(matches!(env.lookup("f"), Some(Expr::Closure { .. })));
}

#[test]
fn test_call_applies_the_closure() {
    let mut env = Env::new();
    let fun = texp::parser::parse("<fun,inc,n,<add,<var,n>,<int,1>>>").unwrap();
    eval(&fun, &mut env).unwrap();

    let call = texp::parser::parse("<call,inc,<int,41>>").unwrap();
    assert_eq!(eval(&call, &mut env), Ok(Expr::Int(42)));
}

#[test]
fn test_call_argument_uses_caller_environment() {
    let mut env = Env::new();
    for line in [
        "<def,x,<int,10>>",
        "<fun,f,n,<var,n>>",
    ] {
        let expr = texp::parser::parse(line).unwrap();
        eval(&expr, &mut env).unwrap();
    }
    let call = texp::parser::parse("<call,f,<var,x>>").unwrap();
    assert_eq!(eval(&call, &mut env), Ok(Expr::Int(10)));
}

#[test]
fn test_closure_captures_definition_environment() {
    let mut env = Env::new();
    for line in [
        "<def,x,<int,1>>",
        "<fun,f,n,<add,<var,n>,<var,x>>>",
        // Shadow x after the capture; the closure must keep seeing 1
        "<def,x,<int,100>>",
    ] {
        let expr = texp::parser::parse(line).unwrap();
        eval(&expr, &mut env).unwrap();
    }
    let call = texp::parser::parse("<call,f,<int,0>>").unwrap();
    assert_eq!(eval(&call, &mut env), Ok(Expr::Int(1)));
}

#[test]
fn test_recursive_countdown() {
    // f(n) = if n > 0 then f(n - 1) + 1 else 0
    let mut env = Env::new();
    let fun = texp::parser::parse(
        "<fun,f,n,\
           <ifgreater,<var,n>,<int,0>,\
             <add,<call,f,<add,<var,n>,<int,-1>>>,<int,1>>,\
             <int,0>>>",
    )
    .unwrap();
    eval(&fun, &mut env).unwrap();

    let call = texp::parser::parse("<call,f,<int,5>>").unwrap();
    assert_eq!(eval(&call, &mut env), Ok(Expr::Int(5)));
}

#[test]
fn test_recursive_factorial() {
    let mut env = Env::new();
    let fun = texp::parser::parse(
        "<fun,fact,n,\
           <ifgreater,<var,n>,<int,0>,\
             <mul,<var,n>,<call,fact,<add,<var,n>,<int,-1>>>>,\
             <int,1>>>",
    )
    .unwrap();
    eval(&fun, &mut env).unwrap();

    let call = texp::parser::parse("<call,fact,<int,6>>").unwrap();
    assert_eq!(eval(&call, &mut env), Ok(Expr::Int(720)));
}

// ==================== Error surfacing ====================

#[test]
fn test_fst_of_non_pair_is_a_type_error() {
    assert_eq!(
        assert_eval_error("<fst,<int,3>>"),
        EvalError::TypeError {
            op: "fst",
            expected: "pair",
            found: "int",
        }
    );
}

#[test]
fn test_add_of_non_int_is_a_type_error() {
    assert_eq!(
        assert_eval_error("<add,<void>,<int,1>>"),
        EvalError::TypeError {
            op: "add",
            expected: "int",
            found: "void",
        }
    );
}

#[test]
fn test_unbound_var() {
    assert_eq!(
        assert_eval_error("<var,undefined_name>"),
        EvalError::UnboundName {
            name: "undefined_name".into(),
        }
    );
}

#[test]
fn test_call_of_unbound_name() {
    assert_eq!(
        assert_eval_error("<call,g,<int,1>>"),
        EvalError::UnboundName { name: "g".into() }
    );
}

#[test]
fn test_call_of_non_closure() {
    let mut env = Env::new();
    let def = texp::parser::parse("<def,g,<int,1>>").unwrap();
    eval(&def, &mut env).unwrap();

    let call = texp::parser::parse("<call,g,<int,1>>").unwrap();
    assert_eq!(
        eval(&call, &mut env),
        Err(EvalError::TypeError {
            op: "call",
            expected: "closure",
            found: "int",
        })
    );
}

#[test]
fn test_error_in_subexpression_propagates() {
    assert!(interpret("<add,<int,1>,<fst,<int,2>>>").is_err());
    assert!(interpret("<pair,<var,missing>,<int,1>>").is_err());
}

#[test]
fn test_original_tree_survives_evaluation() {
    let expr = texp::parser::parse("<add,<int,3>,<int,4>>").unwrap();
    let before = expr.clone();
    let mut env = Env::new();
    eval(&expr, &mut env).unwrap();
    assert_eq!(expr, before);
}
