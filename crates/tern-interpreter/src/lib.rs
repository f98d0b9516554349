//! Tern interpreter: evaluates AST nodes with a simple tree-walking
//! evaluator.
//!
//! The evaluator executes the tree the parser produced directly; there is
//! no bytecode or compilation stage. State lives in a scope stack owned by
//! the [`Evaluator`], so a single instance can evaluate a sequence of
//! modules incrementally, as the REPL does.

pub mod evaluator;

pub use evaluator::Evaluator;

#[cfg(test)]
mod tests {
    use super::*;
    use tern_parser::Parser;
    use tern_syntax::error::EvalError;

    fn eval_program(input: &str) -> Result<Option<i64>, String> {
        let module = Parser::new(input)
            .parse_module()
            .map_err(|e| format!("Parse error: {}", e))?;
        let mut evaluator = Evaluator::new();
        evaluator
            .eval_module(&module)
            .map_err(|e| format!("Runtime error: {}", e))
    }

    fn expect_value(input: &str, expected: i64) {
        match eval_program(input) {
            Ok(Some(actual)) => assert_eq!(actual, expected, "Program: {}", input),
            Ok(None) => panic!("Expected value but got none for: {}", input),
            Err(e) => panic!("Program failed: {}\nInput: {}", e, input),
        }
    }

    /// Feed `input` to an existing evaluator and return the last value.
    fn eval_more(evaluator: &mut Evaluator, input: &str) -> Result<Option<i64>, EvalError> {
        let module = Parser::new(input)
            .parse_module()
            .expect("parsing should succeed");
        evaluator.eval_module(&module)
    }

    #[test]
    fn test_literals_and_arithmetic() {
        expect_value("42;", 42);
        expect_value("1 + 2;", 3);
        expect_value("5 - 3;", 2);
        expect_value("4 * 6;", 24);
        expect_value("8 / 2;", 4);
    }

    #[test]
    fn test_operator_precedence() {
        expect_value("1 + 2 * 3;", 7);
        expect_value("2 * (1 + 2) * 3;", 18);
    }

    #[test]
    fn test_division_truncates() {
        expect_value("7 / 2;", 3);
        expect_value("(0 - 7) / 2;", -3);
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "1 / 0;").unwrap_err();
        assert_eq!(err, EvalError::DivisionByZero);
    }

    #[test]
    fn test_assignment_and_lookup() {
        expect_value("b = 2; b + 3;", 5);
    }

    #[test]
    fn test_lookup_is_idempotent() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "b = 2;").unwrap();
        assert_eq!(eval_more(&mut evaluator, "b + 3;").unwrap(), Some(5));
        assert_eq!(eval_more(&mut evaluator, "b + 3;").unwrap(), Some(5));
    }

    #[test]
    fn test_assignment_overwrites() {
        expect_value("a = 1; a = a + 1; a;", 2);
    }

    #[test]
    fn test_assignment_through_parens() {
        expect_value("(a) = 3; a;", 3);
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "nope;").unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("nope".to_string()));
    }

    #[test]
    fn test_function_round_trip() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "def func(a) { return a + 2; }").unwrap();
        assert_eq!(eval_more(&mut evaluator, "func(3);").unwrap(), Some(5));
        assert_eq!(eval_more(&mut evaluator, "func(func(3));").unwrap(), Some(7));
    }

    #[test]
    fn test_call_result_in_expression() {
        expect_value("def inc(a) { return a + 1; } inc(3) * 2;", 8);
    }

    #[test]
    fn test_call_scope_does_not_leak() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "def f() { x = 42; return 0; } f();").unwrap();
        let err = eval_more(&mut evaluator, "x;").unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("x".to_string()));
    }

    #[test]
    fn test_parameter_shadows_outer_binding() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "x = 1; def f(x) { return x; }").unwrap();
        assert_eq!(eval_more(&mut evaluator, "f(5);").unwrap(), Some(5));
        assert_eq!(eval_more(&mut evaluator, "x;").unwrap(), Some(1));
    }

    #[test]
    fn test_caller_bindings_visible_in_callee() {
        expect_value("base = 10; def bump(n) { return base + n; } bump(5);", 15);
    }

    #[test]
    fn test_return_short_circuits_remaining_stmts() {
        // boom() would fail if the statement after return were evaluated.
        expect_value("def f() { return 1; boom(); } f();", 1);
    }

    #[test]
    fn test_return_inside_if_branches() {
        let input = "def sign(n) { if n { return 1; } else { return 0; } } sign(7);";
        expect_value(input, 1);
        let input = "def sign(n) { if n { return 1; } else { return 0; } } sign(0);";
        expect_value(input, 0);
    }

    #[test]
    fn test_return_after_else_less_if() {
        let input = "def pick(n) { if n { return n; } return 99; }\npick(3);";
        expect_value(input, 3);
        let input = "def pick(n) { if n { return n; } return 99; }\npick(0);";
        expect_value(input, 99);
    }

    #[test]
    fn test_recursive_function() {
        let input = "def fact(n) { if n { return n * fact(n - 1); } else { return 1; } } fact(5);";
        expect_value(input, 120);
    }

    #[test]
    fn test_missing_return_rejected_and_not_registered() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "def f(a) { if a { return 1; } }").unwrap_err();
        assert_eq!(err, EvalError::MissingReturn("f".to_string()));
        // The failed definition must not be visible afterwards.
        let err = eval_more(&mut evaluator, "f(1);").unwrap_err();
        assert_eq!(err, EvalError::UndefinedFunction("f".to_string()));
    }

    #[test]
    fn test_missing_return_with_empty_body() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "def f() { 1; }").unwrap_err();
        assert_eq!(err, EvalError::MissingReturn("f".to_string()));
    }

    #[test]
    fn test_arity_mismatch() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "def add(a, b) { return a + b; }").unwrap();
        let err = eval_more(&mut evaluator, "add(1);").unwrap_err();
        assert_eq!(
            err,
            EvalError::ArityMismatch {
                name: "add".to_string(),
                expected: 2,
                got: 1,
            }
        );
    }

    #[test]
    fn test_unknown_function_call() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "ghost(1);").unwrap_err();
        assert_eq!(err, EvalError::UndefinedFunction("ghost".to_string()));
    }

    #[test]
    fn test_call_through_paren_callee_fails() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "def f() { return 1; }").unwrap();
        let err = eval_more(&mut evaluator, "(f)(1);").unwrap_err();
        assert_eq!(err, EvalError::CalleeNotCallable);
    }

    #[test]
    fn test_top_level_if_executes_branch() {
        expect_value("if 1 { 5; } 3;", 3);
        // Branch bodies run in their own scope, so bindings made inside
        // shadow rather than update the outer name.
        expect_value("a = 0; if 1 { a = 2; } a;", 0);
    }

    #[test]
    fn test_top_level_if_selects_else() {
        let mut evaluator = Evaluator::new();
        // The else branch assigning to an undefined name fails, proving it ran.
        let err = eval_more(&mut evaluator, "if 0 { 1; } else { ghost(); }").unwrap_err();
        assert_eq!(err, EvalError::UndefinedFunction("ghost".to_string()));
    }

    #[test]
    fn test_return_outside_function() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "return 1;").unwrap_err();
        assert_eq!(err, EvalError::ReturnOutsideFunction);
        let err = eval_more(&mut evaluator, "if 1 { return 5; }").unwrap_err();
        assert_eq!(err, EvalError::ReturnOutsideFunction);
    }

    #[test]
    fn test_error_stops_current_unit_only() {
        let mut evaluator = Evaluator::new();
        let err = eval_more(&mut evaluator, "a = 1; b = ghost; c = 2;").unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("ghost".to_string()));
        // Statements before the failure took effect; those after did not.
        assert_eq!(eval_more(&mut evaluator, "a;").unwrap(), Some(1));
        let err = eval_more(&mut evaluator, "c;").unwrap_err();
        assert_eq!(err, EvalError::UndefinedVariable("c".to_string()));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "a = 1; def f() { return 2; }").unwrap();
        assert_eq!(evaluator.var_names(), vec!["a".to_string()]);
        assert_eq!(evaluator.func_names(), vec!["f".to_string()]);
        evaluator.reset();
        assert!(evaluator.var_names().is_empty());
        assert!(evaluator.func_names().is_empty());
    }

    #[test]
    fn test_function_redefinition_shadows() {
        let mut evaluator = Evaluator::new();
        eval_more(&mut evaluator, "def f() { return 1; }").unwrap();
        eval_more(&mut evaluator, "def f() { return 2; }").unwrap();
        assert_eq!(eval_more(&mut evaluator, "f();").unwrap(), Some(2));
    }
}
