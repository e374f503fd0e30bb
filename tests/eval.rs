use cherie_lang::{
    compiler::parse,
    eval::{EvalError, Interpreter, Value, MAX_CALL_DEPTH},
    utils::Location,
    Error,
};

fn eval(input: &str) -> Result<Value, EvalError> {
    Interpreter::new().run(&parse(input).unwrap())
}

#[test]
fn test_arithmetic() {
    assert_eq!(eval("2 + 3 * 4;"), Ok(Value::Int(14)));
    assert_eq!(eval("10 - 3 - 2;"), Ok(Value::Int(5)));
    assert_eq!(eval("(2 + 3) * 4;"), Ok(Value::Int(20)));
    assert_eq!(eval("7 / 2;"), Ok(Value::Int(3)));
    assert_eq!(eval("-(2 + 3);"), Ok(Value::Int(-5)));
    assert_eq!(eval("1 + 0.5;"), Ok(Value::Float(1.5)));
    assert_eq!(eval("3.0 / 2;"), Ok(Value::Float(1.5)));
}

#[test]
fn test_strings_and_booleans() {
    assert_eq!(eval("\"ab\" + 'c';"), Ok(Value::Str("abc".into())));
    assert_eq!(eval("\"a\" == \"a\";"), Ok(Value::Bool(true)));
    assert_eq!(eval("1 == 1.0;"), Ok(Value::Bool(false)));
    assert_eq!(eval("not true;"), Ok(Value::Bool(false)));
    assert_eq!(eval("true and not false or false;"), Ok(Value::Bool(true)));
}

#[test]
fn test_short_circuit() {
    assert_eq!(eval("false and missing;"), Ok(Value::Bool(false)));
    assert_eq!(eval("true or missing();"), Ok(Value::Bool(true)));
    assert!(matches!(
        eval("true and missing;"),
        Err(EvalError::UndefinedVariable { .. })
    ));
}

#[test]
fn test_result_is_last_expression() {
    assert_eq!(eval("1; 2; let a = 3;"), Ok(Value::Int(2)));
    assert_eq!(eval("let a = 3;"), Ok(Value::Unit));
    assert_eq!(eval(""), Ok(Value::Unit));
}

#[test]
fn test_bindings() {
    assert_eq!(eval("let a = 1; let a = a + 1; a;"), Ok(Value::Int(2)));
    assert_eq!(
        eval("let x = 10; x += 5; x -= 3; x *= 2; x /= 4; x++; x++; x--; x;"),
        Ok(Value::Int(7))
    );
    assert_eq!(eval("let s = \"a\"; s += \"b\"; s;"), Ok(Value::Str("ab".into())));
}

#[test]
fn test_constants() {
    assert_eq!(
        eval("const limit = 3;\nlimit = 4;"),
        Err(EvalError::AssignToConstant {
            name: "limit".into(),
            location: Location::new(2, 1),
        })
    );
    assert!(matches!(
        eval("const c = 1; c++;"),
        Err(EvalError::AssignToConstant { .. })
    ));
    // Shadowing a constant with a new binding is allowed.
    assert_eq!(eval("const c = 1; let c = 2; c += 1; c;"), Ok(Value::Int(3)));
}

#[test]
fn test_undefined_variable() {
    assert_eq!(
        eval("a + 1;"),
        Err(EvalError::UndefinedVariable {
            name: "a".into(),
            location: Location::new(1, 1),
        })
    );
    assert!(matches!(
        eval("b = 1;"),
        Err(EvalError::UndefinedVariable { .. })
    ));
}

#[test]
fn test_block_scopes() {
    assert_eq!(
        eval("let a = 1; if (true) { let b = 2; a = a + b; } a;"),
        Ok(Value::Int(3))
    );
    assert!(matches!(
        eval("if (true) { let b = 2; } b;"),
        Err(EvalError::UndefinedVariable { .. })
    ));
    assert_eq!(
        eval("let a = 1; if (true) { let a = 5; a++; } a;"),
        Ok(Value::Int(1))
    );
}

#[test]
fn test_control_flow() {
    assert_eq!(
        eval("let i = 0; let sum = 0; while (not (i == 10)) { i++; sum += i; } sum;"),
        Ok(Value::Int(55))
    );
    let classify = |n: i64| {
        eval(&format!(
            "let n = {n}; let r = \"\";
             if (n == 0) {{ r = \"zero\"; }}
             else if (n == 1) {{ r = \"one\"; }}
             else {{ r = \"many\"; }}
             r;"
        ))
    };
    assert_eq!(classify(0), Ok(Value::Str("zero".into())));
    assert_eq!(classify(1), Ok(Value::Str("one".into())));
    assert_eq!(classify(7), Ok(Value::Str("many".into())));
}

#[test]
fn test_condition_must_be_bool() {
    assert!(matches!(
        eval("if (1) { }"),
        Err(EvalError::TypeMismatch { .. })
    ));
    assert!(matches!(
        eval("while (\"yes\") { }"),
        Err(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn test_functions() {
    assert_eq!(
        eval("let counter = 0; bump(); bump(); counter; fn bump() { counter += 1; }"),
        Ok(Value::Int(2))
    );
    assert_eq!(eval("fn f() { 42; } f();"), Ok(Value::Unit));
    // The body sees globals, not the caller's locals.
    assert!(matches!(
        eval("fn f() { x; } if (true) { let x = 1; f(); }"),
        Err(EvalError::UndefinedVariable { .. })
    ));
    // Locals of a call do not leak.
    assert!(matches!(
        eval("fn f() { let y = 1; } f(); y;"),
        Err(EvalError::UndefinedVariable { .. })
    ));
}

#[test]
fn test_call_errors() {
    assert_eq!(
        eval("print(1);"),
        Err(EvalError::UndefinedFunction {
            name: "print".into(),
            location: Location::new(1, 1),
        })
    );
    assert_eq!(
        eval("fn f() { } f(1, 2);"),
        Err(EvalError::ArityMismatch {
            name: "f".into(),
            expected: 0,
            found: 2,
            location: Location::new(1, 12),
        })
    );
    assert!(matches!(
        eval("fn f() { } fn f() { }"),
        Err(EvalError::DuplicateFunction { .. })
    ));
}

#[test]
fn test_recursion_limit() {
    let mut interpreter = Interpreter::new();
    let program = parse("let depth = 0; fn f() { depth++; f(); } f();").unwrap();
    assert!(matches!(
        interpreter.run(&program),
        Err(EvalError::StackOverflow { .. })
    ));
    let depth = interpreter.env().get("depth").map(|b| b.value.clone());
    assert_eq!(depth, Some(Value::Int(MAX_CALL_DEPTH as i64)));
}

#[test]
fn test_arithmetic_errors() {
    assert!(matches!(
        eval("9223372036854775807 + 1;"),
        Err(EvalError::Overflow { .. })
    ));
    assert!(matches!(
        eval("-(-9223372036854775807 - 1);"),
        Err(EvalError::Overflow { .. })
    ));
    assert_eq!(
        eval("1 / 0;"),
        Err(EvalError::DivisionByZero {
            location: Location::new(1, 1)
        })
    );
    assert!(matches!(
        eval("1.5 / 0;"),
        Err(EvalError::DivisionByZero { .. })
    ));
    let err = eval("1 + true;").unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported operand type(s) for +: int and bool at 1:1"
    );
    assert!(matches!(
        eval("-\"s\";"),
        Err(EvalError::TypeMismatch { .. })
    ));
}

#[test]
fn test_globals() {
    let mut interpreter = Interpreter::new();
    let program = parse("let b = 2; const a = 1; if (true) { let hidden = 0; }").unwrap();
    interpreter.run(&program).unwrap();
    let globals: Vec<_> = interpreter
        .env()
        .globals()
        .map(|(name, binding)| (name.to_string(), binding.immutable))
        .collect();
    assert_eq!(
        globals,
        [("b".to_owned(), false), ("a".to_owned(), true)]
    );
    assert_eq!(interpreter.env().depth(), 1);
}

#[test]
fn test_run() {
    assert_eq!(cherie_lang::run("let a = 2; a * 21;"), Ok(Value::Int(42)));
    assert!(matches!(
        cherie_lang::run("let;"),
        Err(Error::Parse(_))
    ));
    assert!(matches!(
        cherie_lang::run("x;"),
        Err(Error::Eval(EvalError::UndefinedVariable { .. }))
    ));
}

#[test]
fn test_interpreter_runs_programs_in_sequence() {
    let mut interpreter = Interpreter::new();
    let first = parse("fn f() { n++; } let n = 1; f(); n;").unwrap();
    assert_eq!(interpreter.run(&first), Ok(Value::Int(2)));

    // Redefining `f` is allowed, the old definition is gone.
    let second = parse("fn f() { n *= 10; } f(); n;").unwrap();
    assert_eq!(interpreter.run(&second), Ok(Value::Int(20)));

    let third = parse("n;").unwrap();
    assert_eq!(interpreter.run(&third), Ok(Value::Int(20)));
    assert!(matches!(
        interpreter.run(&parse("f();").unwrap()),
        Err(EvalError::UndefinedFunction { .. })
    ));
}
