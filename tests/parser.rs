use cherie_lang::{
    compiler::{
        ast::*,
        error::{LexerError, ParseError},
        lexer::Lexer,
        parse,
        parser::Parser,
        token::TokenKind,
    },
    utils::Location,
};

fn first_stmt(input: &str) -> Stmt {
    match parse(input).unwrap().items.into_iter().next() {
        Some(Item::Stmt(stmt)) => stmt,
        item => panic!("expected a statement, found {item:?}"),
    }
}

fn first_expr(input: &str) -> Expr {
    match first_stmt(input) {
        Stmt::Expr(ExprStmt { expr, .. }) => expr,
        stmt => panic!("expected an expression statement, found {stmt:?}"),
    }
}

#[test]
fn test_integer_literal_round_trip() {
    for n in [0, 1, 42, 9_999_999_999, i64::MAX] {
        let program = Parser::new(Lexer::new(&format!("{n};"))).parse().unwrap();
        assert_eq!(
            program.items,
            vec![Item::Stmt(Stmt::Expr(ExprStmt {
                expr: Expr::Number(NumberLit {
                    value: Number::Int(n),
                    start: Location::new(1, 1),
                }),
                start: Location::new(1, 1),
            }))]
        );
    }
}

#[test]
fn test_precedence() {
    assert_eq!(first_expr("2 + 3 * 4;").to_string(), "(2 + (3 * 4))");
    assert_eq!(first_expr("2 * 3 + 4;").to_string(), "((2 * 3) + 4)");
    assert_eq!(first_expr("(1 + 2) * 3;").to_string(), "((1 + 2) * 3)");
    assert_eq!(
        first_expr("a or b and c == d + 1;").to_string(),
        "(a or (b and (c == (d + 1))))"
    );
}

#[test]
fn test_left_associative() {
    assert_eq!(first_expr("10 - 3 - 2;").to_string(), "((10 - 3) - 2)");
    assert_eq!(first_expr("8 / 4 / 2;").to_string(), "((8 / 4) / 2)");
    let Expr::Binary(outer) = first_expr("10 - 3 - 2;") else {
        panic!("expected a binary expression");
    };
    assert_eq!(outer.operator, BinOp::Sub);
    assert!(matches!(*outer.left, Expr::Binary(_)));
    assert!(matches!(*outer.right, Expr::Number(_)));
}

#[test]
fn test_unary() {
    assert_eq!(first_expr("-2 * 3;").to_string(), "((-2) * 3)");
    assert_eq!(first_expr("not a == b;").to_string(), "((not a) == b)");
    assert_eq!(first_expr("!x;").to_string(), "(not x)");
    assert_eq!(first_expr("- -x;").to_string(), "(-(-x))");
}

#[test]
fn test_literals() {
    assert_eq!(
        first_expr("'a';"),
        Expr::Str(StrLit {
            value: "a".into(),
            start: Location::new(1, 1),
        })
    );
    assert_eq!(first_expr("\"a\\tb\";").to_string(), "\"a\\tb\"");
    assert_eq!(first_expr("1.5;").to_string(), "1.5");
    assert_eq!(first_expr("0x10;").to_string(), "16");
    assert_eq!(first_expr("true;").to_string(), "true");
}

#[test]
fn test_call() {
    let Expr::Call(call) = first_expr("foo(1, a + 2);") else {
        panic!("expected a call");
    };
    assert_eq!(call.callee.name, "foo");
    assert_eq!(call.arguments.len(), 2);
    assert_eq!(call.arguments[1].to_string(), "(a + 2)");

    let Expr::Call(call) = first_expr("foo();") else {
        panic!("expected a call");
    };
    assert!(call.arguments.is_empty());

    assert!(matches!(first_expr("foo;"), Expr::Variable(_)));
}

#[test]
fn test_assign() {
    let Stmt::Assign(stmt) = first_stmt("let x = 1;") else {
        panic!("expected an assignment");
    };
    assert_eq!(stmt.name.name, "x");
    assert!(!stmt.immutable);

    let Stmt::Assign(stmt) = first_stmt("const y = x * 2;") else {
        panic!("expected an assignment");
    };
    assert!(stmt.immutable);
    assert_eq!(stmt.value.to_string(), "(x * 2)");
}

#[test]
fn test_update() {
    let cases = [
        ("x = 3;", None, "3"),
        ("x += 2;", Some(BinOp::Add), "2"),
        ("x -= y;", Some(BinOp::Sub), "y"),
        ("x *= 2;", Some(BinOp::Mul), "2"),
        ("x /= 2;", Some(BinOp::Div), "2"),
        ("x++;", Some(BinOp::Add), "1"),
        ("x--;", Some(BinOp::Sub), "1"),
    ];
    for (input, operator, value) in cases {
        let Stmt::Update(stmt) = first_stmt(input) else {
            panic!("expected an update for {input}");
        };
        assert_eq!(stmt.name.name, "x");
        assert_eq!(stmt.operator, operator, "{input}");
        assert_eq!(stmt.value.to_string(), value, "{input}");
    }
    // An identifier followed by an operator is still an expression.
    assert!(matches!(first_stmt("x - 1;"), Stmt::Expr(_)));
}

#[test]
fn test_if_chain() {
    let Stmt::If(stmt) =
        first_stmt("if (a) { b; } else if (c) { d; } else if (e) { } else { f; g; }")
    else {
        panic!("expected an if statement");
    };
    assert_eq!(stmt.test.to_string(), "a");
    assert_eq!(stmt.consequent.body.len(), 1);
    assert_eq!(stmt.else_ifs.len(), 2);
    assert_eq!(stmt.else_ifs[1].test.to_string(), "e");
    assert!(stmt.else_ifs[1].body.body.is_empty());
    assert_eq!(stmt.alternate.map(|block| block.body.len()), Some(2));

    let Stmt::If(stmt) = first_stmt("if (a) { b; }") else {
        panic!("expected an if statement");
    };
    assert!(stmt.else_ifs.is_empty());
    assert!(stmt.alternate.is_none());
}

#[test]
fn test_function() {
    let program = parse("fn main() {\n    let a = 1;\n    while (a == 1) { a += 1; }\n}\nmain();").unwrap();
    assert_eq!(program.items.len(), 2);
    let Item::Function(function) = &program.items[0] else {
        panic!("expected a function");
    };
    assert_eq!(function.name.name, "main");
    assert_eq!(function.start, Location::new(1, 1));
    assert_eq!(function.body.body.len(), 2);
    assert_eq!(function.body.body[1].start(), Location::new(3, 5));
    assert_eq!(program.functions().count(), 1);
}

#[test]
fn test_unexpected_token() {
    assert_eq!(
        parse("let = 5;"),
        Err(ParseError::UnexpectedToken {
            expected: vec![TokenKind::Ident],
            found: TokenKind::Assign,
            location: Location::new(1, 5),
        })
    );
    let err = parse("fn main { }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::UnexpectedToken {
            found: TokenKind::OpenBrace,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "unexpected token (expected (, found {) at 1:9"
    );
}

#[test]
fn test_unexpected_end_of_input() {
    assert_eq!(
        parse("let a = 1"),
        Err(ParseError::UnexpectedEndOfInput {
            expected: vec![TokenKind::Semi],
            location: Location::new(1, 10),
        })
    );
    assert!(matches!(
        parse("if (a) { let b = 1;"),
        Err(ParseError::UnexpectedEndOfInput { .. })
    ));
    assert!(matches!(
        parse("let a ="),
        Err(ParseError::UnexpectedEndOfInput { .. })
    ));
}

#[test]
fn test_unmatched_parenthesis() {
    assert_eq!(
        parse("x = (1 + 2;"),
        Err(ParseError::UnmatchedParenthesis {
            location: Location::new(1, 5)
        })
    );
    assert_eq!(
        parse("while (a { }"),
        Err(ParseError::UnmatchedParenthesis {
            location: Location::new(1, 7)
        })
    );
    assert!(matches!(
        parse("f(1, 2;"),
        Err(ParseError::UnmatchedParenthesis { .. })
    ));
}

#[test]
fn test_lexer_errors_propagate() {
    assert_eq!(
        parse("let a = @;"),
        Err(ParseError::Lexer(LexerError::UnknownSymbol {
            symbol: '@',
            location: Location::new(1, 9),
        }))
    );
    let err = parse("let s = \"open;").unwrap_err();
    assert_eq!(err.location(), Location::new(1, 9));
}

#[test]
fn test_idempotent() {
    let input = "
        fn tick() { count += 1; }
        let count = 0;
        while (not (count == 3)) { tick(); }
        if (count == 3) { \"done\"; } else { 'x'; }
    ";
    assert_eq!(parse(input), parse(input));
    assert!(parse(input).is_ok());
}

#[test]
fn test_printed_program_parses_back() {
    let input = "fn main(){let a=-1;a++;if(a==0){a*=2;}else if(a){}else{a=3;}}main();";
    let printed = parse(input).unwrap().to_string();
    assert_eq!(
        printed,
        "fn main() {
    let a = (-1);
    a += 1;
    if ((a == 0)) {
        a *= 2;
    } else if (a) {
    } else {
        a = 3;
    }
}
main();
"
    );
    assert_eq!(parse(&printed).unwrap().to_string(), printed);
}

#[test]
fn test_serialize() {
    let program = parse("let a = 1;").unwrap();
    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["items"][0]["Stmt"]["Assign"]["name"]["name"], "a");
    assert_eq!(
        json["items"][0]["Stmt"]["Assign"]["value"]["Number"]["value"]["Int"],
        1
    );
}
