/// End-to-end recognition tests over whole functions

use agar_parser::{
    matched_terminals, parse, parse_with, Descent, Grammar, Lexer, NonTerminal, NullSink,
    ParseError, ParseEvent, Parser, Recovery, TerminalKind,
};

fn accepts(source: &str) {
    if let Err(err) = parse(source) {
        panic!("expected `{}` to be accepted, got: {}", source, err);
    }
}

fn rejects(source: &str) -> ParseError {
    match parse(source) {
        Ok(summary) => panic!("expected `{}` to be rejected, got {:?}", source, summary),
        Err(err) => err,
    }
}

#[test]
fn test_empty_body() {
    let summary = parse("int x < int y > { }").unwrap();
    assert_eq!(summary.tokens, 8);
}

#[test]
fn test_missing_closing_angle() {
    let err = rejects("int x < int y { }");
    assert_eq!(err.expected(), Some(TerminalKind::Gt));
    assert!(err.to_string().starts_with("expected `>` but found `{`"));
}

#[test]
fn test_for_statement() {
    accepts("int f < int a > { for < a ; a ; a > ; }");
}

#[test]
fn test_for_with_empty_clauses() {
    accepts("int f < int a > { for < a ; ; > ; }");
    accepts("int f < int a > { for < a ; ; a + 1 > { a ; } }");
}

#[test]
fn test_agar_without_magar() {
    accepts("int f < int a > { agar < a > ; }");
}

#[test]
fn test_agar_with_magar() {
    accepts("int f < int a > { agar < a > ; magar ; }");
}

#[test]
fn test_magar_binds_to_innermost_agar() {
    let mut events = Vec::new();
    parse_with(
        "int f < int a > { agar < a > agar < a > ; magar ; }",
        &mut events,
    )
    .unwrap();

    // The inner IfStmt takes the `magar`; the outer one gets the empty part.
    let grammar = Grammar::shared().unwrap();
    let magar_parts: Vec<bool> = events
        .iter()
        .filter_map(|event| match event {
            ParseEvent::Expanded {
                non_terminal: NonTerminal::MagarPart,
                production,
                ..
            } => Some(grammar.production(*production).is_epsilon()),
            _ => None,
        })
        .collect();
    assert_eq!(magar_parts, vec![false, true]);
}

#[test]
fn test_loop_statement() {
    accepts("int f < int a > { loop < a < 10 > { a + 1 ; } }");
}

#[test]
fn test_nested_compound_statements() {
    accepts("int f < int a > { { ; } }");
    accepts("int f < int a > { { { { ; } } ; } { } }");
}

#[test]
fn test_declarations() {
    accepts("float f < int a > { int x ; float y , z , w ; }");
}

#[test]
fn test_declaration_requires_identifier() {
    // `;` follows IdentList, so the parse gets past the missing declarator
    // but still rejects.
    for source in ["int f < int a > { int ; }", "int f < int a > { int a , ; }"] {
        match rejects(source) {
            ParseError::Recovered { non_terminal, found } => {
                assert_eq!(non_terminal, NonTerminal::IdentList, "`{}`", source);
                assert_eq!(found.kind, TerminalKind::Semicolon);
            }
            other => panic!("expected Recovered for `{}`, got {:?}", source, other),
        }
    }

    let err = rejects("int f < int a > { int , x ; }");
    assert!(matches!(err, ParseError::Unrecoverable { .. }));
    assert_eq!(err.non_terminal(), Some(NonTerminal::IdentList));
}

#[test]
fn test_empty_input_is_rejected() {
    let err = rejects("");
    assert_eq!(err.non_terminal(), Some(NonTerminal::Function));
    assert!(err.found().is_some_and(|f| f.kind == TerminalKind::End));
}

#[test]
fn test_empty_argument_list_is_rejected() {
    let err = rejects("int f < > { }");
    assert_eq!(err.non_terminal(), Some(NonTerminal::ArgList));
}

#[test]
fn test_multiple_arguments() {
    accepts("int f < int a , float b , int c > { }");
}

#[test]
fn test_expressions() {
    accepts("int f < int a > { a * <b + 3> / c - 4 <= 10 ; }");
    accepts("int f < int a > { a != b ; a == <b> ; 7 ; }");
    accepts("int f < int a > { <<<a>>> ; }");
}

#[test]
fn test_chained_comparison_is_rejected() {
    let err = rejects("int f < int a > { a < b < c ; }");
    assert_eq!(err.expected(), Some(TerminalKind::Semicolon));
    assert_eq!(err.found().map(|f| f.kind), Some(TerminalKind::Lt));
}

#[test]
fn test_greater_than_closes_the_group() {
    // `>` is never read as a comparison, so it cannot end a statement.
    let err = rejects("int f < int a > { a > b ; }");
    assert_eq!(err.expected(), Some(TerminalKind::Semicolon));
    assert_eq!(err.found().map(|f| f.kind), Some(TerminalKind::Gt));
}

#[test]
fn test_keyword_prefix_is_identifier() {
    accepts("int agarwal < int magarmach > { agarwal ; formula ; loops ; }");
}

#[test]
fn test_invalid_character() {
    let err = rejects("int f < int a > { a = 1 ; }");
    assert!(err.is_lexical());
    assert_eq!(err.found().map(|f| f.lexeme.as_str()), Some("="));
}

#[test]
fn test_error_position() {
    let err = rejects("int f < int a >\n{\n    a +\n}");
    let found = err.found().unwrap();
    assert_eq!(found.kind, TerminalKind::RBrace);
    assert_eq!((found.span.line, found.span.column), (4, 1));
}

#[test]
fn test_follow_recovery_is_reported_then_rejected() {
    let mut events = Vec::new();
    let err = parse_with("int f < int a > { agar < a > magar ; }", &mut events).unwrap_err();
    assert_eq!(err.non_terminal(), Some(NonTerminal::Stmt));
    assert_eq!(events.last(), Some(&ParseEvent::Rejected(err)));
    assert!(events.iter().any(|event| matches!(
        event,
        ParseEvent::Recovered {
            non_terminal: NonTerminal::Stmt,
            recovery: Recovery::Follow,
            ..
        }
    )));
}

fn has_follow_recovery(events: &[ParseEvent]) -> bool {
    events.iter().any(|event| {
        matches!(
            event,
            ParseEvent::Recovered {
                recovery: Recovery::Follow,
                ..
            }
        )
    })
}

/// Both recognizers reach the same verdict; wherever the table parser never
/// leans on FOLLOW they also match the same terminals and fail the same way.
#[test]
fn test_descent_agrees_with_table() {
    let inputs = [
        "int x < int y > { }",
        "int x < int y { }",
        "int f < int a > { for < a ; a ; a > ; }",
        "int f < int a > { agar < a > ; magar { a ; } }",
        "int f < int a > { loop < <a> * 2 >= b > ; }",
        "int f < int a , float b > { float c , d ; c != d ; }",
        "int f < int a > { a + }",
        "int f < int a > { a < b < c ; }",
        "int f < int a > { a > b ; }",
        "int f < int a > { a @ b ; }",
        "int f < int a > { } ;",
        "int f < int a > {",
        "int f < > { }",
        "int f < int a > { for < ; ; > ; }",
        "float < int a > { }",
        "; int f",
        "int f < int a > { int ; }",
        "int f < int a > { int a , ; }",
        "",
        "int f < int a > { agar < a > agar < a > ; magar ; }",
    ];

    let grammar = Grammar::shared().unwrap();
    let table = Parser::new(grammar);
    let descent = Descent::new(grammar);
    let mut compared = 0;

    for input in inputs {
        let mut table_events = Vec::new();
        let table_result = table.parse(Lexer::new(input), &mut table_events);
        let mut descent_events = Vec::new();
        let descent_result = descent.recognize(Lexer::new(input), &mut descent_events);

        assert_eq!(
            table_result.is_ok(),
            descent_result.is_ok(),
            "verdicts differ for `{}`",
            input
        );
        if has_follow_recovery(&table_events) {
            continue;
        }

        assert_eq!(
            matched_terminals(&table_events),
            matched_terminals(&descent_events),
            "matched terminals differ for `{}`",
            input
        );
        match (table_result, descent_result) {
            (Ok(summary), Ok(matched)) => assert_eq!(summary.tokens, matched, "`{}`", input),
            (Err(a), Err(b)) => assert_eq!(a, b, "`{}`", input),
            (a, b) => panic!("verdicts differ for `{}`: {:?} vs {:?}", input, a, b),
        }
        compared += 1;
    }

    assert!(compared >= 15, "only {} inputs compared", compared);
}

#[test]
fn test_both_reject_what_table_recovers() {
    let grammar = Grammar::shared().unwrap();
    let source = "int f < int a > { agar < a > magar ; }";
    assert!(Parser::new(grammar).parse(Lexer::new(source), &mut NullSink).is_err());
    assert!(Descent::new(grammar).recognize(Lexer::new(source), &mut NullSink).is_err());
}
