//! Every translation failure kind, reached from source text.

use ccr::frontend::lexer::Lexer;
use ccr::frontend::parser::Parser;
use ccr::lowering::Lowerer;
use ccr::TranslationError;

fn translate_err(src: &str) -> TranslationError {
    let tokens = Lexer::new(src).tokenize().expect("lexing failed");
    let unit = Parser::new(tokens).parse().expect("parsing failed");
    Lowerer::new()
        .lower_unit(&unit)
        .expect_err("translation unexpectedly succeeded")
}

#[test]
fn struct_type_in_function_is_unsupported_specifier() {
    let err = translate_err("void f(void) { struct s x; }");
    assert!(matches!(err, TranslationError::UnsupportedTypeSpecifier { .. }), "{:?}", err);
}

#[test]
fn qualifier_is_unsupported_specifier() {
    let err = translate_err("void f(void) { const int x = 1; }");
    assert!(matches!(err, TranslationError::UnsupportedTypeSpecifier { .. }), "{:?}", err);
}

#[test]
fn inline_is_unsupported_specifier() {
    let err = translate_err("inline int f(void) { return 0; }");
    assert!(matches!(err, TranslationError::UnsupportedTypeSpecifier { .. }), "{:?}", err);
}

#[test]
fn extern_function_is_unsupported_storage() {
    let err = translate_err("extern int f(void) { return 0; }");
    assert!(matches!(err, TranslationError::UnsupportedStorageClass { .. }), "{:?}", err);
}

#[test]
fn register_local_is_unsupported_storage() {
    let err = translate_err("void f(void) { register int x; }");
    assert!(matches!(err, TranslationError::UnsupportedStorageClass { .. }), "{:?}", err);
}

#[test]
fn pointer_local_is_unsupported_declarator() {
    let err = translate_err("void f(void) { int *p; }");
    assert!(matches!(err, TranslationError::UnsupportedDeclarator { .. }), "{:?}", err);
}

#[test]
fn array_local_is_unsupported_declarator() {
    let err = translate_err("void f(void) { int a[10]; }");
    assert!(matches!(err, TranslationError::UnsupportedDeclarator { .. }), "{:?}", err);
}

#[test]
fn pointer_parameter_is_unsupported_declarator() {
    let err = translate_err("int f(int *p) { return 0; }");
    assert!(matches!(err, TranslationError::UnsupportedDeclarator { .. }), "{:?}", err);
}

#[test]
fn variadic_definition_is_unsupported_declarator() {
    let err = translate_err("int f(int a, ...) { return a; }");
    assert!(matches!(err, TranslationError::UnsupportedDeclarator { .. }), "{:?}", err);
}

#[test]
fn pointer_cast_is_unsupported_declarator() {
    let err = translate_err("int f(int x) { return (int *)x; }");
    assert!(matches!(err, TranslationError::UnsupportedDeclarator { .. }), "{:?}", err);
}

#[test]
fn string_literal_is_unsupported_expression() {
    let err = translate_err("void f(void) { \"hi\"; }");
    assert!(matches!(err, TranslationError::UnsupportedExpression { .. }), "{:?}", err);
}

#[test]
fn char_literal_is_unsupported_expression() {
    let err = translate_err("void f(void) { 'a'; }");
    assert!(matches!(err, TranslationError::UnsupportedExpression { .. }), "{:?}", err);
}

#[test]
fn do_while_is_unsupported_statement() {
    let err = translate_err("void f(int n) { do { n = 1; } while (n); }");
    assert!(matches!(err, TranslationError::UnsupportedStatement { .. }), "{:?}", err);
}

#[test]
fn switch_is_unsupported_statement() {
    let err = translate_err("void f(int n) { switch (n) { default: ; } }");
    assert!(matches!(err, TranslationError::UnsupportedStatement { .. }), "{:?}", err);
}

#[test]
fn goto_is_unsupported_statement() {
    let err = translate_err("void f(void) { goto out; out: ; }");
    assert!(matches!(err, TranslationError::UnsupportedStatement { .. }), "{:?}", err);
}

#[test]
fn for_with_step_is_unsupported_statement() {
    let err = translate_err("void f(void) { for (int i = 0; i < 10; i = i + 1) { } }");
    assert!(matches!(err, TranslationError::UnsupportedStatement { .. }), "{:?}", err);
}

#[test]
fn postfix_increment_is_unsupported_unary() {
    let err = translate_err("void f(int x) { x++; }");
    assert!(matches!(err, TranslationError::UnsupportedUnaryOperator { .. }), "{:?}", err);
}

#[test]
fn address_of_is_unsupported_unary() {
    let err = translate_err("void f(int x) { &x; }");
    assert!(matches!(err, TranslationError::UnsupportedUnaryOperator { .. }), "{:?}", err);
}

#[test]
fn dereference_is_unsupported_unary() {
    let err = translate_err("void f(int x) { *x; }");
    assert!(matches!(err, TranslationError::UnsupportedUnaryOperator { .. }), "{:?}", err);
}

#[test]
fn sizeof_is_unsupported_unary() {
    let err = translate_err("void f(int x) { sizeof x; }");
    assert!(matches!(err, TranslationError::UnsupportedUnaryOperator { .. }), "{:?}", err);
}

#[test]
fn undefined_variable_is_reported_with_name() {
    let err = translate_err("int f(void) { return missing; }");
    match err {
        TranslationError::UndefinedVariable { name, .. } => assert_eq!(name, "missing"),
        other => panic!("expected UndefinedVariable, got {:?}", other),
    }
}

#[test]
fn long_double_suffix_is_malformed_float() {
    let err = translate_err("double f(void) { return 1.5L; }");
    match err {
        TranslationError::MalformedFloat { lexeme, .. } => assert_eq!(lexeme, "1.5L"),
        other => panic!("expected MalformedFloat, got {:?}", other),
    }
}

#[test]
fn calling_a_non_function_is_reported() {
    let err = translate_err("int f(int x) { return x(); }");
    assert!(matches!(err, TranslationError::CalleeNotFunction { .. }), "{:?}", err);
}

#[test]
fn failure_spans_locate_the_offending_node() {
    let src = "int f(void) { return missing; }";
    let err = translate_err(src);
    let span = err.span();
    assert_eq!(&src[span.start as usize..span.end as usize], "missing");
}

#[test]
fn no_partial_items_for_failed_unit() {
    // The first function is fine, the second fails: the caller gets only
    // the error, never a partial item list.
    let src = "int ok(void) { return 1; } int bad(void) { return missing; }";
    let tokens = Lexer::new(src).tokenize().unwrap();
    let unit = Parser::new(tokens).parse().unwrap();
    assert!(Lowerer::new().lower_unit(&unit).is_err());
}
