//! End-to-end translation tests: C source text in, emitted Rust text out.

use ccr::frontend::lexer::Lexer;
use ccr::frontend::parser::Parser;
use ccr::lowering::Lowerer;
use ccr::rust_ast::printer;

fn translate(src: &str) -> String {
    let tokens = Lexer::new(src).tokenize().expect("lexing failed");
    let unit = Parser::new(tokens).parse().expect("parsing failed");
    let items = Lowerer::new().lower_unit(&unit).expect("translation failed");
    printer::print_unit(&items)
}

#[test]
fn arithmetic_promotion() {
    // A char operand is promoted to int before the addition.
    let out = translate("int f(void) { char a = 1; return a + 1; }");
    assert_eq!(
        out,
        "pub fn f() -> i32 {\n    let mut a: i8 = 1;\n    return (a as i32) + 1;\n}\n"
    );
}

#[test]
fn assignment_as_expression() {
    // The lvalue is borrowed once; the stored value is the block's result.
    let out = translate("int f(int x) { return (x = 5) + 1; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut x: i32) -> i32 {\n",
            "    return ({\n",
            "        let _tmp = &mut x;\n",
            "        *_tmp = 5;\n",
            "        *_tmp\n",
            "    }) + 1;\n",
            "}\n"
        )
    );
}

#[test]
fn comparison_produces_int() {
    let out = translate("int f(int a, int b) { return a < b; }");
    assert_eq!(
        out,
        "pub fn f(mut a: i32, mut b: i32) -> i32 {\n    return if a < b { 1 } else { 0 };\n}\n"
    );
}

#[test]
fn static_function_is_private() {
    let out = translate("static int g(void) { return 0; }");
    assert_eq!(out, "fn g() -> i32 {\n    return 0;\n}\n");
}

#[test]
fn for_loop_with_declared_counter() {
    let out = translate("void f(void) { for (int i = 0; i < 10; ) { } }");
    assert_eq!(
        out,
        concat!(
            "pub fn f() -> () {\n",
            "    ({\n",
            "        let mut i: i32 = 0;\n",
            "        while i < 10 {}\n",
            "    });\n",
            "}\n"
        )
    );
}

#[test]
fn for_loop_without_condition_is_unconditional() {
    let out = translate("void f(int n) { for (;;) { n = 1; } }");
    assert!(out.contains("loop {"), "expected an unconditional loop:\n{}", out);
    assert!(!out.contains("while"), "no while should be emitted:\n{}", out);
}

#[test]
fn recursive_call_resolves() {
    let out = translate("int fact(int n) { return n ? n * fact(n - 1) : 1; }");
    assert_eq!(
        out,
        "pub fn fact(mut n: i32) -> i32 {\n    return if n != 0 { n * fact(n - 1) } else { 1 };\n}\n"
    );
}

#[test]
fn logical_operators_short_circuit_on_bools() {
    let out = translate("int f(int a, int b) { return a && b; }");
    assert_eq!(
        out,
        "pub fn f(mut a: i32, mut b: i32) -> i32 {\n    return if (a != 0) && (b != 0) { 1 } else { 0 };\n}\n"
    );
}

#[test]
fn logical_not_round_trips_through_bool() {
    let out = translate("int f(int a) { return !a; }");
    assert_eq!(
        out,
        "pub fn f(mut a: i32) -> i32 {\n    return if !(a != 0) { 1 } else { 0 };\n}\n"
    );
}

#[test]
fn comparison_condition_peels_its_wrapper() {
    // The `a < b` wrapper is peeled inside the if condition instead of
    // being compared against zero.
    let out = translate("int f(int a, int b) { if (a < b) return 1; return 0; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut a: i32, mut b: i32) -> i32 {\n",
            "    if a < b {\n",
            "        return 1;\n",
            "    } else {}\n",
            "    return 0;\n",
            "}\n"
        )
    );
}

#[test]
fn while_condition_tests_nonzero() {
    let out = translate("void f(int n) { while (n) { n = n - 1; } }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut n: i32) -> () {\n",
            "    while n != 0 {\n",
            "        n = n - 1;\n",
            "    }\n",
            "}\n"
        )
    );
}

#[test]
fn mixed_signedness_uses_usual_conversions() {
    // int + unsigned int converts the int operand to unsigned int.
    let out = translate("int f(unsigned int u, int s) { return u + s; }");
    assert_eq!(
        out,
        "pub fn f(mut u: u32, mut s: i32) -> i32 {\n    return u + (s as u32);\n}\n"
    );
}

#[test]
fn long_long_translates_like_long() {
    let out = translate("long long f(long long a) { return a; }");
    assert_eq!(out, "pub fn f(mut a: isize) -> isize {\n    return a;\n}\n");
}

#[test]
fn word_width_dominates_narrower_unsigned() {
    let out = translate("long f(long a, unsigned int b) { return a + b; }");
    assert_eq!(
        out,
        "pub fn f(mut a: isize, mut b: u32) -> isize {\n    return a + (b as isize);\n}\n"
    );
}

#[test]
fn float_literals_keep_source_suffix_choice() {
    let out = translate("double f(void) { float x = 2.5f; return x + 1.5; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f() -> f64 {\n",
            "    let mut x: f32 = 2.5f32;\n",
            "    return (x as f64) + 1.5;\n",
            "}\n"
        )
    );
}

#[test]
fn explicit_cast_is_emitted() {
    let out = translate("int f(double d) { return (int)d; }");
    assert_eq!(out, "pub fn f(mut d: f64) -> i32 {\n    return d as i32;\n}\n");
}

#[test]
fn comma_expression_sequences_effects() {
    let out = translate("int f(int a) { return (a = 1, a + 2); }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut a: i32) -> i32 {\n",
            "    return {\n",
            "        a = 1;\n",
            "        a + 2\n",
            "    };\n",
            "}\n"
        )
    );
}

#[test]
fn pre_increment_is_compound_assignment() {
    let out = translate("void f(int x) { ++x; --x; x += 2; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut x: i32) -> () {\n",
            "    x += 1;\n",
            "    x -= 1;\n",
            "    x += 2;\n",
            "}\n"
        )
    );
}

#[test]
fn compound_assignment_as_value_borrows_once() {
    let out = translate("int f(int x) { return (x *= 3); }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut x: i32) -> i32 {\n",
            "    return {\n",
            "        let _tmp = &mut x;\n",
            "        *_tmp *= 3;\n",
            "        *_tmp\n",
            "    };\n",
            "}\n"
        )
    );
}

#[test]
fn unsupported_top_level_forms_are_skipped() {
    let out = translate(
        "int g(int);\n\
         int global = 42;\n\
         struct point { int x; int y; };\n\
         typedef int myint;\n\
         int f(void) { return 0; }\n",
    );
    assert_eq!(out, "pub fn f() -> i32 {\n    return 0;\n}\n");
}

#[test]
fn items_preserve_source_order() {
    let out = translate("int a(void) { return 1; } static int b(void) { return 2; }");
    let pos_a = out.find("pub fn a").expect("missing a");
    let pos_b = out.find("fn b").expect("missing b");
    assert!(pos_a < pos_b);
}

#[test]
fn call_arguments_are_value_translated() {
    let out = translate(
        "int add(int a, int b) { return a + b; }\n\
         int f(char c) { return add(c, 1); }",
    );
    assert!(
        out.contains("return add(c, 1);"),
        "arguments are passed without parameter conversion:\n{}",
        out
    );
}

#[test]
fn shadowing_in_nested_scopes() {
    let out = translate("int f(int x) { { char x; x = 1; } return x; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut x: i32) -> i32 {\n",
            "    {\n",
            "        let mut x: i8;\n",
            "        x = 1;\n",
            "    }\n",
            "    return x;\n",
            "}\n"
        )
    );
}

#[test]
fn empty_statement_is_empty_block() {
    let out = translate("void f(void) { ; }");
    assert_eq!(out, "pub fn f() -> () {\n    {}\n}\n");
}

#[test]
fn conditional_arms_convert_to_common_type() {
    let out = translate("double f(int c, float x) { return c ? x : 1.5; }");
    assert_eq!(
        out,
        concat!(
            "pub fn f(mut c: i32, mut x: f32) -> f64 {\n",
            "    return if c != 0 { x as f64 } else { 1.5 };\n",
            "}\n"
        )
    );
}
